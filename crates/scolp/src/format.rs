//! Value formatting and padding.
//!
//! A format template holds at most one `{...}` slot with optional literal
//! text around it (`{{`/`}}` escape literal braces):
//!
//! - `{}` — plain string conversion
//! - `{:,}` — thousands grouping; `{:,.3f}` / `{:.1f}` — fixed precision
//!   (integers render as floats, so `{:,.3f}` turns `5` into `"5.000"`)
//! - `{:%H:%M:%S}` — strftime applied to timestamp values
//! - `"{:,} B"`, `"{:,.1f} kB/s"` — literal prefix/suffix text around a slot
//!
//! Any mismatch between template and value (numeric spec on text, strftime
//! on a number, an unparseable template) falls back to the value's plain
//! string form with `" (FMT_ERR)"` appended. Formatting never aborts the
//! stream.

use console::measure_text_width;
use std::fmt::Write as _;

use crate::column::{Alignment, Column, ColumnDefaults, Resolved};
use crate::value::{Number, Value};

/// Why a template could not be applied; always recovered into the
/// `" (FMT_ERR)"` fallback by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormatError {
    /// The template itself does not parse (unbalanced braces, two slots,
    /// an unrecognized spec).
    Malformed,
    /// The spec does not apply to the value's runtime type.
    Incompatible,
}

#[derive(Debug, Clone, PartialEq)]
enum Spec {
    /// `{}` — plain string conversion.
    Plain,
    /// `{:,}`, `{:.3f}`, `{:,.1f}` — numeric grouping/precision.
    Number {
        grouping: bool,
        precision: Option<usize>,
    },
    /// `{:%...}` — strftime, timestamps only.
    Strftime(String),
}

#[derive(Debug, Clone, PartialEq)]
struct Template {
    prefix: String,
    spec: Option<Spec>,
    suffix: String,
}

impl Template {
    fn parse(template: &str) -> Option<Template> {
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut spec = None;
        let mut seen_slot = false;

        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            let text = if seen_slot { &mut suffix } else { &mut prefix };
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    text.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    text.push('}');
                }
                '{' => {
                    if seen_slot {
                        return None;
                    }
                    let mut body = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') | None => return None,
                            Some(ch) => body.push(ch),
                        }
                    }
                    spec = Some(parse_slot(&body)?);
                    seen_slot = true;
                }
                '}' => return None,
                ch => text.push(ch),
            }
        }

        Some(Template {
            prefix,
            spec,
            suffix,
        })
    }
}

fn parse_slot(body: &str) -> Option<Spec> {
    let (index, spec) = match body.split_once(':') {
        Some((index, spec)) => (index, Some(spec)),
        None => (body, None),
    };
    // Only a positional index is meaningful before the colon, and there is
    // exactly one argument anyway.
    if !index.is_empty() && !index.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match spec {
        None | Some("") => Some(Spec::Plain),
        Some(s) if s.starts_with('%') => Some(Spec::Strftime(s.to_string())),
        Some(s) => parse_number_spec(s),
    }
}

/// Grammar: `[,][.N][f|d]`, all parts optional but nothing else allowed.
fn parse_number_spec(s: &str) -> Option<Spec> {
    let mut rest = s;
    let grouping = match rest.strip_prefix(',') {
        Some(r) => {
            rest = r;
            true
        }
        None => false,
    };
    let mut precision = None;
    if let Some(r) = rest.strip_prefix('.') {
        let digits: String = r.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return None;
        }
        precision = Some(digits.parse().ok()?);
        rest = &r[digits.len()..];
    }
    match rest {
        "" | "f" => {}
        "d" if precision.is_none() => {}
        _ => return None,
    }
    Some(Spec::Number {
        grouping,
        precision,
    })
}

/// Applies a format template to a value.
pub(crate) fn apply_format(template: &str, value: &Value) -> Result<String, FormatError> {
    let template = Template::parse(template).ok_or(FormatError::Malformed)?;
    let rendered = match &template.spec {
        // No slot at all: the template is literal text.
        None => String::new(),
        Some(Spec::Plain) => value.to_string(),
        Some(Spec::Number {
            grouping,
            precision,
        }) => {
            let n = value.as_number().ok_or(FormatError::Incompatible)?;
            render_number(n, *grouping, *precision)
        }
        Some(Spec::Strftime(spec)) => {
            let Value::Timestamp(dt) = value else {
                return Err(FormatError::Incompatible);
            };
            let mut out = String::new();
            // chrono reports invalid directives through fmt::Error.
            write!(out, "{}", dt.format(spec)).map_err(|_| FormatError::Incompatible)?;
            out
        }
    };
    Ok(format!("{}{}{}", template.prefix, rendered, template.suffix))
}

fn render_number(n: Number, grouping: bool, precision: Option<usize>) -> String {
    let base = match precision {
        Some(p) => format!("{:.*}", p, n.to_f64()),
        None => n.to_string(),
    };
    if grouping {
        group_thousands(&base)
    } else {
        base
    }
}

/// Inserts `,` every three digits in the integer part, preserving sign and
/// fraction. Non-decimal renderings (NaN, inf) pass through unchanged.
fn group_thousands(s: &str) -> String {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int_part, frac) = match rest.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (rest, None),
    };
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return s.to_string();
    }

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(s.len() + digits.len() / 3);
    grouped.push_str(sign);
    for (i, b) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*b as char);
    }
    if let Some(frac) = frac {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

/// Pads `text` into `col`, growing the column's effective width.
///
/// Effective width is the max of the resolved width and the text's display
/// width, persisted back onto the column (never onto the defaults) so the
/// column only ever widens. `original` drives `Auto` alignment; pass `None`
/// for non-value contexts such as header titles, which align left.
pub(crate) fn pad_into_column(
    col: &mut Column,
    defaults: &ColumnDefaults,
    text: &str,
    original: Option<&Value>,
) -> String {
    let resolved = Resolved::new(col, defaults);
    let min_width = resolved.width();
    let fill = resolved.pad_fill_char();
    let mut align = resolved.pad_align();

    let text_width = measure_text_width(text);
    let width = min_width.max(text_width);
    col.width = Some(width);

    if text_width == width {
        return text.to_string();
    }

    if align == Alignment::Auto {
        align = match original {
            Some(v) if v.is_numeric() => Alignment::Right,
            _ => Alignment::Left,
        };
    }

    let pad = width - text_width;
    let mut out = String::with_capacity(text.len() + pad * fill.len_utf8());
    match align {
        Alignment::Right => {
            out.extend(std::iter::repeat(fill).take(pad));
            out.push_str(text);
        }
        Alignment::Center => {
            let left = pad / 2;
            out.extend(std::iter::repeat(fill).take(left));
            out.push_str(text);
            out.extend(std::iter::repeat(fill).take(pad - left));
        }
        Alignment::Left | Alignment::Auto => {
            out.push_str(text);
            out.extend(std::iter::repeat(fill).take(pad));
        }
    }
    out
}

/// Formats one value into a column: template selection, application with
/// `" (FMT_ERR)"` recovery, then padding with width growth.
pub(crate) fn format_cell(col: &mut Column, defaults: &ColumnDefaults, value: &Value) -> String {
    let template = {
        let resolved = Resolved::new(col, defaults);
        resolved
            .format()
            .map(str::to_string)
            .or_else(|| resolved.type_formats().lookup(value).map(str::to_string))
    };

    let rendered = match template {
        None => value.to_string(),
        Some(t) => {
            apply_format(&t, value).unwrap_or_else(|_| format!("{} (FMT_ERR)", value))
        }
    };

    pad_into_column(col, defaults, &rendered, Some(value))
}
