//! Column configuration: per-column overrides and the shared defaults.
//!
//! A [`Column`] only records what the caller explicitly set; every field is an
//! `Option` whose `None` means "this column says nothing". [`ColumnDefaults`]
//! is the resolution floor with every field required, so a lookup can never
//! come up empty — the fallback invariant is enforced by the type system
//! rather than checked at print time.

use serde::{Deserialize, Serialize};

use crate::value::{Value, ValueKind};

/// Text alignment within a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left-align (pad on the right).
    Left,
    /// Right-align (pad on the left).
    Right,
    /// Center (pad on both sides, extra cell on the right).
    Center,
    /// Right for numeric values, left for everything else — including
    /// contexts with no originating value, such as header titles.
    #[default]
    Auto,
}

/// Where column titles appear in the output stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleMode {
    /// Print each column's title immediately before its value on every row.
    Inline,
    /// Print a separate header block, repeated periodically.
    #[default]
    Header,
    /// No titles at all.
    None,
}

/// Insertion-ordered mapping from [`ValueKind`] tags to format templates.
///
/// Lookup tests tags in registration order and takes the first match, so a
/// broad tag registered early shadows narrower tags registered later.
///
/// # Example
///
/// ```
/// use scolp::{TypeFormats, Value, ValueKind};
///
/// let formats = TypeFormats::new()
///     .with(ValueKind::Int, "{:,}")
///     .with(ValueKind::Float, "{:,.3f}");
///
/// assert_eq!(formats.lookup(&Value::from(5)), Some("{:,}"));
/// assert_eq!(formats.lookup(&Value::from(0.5)), Some("{:,.3f}"));
/// assert_eq!(formats.lookup(&Value::from("text")), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeFormats(Vec<(ValueKind, String)>);

impl TypeFormats {
    /// Creates an empty map.
    pub fn new() -> Self {
        TypeFormats(Vec::new())
    }

    /// Registers a format for a kind, consuming and returning the map.
    pub fn with(mut self, kind: ValueKind, format: impl Into<String>) -> Self {
        self.register(kind, format);
        self
    }

    /// Registers a format for a kind.
    ///
    /// Re-registering an existing kind replaces its template in place,
    /// keeping the original position in the match order.
    pub fn register(&mut self, kind: ValueKind, format: impl Into<String>) -> &mut Self {
        let format = format.into();
        match self.0.iter_mut().find(|(k, _)| *k == kind) {
            Some(entry) => entry.1 = format,
            None => self.0.push((kind, format)),
        }
        self
    }

    /// Returns the first registered format whose kind matches `value`.
    pub fn lookup(&self, value: &Value) -> Option<&str> {
        self.0
            .iter()
            .find(|(kind, _)| kind.matches(value))
            .map(|(_, format)| format.as_str())
    }

    /// Returns `true` if no formats are registered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Configuration overrides for one column position.
///
/// `width` doubles as mutable state: once values have been formatted into the
/// column it holds the running maximum rendered width and never shrinks.
///
/// # Example
///
/// ```
/// use scolp::{Alignment, Column};
///
/// let col = Column::new("speed")
///     .width(14)
///     .align(Alignment::Right)
///     .format("{:,.1f} kB/s");
/// assert_eq!(col.title, "speed");
/// assert_eq!(col.width, Some(14));
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Column {
    /// Column title, shown inline or in the header block.
    pub title: String,
    /// Explicit format template, overriding type-based selection.
    pub format: Option<String>,
    /// Minimum width; grows to fit the widest rendered value.
    pub width: Option<usize>,
    /// Separator between title and value in inline mode.
    pub title_value_separator: Option<String>,
    /// Padding fill character.
    pub pad_fill_char: Option<char>,
    /// Padding alignment.
    pub pad_align: Option<Alignment>,
    /// Separator printed after this column (except at end of row).
    pub column_separator: Option<String>,
    /// Column-local type-to-format map.
    pub type_formats: Option<TypeFormats>,
}

impl Column {
    /// Creates a column with the given title and no overrides.
    pub fn new(title: impl Into<String>) -> Self {
        Column {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set an explicit format template.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the minimum width.
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the padding alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.pad_align = Some(align);
        self
    }

    /// Right-align (shorthand for `.align(Alignment::Right)`).
    pub fn right(self) -> Self {
        self.align(Alignment::Right)
    }

    /// Left-align (shorthand for `.align(Alignment::Left)`).
    pub fn left(self) -> Self {
        self.align(Alignment::Left)
    }

    /// Center (shorthand for `.align(Alignment::Center)`).
    pub fn center(self) -> Self {
        self.align(Alignment::Center)
    }

    /// Set the padding fill character.
    pub fn fill_char(mut self, fill: char) -> Self {
        self.pad_fill_char = Some(fill);
        self
    }

    /// Set the separator printed after this column.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.column_separator = Some(separator.into());
        self
    }

    /// Set the inline title-to-value separator.
    pub fn title_value_separator(mut self, separator: impl Into<String>) -> Self {
        self.title_value_separator = Some(separator.into());
        self
    }

    /// Set a column-local type-to-format map.
    pub fn type_formats(mut self, formats: TypeFormats) -> Self {
        self.type_formats = Some(formats);
        self
    }
}

/// Fallback values supplying whatever a [`Column`] leaves unset.
///
/// Every resolvable parameter is a required field. `format` is the one
/// legitimately optional default: `None` means "no explicit template, use
/// the type-to-format map".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefaults {
    /// Minimum column width.
    pub width: usize,
    /// Explicit format applied to every column, if any.
    pub format: Option<String>,
    /// Inline title-to-value separator.
    pub title_value_separator: String,
    /// Padding fill character.
    pub pad_fill_char: char,
    /// Padding alignment.
    pub pad_align: Alignment,
    /// Separator between columns.
    pub column_separator: String,
    /// Type-to-format map used when no explicit format is set.
    pub type_formats: TypeFormats,
}

impl Default for ColumnDefaults {
    fn default() -> Self {
        ColumnDefaults {
            width: 8,
            format: None,
            title_value_separator: "=".to_string(),
            pad_fill_char: ' ',
            pad_align: Alignment::Auto,
            column_separator: "|".to_string(),
            type_formats: TypeFormats::new()
                .with(ValueKind::Int, "{:,}")
                .with(ValueKind::Float, "{:,.3f}"),
        }
    }
}

/// Borrow-only view resolving each parameter as column-override-else-default.
///
/// No side effects; width growth happens in the formatting path, never here.
#[derive(Clone, Copy)]
pub struct Resolved<'a> {
    col: &'a Column,
    defaults: &'a ColumnDefaults,
}

impl<'a> Resolved<'a> {
    /// Pairs a column with the defaults it falls back to.
    pub fn new(col: &'a Column, defaults: &'a ColumnDefaults) -> Self {
        Resolved { col, defaults }
    }

    /// Effective minimum width.
    pub fn width(&self) -> usize {
        self.col.width.unwrap_or(self.defaults.width)
    }

    /// Effective explicit format template, if any.
    pub fn format(&self) -> Option<&'a str> {
        self.col
            .format
            .as_deref()
            .or(self.defaults.format.as_deref())
    }

    /// Effective title-to-value separator.
    pub fn title_value_separator(&self) -> &'a str {
        self.col
            .title_value_separator
            .as_deref()
            .unwrap_or(&self.defaults.title_value_separator)
    }

    /// Effective padding fill character.
    pub fn pad_fill_char(&self) -> char {
        self.col.pad_fill_char.unwrap_or(self.defaults.pad_fill_char)
    }

    /// Effective padding alignment (possibly still `Auto`).
    pub fn pad_align(&self) -> Alignment {
        self.col.pad_align.unwrap_or(self.defaults.pad_align)
    }

    /// Effective column separator.
    pub fn column_separator(&self) -> &'a str {
        self.col
            .column_separator
            .as_deref()
            .unwrap_or(&self.defaults.column_separator)
    }

    /// Effective type-to-format map.
    pub fn type_formats(&self) -> &'a TypeFormats {
        self.col
            .type_formats
            .as_ref()
            .unwrap_or(&self.defaults.type_formats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_prefers_column_override() {
        let defaults = ColumnDefaults::default();
        let col = Column::new("x").width(20).separator(" | ");
        let r = Resolved::new(&col, &defaults);

        assert_eq!(r.width(), 20);
        assert_eq!(r.column_separator(), " | ");
        // Unset parameters fall through to the defaults.
        assert_eq!(r.pad_fill_char(), ' ');
        assert_eq!(r.pad_align(), Alignment::Auto);
        assert_eq!(r.title_value_separator(), "=");
    }

    #[test]
    fn empty_override_is_distinct_from_absent() {
        let defaults = ColumnDefaults::default();
        let col = Column::new("x").separator("");
        let r = Resolved::new(&col, &defaults);
        // A column that says "empty string" wins over the "|" default.
        assert_eq!(r.column_separator(), "");
    }

    #[test]
    fn default_type_formats_cover_int_and_float() {
        let defaults = ColumnDefaults::default();
        assert_eq!(defaults.type_formats.lookup(&Value::from(1)), Some("{:,}"));
        assert_eq!(
            defaults.type_formats.lookup(&Value::from(1.0)),
            Some("{:,.3f}")
        );
        assert_eq!(defaults.type_formats.lookup(&Value::from("a")), None);
    }

    #[test]
    fn type_formats_first_match_wins() {
        let formats = TypeFormats::new()
            .with(ValueKind::Number, "{}")
            .with(ValueKind::Int, "{:,}");
        // Number registered first shadows the narrower Int tag.
        assert_eq!(formats.lookup(&Value::from(5)), Some("{}"));
    }

    #[test]
    fn reregistering_keeps_match_position() {
        let mut formats = TypeFormats::new()
            .with(ValueKind::Int, "{:,}")
            .with(ValueKind::Any, "{}");
        formats.register(ValueKind::Int, "{} units");
        assert_eq!(formats.lookup(&Value::from(5)), Some("{} units"));
    }

    #[test]
    fn column_fluent_api() {
        let col = Column::new("speed")
            .width(14)
            .right()
            .fill_char('.')
            .format("{:,.1f} kB/s")
            .title_value_separator(": ");

        assert_eq!(col.width, Some(14));
        assert_eq!(col.pad_align, Some(Alignment::Right));
        assert_eq!(col.pad_fill_char, Some('.'));
        assert_eq!(col.format.as_deref(), Some("{:,.1f} kB/s"));
        assert_eq!(col.title_value_separator.as_deref(), Some(": "));
    }

    #[test]
    fn serde_roundtrip_of_layout_types() {
        let col = Column::new("n").width(3).align(Alignment::Center);
        let json = serde_json::to_string(&col).unwrap();
        let parsed: Column = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.title, "n");
        assert_eq!(parsed.width, Some(3));
        assert_eq!(parsed.pad_align, Some(Alignment::Center));

        let defaults: ColumnDefaults =
            serde_json::from_str(&serde_json::to_string(&ColumnDefaults::default()).unwrap())
                .unwrap();
        assert_eq!(defaults, ColumnDefaults::default());
    }
}
