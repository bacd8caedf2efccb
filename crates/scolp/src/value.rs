//! Runtime value types for streamed cells.
//!
//! The [`Value`] enum represents one scalar handed to the printer. Its runtime
//! kind only matters in two places: type-based default formatting (via
//! [`ValueKind`] tags) and the `Auto` alignment rule, which right-aligns
//! numbers and left-aligns everything else.

use chrono::{DateTime, Local, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar cell value consumed by the printer.
///
/// Values are owned so a call site can stream computed results without
/// keeping them alive. Conversions exist for the common primitives, so most
/// call sites go through `into()` or the [`row!`](crate::row) macro.
///
/// # Example
///
/// ```
/// use scolp::{Number, Value};
///
/// let v: Value = 42.into();
/// assert_eq!(v, Value::Number(Number::I64(42)));
/// assert!(v.is_numeric());
///
/// let v: Value = "downloading".into();
/// assert!(!v.is_numeric());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text value.
    Str(String),
    /// Numeric value (integer or float).
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Wall-clock timestamp.
    Timestamp(DateTime<Local>),
    /// Elapsed-time value, e.g. from [`Scolp::elapsed_since_init`](crate::Scolp::elapsed_since_init).
    Duration(TimeDelta),
}

impl Value {
    /// Returns `true` for [`Value::Number`] only.
    ///
    /// Booleans are deliberately not numeric here; see `ValueKind` for the
    /// matching rules.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Extracts the numeric value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Plain string conversion: the fallback rendering used when no format
/// template applies, and the base for the `" (FMT_ERR)"` recovery path.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Number(n) => n.fmt(f),
            Value::Bool(b) => b.fmt(f),
            Value::Timestamp(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.f")),
            Value::Duration(d) => format_delta(*d, f),
        }
    }
}

/// Renders a delta as `H:MM:SS`, with microseconds appended when non-zero
/// and a leading `-` for negative deltas.
fn format_delta(d: TimeDelta, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let total = d.abs();
    let secs = total.num_seconds();
    let micros = total.num_microseconds().map(|us| us - secs * 1_000_000).unwrap_or(0);

    if d < TimeDelta::zero() {
        f.write_str("-")?;
    }
    write!(f, "{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)?;
    if micros > 0 {
        write!(f, ".{:06}", micros)?;
    }
    Ok(())
}

/// Numeric value preserving the integer/float distinction.
///
/// The distinction matters for type-based default formats: the stock
/// configuration formats integers as `"{:,}"` and floats as `"{:,.3f}"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64, for precision formatting.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns `true` for the integer variants.
    pub fn is_integer(self) -> bool {
        !matches!(self, Number::F64(_))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => n.fmt(f),
            Number::U64(n) => n.fmt(f),
            Number::F64(n) => n.fmt(f),
        }
    }
}

// Conversions from primitive types
impl From<i8> for Number {
    fn from(n: i8) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i16> for Number {
    fn from(n: i16) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<u8> for Number {
    fn from(n: u8) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u16> for Number {
    fn from(n: u16) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::U64(n)
    }
}

impl From<usize> for Number {
    fn from(n: usize) -> Self {
        Number::U64(n as u64)
    }
}

impl From<isize> for Number {
    fn from(n: isize) -> Self {
        Number::I64(n as i64)
    }
}

impl From<f32> for Number {
    fn from(n: f32) -> Self {
        Number::F64(n as f64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

macro_rules! value_from_number {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )+
    };
}

value_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Str(c.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<DateTime<Local>> for Value {
    fn from(dt: DateTime<Local>) -> Self {
        Value::Timestamp(dt)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::Timestamp(dt.with_timezone(&Local))
    }
}

impl From<TimeDelta> for Value {
    fn from(d: TimeDelta) -> Self {
        Value::Duration(d)
    }
}

/// Type tag for the type-to-format map.
///
/// Tags are tested against a value in registration order and the first match
/// wins, so a broad tag like [`ValueKind::Number`] registered before
/// [`ValueKind::Int`] shadows it. [`ValueKind::Number`] is the supertype tag
/// covering both integer and float values; booleans are matched only by
/// [`ValueKind::Bool`] (and [`ValueKind::Any`]), never by the numeric tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Integer numbers only.
    Int,
    /// Floating-point numbers only.
    Float,
    /// Any number, integer or float.
    Number,
    /// Booleans.
    Bool,
    /// Text values.
    Text,
    /// Wall-clock timestamps.
    Timestamp,
    /// Elapsed-time values.
    Duration,
    /// Matches every value; useful as a registered catch-all.
    Any,
}

impl ValueKind {
    /// Tests whether `value` belongs to this kind.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            ValueKind::Int => matches!(value, Value::Number(n) if n.is_integer()),
            ValueKind::Float => matches!(value, Value::Number(Number::F64(_))),
            ValueKind::Number => matches!(value, Value::Number(_)),
            ValueKind::Bool => matches!(value, Value::Bool(_)),
            ValueKind::Text => matches!(value, Value::Str(_)),
            ValueKind::Timestamp => matches!(value, Value::Timestamp(_)),
            ValueKind::Duration => matches!(value, Value::Duration(_)),
            ValueKind::Any => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_conversions() {
        assert_eq!(Value::from(42i32), Value::Number(Number::I64(42)));
        assert_eq!(Value::from(42u64), Value::Number(Number::U64(42)));
        assert_eq!(Value::from(1.5f64), Value::Number(Number::F64(1.5)));
        assert_eq!(Value::from(7usize), Value::Number(Number::U64(7)));
    }

    #[test]
    fn text_and_bool_conversions() {
        assert_eq!(Value::from("hi"), Value::Str("hi".to_string()));
        assert_eq!(Value::from('x'), Value::Str("x".to_string()));
        assert_eq!(Value::from(true), Value::Bool(true));
    }

    #[test]
    fn numeric_check_excludes_bool_and_text() {
        assert!(Value::from(1).is_numeric());
        assert!(Value::from(0.5).is_numeric());
        assert!(!Value::from(true).is_numeric());
        assert!(!Value::from("1").is_numeric());
    }

    #[test]
    fn plain_display() {
        assert_eq!(Value::from(4000).to_string(), "4000");
        assert_eq!(Value::from(4000.5).to_string(), "4000.5");
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::from(false).to_string(), "false");
    }

    #[test]
    fn delta_display_whole_seconds() {
        assert_eq!(Value::from(TimeDelta::seconds(5)).to_string(), "0:00:05");
        assert_eq!(Value::from(TimeDelta::seconds(3661)).to_string(), "1:01:01");
        assert_eq!(
            Value::from(TimeDelta::seconds(90000)).to_string(),
            "25:00:00"
        );
    }

    #[test]
    fn delta_display_fractional_and_negative() {
        assert_eq!(
            Value::from(TimeDelta::milliseconds(1500)).to_string(),
            "0:00:01.500000"
        );
        assert_eq!(Value::from(TimeDelta::seconds(-61)).to_string(), "-0:01:01");
    }

    #[test]
    fn kind_matching_first_principles() {
        let int = Value::from(3);
        let float = Value::from(3.0);
        let text = Value::from("3");

        assert!(ValueKind::Int.matches(&int));
        assert!(!ValueKind::Int.matches(&float));
        assert!(ValueKind::Float.matches(&float));
        assert!(!ValueKind::Float.matches(&int));
        assert!(ValueKind::Number.matches(&int));
        assert!(ValueKind::Number.matches(&float));
        assert!(!ValueKind::Number.matches(&text));
        assert!(ValueKind::Any.matches(&text));
    }

    #[test]
    fn bool_is_not_an_integer() {
        // Booleans never match the numeric tags.
        let b = Value::from(true);
        assert!(!ValueKind::Int.matches(&b));
        assert!(!ValueKind::Number.matches(&b));
        assert!(ValueKind::Bool.matches(&b));
    }

    #[test]
    fn utc_timestamps_convert_to_local() {
        use chrono::TimeZone;
        let utc = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let v = Value::from(utc);
        assert!(matches!(v, Value::Timestamp(_)));
    }
}
