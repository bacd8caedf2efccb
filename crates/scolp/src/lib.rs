//! Streaming column printer for long-running progress output.
//!
//! `scolp` turns a stream of scalar values into column-aligned rows: values
//! are consumed positionally into a configured column layout, formatted and
//! padded, and written to an output sink. Emission can be throttled — every
//! Nth row and/or no more often than every T seconds — so a tight loop can
//! report on every iteration without flooding a terminal or log.
//!
//! # Quick start
//!
//! ```no_run
//! use scolp::{Config, Scolp};
//!
//! let mut cfg = Config::default();
//! cfg.add_columns(["inspected", "primes", "last", "progress %"]);
//! cfg.output_every_n_seconds = 1.0;
//!
//! let mut printer = Scolp::new(&cfg).unwrap();
//! for (inspected, primes, last, pct) in search_progress() {
//!     printer.print(scolp::row![inspected, primes, last, pct]);
//! }
//! // Make sure the final state is visible despite the throttle.
//! printer.force_print_next_row();
//! printer.print(scolp::row![1_000_000, 78_498, 999_983, 100.0]);
//! # fn search_progress() -> Vec<(u64, u64, u64, f64)> { vec![] }
//! ```
//!
//! # Columns and formatting
//!
//! Each [`Column`] only carries explicit overrides; anything unset falls back
//! to the shared [`ColumnDefaults`]. A value picks its format template in
//! order: the column's explicit `format`, else the first matching entry of
//! the type-to-format map ([`TypeFormats`], insertion order, first match
//! wins), else its plain string form. A template that cannot be applied to a
//! value falls back to the plain form with `" (FMT_ERR)"` appended — a bad
//! format never aborts the stream.
//!
//! Column widths grow to fit the widest value seen and never shrink, so the
//! layout stays aligned for the rest of the stream.
//!
//! # Throttling
//!
//! A row is emitted when its index is a multiple of
//! [`Config::output_every_n_rows`] *and* at least
//! [`Config::output_every_n_seconds`] have passed since the last emitted
//! row — or unconditionally when [`Scolp::force_print_next_row`] marked it.
//! Suppressed rows still consume their values and advance the row counter.

mod column;
mod config;
mod format;
mod printer;
mod value;

// Re-exported because timestamps and elapsed values in the public API are
// chrono types.
pub use chrono;

pub use column::{Alignment, Column, ColumnDefaults, Resolved, TitleMode, TypeFormats};
pub use config::{Config, ConfigError};
pub use printer::{Clock, Scolp, Sink, StdoutSink, SystemClock};
pub use value::{Number, Value, ValueKind};

/// Builds a `Vec<Value>` from heterogeneous scalars, so a call site reads
/// like a variadic print.
///
/// ```
/// use scolp::{row, Value};
///
/// let row = row!["Netherlands", 16.81, "Amsterdam", 83];
/// assert_eq!(row.len(), 4);
/// assert!(matches!(row[1], Value::Number(_)));
/// ```
#[macro_export]
macro_rules! row {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),+]
    };
}
