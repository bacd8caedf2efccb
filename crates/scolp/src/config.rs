//! Printer configuration: column layout, throttling, and header policy.

use serde::{Deserialize, Serialize};

use crate::column::{Column, ColumnDefaults, TitleMode};

/// Configuration error, rejected eagerly at [`Scolp`](crate::Scolp)
/// construction, before any printing occurs.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `output_every_n_rows` must be at least 1.
    #[error("output_every_n_rows must be at least 1")]
    ZeroRowInterval,

    /// `output_every_n_seconds` must be a finite, non-negative number.
    #[error("output_every_n_seconds must be finite and non-negative (got {0})")]
    InvalidTimeInterval(f64),

    /// `header_repeat_row_count` must be greater than zero.
    #[error("header_repeat_row_count must be greater than zero")]
    ZeroHeaderRepeat,
}

/// Layout and policy for a [`Scolp`](crate::Scolp) printer.
///
/// Columns are kept in insertion order, which is also display order, and may
/// be appended mid-stream through [`Scolp::config_mut`](crate::Scolp::config_mut);
/// late additions apply to subsequent rows only. The config is pure data
/// (cloneable, serde-friendly) — the output sink is supplied separately at
/// printer construction.
///
/// # Example
///
/// ```
/// use scolp::{Column, Config, TitleMode};
///
/// let mut cfg = Config::default();
/// cfg.add_columns(["inspected", "primes", "last"]);
/// cfg.output_every_n_seconds = 1.0;
/// cfg.title_mode = TitleMode::Header;
/// assert_eq!(cfg.columns.len(), 3);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Columns in display order.
    pub columns: Vec<Column>,
    /// Fallback values for anything a column leaves unset.
    pub defaults: ColumnDefaults,
    /// Only every Nth logical row is a candidate for printing.
    pub output_every_n_rows: u64,
    /// Minimum seconds between printed rows (0 disables the time gate).
    pub output_every_n_seconds: f64,
    /// Where column titles appear.
    pub title_mode: TitleMode,
    /// Header block repeats every this many printed rows.
    pub header_repeat_row_count: u64,
    /// Printed-row index at which the first extra header fires,
    /// independent of the periodic repeat.
    pub header_repeat_row_count_first: u64,
    /// Character for the horizontal rule under the header titles.
    pub header_line_char: char,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            columns: Vec::new(),
            defaults: ColumnDefaults::default(),
            output_every_n_rows: 1,
            output_every_n_seconds: 0.0,
            title_mode: TitleMode::default(),
            header_repeat_row_count: 10,
            header_repeat_row_count_first: 1,
            header_line_char: '-',
        }
    }
}

impl Config {
    /// Appends a column and returns a handle to it for further tweaks.
    ///
    /// ```
    /// use scolp::{Column, Config, TypeFormats, ValueKind};
    ///
    /// let mut cfg = Config::default();
    /// let col = cfg.add_column(Column::new("speed").width(14));
    /// col.type_formats = Some(TypeFormats::new().with(ValueKind::Float, "{:,.1f} kB/s"));
    /// ```
    pub fn add_column(&mut self, column: Column) -> &mut Column {
        self.columns.push(column);
        let last = self.columns.len() - 1;
        &mut self.columns[last]
    }

    /// Appends one title-only column per item.
    pub fn add_columns<I, S>(&mut self, titles: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for title in titles {
            self.add_column(Column::new(title));
        }
    }

    /// Validates the policy fields.
    ///
    /// The default-column completeness invariant needs no check here: every
    /// [`ColumnDefaults`] field is required by construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_every_n_rows == 0 {
            return Err(ConfigError::ZeroRowInterval);
        }
        if !self.output_every_n_seconds.is_finite() || self.output_every_n_seconds < 0.0 {
            return Err(ConfigError::InvalidTimeInterval(self.output_every_n_seconds));
        }
        if self.header_repeat_row_count == 0 {
            return Err(ConfigError::ZeroHeaderRepeat);
        }
        Ok(())
    }

    /// Splits borrows so the formatter can grow a column's width while
    /// reading the shared defaults.
    pub(crate) fn column_and_defaults_mut(
        &mut self,
        index: usize,
    ) -> (&mut Column, &ColumnDefaults) {
        (&mut self.columns[index], &self.defaults)
    }
}
