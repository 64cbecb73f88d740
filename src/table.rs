//! Table formatting
//!
//! Text output left-justifies every cell to its column's widest entry (header
//! included). JSON output is provided for tooling.

use crate::error::{PshapeError, Result};
use crate::metrics::{ProbeKind, Row};
use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text columns
    #[default]
    Text,
    /// JSON object with `columns` and `rows`
    Json,
}

/// Rows of one print invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    kinds: Vec<ProbeKind>,
    rows: Vec<Row>,
    show_header: bool,
}

#[derive(Serialize)]
struct JsonTable<'a> {
    columns: Vec<&'static str>,
    rows: Vec<Vec<&'a str>>,
}

impl Table {
    /// Create a table whose rows all have the columns `kinds`
    ///
    /// # Errors
    ///
    /// Returns [`PshapeError::RowMismatch`] if a row's columns differ from `kinds`.
    pub fn new(kinds: Vec<ProbeKind>, rows: Vec<Row>, show_header: bool) -> Result<Self> {
        for (idx, row) in rows.iter().enumerate() {
            if !row.kinds().eq(kinds.iter().copied()) {
                return Err(PshapeError::RowMismatch {
                    row: idx,
                    expected: kinds.iter().map(|k| k.label().to_string()).collect(),
                    actual: row.kinds().map(|k| k.label().to_string()).collect(),
                });
            }
        }

        Ok(Self {
            kinds,
            rows,
            show_header,
        })
    }

    /// Column kinds in order
    #[must_use]
    pub fn kinds(&self) -> &[ProbeKind] {
        &self.kinds
    }

    /// Data rows in input order
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Width of each column in characters
    #[must_use]
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .kinds
            .iter()
            .map(|kind| {
                if self.show_header {
                    kind.label().chars().count()
                } else {
                    0
                }
            })
            .collect();

        for row in &self.rows {
            for (width, (_, text)) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(text.chars().count());
            }
        }

        widths
    }

    /// Format as aligned text, one line per row
    ///
    /// With `color`, header labels are bolded after padding so alignment is
    /// unaffected.
    #[must_use]
    pub fn format_text(&self, color: bool) -> String {
        let widths = self.column_widths();
        let mut output = String::new();

        if self.show_header {
            let cells: Vec<String> = self
                .kinds
                .iter()
                .zip(&widths)
                .map(|(kind, &width)| {
                    let padded = format!("{:<width$}", kind.label());
                    if color {
                        padded.bold().to_string()
                    } else {
                        padded
                    }
                })
                .collect();
            output.push_str(&cells.join(" "));
            output.push('\n');
        }

        for row in &self.rows {
            let cells: Vec<String> = row
                .cells()
                .iter()
                .zip(&widths)
                .map(|((_, text), &width)| format!("{text:<width$}"))
                .collect();
            output.push_str(&cells.join(" "));
            output.push('\n');
        }

        output
    }

    /// Format as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn format_json(&self) -> serde_json::Result<String> {
        let table = JsonTable {
            columns: self.kinds.iter().map(|k| k.label()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| row.cells().iter().map(|(_, text)| text.as_str()).collect())
                .collect(),
        };
        serde_json::to_string_pretty(&table)
    }

    /// Format in `format`, terminated by a newline
    ///
    /// # Errors
    ///
    /// Returns [`PshapeError::Json`] if JSON serialization fails.
    pub fn render(&self, format: OutputFormat, color: bool) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.format_text(color)),
            OutputFormat::Json => Ok(format!("{}\n", self.format_json()?)),
        }
    }
}
