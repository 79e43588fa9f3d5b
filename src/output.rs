//! Rendering of command results for terminals and scripts.

use serde::Serialize;
use tabled::{Table, Tabled};

/// How command results are rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Bordered table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Severity of a one-line status notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The command did what was asked.
    Done,
    /// Nothing to do, or a degraded result.
    Warn,
    /// The command failed. Written to stderr.
    Fail,
}

impl Notice {
    fn marker(self) -> &'static str {
        match self {
            Self::Done => "✓",
            Self::Warn => "⚠",
            Self::Fail => "✗",
        }
    }
}

/// Renders a set of rows. An empty table renders as a short note, an
/// empty JSON set as `[]`.
pub fn render_rows<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> String {
    match format {
        OutputFormat::Table if rows.is_empty() => "No results found.".to_string(),
        OutputFormat::Table => Table::new(rows).to_string(),
        OutputFormat::Json => to_json(&rows, "[]"),
    }
}

/// Renders one row: a single-row table, or a JSON object.
pub fn render_row<T: Serialize + Tabled>(row: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => Table::new(std::iter::once(row)).to_string(),
        OutputFormat::Json => to_json(row, "{}"),
    }
}

/// Prints a set of rows to stdout.
pub fn emit_rows<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) {
    println!("{}", render_rows(rows, format));
}

/// Prints one row to stdout.
pub fn emit_row<T: Serialize + Tabled>(row: &T, format: OutputFormat) {
    println!("{}", render_row(row, format));
}

/// Prints a status line prefixed with its severity marker.
pub fn notice(kind: Notice, msg: &str) {
    match kind {
        Notice::Fail => eprintln!("{} {msg}", kind.marker()),
        _ => println!("{} {msg}", kind.marker()),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string())
}
