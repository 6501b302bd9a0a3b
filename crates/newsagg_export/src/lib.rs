//! Writers that render stored articles to files.
//!
//! | Format | Module | Extension |
//! |--------|--------|-----------|
//! | JSON | [`json`] | `json` |
//! | CSV | [`delimited`] | `csv` |
//! | Excel | [`xlsx`] | `xlsx` |
//!
//! Every encoder exports the same columns, in the same order: see
//! [`COLUMNS`]. The store-assigned id and the fetch timestamp are not part
//! of an export.

use newsagg_core::{Article, Result};
use std::fmt;
use std::path::Path;

pub mod delimited;
pub mod json;
pub mod xlsx;

pub use delimited::{read_csv, CsvEncoder};
pub use json::{read_json, JsonEncoder};
pub use xlsx::XlsxEncoder;

/// Exported fields, in output order.
pub const COLUMNS: [&str; 5] = ["title", "source", "url", "date", "description"];

pub trait Encoder {
    /// Conventional file extension, without the dot.
    fn extension(&self) -> &'static str;

    /// Writes `articles` to `destination` and returns how many were written.
    ///
    /// An empty slice writes nothing and returns 0.
    fn encode(&self, articles: &[Article], destination: &Path) -> Result<usize>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    /// Pretty-printed JSON array.
    #[default]
    #[value(alias = "record-text")]
    Json,
    /// Comma separated values with a header row.
    #[value(alias = "delimited-text")]
    Csv,
    /// Excel workbook with a single sheet.
    #[value(alias = "tabular-binary")]
    Excel,
}

impl ExportFormat {
    pub fn encoder(&self) -> Box<dyn Encoder> {
        match self {
            ExportFormat::Json => Box::new(JsonEncoder),
            ExportFormat::Csv => Box::new(CsvEncoder),
            ExportFormat::Excel => Box::new(XlsxEncoder),
        }
    }

    pub fn extension(&self) -> &'static str {
        self.encoder().extension()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Excel => write!(f, "excel"),
        }
    }
}
