use newsagg_core::{Article, Error, Result};
use std::path::Path;
use tracing::info;

use crate::Encoder;

/// RFC 4180 CSV with a header row. Quoting is left to the `csv` writer, so
/// commas, quotes and newlines inside fields survive a round trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvEncoder;

fn csv_error(e: csv::Error) -> Error {
    Error::Export(format!("CSV error: {}", e))
}

impl Encoder for CsvEncoder {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn encode(&self, articles: &[Article], destination: &Path) -> Result<usize> {
        if articles.is_empty() {
            return Ok(0);
        }

        let mut writer = csv::Writer::from_path(destination).map_err(csv_error)?;
        for article in articles {
            writer.serialize(article).map_err(csv_error)?;
        }
        writer.flush()?;

        info!(count = articles.len(), path = %destination.display(), "Wrote CSV export");
        Ok(articles.len())
    }
}

/// Reads back a file written by [`CsvEncoder`].
pub fn read_csv(path: &Path) -> Result<Vec<Article>> {
    let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;
    reader
        .deserialize::<Article>()
        .map(|record| record.map_err(csv_error))
        .collect()
}
