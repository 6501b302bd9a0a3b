use newsagg_core::{Article, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::Encoder;

/// Pretty-printed JSON array of articles. Non-ASCII text is written as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl Encoder for JsonEncoder {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn encode(&self, articles: &[Article], destination: &Path) -> Result<usize> {
        if articles.is_empty() {
            return Ok(0);
        }

        let mut writer = BufWriter::new(File::create(destination)?);
        serde_json::to_writer_pretty(&mut writer, articles)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        info!(count = articles.len(), path = %destination.display(), "Wrote JSON export");
        Ok(articles.len())
    }
}

/// Reads back a file written by [`JsonEncoder`].
pub fn read_json(path: &Path) -> Result<Vec<Article>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
