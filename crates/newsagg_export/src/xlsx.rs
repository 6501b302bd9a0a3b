use newsagg_core::{Article, Error, Result};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;
use tracing::info;

use crate::{Encoder, COLUMNS};

/// Excel workbook: bold header row, then one row per article.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxEncoder;

fn xlsx_error(e: XlsxError) -> Error {
    Error::Export(format!("Excel error: {}", e))
}

impl Encoder for XlsxEncoder {
    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn encode(&self, articles: &[Article], destination: &Path) -> Result<usize> {
        if articles.is_empty() {
            return Ok(0);
        }

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let header = Format::new().set_bold();

        for (col, name) in COLUMNS.iter().enumerate() {
            sheet
                .write_string_with_format(0, col as u16, *name, &header)
                .map_err(xlsx_error)?;
        }

        for (i, article) in articles.iter().enumerate() {
            let row = (i + 1) as u32;
            let fields = [
                &article.title,
                &article.source,
                &article.url,
                &article.date,
                &article.description,
            ];
            for (col, value) in fields.into_iter().enumerate() {
                sheet
                    .write_string(row, col as u16, value.as_str())
                    .map_err(xlsx_error)?;
            }
        }

        workbook.save(destination).map_err(xlsx_error)?;

        info!(count = articles.len(), path = %destination.display(), "Wrote Excel export");
        Ok(articles.len())
    }
}
