use chrono::{Local, NaiveDateTime};
use newsagg_core::{deduplicate, Article, ArticleFilter, ArticleStore, Result, StoredArticle};
use newsagg_export::ExportFormat;
use newsagg_sources::SourceManager;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};

/// Outcome of one ingest run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    /// Articles returned by all sources together.
    pub fetched: usize,
    /// Articles left after deduplication.
    pub unique: usize,
    /// Articles the store had not seen before.
    pub stored: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub format: ExportFormat,
    /// Zero when nothing matched; no file is written in that case.
    pub written: usize,
}

/// Ties sources, deduplication, the store and the encoders together.
///
/// Holds no state between calls besides the injected store handle.
pub struct Pipeline {
    store: Arc<dyn ArticleStore>,
}

impl Pipeline {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ArticleStore> {
        &self.store
    }

    #[instrument(level = "info", skip_all, fields(sources = sources.len()))]
    pub async fn ingest(&self, sources: &SourceManager) -> Result<IngestReport> {
        let articles = sources.fetch_all().await;
        let fetched = articles.len();

        let unique = deduplicate(articles);
        info!(fetched, unique = unique.len(), "Found unique articles");

        let stored = self.store.insert(&unique).await?;
        Ok(IngestReport {
            fetched,
            unique: unique.len(),
            stored,
        })
    }

    pub async fn query(&self, filter: &ArticleFilter) -> Result<Vec<StoredArticle>> {
        self.store.query(filter).await
    }

    #[instrument(level = "info", skip(self, filter))]
    pub async fn export(
        &self,
        filter: &ArticleFilter,
        format: ExportFormat,
        output: Option<PathBuf>,
    ) -> Result<ExportReport> {
        let articles: Vec<Article> = self
            .store
            .query(filter)
            .await?
            .into_iter()
            .map(|stored| stored.article)
            .collect();

        let path = output.unwrap_or_else(|| default_export_path(format, Local::now().naive_local()));
        let written = format.encoder().encode(&articles, &path)?;

        Ok(ExportReport {
            path,
            format,
            written,
        })
    }
}

/// `news_export_<YYYYmmdd_HHMMSS>.<ext>` in the working directory.
pub fn default_export_path(format: ExportFormat, now: NaiveDateTime) -> PathBuf {
    PathBuf::from(format!(
        "news_export_{}.{}",
        now.format("%Y%m%d_%H%M%S"),
        format.extension()
    ))
}
