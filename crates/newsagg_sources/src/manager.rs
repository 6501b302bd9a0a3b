use futures::future::join_all;
use newsagg_core::{Article, Result};
use std::time::Duration;
use tracing::info;

use crate::sources::{utils, BbcNewsScraper, NewsApiClient, Source};

type BoxedSource = Box<dyn Source>;

/// Per-invocation settings for the built-in sources.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// NewsAPI is only registered when a key is present.
    pub api_key: Option<String>,
    /// Optional search term forwarded to NewsAPI.
    pub keyword: Option<String>,
    /// Upper bound for every HTTP request a source makes.
    pub timeout: Duration,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            api_key: None,
            keyword: None,
            timeout: Duration::from_secs(20),
        }
    }
}

/// Ordered set of sources. Registration order is the order results are
/// concatenated in, which keeps first-occurrence deduplication reproducible.
#[derive(Default)]
pub struct SourceManager {
    sources: Vec<BoxedSource>,
}

impl SourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// BBC News, then NewsAPI when an API key is configured.
    pub fn with_defaults(options: &SourceOptions) -> Result<Self> {
        let client = utils::http_client(options.timeout)?;
        let mut manager = Self::new();

        manager.add_source(BbcNewsScraper::new(client.clone())?);

        if let Some(api_key) = options.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            manager.add_source(
                NewsApiClient::new(client, api_key)?.with_keyword(options.keyword.clone()),
            );
        }

        Ok(manager)
    }

    pub fn add_source(&mut self, source: impl Source + 'static) {
        self.sources.push(Box::new(source));
    }

    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Fetches every source concurrently. A failing source contributes no
    /// articles; results are concatenated in registration order.
    pub async fn fetch_all(&self) -> Vec<Article> {
        info!(sources = ?self.names(), "Fetching from all sources");
        let results = join_all(self.sources.iter().map(|source| source.fetch())).await;
        results.into_iter().flatten().collect()
    }
}
