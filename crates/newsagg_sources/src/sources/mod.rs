use async_trait::async_trait;
use newsagg_core::{Article, Result};
use tracing::{error, info};

pub mod bbc;
pub mod newsapi;

pub use bbc::BbcNewsScraper;
pub use newsapi::NewsApiClient;

#[async_trait]
pub trait Source: Send + Sync {
    /// Returns the name of the news source
    fn name(&self) -> &str;

    /// Fetches the current articles, mapped onto [`Article`].
    ///
    /// Implementations resolve relative links against their own origin and
    /// format dates as `YYYY-MM-DD`.
    async fn fetch_articles(&self) -> Result<Vec<Article>>;

    /// Like [`Source::fetch_articles`], but a failing source only logs and
    /// yields nothing, so the other sources can still be ingested.
    async fn fetch(&self) -> Vec<Article> {
        match self.fetch_articles().await {
            Ok(articles) => {
                info!(source = self.name(), count = articles.len(), "Fetched articles");
                articles
            }
            Err(e) => {
                error!(source = self.name(), error = %e, "Failed to fetch articles");
                Vec::new()
            }
        }
    }
}

/// Common utilities for sources
pub(crate) mod utils {
    use newsagg_core::{Error, Result};
    use reqwest::Client;
    use std::time::Duration;
    use url::Url;

    pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; newsagg/0.1)";

    pub fn http_client(timeout: Duration) -> Result<Client> {
        Ok(Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?)
    }

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
    }

    /// Parses a service root. The path always ends in `/` so that relative
    /// endpoints join beneath it rather than replacing its last segment.
    pub fn parse_base_url(url: &str) -> Result<Url> {
        let mut base = parse_url(url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base)
    }

    /// Resolves `href` against `base`; absolute links are returned unchanged.
    pub fn absolutize(base: &Url, href: &str) -> String {
        let href = href.trim();
        if href.is_empty() {
            return String::new();
        }
        base.join(href).map(String::from).unwrap_or_default()
    }

    /// Keeps the `YYYY-MM-DD` prefix of an ISO-8601 timestamp.
    pub fn truncate_date(timestamp: &str) -> String {
        timestamp.trim().chars().take(10).collect()
    }
}
