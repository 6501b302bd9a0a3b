//! Client for the NewsAPI `top-headlines` endpoint.
//!
//! The endpoint answers with a JSON envelope whose `status` is `"ok"` on
//! success and `"error"` (plus a `message`) otherwise, including for bad
//! API keys, so the envelope is decoded before the HTTP status is looked at.

use async_trait::async_trait;
use newsagg_core::{Article, Error, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::utils;
use super::Source;

#[derive(Debug, Deserialize)]
struct TopHeadlines {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    title: Option<String>,
    source: Option<NewsApiSource>,
    url: Option<String>,
    published_at: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSource {
    name: Option<String>,
}

impl From<NewsApiArticle> for Article {
    fn from(raw: NewsApiArticle) -> Self {
        let source = raw
            .source
            .and_then(|s| s.name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| NewsApiClient::UNKNOWN_SOURCE.to_string());

        Article {
            title: raw.title.unwrap_or_default(),
            source,
            url: raw.url.unwrap_or_default(),
            date: raw.published_at.as_deref().map(utils::truncate_date).unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: Client,
    base_url: Url,
    api_key: String,
    keyword: Option<String>,
}

impl NewsApiClient {
    pub const BASE_URL: &'static str = "https://newsapi.org";
    const TOP_HEADLINES_PATH: &'static str = "v2/top-headlines";
    const LANGUAGE: &'static str = "en";
    const PAGE_SIZE: &'static str = "20";
    const UNKNOWN_SOURCE: &'static str = "Unknown";

    pub fn new(client: Client, api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(client, Self::BASE_URL, api_key)
    }

    pub fn with_base_url(client: Client, base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client,
            base_url: utils::parse_base_url(base_url)?,
            api_key: api_key.into(),
            keyword: None,
        })
    }

    /// Restricts results to headlines matching `keyword`. Blank keywords are ignored.
    pub fn with_keyword(mut self, keyword: Option<String>) -> Self {
        self.keyword = keyword.filter(|k| !k.trim().is_empty());
        self
    }

    fn parse_response(response: TopHeadlines) -> Result<Vec<Article>> {
        if response.status != "ok" {
            return Err(Error::Source(format!(
                "NewsAPI returned status {:?}: {}",
                response.status,
                response.message.as_deref().unwrap_or("no message")
            )));
        }
        Ok(response.articles.into_iter().map(Article::from).collect())
    }
}

#[async_trait]
impl Source for NewsApiClient {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        let endpoint = self
            .base_url
            .join(Self::TOP_HEADLINES_PATH)
            .map_err(|e| Error::InvalidUrl(e.to_string()))?;

        let mut params = vec![
            ("apiKey", self.api_key.as_str()),
            ("language", Self::LANGUAGE),
            ("pageSize", Self::PAGE_SIZE),
        ];
        if let Some(keyword) = self.keyword.as_deref() {
            params.push(("q", keyword));
        }

        debug!(url = %endpoint, keyword = ?self.keyword, "Requesting NewsAPI top headlines");
        let response: TopHeadlines = self
            .client
            .get(endpoint)
            .query(&params)
            .send()
            .await?
            .json()
            .await?;

        Self::parse_response(response)
    }
}
