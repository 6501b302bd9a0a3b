use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Format of `fetched_at` as it is persisted.
pub const FETCHED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of the `date` field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An article as produced by a source, before it has been persisted.
///
/// `url` and `date` are empty strings when the source does not know them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub source: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
}

impl Article {
    pub fn new(title: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Checks the fields a store requires before persisting.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidArticle("title must not be empty".to_string()));
        }
        if self.source.trim().is_empty() {
            return Err(Error::InvalidArticle(format!(
                "source must not be empty (title: {})",
                self.title
            )));
        }
        Ok(())
    }
}

/// An article read back from a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredArticle {
    pub id: i64,
    #[serde(flatten)]
    pub article: Article,
    /// When the row was stored; `None` if the row carries no readable timestamp.
    pub fetched_at: Option<NaiveDateTime>,
}

impl std::ops::Deref for StoredArticle {
    type Target = Article;

    fn deref(&self) -> &Self::Target {
        &self.article
    }
}

/// Conjunctive query filters. `None` (or a blank string) means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    /// Case-insensitive substring of the source name.
    pub source: Option<String>,
    /// Case-insensitive substring of the title or the description.
    pub keyword: Option<String>,
    /// Exact publication date.
    pub date: Option<NaiveDate>,
}

impl ArticleFilter {
    pub fn source(&self) -> Option<&str> {
        non_blank(self.source.as_deref())
    }

    pub fn keyword(&self) -> Option<&str> {
        non_blank(self.keyword.as_deref())
    }

    /// The date filter rendered the way dates are stored.
    pub fn date_string(&self) -> Option<String> {
        self.date.map(|d| d.format(DATE_FORMAT).to_string())
    }

    /// Evaluates the filter against a single article, with the same semantics
    /// as the SQL backend.
    pub fn matches(&self, article: &Article) -> bool {
        if let Some(source) = self.source() {
            if !contains_ignore_case(&article.source, source) {
                return false;
            }
        }
        if let Some(keyword) = self.keyword() {
            if !contains_ignore_case(&article.title, keyword)
                && !contains_ignore_case(&article.description, keyword)
            {
                return false;
            }
        }
        if let Some(date) = self.date_string() {
            if article.date != date {
                return false;
            }
        }
        true
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
