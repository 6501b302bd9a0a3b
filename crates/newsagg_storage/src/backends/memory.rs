use async_trait::async_trait;
use chrono::Local;
use newsagg_core::{Article, ArticleFilter, ArticleStore, Result, StoredArticle};
use std::collections::HashSet;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

#[derive(Default)]
struct MemoryState {
    articles: Vec<StoredArticle>,
    urls: HashSet<String>,
    next_id: i64,
}

impl MemoryState {
    fn insert(&mut self, article: &Article) -> Result<bool> {
        article.validate()?;

        let url = article.url.trim();
        if !url.is_empty() && !self.urls.insert(url.to_string()) {
            return Ok(false);
        }

        self.next_id += 1;
        self.articles.push(StoredArticle {
            id: self.next_id,
            article: Article {
                url: url.to_string(),
                ..article.clone()
            },
            fetched_at: Some(Local::now().naive_local()),
        });
        Ok(true)
    }
}

/// Non-durable store with the same semantics as the SQLite backend.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn insert(&self, articles: &[Article]) -> Result<usize> {
        let mut state = self.state.write().await;
        let mut stored = 0;
        for article in articles {
            match state.insert(article) {
                Ok(true) => stored += 1,
                Ok(false) => debug!(url = %article.url, "Article already stored"),
                Err(e) => warn!(title = %article.title, error = %e, "Skipping article"),
            }
        }
        info!(stored, total = articles.len(), "Stored articles");
        Ok(stored)
    }

    async fn query(&self, filter: &ArticleFilter) -> Result<Vec<StoredArticle>> {
        let state = self.state.read().await;
        let mut articles: Vec<StoredArticle> = state
            .articles
            .iter()
            .filter(|stored| filter.matches(&stored.article))
            .cloned()
            .collect();
        articles.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(articles)
    }
}
