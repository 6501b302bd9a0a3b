use async_trait::async_trait;
use crate::types::{Article, ArticleFilter, StoredArticle};
use crate::Result;

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Create the schema if it does not exist yet. Safe to call on every start.
    async fn initialize(&self) -> Result<()>;

    /// Insert every article whose url is not already stored.
    ///
    /// Articles with a known url are skipped silently. Any other per-article
    /// failure is logged and the article skipped; the rest of the batch still
    /// goes in. Returns how many articles were newly stored.
    async fn insert(&self, articles: &[Article]) -> Result<usize>;

    /// Articles matching `filter`, newest date first, then most recently inserted.
    async fn query(&self, filter: &ArticleFilter) -> Result<Vec<StoredArticle>>;
}
