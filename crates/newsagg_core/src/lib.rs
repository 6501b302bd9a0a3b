pub mod dedup;
pub mod error;
pub mod storage;
pub mod types;

pub use dedup::deduplicate;
pub use error::{Error, Result};
pub use storage::ArticleStore;
pub use types::{Article, ArticleFilter, StoredArticle};
