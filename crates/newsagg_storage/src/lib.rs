use newsagg_core::{ArticleStore, Error, Result};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub mod backends;

pub use backends::*;

/// Default location of the article database.
pub const DEFAULT_DB_PATH: &str = "news.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StorageKind {
    /// SQLite file at the configured path.
    #[default]
    Sqlite,
    /// Process-local store, discarded on exit.
    Memory,
}

impl StorageKind {
    pub fn get_error_message(&self) -> &'static str {
        match self {
            StorageKind::Sqlite => "SQLite database should be writable at the configured --db path",
            StorageKind::Memory => "Memory storage should be available",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::Sqlite => write!(f, "sqlite"),
            StorageKind::Memory => write!(f, "memory"),
        }
    }
}

/// Opens the requested backend and makes sure its schema exists.
///
/// Any failure here is fatal: nothing can be ingested, queried or exported
/// without a working store.
pub async fn create_storage(kind: StorageKind, db_path: &Path) -> Result<Arc<dyn ArticleStore>> {
    let storage: Arc<dyn ArticleStore> = match kind {
        #[cfg(feature = "sqlite")]
        StorageKind::Sqlite => Arc::new(SqliteStore::open(db_path).await?),
        #[cfg(not(feature = "sqlite"))]
        StorageKind::Sqlite => {
            return Err(Error::Storage("built without the sqlite feature".to_string()))
        }
        StorageKind::Memory => Arc::new(MemoryStore::new()),
    };

    storage.initialize().await.map_err(|e| {
        Error::Storage(format!("{} ({})", e, kind.get_error_message()))
    })?;

    info!(backend = %kind, path = %db_path.display(), "Storage initialized");
    Ok(storage)
}
