use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use newsagg_core::types::FETCHED_AT_FORMAT;
use newsagg_core::{Article, ArticleFilter, ArticleStore, Error, Result, StoredArticle};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        source TEXT NOT NULL,
        url TEXT UNIQUE,
        date TEXT,
        description TEXT,
        fetched_at TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_articles_date ON articles(date DESC, id DESC)",
    // Add future migrations here
];

pub struct SqliteStore {
    pool: SqlitePool,
    db_path: Option<PathBuf>,
    write_lock: Mutex<()>,
}

impl SqliteStore {
    /// Opens (creating if missing) the database file at `db_path`.
    pub async fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Database(format!("Failed to create database directory: {}", e))
            })?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))
            .map_err(|e| Error::Database(format!("Invalid database path: {}", e)))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| Error::Database(format!("Failed to connect to database: {}", e)))?;

        debug!(path = %db_path.display(), "Opened SQLite database");
        Ok(Self {
            pool,
            db_path: Some(db_path.to_path_buf()),
            write_lock: Mutex::new(()),
        })
    }

    /// A private in-memory database. Limited to one connection because every
    /// connection to `:memory:` would otherwise see its own empty database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| Error::Database(format!("Invalid database path: {}", e)))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| Error::Database(format!("Failed to open in-memory database: {}", e)))?;

        Ok(Self {
            pool,
            db_path: None,
            write_lock: Mutex::new(()),
        })
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    async fn insert_one(
        conn: &mut sqlx::SqliteConnection,
        article: &Article,
        fetched_at: &str,
    ) -> Result<bool> {
        article.validate()?;

        // Empty urls are stored as NULL so the UNIQUE constraint ignores them.
        let url = Some(article.url.trim()).filter(|u| !u.is_empty());

        let result = sqlx::query(
            r#"
            INSERT INTO articles (title, source, url, date, description, fetched_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(url) DO NOTHING
            "#,
        )
        .bind(&article.title)
        .bind(&article.source)
        .bind(url)
        .bind(&article.date)
        .bind(&article.description)
        .bind(fetched_at)
        .execute(conn)
        .await
        .map_err(|e| Error::Database(format!("Failed to store article: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_article(row: &SqliteRow) -> Result<StoredArticle> {
    let get_text = |column: &str| -> Result<String> {
        row.try_get::<Option<String>, _>(column)
            .map(Option::unwrap_or_default)
            .map_err(|e| Error::Database(format!("Failed to read column {}: {}", column, e)))
    };

    // Rows written outside this store may lack a usable timestamp.
    let raw_fetched_at = get_text("fetched_at")?;
    let fetched_at = NaiveDateTime::parse_from_str(&raw_fetched_at, FETCHED_AT_FORMAT).ok();
    if fetched_at.is_none() {
        debug!(fetched_at = %raw_fetched_at, "Unreadable fetched_at, leaving it unset");
    }

    Ok(StoredArticle {
        id: row
            .try_get("id")
            .map_err(|e| Error::Database(format!("Failed to read column id: {}", e)))?,
        article: Article {
            title: get_text("title")?,
            source: get_text("source")?,
            url: get_text("url")?,
            date: get_text("date")?,
            description: get_text("description")?,
        },
        fetched_at,
    })
}

#[async_trait]
impl ArticleStore for SqliteStore {
    async fn initialize(&self) -> Result<()> {
        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&self.pool)
                .await
                .map_err(|e| Error::Database(format!("Failed to run migration {}: {}", i, e)))?;
        }
        Ok(())
    }

    async fn insert(&self, articles: &[Article]) -> Result<usize> {
        let _guard = self.write_lock.lock().await;
        let fetched_at = Local::now().naive_local().format(FETCHED_AT_FORMAT).to_string();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::Database(format!("Failed to begin transaction: {}", e)))?;

        let mut stored = 0;
        for article in articles {
            match Self::insert_one(&mut *tx, article, &fetched_at).await {
                Ok(true) => stored += 1,
                Ok(false) => debug!(url = %article.url, "Article already stored"),
                Err(e) => warn!(title = %article.title, error = %e, "Skipping article"),
            }
        }

        tx.commit()
            .await
            .map_err(|e| Error::Database(format!("Failed to commit articles: {}", e)))?;

        info!(stored, total = articles.len(), "Stored articles");
        Ok(stored)
    }

    async fn query(&self, filter: &ArticleFilter) -> Result<Vec<StoredArticle>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, title, source, url, date, description, fetched_at FROM articles WHERE 1=1",
        );

        // SQLite's LOWER only folds ASCII, so source and keyword matching is
        // left to `ArticleFilter::matches` after the rows are read.
        if let Some(date) = filter.date_string() {
            builder.push(" AND date = ").push_bind(date);
        }

        builder.push(" ORDER BY date DESC, id DESC");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::Database(format!("Failed to query articles: {}", e)))?;

        let mut articles = Vec::with_capacity(rows.len());
        for row in &rows {
            let stored = row_to_article(row)?;
            if filter.matches(&stored.article) {
                articles.push(stored);
            }
        }
        Ok(articles)
    }
}
