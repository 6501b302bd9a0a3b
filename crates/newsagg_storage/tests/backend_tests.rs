use chrono::NaiveDate;
use newsagg_core::{Article, ArticleFilter, ArticleStore};
use newsagg_storage::{MemoryStore, SqliteStore};

async fn backends() -> Vec<(&'static str, Box<dyn ArticleStore>)> {
    let sqlite = SqliteStore::in_memory().await.unwrap();
    sqlite.initialize().await.unwrap();
    vec![
        ("sqlite", Box::new(sqlite) as Box<dyn ArticleStore>),
        ("memory", Box::new(MemoryStore::new())),
    ]
}

fn titles(stored: &[newsagg_core::StoredArticle]) -> Vec<&str> {
    stored.iter().map(|a| a.title.as_str()).collect()
}

#[tokio::test]
async fn filters_are_conjunctive_on_every_backend() {
    for (name, store) in backends().await {
        store
            .insert(&[
                Article::new("Fed Raises Rates", "BBC News")
                    .with_url("http://bbc.example/fed")
                    .with_date("2024-01-01"),
                Article::new("Fed Raises Rates", "Reuters")
                    .with_url("http://reuters.example/fed")
                    .with_date("2024-01-02"),
                Article::new("Markets calm", "BBC News")
                    .with_url("http://bbc.example/markets")
                    .with_date("2024-01-02")
                    .with_description("The Fed held steady"),
            ])
            .await
            .unwrap();

        let filter = ArticleFilter {
            source: Some("bbc".to_string()),
            keyword: Some("FED".to_string()),
            ..Default::default()
        };
        let stored = store.query(&filter).await.unwrap();
        assert_eq!(titles(&stored), vec!["Markets calm", "Fed Raises Rates"], "{}", name);

        let filter = ArticleFilter {
            date: NaiveDate::from_ymd_opt(2024, 1, 2),
            ..filter
        };
        let stored = store.query(&filter).await.unwrap();
        assert_eq!(titles(&stored), vec!["Markets calm"], "{}", name);

        let filter = ArticleFilter {
            source: Some("reuters".to_string()),
            keyword: Some("markets".to_string()),
            date: None,
        };
        assert!(store.query(&filter).await.unwrap().is_empty(), "{}", name);
    }
}

#[tokio::test]
async fn non_ascii_filters_fold_case_on_every_backend() {
    for (name, store) in backends().await {
        store
            .insert(&[
                Article::new("ÉLECTIONS en France", "LE MONDE ÉCONOMIE")
                    .with_url("http://lemonde.example/elections"),
                Article::new("Elections elsewhere", "Reuters")
                    .with_url("http://reuters.example/elections"),
            ])
            .await
            .unwrap();

        let by_source = store
            .query(&ArticleFilter {
                source: Some("économie".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(titles(&by_source), vec!["ÉLECTIONS en France"], "{}", name);

        let by_keyword = store
            .query(&ArticleFilter {
                keyword: Some("élections".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(titles(&by_keyword), vec!["ÉLECTIONS en France"], "{}", name);
    }
}
