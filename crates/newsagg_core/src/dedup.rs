//! Cross-source duplicate removal.
//!
//! Two articles are duplicates when their titles are equal after trimming
//! surrounding whitespace and lowercasing. Nothing else is compared: titles
//! that differ only in punctuation are kept as distinct articles.

use std::collections::HashSet;

use crate::types::Article;

/// The key two articles are compared by.
pub fn canonical_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Drops articles with a blank title and every repeat of a title already seen.
///
/// The first occurrence wins and relative order is preserved.
pub fn deduplicate(articles: Vec<Article>) -> Vec<Article> {
    let total = articles.len();
    let mut seen = HashSet::new();

    let unique: Vec<Article> = articles
        .into_iter()
        .filter(|article| {
            let key = canonical_title(&article.title);
            !key.is_empty() && seen.insert(key)
        })
        .collect();

    tracing::debug!(total, unique = unique.len(), "Deduplicated articles");
    unique
}
