use newsagg_core::StoredArticle;
use std::fmt::Write;

/// How many query results are printed before the remainder is summarized.
pub const QUERY_DISPLAY_LIMIT: usize = 10;

/// Renders query results the way the `query` command prints them.
pub fn render_articles(articles: &[StoredArticle], limit: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nFound {} articles:\n", articles.len());

    for (i, article) in articles.iter().take(limit).enumerate() {
        let _ = writeln!(out, "{}. [{}] {}", i + 1, article.source, article.title);
        let _ = writeln!(out, "   Date: {}", article.date);
        let _ = writeln!(out, "   URL: {}\n", article.url);
    }

    if articles.len() > limit {
        let _ = writeln!(out, "... and {} more", articles.len() - limit);
    }
    out
}
