use async_trait::async_trait;
use chrono::Local;
use newsagg_core::types::DATE_FORMAT;
use newsagg_core::{Article, Error, Result};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use super::utils;
use super::Source;

/// Scrapes headlines from the BBC News front page.
#[derive(Debug, Clone)]
pub struct BbcNewsScraper {
    client: Client,
    base_url: Url,
}

impl BbcNewsScraper {
    pub const BASE_URL: &'static str = "https://www.bbc.com";
    const NEWS_PATH: &'static str = "news";
    const HEADLINE_SELECTOR: &'static str = r#"h2[data-testid="card-headline"]"#;
    const MAX_HEADLINES: usize = 20;
    const SOURCE_NAME: &'static str = "BBC News";

    pub fn new(client: Client) -> Result<Self> {
        Self::with_base_url(client, Self::BASE_URL)
    }

    /// Points the scraper at another root, e.g. a mirror or a test server. The
    /// front page is fetched from `news` beneath it, keeping any path prefix.
    pub fn with_base_url(client: Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: utils::parse_base_url(base_url)?,
        })
    }

    /// Extracts at most twenty headlines. Every article gets `date`, since the
    /// front page carries no publication dates.
    pub fn parse_headlines(&self, html: &str, date: &str) -> Result<Vec<Article>> {
        let document = Html::parse_document(html);
        let selector = Selector::parse(Self::HEADLINE_SELECTOR)
            .map_err(|e| Error::Source(format!("Invalid selector: {}", e)))?;

        let articles = document
            .select(&selector)
            .take(Self::MAX_HEADLINES)
            .map(|headline| {
                let title = headline.text().collect::<String>().trim().to_string();
                let url = enclosing_link(headline)
                    .map(|href| utils::absolutize(&self.base_url, href))
                    .unwrap_or_default();

                Article::new(title, Self::SOURCE_NAME)
                    .with_url(url)
                    .with_date(date)
            })
            .collect();

        Ok(articles)
    }
}

/// `href` of the nearest `<a>` wrapping the headline.
fn enclosing_link(element: ElementRef<'_>) -> Option<&str> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "a")
        .and_then(|anchor| anchor.value().attr("href"))
}

#[async_trait]
impl Source for BbcNewsScraper {
    fn name(&self) -> &str {
        Self::SOURCE_NAME
    }

    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        let page_url = self
            .base_url
            .join(Self::NEWS_PATH)
            .map_err(|e| Error::InvalidUrl(e.to_string()))?;

        debug!(url = %page_url, "Fetching BBC front page");
        let html = self
            .client
            .get(page_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let today = Local::now().format(DATE_FORMAT).to_string();
        self.parse_headlines(&html, &today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRONT_PAGE: &str = r#"
        <html><body>
          <a href="/news/articles/c1"><div><h2 data-testid="card-headline"> Fed raises rates </h2></div></a>
          <a href="https://www.bbc.co.uk/sport/2"><h2 data-testid="card-headline">Cup final</h2></a>
          <h2 data-testid="card-headline">No link here</h2>
          <h2 data-testid="other">Not a headline</h2>
        </body></html>
    "#;

    #[test]
    fn test_parse_headlines() {
        let scraper = BbcNewsScraper::new(Client::new()).unwrap();
        let articles = scraper.parse_headlines(FRONT_PAGE, "2024-01-01").unwrap();

        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].title, "Fed raises rates");
        assert_eq!(articles[0].url, "https://www.bbc.com/news/articles/c1");
        assert_eq!(articles[0].source, "BBC News");
        assert_eq!(articles[0].date, "2024-01-01");
        assert_eq!(articles[1].url, "https://www.bbc.co.uk/sport/2");
        assert_eq!(articles[2].url, "");
    }

    #[test]
    fn test_parse_headlines_caps_at_twenty() {
        let html: String = (0..30)
            .map(|i| format!(r#"<a href="/news/{i}"><h2 data-testid="card-headline">Story {i}</h2></a>"#))
            .collect();
        let scraper = BbcNewsScraper::new(Client::new()).unwrap();

        let articles = scraper.parse_headlines(&html, "2024-01-01").unwrap();
        assert_eq!(articles.len(), 20);
        assert_eq!(articles[19].title, "Story 19");
    }
}
