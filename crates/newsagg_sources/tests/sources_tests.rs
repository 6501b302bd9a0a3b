use newsagg_sources::{BbcNewsScraper, NewsApiClient, Source, SourceManager};
use reqwest::Client;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn front_page() -> String {
    r#"<!DOCTYPE html>
<html>
  <body>
    <a href="/news/articles/abc"><h2 data-testid="card-headline">Markets rally</h2></a>
    <a href="/news/articles/def"><h2 data-testid="card-headline">Storm warning</h2></a>
  </body>
</html>"#
        .to_string()
}

fn top_headlines() -> serde_json::Value {
    serde_json::json!({
        "status": "ok",
        "totalResults": 1,
        "articles": [{
            "source": {"id": null, "name": "Reuters"},
            "title": "Markets rally",
            "url": "https://reuters.example/markets",
            "publishedAt": "2024-05-01T08:00:00Z",
            "description": "Stocks climbed."
        }]
    })
}

fn client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap()
}

#[tokio::test]
async fn bbc_scraper_resolves_links_against_its_origin() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(200).set_body_string(front_page()))
        .mount(&server)
        .await;

    let scraper = BbcNewsScraper::with_base_url(client(), &server.uri()).unwrap();
    let articles = scraper.fetch().await;

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "Markets rally");
    assert_eq!(articles[0].url, format!("{}/news/articles/abc", server.uri()));
    assert_eq!(articles[0].date.len(), 10);
}

#[tokio::test]
async fn bbc_scraper_server_error_yields_no_articles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let scraper = BbcNewsScraper::with_base_url(client(), &server.uri()).unwrap();
    assert!(scraper.fetch_articles().await.is_err());
    assert!(scraper.fetch().await.is_empty());
}

#[tokio::test]
async fn bbc_scraper_keeps_base_path_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mirror/news"))
        .respond_with(ResponseTemplate::new(200).set_body_string(front_page()))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/mirror", server.uri());
    let scraper = BbcNewsScraper::with_base_url(client(), &base).unwrap();
    assert_eq!(scraper.fetch_articles().await.unwrap().len(), 2);
}

#[tokio::test]
async fn newsapi_keeps_base_path_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/proxy/v2/top-headlines"))
        .and(query_param("apiKey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(top_headlines()))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/proxy/", server.uri());
    let source = NewsApiClient::with_base_url(client(), &base, "test-key").unwrap();
    assert_eq!(source.fetch_articles().await.unwrap().len(), 1);
}

#[tokio::test]
async fn newsapi_sends_key_and_keyword() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .and(query_param("apiKey", "test-key"))
        .and(query_param("language", "en"))
        .and(query_param("pageSize", "20"))
        .and(query_param("q", "markets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(top_headlines()))
        .expect(1)
        .mount(&server)
        .await;

    let source = NewsApiClient::with_base_url(client(), &server.uri(), "test-key")
        .unwrap()
        .with_keyword(Some("markets".to_string()));
    let articles = source.fetch().await;

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].source, "Reuters");
    assert_eq!(articles[0].date, "2024-05-01");
}

#[tokio::test]
async fn newsapi_rejected_key_yields_no_articles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "status": "error",
            "code": "apiKeyInvalid",
            "message": "Your API key is invalid or incorrect."
        })))
        .mount(&server)
        .await;

    let source = NewsApiClient::with_base_url(client(), &server.uri(), "bad-key").unwrap();
    assert!(source.fetch().await.is_empty());
}

#[tokio::test]
async fn newsapi_malformed_payload_yields_no_articles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let source = NewsApiClient::with_base_url(client(), &server.uri(), "key").unwrap();
    assert!(source.fetch().await.is_empty());
}

#[tokio::test]
async fn unresponsive_source_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(front_page())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let fast_client = Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let mut manager = SourceManager::new();
    manager.add_source(BbcNewsScraper::with_base_url(fast_client, &server.uri()).unwrap());

    let started = std::time::Instant::now();
    assert!(manager.fetch_all().await.is_empty());
    assert!(started.elapsed() < Duration::from_secs(4));
}
