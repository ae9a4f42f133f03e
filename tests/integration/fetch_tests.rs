//! Fetch and retrieval behavior against a mock homepage

use crate::support::{listing_html, service_with_timeout};
use aivi_news_bot::config::UserAgentConfig;
use aivi_news_bot::news::{build_http_client, fetch_page, FetchError, FetchPolicy};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHORT_TIMEOUT: Duration = Duration::from_millis(200);
const SLOW_RESPONSE: Duration = Duration::from_secs(2);

async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

#[tokio::test]
async fn test_fetch_success_returns_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response("<html>hello</html>".to_string()))
        .mount(&mock_server)
        .await;

    let client = build_http_client(&UserAgentConfig::default()).unwrap();
    let body = fetch_page(&client, &format!("{}/", mock_server.uri()), &FetchPolicy::default())
        .await
        .unwrap();

    assert_eq!(body, "<html>hello</html>");
}

#[tokio::test]
async fn test_fetch_follows_redirects() {
    let mock_server = MockServer::start().await;
    let location = format!("{}/home/", mock_server.uri());
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", location.as_str()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/home/"))
        .respond_with(html_response(listing_html(2)))
        .mount(&mock_server)
        .await;

    let service = service_with_timeout(&format!("{}/", mock_server.uri()), 2, SHORT_TIMEOUT);
    let articles = service.retrieve(5).await;

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title(), "Post number 1");
    assert_eq!(articles[0].url(), "https://www.aivi.fyi/llms/post-1/");
}

#[tokio::test]
async fn test_retrieve_parses_articles_in_order() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(listing_html(8)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_with_timeout(&format!("{}/", mock_server.uri()), 2, SHORT_TIMEOUT);
    let articles = service.retrieve(5).await;

    let titles: Vec<&str> = articles.iter().map(|a| a.title()).collect();
    assert_eq!(
        titles,
        vec![
            "Post number 1",
            "Post number 2",
            "Post number 3",
            "Post number 4",
            "Post number 5"
        ]
    );
}

#[tokio::test]
async fn test_every_attempt_times_out() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(listing_html(3)).set_delay(SLOW_RESPONSE))
        .mount(&mock_server)
        .await;

    let url = format!("{}/", mock_server.uri());
    let client = build_http_client(&UserAgentConfig::default()).unwrap();
    let policy = FetchPolicy {
        timeout: SHORT_TIMEOUT,
        max_retries: 2,
    };

    let result = fetch_page(&client, &url, &policy).await;

    assert!(matches!(result, Err(FetchError::Timeout { attempts: 3 })));
    assert_eq!(request_count(&mock_server).await, 3);
}

#[tokio::test]
async fn test_retrieve_gives_up_after_max_retries_plus_one() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(listing_html(3)).set_delay(SLOW_RESPONSE))
        .mount(&mock_server)
        .await;

    let service = service_with_timeout(&format!("{}/", mock_server.uri()), 1, SHORT_TIMEOUT);
    let articles = service.retrieve(5).await;

    assert!(articles.is_empty());
    assert_eq!(request_count(&mock_server).await, 2);
}

#[tokio::test]
async fn test_timeout_once_then_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(listing_html(3)).set_delay(SLOW_RESPONSE))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(listing_html(2)))
        .mount(&mock_server)
        .await;

    let service = service_with_timeout(&format!("{}/", mock_server.uri()), 2, SHORT_TIMEOUT);
    let articles = service.retrieve(5).await;

    assert_eq!(request_count(&mock_server).await, 2);
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[1].title(), "Post number 2");
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let url = format!("{}/", mock_server.uri());
    let client = build_http_client(&UserAgentConfig::default()).unwrap();
    let result = fetch_page(&client, &url, &FetchPolicy::default()).await;

    assert!(matches!(result, Err(FetchError::Status { status: 503 })));
    assert_eq!(request_count(&mock_server).await, 1);
}

#[tokio::test]
async fn test_not_found_yields_empty_list() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let service = service_with_timeout(&format!("{}/", mock_server.uri()), 2, SHORT_TIMEOUT);

    assert!(service.retrieve(5).await.is_empty());
    assert_eq!(request_count(&mock_server).await, 1);
}

#[tokio::test]
async fn test_layout_drift_yields_empty_list() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(
            r#"<html><body><h3 class="post-title"><a href="/new-layout">Redesigned</a></h3></body></html>"#
                .to_string(),
        ))
        .mount(&mock_server)
        .await;

    let service = service_with_timeout(&format!("{}/", mock_server.uri()), 2, SHORT_TIMEOUT);

    assert!(service.retrieve(5).await.is_empty());
}
