//! End-to-end dispatch: mock homepage → dispatcher → mock LINE reply API

use crate::support::{listing_html, service_with_timeout, BrokenSource};
use aivi_news_bot::bot::{CommandContext, DispatchOutcome, Dispatcher, ReplyTarget, TriggerCommand};
use aivi_news_bot::line::LineReplier;
use aivi_news_bot::news::{FALLBACK_ERROR_MESSAGE, NEWS_HEADER, NO_ARTICLES_MESSAGE};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REPLY_PATH: &str = "/v2/bot/message/reply";
const ACCESS_TOKEN: &str = "test-access-token";

async fn line_api(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(REPLY_PATH))
        .and(header("authorization", format!("Bearer {}", ACCESS_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(status).set_body_string("{}"))
        .mount(&server)
        .await;
    server
}

async fn homepage(body: String) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;
    server
}

/// Reply texts received by the mock LINE API, in order
async fn sent_texts(line: &MockServer) -> Vec<(String, String)> {
    line.received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| {
            let body: Value = request.body_json().unwrap();
            (
                body["replyToken"].as_str().unwrap_or_default().to_string(),
                body["messages"][0]["text"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

fn dispatcher_for(home: &MockServer, line: &MockServer) -> Dispatcher {
    let source = service_with_timeout(&format!("{}/", home.uri()), 2, Duration::from_millis(200));
    Dispatcher::new(
        TriggerCommand::default(),
        5,
        Arc::new(source),
        Arc::new(LineReplier::new(&line.uri(), ACCESS_TOKEN).unwrap()),
    )
}

fn command(text: &str) -> CommandContext {
    CommandContext::new(ReplyTarget::new("reply-token-1"), text)
}

#[tokio::test]
async fn test_command_replies_with_latest_articles() {
    let home = homepage(listing_html(7)).await;
    let line = line_api(200).await;
    let dispatcher = dispatcher_for(&home, &line);

    let outcome = dispatcher.handle(&command(" /Aivi ")).await;

    assert_eq!(outcome, DispatchOutcome::Replied { articles: 5 });
    let sent = sent_texts(&line).await;
    assert_eq!(sent.len(), 1);

    let (token, text) = &sent[0];
    assert_eq!(token, "reply-token-1");
    assert!(text.starts_with(NEWS_HEADER));
    assert!(text.contains("1. Post number 1\n   🔗 https://www.aivi.fyi/llms/post-1/"));
    assert!(text.contains("5. Post number 5"));
    assert!(!text.contains("Post number 6"));
}

#[tokio::test]
async fn test_unreachable_homepage_replies_no_articles() {
    let home = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&home)
        .await;
    let line = line_api(200).await;
    let dispatcher = dispatcher_for(&home, &line);

    let outcome = dispatcher.handle(&command("/aivi")).await;

    assert_eq!(outcome, DispatchOutcome::Replied { articles: 0 });
    let sent = sent_texts(&line).await;
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.contains(NO_ARTICLES_MESSAGE));
}

#[tokio::test]
async fn test_other_text_sends_nothing() {
    let home = homepage(listing_html(3)).await;
    let line = line_api(200).await;
    let dispatcher = dispatcher_for(&home, &line);

    for text in ["hello", "/aiviii"] {
        assert_eq!(dispatcher.handle(&command(text)).await, DispatchOutcome::Ignored);
    }

    assert!(sent_texts(&line).await.is_empty());
    assert!(home.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_rejected_reply_gets_one_fallback_attempt() {
    let home = homepage(listing_html(3)).await;
    let line = line_api(400).await;
    let dispatcher = dispatcher_for(&home, &line);

    let outcome = dispatcher.handle(&command("/aivi")).await;

    assert_eq!(outcome, DispatchOutcome::FallbackFailed);
    let sent = sent_texts(&line).await;
    assert_eq!(sent.len(), 2);
    assert!(sent[0].1.starts_with(NEWS_HEADER));
    assert_eq!(sent[1].1, FALLBACK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_source_failure_sends_error_message() {
    let line = line_api(200).await;
    let dispatcher = Dispatcher::new(
        TriggerCommand::default(),
        5,
        Arc::new(BrokenSource),
        Arc::new(LineReplier::new(&line.uri(), ACCESS_TOKEN).unwrap()),
    );

    let outcome = dispatcher.handle(&command("/aivi")).await;

    assert_eq!(outcome, DispatchOutcome::FallbackReplied);
    let sent = sent_texts(&line).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].1, FALLBACK_ERROR_MESSAGE);
}
