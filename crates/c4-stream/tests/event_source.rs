//! Event source tests against a mocked game server.

use std::time::Duration;

use c4_stream::{
    Connector, EventSourceConfig, HttpConnector, HttpEventSource, SourceEvent, StreamError,
    Subscription,
};
use futures_util::StreamExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EVENT_STREAM: &str = "text/event-stream";

fn stream_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), EVENT_STREAM)
}

fn subscribe(server: &MockServer) -> Subscription {
    let config = EventSourceConfig::new(format!("{}/game/stream", server.uri()))
        .with_retry(Duration::from_millis(20));
    HttpEventSource::new(config).unwrap().connect()
}

async fn next_event(subscription: &mut Subscription) -> Option<SourceEvent> {
    tokio::time::timeout(Duration::from_secs(5), subscription.next())
        .await
        .expect("timed out waiting for event")
}

#[tokio::test]
async fn test_open_then_board_update() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/game/stream"))
        .and(header("accept", EVENT_STREAM))
        .respond_with(stream_response("event: board-update\ndata: <div>X</div>\n\n"))
        .mount(&server)
        .await;

    let mut subscription = subscribe(&server);

    assert!(matches!(next_event(&mut subscription).await, Some(SourceEvent::Open)));
    match next_event(&mut subscription).await {
        Some(SourceEvent::Message(message)) => {
            assert_eq!(message.event, "board-update");
            assert_eq!(message.data, "<div>X</div>");
        }
        other => panic!("expected message, got {:?}", other),
    }
}

#[tokio::test]
async fn test_reconnects_after_stream_ends() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/game/stream"))
        .respond_with(stream_response("event: score-update\ndata: 1 - 0\n\n"))
        .mount(&server)
        .await;

    let mut subscription = subscribe(&server);

    assert!(matches!(next_event(&mut subscription).await, Some(SourceEvent::Open)));
    assert!(matches!(next_event(&mut subscription).await, Some(SourceEvent::Message(_))));
    assert!(matches!(
        next_event(&mut subscription).await,
        Some(SourceEvent::Error(StreamError::Ended))
    ));
    assert!(matches!(next_event(&mut subscription).await, Some(SourceEvent::Open)));
}

#[tokio::test]
async fn test_reconnect_sends_last_event_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/game/stream"))
        .and(header("last-event-id", "7"))
        .respond_with(stream_response("event: score-update\ndata: resumed\n\n"))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/game/stream"))
        .respond_with(stream_response("id: 7\nevent: score-update\ndata: first\n\n"))
        .mount(&server)
        .await;

    let mut subscription = subscribe(&server);

    let mut payloads = Vec::new();
    while payloads.len() < 2 {
        match next_event(&mut subscription).await {
            Some(SourceEvent::Message(message)) => payloads.push(message.data),
            Some(_) => {}
            None => panic!("subscription ended early"),
        }
    }

    assert_eq!(payloads, vec!["first", "resumed"]);
}

#[tokio::test]
async fn test_server_retry_replaces_initial_delay() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/game/stream"))
        .respond_with(stream_response("retry: 10\nevent: score-update\ndata: 1 - 0\n\n"))
        .mount(&server)
        .await;

    // Far longer than the test timeout, so only the server's value can apply.
    let config = EventSourceConfig::new(format!("{}/game/stream", server.uri()))
        .with_retry(Duration::from_secs(600));
    let mut subscription = HttpEventSource::new(config).unwrap().connect();

    assert!(matches!(next_event(&mut subscription).await, Some(SourceEvent::Open)));
    match next_event(&mut subscription).await {
        Some(SourceEvent::Message(message)) => {
            assert_eq!(message.retry, Some(Duration::from_millis(10)));
        }
        other => panic!("expected message, got {:?}", other),
    }
    assert!(matches!(
        next_event(&mut subscription).await,
        Some(SourceEvent::Error(StreamError::Ended))
    ));
    assert!(matches!(next_event(&mut subscription).await, Some(SourceEvent::Open)));
}

#[tokio::test]
async fn test_bad_status_fails_permanently() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/game/stream"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut subscription = subscribe(&server);

    assert!(matches!(
        next_event(&mut subscription).await,
        Some(SourceEvent::Error(StreamError::Status(404)))
    ));
    assert!(next_event(&mut subscription).await.is_none());
}

#[tokio::test]
async fn test_wrong_content_type_fails_permanently() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/game/stream"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"<html></html>".to_vec(), "text/html"),
        )
        .mount(&server)
        .await;

    let mut subscription = subscribe(&server);

    match next_event(&mut subscription).await {
        Some(SourceEvent::Error(StreamError::ContentType(content_type))) => {
            assert!(content_type.starts_with("text/html"));
        }
        other => panic!("expected content type error, got {:?}", other),
    }
    assert!(next_event(&mut subscription).await.is_none());
}

#[tokio::test]
async fn test_close_ends_subscription() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/game/stream"))
        .respond_with(stream_response(": keep-alive\n\n"))
        .mount(&server)
        .await;

    let mut subscription = HttpConnector::new(Duration::from_millis(20))
        .open(&format!("{}/game/stream", server.uri()))
        .unwrap();

    assert!(matches!(next_event(&mut subscription).await, Some(SourceEvent::Open)));
    subscription.close();

    // Drain whatever was buffered before the task stopped.
    while next_event(&mut subscription).await.is_some() {}
}
