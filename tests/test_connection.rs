mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use common::{bare_request, parse_response, raw_exchange, send, todo_dispatcher};
use todo_server::http::connection::ConnectionSettings;
use todo_server::http::dispatch::Dispatcher;
use todo_server::http::request::{Method, Request};
use todo_server::http::response::{Reply, Response};

#[derive(Default)]
struct Counting {
    calls: AtomicUsize,
}

fn counted(handler: &Counting, _: &Request) -> Reply {
    handler.calls.fetch_add(1, Ordering::SeqCst);
    Response::ok("hello").into()
}

fn counting_dispatcher() -> Arc<Dispatcher<Counting>> {
    Arc::new(
        Dispatcher::builder(Counting::default())
            .route(Method::GET, counted)
            .route(Method::HEAD, counted)
            .build()
            .unwrap(),
    )
}

#[tokio::test]
async fn test_normal_response_headers() {
    let dispatcher = counting_dispatcher();

    let resp = send(&dispatcher, &bare_request("GET", "/")).await;

    assert_eq!(resp.status_line, "HTTP/1.1 200 OK");
    assert_eq!(resp.header("Server"), Some("todo-server"));
    assert!(resp.header("Date").unwrap().ends_with(" GMT"));
    assert_eq!(resp.header("Content-Type"), Some("text/html;charset=utf-8"));
    assert_eq!(resp.content_length(), 5);
    assert_eq!(resp.body, b"hello");
    assert_eq!(dispatcher.handler().calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_empty_stream_gets_no_response() {
    let dispatcher = counting_dispatcher();

    let (out, result) = raw_exchange(&dispatcher, ConnectionSettings::default(), b"", true).await;

    assert!(out.is_empty());
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_blank_line_gets_no_response() {
    let dispatcher = counting_dispatcher();

    let (out, result) =
        raw_exchange(&dispatcher, ConnectionSettings::default(), b"\r\n", true).await;

    assert!(out.is_empty());
    assert!(result.is_ok());
    assert_eq!(dispatcher.handler().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_bad_syntax_error_document() {
    let dispatcher = counting_dispatcher();

    let resp = send(&dispatcher, "GET /\r\n\r\n").await;

    assert_eq!(resp.status_line, "HTTP/1.1 400 Bad request syntax GET /");
    assert_eq!(resp.header("Content-Type"), Some("text/html;charset=utf-8"));
    assert_eq!(resp.header("Connection"), Some("close"));
    assert_eq!(resp.content_length(), resp.body.len());
    assert!(resp.text().contains("<title>400 Bad Request</title>"));
    assert!(resp.text().contains("<p>Bad request syntax GET /</p>"));
}

#[tokio::test]
async fn test_bad_version() {
    let dispatcher = counting_dispatcher();

    let resp = send(&dispatcher, "GET / FTP/1.0\r\n\r\n").await;

    assert_eq!(resp.code(), 400);
    assert!(resp.text().contains("Bad request version FTP/1.0"));
    assert_eq!(dispatcher.handler().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_bad_version_on_head_has_no_body() {
    let dispatcher = counting_dispatcher();

    let resp = send(&dispatcher, "HEAD / FTP/1.0\r\n\r\n").await;

    assert_eq!(resp.code(), 400);
    assert!(resp.content_length() > 0);
    assert!(resp.body.is_empty());
}

#[tokio::test]
async fn test_malformed_header_is_not_dispatched() {
    let dispatcher = counting_dispatcher();

    let resp = send(&dispatcher, "GET / HTTP/1.1\r\nHost: x\r\nnonsense\r\n\r\n").await;

    assert_eq!(resp.code(), 400);
    assert!(resp.text().contains("Malformed header line nonsense"));
    assert_eq!(dispatcher.handler().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unknown_method_is_not_implemented() {
    let dispatcher = counting_dispatcher();

    let resp = send(&dispatcher, &bare_request("BREW", "/pot")).await;

    assert_eq!(resp.status_line, "HTTP/1.1 501 Unsupported method BREW");
    assert!(resp.text().contains("<title>501 Not Implemented</title>"));
    assert!(resp.text().contains("<p>Unsupported method BREW</p>"));
}

#[tokio::test]
async fn test_unregistered_known_method_is_not_implemented() {
    let dispatcher = counting_dispatcher();

    let resp = send(&dispatcher, &bare_request("DELETE", "/")).await;

    assert_eq!(resp.code(), 501);
    assert_eq!(dispatcher.handler().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_lowercase_method_is_not_implemented() {
    let dispatcher = counting_dispatcher();

    let resp = send(&dispatcher, &bare_request("get", "/")).await;

    assert_eq!(resp.code(), 501);
}

#[tokio::test]
async fn test_head_never_carries_body() {
    let dispatcher = counting_dispatcher();

    let resp = send(&dispatcher, &bare_request("HEAD", "/")).await;

    assert_eq!(resp.code(), 200);
    assert_eq!(resp.content_length(), 5);
    assert!(resp.body.is_empty());
}

#[tokio::test]
async fn test_not_found_document_matches_length() {
    let dispatcher = todo_dispatcher();

    let resp = send(&dispatcher, &bare_request("GET", "/nowhere")).await;

    assert_eq!(resp.code(), 404);
    assert_eq!(resp.content_length(), resp.body.len());
    assert!(resp.text().contains("<title>404 Not Found</title>"));
    assert!(resp.text().contains("<h1>Not Found</h1>"));
}

#[tokio::test]
async fn test_overlong_request_line_is_414() {
    let dispatcher = counting_dispatcher();
    let request = format!("GET /{} HTTP/1.1\r\n\r\n", "a".repeat(10_000));

    let resp = send(&dispatcher, &request).await;

    assert_eq!(resp.code(), 414);
}

#[tokio::test]
async fn test_textual_content_length_is_400() {
    let dispatcher = counting_dispatcher();

    let resp = send(&dispatcher, "GET / HTTP/1.1\r\nContent-Length: many\r\n\r\n").await;

    assert_eq!(resp.code(), 400);
    assert_eq!(dispatcher.handler().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_body_over_limit_is_413() {
    let dispatcher = counting_dispatcher();
    let settings = ConnectionSettings {
        max_body_bytes: 4,
        ..ConnectionSettings::default()
    };

    let (out, result) = raw_exchange(
        &dispatcher,
        settings,
        b"GET / HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello",
        true,
    )
    .await;

    result.unwrap();
    assert_eq!(parse_response(&out).code(), 413);
}

#[tokio::test]
async fn test_truncated_body_closes_without_response() {
    let dispatcher = counting_dispatcher();

    let (out, result) = raw_exchange(
        &dispatcher,
        ConnectionSettings::default(),
        b"GET / HTTP/1.1\r\nContent-Length: 10\r\n\r\nabc",
        true,
    )
    .await;

    assert!(out.is_empty());
    assert!(result.is_err());
    assert_eq!(dispatcher.handler().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_silent_peer_times_out() {
    let dispatcher = counting_dispatcher();
    let settings = ConnectionSettings {
        read_timeout: Some(Duration::from_millis(50)),
        ..ConnectionSettings::default()
    };

    let (out, result) = raw_exchange(&dispatcher, settings, b"GET / HTTP/1.1\r\n", false).await;

    assert!(out.is_empty());
    assert!(result.is_ok());
}
