//! Tests for pagination module

use super::*;
use crate::http::{HttpClient, HttpClientConfig};
use crate::Error;
use pretty_assertions::assert_eq;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Row {
    name: String,
}

fn row(name: &str) -> Option<Row> {
    Some(Row {
        name: name.to_string(),
    })
}

fn client_for(server: &MockServer) -> Arc<HttpClient> {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .max_retries(0)
        .no_rate_limit()
        .build();
    Arc::new(HttpClient::with_config(config).unwrap())
}

// ============================================================================
// Cursor / Page Tests
// ============================================================================

#[test_case(None, Cursor::Exhausted ; "absent token")]
#[test_case(Some(""), Cursor::Exhausted ; "empty token")]
#[test_case(Some("X"), Cursor::Next("X".to_string()) ; "token")]
fn test_cursor_from_token(token: Option<&str>, expected: Cursor) {
    assert_eq!(Cursor::from_token(token.map(String::from)), expected);
}

#[test]
fn test_cursor_accessors() {
    assert!(Cursor::default().is_start());
    assert!(Cursor::Exhausted.is_exhausted());
    assert!(!Cursor::Next("abc".to_string()).is_exhausted());
}

#[test]
fn test_page_constructors() {
    let page: Page<Row> = Page::with_next(vec![row("alice"), None], "X");
    assert!(!page.is_last());
    assert_eq!(page.next, Cursor::Next("X".to_string()));

    let page: Page<Row> = Page::last(vec![]);
    assert!(page.is_last());
}

#[test]
fn test_page_query_params() {
    let query = PageQuery::new(5).param("$filter", "accountEnabled eq true");
    let params = query.to_params();

    assert_eq!(params.get("$top"), Some(&"5".to_string()));
    assert_eq!(
        params.get("$filter"),
        Some(&"accountEnabled eq true".to_string())
    );

    let query = PageQuery::new(50).with_page_size_param("limit");
    assert_eq!(query.to_params().get("limit"), Some(&"50".to_string()));
}

// ============================================================================
// NextCursor Tests
// ============================================================================

#[test]
fn test_next_link_extract() {
    let strategy = NextCursor::next_link();
    let body = json!({ "@odata.nextLink": "https://graph/users?$skiptoken=X", "value": [] });

    assert_eq!(
        strategy.extract(&body, &HeaderMap::new()),
        Cursor::Next("https://graph/users?$skiptoken=X".to_string())
    );
    assert_eq!(
        strategy.extract(&json!({ "value": [] }), &HeaderMap::new()),
        Cursor::Exhausted
    );
}

#[test]
fn test_link_header_extract() {
    let strategy = NextCursor::link_header("next");
    let mut headers = HeaderMap::new();
    headers.insert(
        "link",
        HeaderValue::from_static(
            "<https://api.example.com/users?page=1>; rel=\"prev\", <https://api.example.com/users?page=3>; rel=\"next\"",
        ),
    );

    assert_eq!(
        strategy.extract(&json!([]), &headers),
        Cursor::Next("https://api.example.com/users?page=3".to_string())
    );
    assert_eq!(
        strategy.extract(&json!([]), &HeaderMap::new()),
        Cursor::Exhausted
    );
}

#[test]
fn test_parse_link_header_multiple_rels() {
    let header = "<https://a/2>; rel=\"next last\"";
    assert_eq!(parse_link_header(header, "next"), Some("https://a/2".to_string()));
    assert_eq!(parse_link_header(header, "prev"), None);
}

#[test]
fn test_request_for_start_sends_query() {
    let strategy = NextCursor::next_link();
    let query = PageQuery::new(5).param("$select", "displayName,mail");

    let (url, params) = strategy.request_for(&Cursor::Start, "/users", &query).unwrap();

    assert_eq!(url, "/users");
    assert_eq!(params.get("$top"), Some(&"5".to_string()));
    assert_eq!(
        params.get("$select"),
        Some(&"displayName,mail".to_string())
    );
}

#[test]
fn test_request_for_next_link_has_no_query() {
    let strategy = NextCursor::next_link();
    let cursor = Cursor::Next("https://graph/users?$skiptoken=X".to_string());

    let (url, params) = strategy
        .request_for(&cursor, "/users", &PageQuery::new(5))
        .unwrap();

    assert_eq!(url, "https://graph/users?$skiptoken=X");
    assert!(params.is_empty());
}

#[test]
fn test_request_for_cursor_param_repeats_query() {
    let strategy = NextCursor::cursor_param("starting_after", "meta.next");
    let cursor = Cursor::Next("obj_123".to_string());
    let query = PageQuery::new(50).with_page_size_param("limit");

    let (url, params) = strategy.request_for(&cursor, "/items", &query).unwrap();

    assert_eq!(url, "/items");
    assert_eq!(params.get("limit"), Some(&"50".to_string()));
    assert_eq!(
        params.get("starting_after"),
        Some(&"obj_123".to_string())
    );
}

#[test]
fn test_request_for_exhausted_is_error() {
    let result = NextCursor::next_link().request_for(&Cursor::Exhausted, "/users", &PageQuery::new(5));
    assert!(result.is_err());
}

#[test]
fn test_next_cursor_deserialize() {
    let strategy: NextCursor = serde_yaml::from_str("type: next_link\n").unwrap();
    assert_eq!(strategy, NextCursor::next_link());

    let strategy: NextCursor =
        serde_yaml::from_str("type: cursor_param\nparam: cursor\npath: meta.next\n").unwrap();
    assert_eq!(strategy, NextCursor::cursor_param("cursor", "meta.next"));
}

// ============================================================================
// HttpPageFetcher Tests
// ============================================================================

#[tokio::test]
async fn test_fetcher_follows_next_link() {
    let mock_server = MockServer::start().await;
    let next_link = format!("{}/users/next?$skiptoken=X", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("$top", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "name": "alice" }, { "name": "bob" }],
            "@odata.nextLink": next_link
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/next"))
        .and(query_param("$skiptoken", "X"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "name": "carol" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpPageFetcher::new(client_for(&mock_server), "/users", PageQuery::new(2));

    let first: Page<Row> = fetcher.fetch(&Cursor::Start).await.unwrap();
    assert_eq!(first.records, vec![row("alice"), row("bob")]);
    assert_eq!(first.next, Cursor::Next(next_link.clone()));

    let second: Page<Row> = fetcher.fetch(&first.next).await.unwrap();
    assert_eq!(second.records, vec![row("carol")]);
    assert!(second.is_last());
}

#[tokio::test]
async fn test_fetcher_link_header() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/users?page=2", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("per_page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", format!("<{next}>; rel=\"next\"").as_str())
                .set_body_json(json!([{ "name": "alice" }])),
        )
        .mount(&mock_server)
        .await;

    let fetcher = HttpPageFetcher::new(
        client_for(&mock_server),
        "/users",
        PageQuery::new(1).with_page_size_param("per_page"),
    )
    .with_next_cursor(NextCursor::link_header("next"))
    .with_decoder(crate::decode::JsonDecoder::with_path(""));

    let page: Page<Row> = fetcher.fetch(&Cursor::Start).await.unwrap();
    assert_eq!(page.records, vec![row("alice")]);
    assert_eq!(page.next, Cursor::Next(next));
}

#[tokio::test]
async fn test_fetcher_wraps_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(401).set_body_string("InvalidAuthenticationToken"))
        .mount(&mock_server)
        .await;

    let fetcher = HttpPageFetcher::new(client_for(&mock_server), "/users", PageQuery::new(5));
    let err = PageFetcher::<Row>::fetch(&fetcher, &Cursor::Start)
        .await
        .unwrap_err();

    match err {
        Error::Fetch { page, source } => {
            assert_eq!(page, 1);
            assert!(matches!(*source, Error::HttpStatus { status: 401, .. }));
        }
        other => panic!("Expected Fetch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetcher_wraps_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&mock_server)
        .await;

    let fetcher = HttpPageFetcher::new(client_for(&mock_server), "/users", PageQuery::new(5));
    let err = PageFetcher::<Row>::fetch(&fetcher, &Cursor::Start)
        .await
        .unwrap_err();

    assert!(err.is_fetch());
    assert!(err.to_string().contains("Failed to extract records"));
}

#[tokio::test]
async fn test_fetcher_timeout_is_fetch_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({ "value": [] })),
        )
        .mount(&mock_server)
        .await;

    let fetcher = HttpPageFetcher::new(client_for(&mock_server), "/users", PageQuery::new(5))
        .with_timeout(Duration::from_millis(50));
    let err = PageFetcher::<Row>::fetch(&fetcher, &Cursor::Start)
        .await
        .unwrap_err();

    match err {
        Error::Fetch { source, .. } => {
            assert!(matches!(*source, Error::Timeout { timeout_ms: 50 }));
        }
        other => panic!("Expected Fetch, got {other:?}"),
    }
}
