//! Tests for the user directory

use super::*;
use crate::config::{load_config_from_str, ListingConfig};
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::{Cursor, PageFetcher};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user(name: &str) -> User {
    User {
        display_name: Some(name.to_string()),
        ..User::default()
    }
}

fn directory_for(server: &MockServer, listing: ListingConfig) -> UserDirectory {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .max_retries(0)
        .no_rate_limit()
        .build();
    UserDirectory::new(HttpClient::with_config(config).unwrap(), listing)
}

// ============================================================================
// User
// ============================================================================

#[test]
fn test_user_deserialize_camel_case() {
    let user: User = serde_json::from_value(json!({
        "id": "87d349ed-44d7-43e1-9a83-5f2406dee5bd",
        "displayName": "Adele Vance",
        "mail": "AdeleV@contoso.com",
        "userPrincipalName": "AdeleV@contoso.com",
        "jobTitle": "Retail Manager"
    }))
    .unwrap();

    assert_eq!(user.display_name.as_deref(), Some("Adele Vance"));
    assert_eq!(
        user.user_principal_name.as_deref(),
        Some("AdeleV@contoso.com")
    );
}

#[test]
fn test_user_serialize_skips_missing() {
    let value = serde_json::to_value(user("Alex Wilber")).unwrap();
    assert_eq!(value, json!({ "displayName": "Alex Wilber" }));
}

#[test_case(json!({ "displayName": "Adele", "mail": "a@x" }), "Adele" ; "display name")]
#[test_case(json!({ "userPrincipalName": "upn@x", "mail": "a@x" }), "upn@x" ; "upn")]
#[test_case(json!({ "mail": "a@x", "id": "1" }), "a@x" ; "mail")]
#[test_case(json!({ "id": "1" }), "1" ; "id")]
#[test_case(json!({}), "<unnamed>" ; "nothing")]
fn test_user_label(value: serde_json::Value, expected: &str) {
    let user: User = serde_json::from_value(value).unwrap();
    assert_eq!(user.label(), expected);
}

// ============================================================================
// UserDirectory
// ============================================================================

#[test]
fn test_from_config() {
    let config = load_config_from_str(
        "base_url: https://graph.microsoft.com/v1.0\nlisting: { page_size: 25 }\n",
    )
    .unwrap();
    let directory = UserDirectory::from_config(&config).unwrap();

    assert_eq!(directory.listing().page_size, 25);
    assert_eq!(
        directory.fetcher().query().to_params().get("$top"),
        Some(&"25".to_string())
    );
}

#[tokio::test]
async fn test_fetcher_sends_listing_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("$top", "5"))
        .and(query_param("$select", "id,displayName"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "id": "1", "displayName": "Adele Vance" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let listing = ListingConfig {
        select: vec!["id".to_string(), "displayName".to_string()],
        ..ListingConfig::default()
    };
    let directory = directory_for(&mock_server, listing);

    let page = PageFetcher::<User>::fetch(&directory.fetcher(), &Cursor::Start)
        .await
        .unwrap();

    assert_eq!(page.records.len(), 1);
    assert!(page.is_last());
}

#[tokio::test]
async fn test_list_users_follows_next_links() {
    let mock_server = MockServer::start().await;
    let next_link = format!("{}/users?$skiptoken=X", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("$skiptoken", "X"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "displayName": "carol" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("$top", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "displayName": "alice" }, { "displayName": "bob" }],
            "@odata.nextLink": next_link
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let directory = directory_for(&mock_server, ListingConfig::default());
    let (users, outcome) = directory
        .list_users(&CancellationToken::new())
        .collect_all()
        .await;

    assert_eq!(users, vec![user("alice"), user("bob"), user("carol")]);
    assert!(outcome.is_complete());
    assert_eq!(outcome.stats().pages, 2);
}
