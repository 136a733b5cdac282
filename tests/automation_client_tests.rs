//! HTTP automation client tests
//!
//! Exercises the full capability set against a mockito server: request
//! shapes, auth header, response parsing, and non-2xx mapping.

use std::time::Duration;

use workspace_builder::automation::{
    AutomationBackend, AutomationConfig, HttpAutomationClient,
};
use workspace_builder::error::{AutomationError, Error};

fn client_for(server: &mockito::ServerGuard) -> HttpAutomationClient {
    let config = AutomationConfig {
        base_url: server.url(),
        api_key: Some("test-key".to_string()),
        timeout: Duration::from_secs(5),
    };
    HttpAutomationClient::new(config).unwrap()
}

#[tokio::test]
async fn create_session_posts_start_url() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/sessions")
        .match_header("authorization", "Bearer test-key")
        .match_body(mockito::Matcher::JsonString(
            r#"{"url":"https://www.google.com"}"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"session_id":"sess-1","url":"https://www.google.com"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let handle = client
        .create_session("https://www.google.com")
        .await
        .unwrap();

    assert_eq!(handle.session_id, "sess-1");
    assert_eq!(handle.url.as_deref(), Some("https://www.google.com"));
    mock.assert_async().await;
}

#[tokio::test]
async fn create_session_accepts_camel_case_id() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/sessions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"sessionId":"sess-camel"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let handle = client.create_session("https://example.com").await.unwrap();
    assert_eq!(handle.session_id, "sess-camel");
}

#[tokio::test]
async fn step_posts_cmd_to_session_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/sessions/sess-1/step")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"cmd":"Search for \"rust\""}"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"done","url":"https://www.google.com/search?q=rust","status":"DONE"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let resp = client.step("sess-1", "Search for \"rust\"").await.unwrap();

    assert_eq!(resp.message.as_deref(), Some("done"));
    assert_eq!(
        resp.url.as_deref(),
        Some("https://www.google.com/search?q=rust")
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn retrieve_parses_items() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/retrieve")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"fields":["title","url"]}"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data":[
                {"title":"Rust Book","url":"https://doc.rust-lang.org/book/"},
                {"url":"https://crates.io/"}
            ]}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let items = client
        .retrieve(
            "Find five authoritative sources",
            "https://www.google.com",
            &["title", "url"],
        )
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title.as_deref(), Some("Rust Book"));
    assert!(items[1].title.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn close_session_issues_delete() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/sessions/sess-1")
        .with_status(204)
        .create_async()
        .await;

    let client = client_for(&server);
    client.close_session("sess-1").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn non_2xx_maps_to_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/sessions")
        .with_status(401)
        .with_body("invalid token")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .create_session("https://example.com")
        .await
        .unwrap_err();

    match err {
        Error::Automation(AutomationError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "invalid token");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/sessions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not json at all")
        .create_async()
        .await;

    let client = client_for(&server);
    assert!(client.create_session("https://example.com").await.is_err());
}
