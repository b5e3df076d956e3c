//! Tests for the token provider

use super::*;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_static_token() {
    let provider = TokenProvider::static_token("fixed-token");
    assert_eq!(provider.access_token().await.unwrap(), "fixed-token");
}

#[tokio::test]
async fn test_client_credentials_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tenant-id/oauth2/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=my-client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "issued-token",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .mount(&mock_server)
        .await;

    let provider = TokenProvider::client_credentials(
        format!("{}/tenant-id/oauth2/token", mock_server.uri()),
        "my-client",
        "my-secret",
    );

    assert_eq!(provider.access_token().await.unwrap(), "issued-token");
}

#[tokio::test]
async fn test_token_is_cached() {
    let mock_server = MockServer::start().await;

    // Exactly one token request expected even across repeated calls
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "cached-token",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = TokenProvider::client_credentials(
        format!("{}/oauth2/token", mock_server.uri()),
        "id",
        "secret",
    );

    for _ in 0..3 {
        assert_eq!(provider.access_token().await.unwrap(), "cached-token");
    }
}

#[tokio::test]
async fn test_expired_token_refetched() {
    let mock_server = MockServer::start().await;

    // expires_in of zero is inside the leeway window, so every call refetches
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "short-lived",
            "expires_in": 0
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let provider = TokenProvider::client_credentials(
        format!("{}/oauth2/token", mock_server.uri()),
        "id",
        "secret",
    );

    provider.access_token().await.unwrap();
    provider.access_token().await.unwrap();
}

#[tokio::test]
async fn test_clear_cache_forces_refetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok",
            "expires_in": 3600
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let provider = TokenProvider::client_credentials(
        format!("{}/oauth2/token", mock_server.uri()),
        "id",
        "secret",
    );

    provider.access_token().await.unwrap();
    provider.clear_cache().await;
    provider.access_token().await.unwrap();
}

#[tokio::test]
async fn test_token_endpoint_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string("invalid_client"),
        )
        .mount(&mock_server)
        .await;

    let provider = TokenProvider::client_credentials(
        format!("{}/oauth2/token", mock_server.uri()),
        "bad-id",
        "bad-secret",
    );

    let err = provider.access_token().await.unwrap_err();
    assert!(matches!(err, crate::error::Error::OAuth2 { .. }));
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_resource_included_in_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(body_string_contains("resource=https%3A%2F%2Fstorage.example.net"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "scoped"
        })))
        .mount(&mock_server)
        .await;

    let provider = TokenProvider::client_credentials(
        format!("{}/oauth2/token", mock_server.uri()),
        "id",
        "secret",
    )
    .with_resource("https://storage.example.net");

    assert_eq!(provider.access_token().await.unwrap(), "scoped");
}
