//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: token acquisition → authenticated
//! requests → segment walking → items in order.

use blobcursor::auth::TokenProvider;
use blobcursor::http::{BackoffType, HttpClient, HttpClientConfig};
use blobcursor::service::{BlobItem, BlobStore, ListOptions};
use blobcursor::{fetch_fn, Page, PagedLister};
use futures::{FutureExt, StreamExt, TryStreamExt};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn plain_store(server: &MockServer) -> BlobStore {
    BlobStore::new(server.uri(), HttpClient::new()).unwrap()
}

// ============================================================================
// Authenticated end-to-end flow
// ============================================================================

#[tokio::test]
async fn test_authenticated_blob_lifecycle() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tenant/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "issued-token",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Every storage call must carry the issued token
    Mock::given(method("PUT"))
        .and(path("/quickstart"))
        .and(header("Authorization", "Bearer issued-token"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/quickstart/SampleBlob.txt"))
        .and(header("Authorization", "Bearer issued-token"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/quickstart"))
        .and(header("Authorization", "Bearer issued-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "blobs": [{"name": "SampleBlob.txt"}]
        })))
        .mount(&mock_server)
        .await;

    let provider = TokenProvider::client_credentials(
        format!("{}/tenant/oauth2/token", mock_server.uri()),
        "client-id",
        "client-secret",
    );
    let http = HttpClient::with_auth(HttpClientConfig::default(), provider);
    let store = BlobStore::new(mock_server.uri(), http).unwrap();
    let container = store.container("quickstart");

    assert!(container.create().await.unwrap());
    container
        .blob("SampleBlob.txt")
        .put(bytes::Bytes::from_static(b"Hello Azure!"))
        .await
        .unwrap();

    let items = container.list_all().await.unwrap();
    assert_eq!(items, vec![BlobItem::new("SampleBlob.txt")]);
}

#[tokio::test]
async fn test_create_resumes_when_container_exists() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/quickstart"))
        .respond_with(ResponseTemplate::new(409).set_body_string("ContainerAlreadyExists"))
        .mount(&mock_server)
        .await;

    let created = plain_store(&mock_server)
        .container("quickstart")
        .create()
        .await
        .unwrap();
    assert!(!created);
}

// ============================================================================
// Segment walking
// ============================================================================

#[tokio::test]
async fn test_listing_walks_every_segment_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/quickstart"))
        .and(query_param("marker", "seg2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "blobs": [{"name": "e.txt"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/quickstart"))
        .and(query_param("marker", "seg1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "blobs": [{"name": "c.txt"}, {"name": "d.txt"}],
            "next_marker": "seg2"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/quickstart"))
        .and(query_param("maxresults", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "blobs": [{"name": "a.txt"}, {"name": "b.txt"}],
            "next_marker": "seg1"
        })))
        .mount(&mock_server)
        .await;

    let container = plain_store(&mock_server)
        .container("quickstart")
        .with_list_options(ListOptions::with_max_results(2));

    let names: Vec<String> = container
        .list()
        .map_ok(|item| item.name)
        .try_collect()
        .await
        .unwrap();
    assert_eq!(names, vec!["a.txt", "b.txt", "c.txt", "d.txt", "e.txt"]);
}

#[tokio::test]
async fn test_listing_streams_items_before_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/quickstart"))
        .and(query_param("marker", "seg1"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/quickstart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "blobs": [{"name": "a.txt"}],
            "next_marker": "seg1"
        })))
        .mount(&mock_server)
        .await;

    let container = plain_store(&mock_server).container("quickstart");
    let mut stream = std::pin::pin!(container.list());

    // The first segment's item arrives before the second segment fails
    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first, BlobItem::new("a.txt"));

    let err = stream.next().await.unwrap().unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert!(stream.next().await.is_none());
}

// ============================================================================
// Retry behavior under paging
// ============================================================================

#[tokio::test]
async fn test_transient_error_retried_within_one_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/quickstart"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/quickstart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "blobs": [{"name": "a.txt"}]
        })))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .max_retries(3)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_millis(100),
        )
        .build();
    let store = BlobStore::new(mock_server.uri(), HttpClient::with_config(config)).unwrap();

    let items = store.container("quickstart").list_all().await.unwrap();
    assert_eq!(items, vec![BlobItem::new("a.txt")]);
}

// ============================================================================
// Generic paging over a closure fetcher
// ============================================================================

#[tokio::test]
async fn test_paged_lister_over_fetch_fn() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let fetcher = fetch_fn(move |token: Option<String>| {
        counter.fetch_add(1, Ordering::SeqCst);
        async move {
            let page = match token.as_deref() {
                None => Page::with_continuation(vec![1, 2], "next"),
                Some("next") => Page::new(vec![3]),
                Some(other) => panic!("unexpected token {other}"),
            };
            Ok(page)
        }
        .boxed()
    });

    let items = PagedLister::new(fetcher).collect_all().await.unwrap();
    assert_eq!(items, vec![1, 2, 3]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
