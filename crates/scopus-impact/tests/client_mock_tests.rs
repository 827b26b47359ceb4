//! Mock-based client tests using wiremock.
//!
//! These tests verify request shapes, pagination and status handling against
//! a mocked Scopus API.

use futures::TryStreamExt;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scopus_impact::client::{CitationSource, ScopusClient};
use scopus_impact::config::Config;
use scopus_impact::error::ClientError;
use scopus_impact::impact::{self, AuthorPool};
use scopus_impact::models::{AuthorProfile, CitingDocument};

fn setup_client(mock_server: &MockServer) -> ScopusClient {
    ScopusClient::new(Config::for_testing(&mock_server.uri())).unwrap()
}

/// Sample citing document entry.
fn doc_json(eid: &str, date: &str, authors: &[&str]) -> serde_json::Value {
    let author: Vec<serde_json::Value> = authors
        .iter()
        .enumerate()
        .map(|(i, id)| json!({"@seq": (i + 1).to_string(), "authid": id, "authname": format!("Author{id} A.")}))
        .collect();
    json!({
        "eid": eid,
        "dc:title": format!("Paper {eid}"),
        "prism:publicationName": "Test Journal",
        "prism:aggregationType": "Journal",
        "prism:coverDate": date,
        "author": author
    })
}

/// Sample search page.
fn page_json(total: u64, next: Option<&str>, entries: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "search-results": {
            "opensearch:totalResults": total.to_string(),
            "cursor": {"@current": "x", "@next": next},
            "entry": entries
        }
    })
}

// =============================================================================
// Author search
// =============================================================================

#[tokio::test]
async fn test_search_author_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/search/author"))
        .and(query_param("query", "AU-ID(7004212771)"))
        .and(header("X-ELS-APIKey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search-results": {
                "opensearch:totalResults": "1",
                "entry": [{
                    "dc:identifier": "AUTHOR_ID:7004212771",
                    "preferred-name": {"surname": "Curie", "given-name": "Marie"},
                    "document-count": "88"
                }]
            }
        })))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let profile = client.author_profile(7_004_212_771).await.unwrap().unwrap();

    assert_eq!(profile.id, 7_004_212_771);
    assert_eq!(profile.surname, "Curie");
    assert_eq!(profile.given_name, "Marie");
    assert_eq!(profile.document_count, 88);
}

#[tokio::test]
async fn test_search_author_empty_result_set() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/search/author"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search-results": {
                "opensearch:totalResults": "0",
                "entry": [{"@_fa": "true", "error": "Result set was empty"}]
            }
        })))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    assert!(client.search_author(1).await.unwrap().is_none());
}

// =============================================================================
// Citing documents pagination
// =============================================================================

#[tokio::test]
async fn test_citing_documents_follows_cursor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/search/scopus"))
        .and(query_param("query", "REFAUID(42)"))
        .and(query_param("view", "COMPLETE"))
        .and(query_param("cursor", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            3,
            Some("page2"),
            vec![
                doc_json("e1", "2018-01-01", &["1", "2"]),
                doc_json("e2", "2019-05-01", &["3"]),
            ],
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/content/search/scopus"))
        .and(query_param("cursor", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            3,
            Some("page3"),
            vec![doc_json("e3", "2020-02-02", &["42", "4"])],
        )))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let docs = client.citing_documents(42).await.unwrap();

    let eids: Vec<_> = docs.iter().filter_map(|d| d.eid.as_deref()).collect();
    assert_eq!(eids, vec!["e1", "e2", "e3"]);
    assert_eq!(docs[2].author_ids(), Some(vec![42, 4]));
}

#[tokio::test]
async fn test_undecodable_page_does_not_end_pagination() {
    let mock_server = MockServer::start().await;

    // Every entry on the first page fails to decode
    Mock::given(method("GET"))
        .and(path("/content/search/scopus"))
        .and(query_param("cursor", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            3,
            Some("page2"),
            vec![
                json!({"eid": "bad1", "author": "oops"}),
                json!({"eid": ["bad2"], "prism:coverDate": "2019-01-01"}),
            ],
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/content/search/scopus"))
        .and(query_param("cursor", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            3,
            None,
            vec![doc_json("e3", "2020-02-02", &["5"])],
        )))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let docs = client.citing_documents(42).await.unwrap();
    assert_eq!(docs.len(), 3);
    assert_eq!(docs[2].eid.as_deref(), Some("e3"));

    let mut pool = AuthorPool::new();
    let profile = AuthorProfile { id: 42, ..Default::default() };
    let report = impact::analyze(profile, &docs, &mut pool);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.impact(), 1);
    assert_eq!(report.documents[0].index, 3);
}

#[tokio::test]
async fn test_citing_documents_stops_on_repeated_cursor() {
    let mock_server = MockServer::start().await;

    // Total is overstated and the cursor never advances
    Mock::given(method("GET"))
        .and(path("/content/search/scopus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            100,
            Some("*"),
            vec![doc_json("e1", "2018-01-01", &["1"])],
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let docs = client.citing_documents(42).await.unwrap();
    assert_eq!(docs.len(), 1);
}

#[tokio::test]
async fn test_citing_documents_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/search/scopus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search-results": {
                "opensearch:totalResults": "0",
                "entry": [{"@_fa": "true", "error": "Result set was empty"}]
            }
        })))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    assert!(client.citing_documents(42).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_citing_documents_respects_cap() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/search/scopus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            10,
            Some("more"),
            vec![
                doc_json("e1", "2018-01-01", &["1"]),
                doc_json("e2", "2018-01-01", &["2"]),
                doc_json("e3", "2018-01-01", &["3"]),
            ],
        )))
        .mount(&mock_server)
        .await;

    let mut config = Config::for_testing(&mock_server.uri());
    config.max_documents = 2;
    let client = ScopusClient::new(config).unwrap();

    let docs: Vec<CitingDocument> =
        client.citing_documents_stream(42).try_collect().await.unwrap();
    assert_eq!(docs.len(), 2);
}

// =============================================================================
// Status handling
// =============================================================================

#[tokio::test]
async fn test_missing_api_key_is_refused_locally() {
    let mock_server = MockServer::start().await;

    let mut config = Config::for_testing(&mock_server.uri());
    config.api_key = None;
    let client = ScopusClient::new(config).unwrap();

    let err = client.search_author(1).await.unwrap_err();
    assert!(matches!(err, ClientError::MissingApiKey));
}

#[tokio::test]
async fn test_unauthorized_401() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/search/author"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API Key"))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let err = client.search_author(1).await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized { ref message } if message.contains("Invalid")));
}

#[tokio::test]
async fn test_forbidden_403() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/search/scopus"))
        .respond_with(ResponseTemplate::new(403).set_body_string("AUTHORIZATION_ERROR"))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let err = client.citing_documents(1).await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden { .. }));
}

#[tokio::test]
async fn test_rate_limit_429() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/search/scopus"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "30")
                .set_body_string("QUOTA_EXCEEDED"),
        )
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let err = client.citing_documents(1).await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(err.retry_after(), Some(std::time::Duration::from_secs(30)));
}

#[tokio::test]
async fn test_server_error_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/search/author"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let err = client.search_author(1).await.unwrap_err();
    assert!(matches!(err, ClientError::Server { status: 503, .. }));
}

#[tokio::test]
async fn test_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/search/author"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string("{not json"),
        )
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    assert!(client.search_author(1).await.is_err());
}
