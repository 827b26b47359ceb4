//! Live tests against the Scopus API.
//!
//! Require a valid key in `SCOPUS_API_KEY`.
//! Run with: `cargo test --features integration -- --nocapture`

#![cfg(feature = "integration")]

use scopus_impact::client::{CitationSource, ScopusClient};
use scopus_impact::config::Config;
use scopus_impact::impact::{self, AuthorPool};

/// A long-standing, well-cited Scopus author profile.
const KNOWN_AUTHOR: u64 = 7_004_212_771;

fn create_client() -> ScopusClient {
    let config = Config::from_env().expect("config from env");
    ScopusClient::new(config).expect("Failed to create client")
}

#[tokio::test]
async fn test_author_lookup() {
    let client = create_client();
    let profile = client.author_profile(KNOWN_AUTHOR).await.expect("lookup should succeed");
    let profile = profile.expect("author should exist");
    assert_eq!(profile.id, KNOWN_AUTHOR);
    assert!(profile.document_count > 0);
}

#[tokio::test]
async fn test_full_report() {
    let client = create_client();
    let mut pool = AuthorPool::new();
    let report = impact::run(&client, KNOWN_AUTHOR, &mut pool).await.expect("report");

    println!("{}", scopus_impact::formatters::format_report(&report, false));
    assert!(report.period > 0);
    assert_eq!(report.years.last().map(|r| r.cumulative), Some(report.impact()));
}
