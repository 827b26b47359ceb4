//! Configuration and client tests.
//!
//! Tests actual behavior, not constants.

use scopus_impact::client::ScopusClient;
use scopus_impact::config::Config;

// =============================================================================
// Config Behavior Tests
// =============================================================================

#[test]
fn test_config_default_has_no_api_key() {
    let config = Config::default();
    assert!(!config.has_api_key());
}

#[test]
fn test_config_with_api_key() {
    let config = Config::new(Some("test-key".to_string()), None);
    assert!(config.has_api_key());
    assert_eq!(config.api_key.as_deref(), Some("test-key"));
}

#[test]
fn test_config_base_url_override_trims_slash() {
    let config = Config::default().with_base_url("http://proxy.local/");
    assert_eq!(config.base_url, "http://proxy.local");
}

// =============================================================================
// Client Behavior Tests
// =============================================================================

#[test]
fn test_client_creation_without_key_succeeds() {
    let client = ScopusClient::new(Config::default());
    assert!(client.is_ok());
}

#[test]
fn test_client_with_inst_token_succeeds() {
    let config = Config::new(Some("key".to_string()), Some("token".to_string()));
    assert!(ScopusClient::new(config).is_ok());
}

#[test]
fn test_client_rejects_invalid_header_value() {
    let config = Config::new(Some("bad\nkey".to_string()), None);
    assert!(ScopusClient::new(config).is_err());
}

#[test]
fn test_client_reports_api_key_status() {
    let client = ScopusClient::new(Config::new(Some("key".to_string()), None)).unwrap();
    assert!(client.has_api_key());

    let client_no_key = ScopusClient::new(Config::default()).unwrap();
    assert!(!client_no_key.has_api_key());
}

#[test]
fn test_client_debug_hides_api_key() {
    let client = ScopusClient::new(Config::new(Some("super-secret-key".to_string()), None)).unwrap();
    let debug = format!("{client:?}");
    // API key should NOT appear in debug output
    assert!(!debug.contains("super-secret-key"));
    assert!(debug.contains("has_api_key"));
}
