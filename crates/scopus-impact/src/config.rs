//! Configuration for the Scopus impact report.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the Elsevier APIs.
    pub const BASE_URL: &str = "https://api.elsevier.com";

    /// Scopus document search path.
    pub const SCOPUS_SEARCH: &str = "/content/search/scopus";

    /// Scopus author search path.
    pub const AUTHOR_SEARCH: &str = "/content/search/author";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Delay between page requests (the default Scopus quota allows ~9 req/s).
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_millis(120);

    /// Documents per page. 25 is the ceiling for the COMPLETE view.
    pub const PAGE_SIZE: u32 = 25;

    /// Hard stop on the number of citing documents fetched per author.
    pub const MAX_DOCUMENTS: usize = 20_000;

    /// Retries for transient failures (429, 5xx, connection resets).
    pub const MAX_RETRIES: u32 = 3;

    /// Cache TTL (5 minutes).
    pub const CACHE_TTL: Duration = Duration::from_secs(300);

    /// Maximum cache size.
    pub const CACHE_MAX_SIZE: u64 = 1000;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 4;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Elsevier API key.
    pub api_key: Option<String>,

    /// Institutional token, required by some subscriber setups.
    pub inst_token: Option<String>,

    /// Base URL (overridable for mock servers and proxies).
    pub base_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Delay between requests.
    pub rate_limit_delay: Duration,

    /// Documents requested per page.
    pub page_size: u32,

    /// Safeguard on documents fetched per author.
    pub max_documents: usize,

    /// Retries for transient failures.
    pub max_retries: u32,

    /// Cache TTL.
    pub cache_ttl: Duration,

    /// Maximum cache size.
    pub cache_max_size: u64,
}

impl Config {
    /// Create a new configuration against the public Elsevier endpoint.
    #[must_use]
    pub fn new(api_key: Option<String>, inst_token: Option<String>) -> Self {
        Self {
            api_key,
            inst_token,
            base_url: api::BASE_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            rate_limit_delay: api::RATE_LIMIT_DELAY,
            page_size: api::PAGE_SIZE,
            max_documents: api::MAX_DOCUMENTS,
            max_retries: api::MAX_RETRIES,
            cache_ttl: api::CACHE_TTL,
            cache_max_size: api::CACHE_MAX_SIZE,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: Some("test-key".to_string()),
            inst_token: None,
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            rate_limit_delay: Duration::from_millis(0), // No delay in tests
            page_size: api::PAGE_SIZE,
            max_documents: api::MAX_DOCUMENTS,
            max_retries: 0,
            cache_ttl: Duration::from_secs(0), // No caching in tests
            cache_max_size: 0,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// `SCOPUS_API_KEY` wins over `ELS_APIKEY`; `SCOPUS_BASE_URL` overrides
    /// the endpoint. Blank values count as unset.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::from_lookup(|name| std::env::var(name).ok()))
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = non_blank(lookup("SCOPUS_API_KEY"))
            .or_else(|| non_blank(lookup("ELS_APIKEY")));
        let inst_token = non_blank(lookup("SCOPUS_INST_TOKEN"));

        let mut config = Self::new(api_key, inst_token);
        if let Some(url) = non_blank(lookup("SCOPUS_BASE_URL")) {
            config = config.with_base_url(&url);
        }
        config
    }

    /// Apply explicit credentials on top of this configuration.
    ///
    /// A blank or missing override keeps the current value.
    #[must_use]
    pub fn with_overrides(mut self, api_key: Option<String>, inst_token: Option<String>) -> Self {
        if let Some(key) = non_blank(api_key) {
            self.api_key = Some(key);
        }
        if let Some(token) = non_blank(inst_token) {
            self.inst_token = Some(token);
        }
        self
    }

    /// Replace the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Full URL of the document search endpoint.
    #[must_use]
    pub fn scopus_search_url(&self) -> String {
        format!("{}{}", self.base_url, api::SCOPUS_SEARCH)
    }

    /// Full URL of the author search endpoint.
    #[must_use]
    pub fn author_search_url(&self) -> String {
        format!("{}{}", self.base_url, api::AUTHOR_SEARCH)
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}
