//! Scopus API client.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff
//! - Fixed delay between requests to stay under the key's quota
//! - Cursor pagination exposed as a stream
//! - Response caching with 5-minute TTL

mod source;

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use futures::Stream;
use moka::future::Cache;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{AuthorEntry, AuthorProfile, CitingDocument, SearchResponse, SearchResults};

pub use source::CitationSource;

/// Scopus API client.
#[derive(Clone)]
pub struct ScopusClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Response cache.
    cache: Cache<String, serde_json::Value>,

    /// Whether an API key was configured.
    has_api_key: bool,

    /// Document search URL.
    scopus_search_url: String,

    /// Author search URL.
    author_search_url: String,

    /// Rate limit delay.
    rate_limit_delay: Duration,

    /// Documents per page.
    page_size: u32,

    /// Safeguard on documents fetched per author.
    max_documents: usize,
}

impl ScopusClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if a header value is invalid or HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::ACCEPT, "application/json".parse()?);

        if let Some(ref key) = config.api_key {
            let mut value: reqwest::header::HeaderValue = key.parse()?;
            value.set_sensitive(true);
            headers.insert("X-ELS-APIKey", value);
        }

        if let Some(ref token) = config.inst_token {
            let mut value: reqwest::header::HeaderValue = token.parse()?;
            value.set_sensitive(true);
            headers.insert("X-ELS-Insttoken", value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
            .build_with_max_retries(config.max_retries);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        let cache = Cache::builder()
            .max_capacity(config.cache_max_size)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            client,
            cache,
            has_api_key: config.api_key.is_some(),
            scopus_search_url: config.scopus_search_url(),
            author_search_url: config.author_search_url(),
            rate_limit_delay: config.rate_limit_delay,
            page_size: config.page_size.max(1),
            max_documents: config.max_documents,
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.has_api_key
    }

    /// Look up an author by Scopus ID (`AU-ID(<id>)`).
    ///
    /// Returns `Ok(None)` when the search has no hits.
    pub async fn search_author(&self, author_id: u64) -> ClientResult<Option<AuthorProfile>> {
        let params = vec![("query".to_string(), format!("AU-ID({author_id})"))];

        let response: SearchResponse = self.get(&self.author_search_url, &params).await?;
        let entries: Vec<AuthorEntry> = response.search_results.entries();

        Ok(entries.into_iter().next().map(|e| e.into_profile(author_id)))
    }

    /// Fetch one page of documents citing `author_id` (`REFAUID(<id>)`).
    ///
    /// The first page is requested with cursor `*`.
    pub async fn search_citing_page(
        &self,
        author_id: u64,
        cursor: &str,
    ) -> ClientResult<SearchResults> {
        let params = vec![
            ("query".to_string(), format!("REFAUID({author_id})")),
            ("view".to_string(), "COMPLETE".to_string()),
            ("count".to_string(), self.page_size.to_string()),
            ("cursor".to_string(), cursor.to_string()),
        ];

        let response: SearchResponse = self.get(&self.scopus_search_url, &params).await?;
        Ok(response.search_results)
    }

    /// Stream every document citing `author_id`, following `cursor.@next`.
    ///
    /// Stops when a page comes back empty, the cursor stops advancing, the
    /// reported total has been reached, or the configured document cap trips.
    pub fn citing_documents_stream(
        &self,
        author_id: u64,
    ) -> impl Stream<Item = ClientResult<CitingDocument>> + Send + '_ {
        async_stream::try_stream! {
            let mut cursor = "*".to_string();
            let mut fetched: usize = 0;
            let mut page_no: u32 = 0;

            'pages: loop {
                page_no += 1;
                let page = self.search_citing_page(author_id, &cursor).await?;
                let total = page.total();
                // Malformed entries come back as blank records; `analyze` counts them as skipped
                let docs: Vec<CitingDocument> = page.entries_or_default();

                tracing::debug!(
                    author_id,
                    page = page_no,
                    documents = docs.len(),
                    total,
                    "Fetched citing page"
                );

                if docs.is_empty() {
                    break;
                }

                for doc in docs {
                    if fetched >= self.max_documents {
                        tracing::warn!(
                            author_id,
                            cap = self.max_documents,
                            total,
                            "Document cap reached, truncating citing set"
                        );
                        break 'pages;
                    }
                    fetched += 1;
                    yield doc;
                }

                if total > 0 && fetched as u64 >= total {
                    break;
                }

                match page.next_cursor() {
                    Some(next) if next != cursor => cursor = next.to_string(),
                    _ => break,
                }
            }
        }
    }

    /// Make a GET request.
    async fn get<T>(&self, url: &str, params: &[(String, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        if !self.has_api_key {
            return Err(ClientError::MissingApiKey);
        }

        // Check cache
        let cache_key = self.cache_key("GET", url, params);
        if let Some(cached) = self.cache.get(&cache_key).await {
            return serde_json::from_value(cached).map_err(ClientError::from);
        }

        // Rate limit
        tokio::time::sleep(self.rate_limit_delay).await;

        let response = self.client.get(url).query(params).send().await?;

        let response = self.handle_response(response).await?;
        let value: serde_json::Value = response.json().await?;

        // Cache response
        self.cache.insert(cache_key, value.clone()).await;

        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => Err(ClientError::rate_limited(retry_after_secs(response.headers()))),
            401 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::unauthorized(text))
            }
            403 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::forbidden(text))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }

    /// Generate cache key.
    fn cache_key(&self, method: &str, url: &str, params: &[(String, String)]) -> String {
        use md5::{Digest, Md5};

        let mut hasher = Md5::new();
        hasher.update(method.as_bytes());
        hasher.update(b"|");
        hasher.update(url.as_bytes());
        hasher.update(b"|");

        for (k, v) in params {
            hasher.update(k.as_bytes());
            hasher.update(b"=");
            hasher.update(v.as_bytes());
            hasher.update(b"&");
        }

        format!("{:x}", hasher.finalize())
    }
}

/// Seconds to wait after a 429.
///
/// Scopus sends `X-RateLimit-Reset` as an epoch timestamp; `Retry-After` is
/// honoured if present instead. Defaults to 60.
fn retry_after_secs(headers: &reqwest::header::HeaderMap) -> u64 {
    let header = |name: &str| {
        headers.get(name).and_then(|v| v.to_str().ok()).and_then(|v| v.trim().parse::<u64>().ok())
    };

    if let Some(secs) = header("Retry-After") {
        return secs;
    }

    if let Some(reset) = header("X-RateLimit-Reset") {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
        return reset.saturating_sub(now).max(1);
    }

    60
}

impl std::fmt::Debug for ScopusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopusClient").field("has_api_key", &self.has_api_key()).finish()
    }
}
