//! HTTP fetch capability consumed by providers.
//!
//! Providers never talk to the network directly: they hold a [`Fetcher`]
//! handed to them at construction. The trait's contract is deliberately
//! lossy: network errors, non-2xx statuses, and body/parse failures all
//! surface as absence (with a warning logged), because a provider call must
//! degrade to an empty result rather than crash when a site is unreachable.
//!
//! [`HttpClient`] is the production implementation over reqwest; tests swap
//! in stub fetchers serving fixture markup.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use scraper::Html;
use serde_json::Value;
use tracing::{debug, warn};

/// Fetch-a-URL capability: text, decoded JSON, or a parsed document.
///
/// All failure modes collapse to `None`. Per-call timeout and retry policy
/// lives behind this trait, never in extraction code.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the response body as text.
    async fn fetch_text(&self, url: &str) -> Option<String>;

    /// Fetch and decode a JSON response body.
    async fn fetch_json(&self, url: &str) -> Option<Value>;

    /// Fetch and parse an HTML document.
    async fn fetch_document(&self, url: &str) -> Option<Html> {
        self.fetch_text(url)
            .await
            .map(|text| Html::parse_document(&text))
    }
}

/// Knobs for [`HttpClient`]. Application wiring builds one of these;
/// library code never reads configuration from the environment on its own.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_redirects: usize,
    /// Keep a cookie jar across requests within this client.
    pub cookies: bool,
    /// Extra headers sent with every request, on top of the built-in
    /// browser-like defaults.
    pub extra_headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!(
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 ",
                "(KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
            )
            .to_string(),
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            cookies: true,
            extra_headers: Vec::new(),
        }
    }
}

/// Reqwest-backed [`Fetcher`] with connection pooling, HTTP/2, rustls TLS,
/// and transparent decompression.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a client with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client from explicit configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Accept",
            HeaderValue::from_static("text/html,application/xhtml+xml,application/json;q=0.9,*/*;q=0.8"),
        );
        headers.insert("Accept-Language", HeaderValue::from_static("en-US,en;q=0.9"));
        for (name, value) in &config.extra_headers {
            headers.insert(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(value)?,
            );
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            // Let the server negotiate HTTP/2 vs 1.1
            .http2_adaptive_window(true)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .cookie_store(config.cookies)
            .build()?;

        Ok(Self { client })
    }

    /// Get the underlying reqwest client.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        debug!(url, "fetching text");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        debug!(url, "fetching json");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new().expect("Failed to create default client")
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn fetch_text(&self, url: &str) -> Option<String> {
        match self.get_text(url).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(url, error = %e, "fetch failed");
                None
            }
        }
    }

    async fn fetch_json(&self, url: &str) -> Option<Value> {
        match self.get_json(url).await {
            Ok(json) => Some(json),
            Err(e) => {
                warn!(url, error = %e, "json fetch failed");
                None
            }
        }
    }
}
