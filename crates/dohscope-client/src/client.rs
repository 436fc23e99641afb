//! Main dohscope HTTP client implementation.

use crate::api::{CertificateApi, DnsApi};
use crate::config::ClientConfig;
use dohscope_core::{DohError, Result};
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Media type for the JSON flavour of DNS-over-HTTPS
const DNS_JSON: &str = "application/dns-json";

/// Client for a DNS-over-HTTPS resolver and a certificate fetch proxy
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Clone)]
pub struct DohClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    resolver_url: Url,
    certificate_proxy_url: Url,
    timeout: Duration,
}

impl DohClient {
    /// Create a client against the default public endpoints
    pub fn new() -> Result<Self> {
        DohClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> DohClientBuilder {
        DohClientBuilder::new()
    }

    /// Access DNS resolution endpoints
    #[must_use]
    pub fn dns(&self) -> DnsApi<'_> {
        DnsApi::new(self)
    }

    /// Access the certificate prober
    #[must_use]
    pub fn certificates(&self) -> CertificateApi<'_> {
        CertificateApi::new(self)
    }

    /// Resolver endpoint in use
    #[must_use]
    pub fn resolver_url(&self) -> &Url {
        &self.inner.resolver_url
    }

    /// Certificate proxy endpoint in use
    #[must_use]
    pub fn certificate_proxy_url(&self) -> &Url {
        &self.inner.certificate_proxy_url
    }

    /// Perform a GET against the resolver and decode the JSON body
    pub(crate) async fn get_resolver<T: DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = Self::build_url(&self.inner.resolver_url, params);
        debug!(url = %url, "GET resolver");

        let response = self
            .inner
            .http
            .get(url)
            .header(ACCEPT, HeaderValue::from_static(DNS_JSON))
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        self.handle_response(response).await
    }

    /// Perform a GET against the certificate proxy, returning the raw response
    ///
    /// The status is not checked; callers inspect headers themselves.
    pub(crate) async fn get_certificate_proxy(
        &self,
        params: &[(&str, &str)],
    ) -> Result<reqwest::Response> {
        let url = Self::build_url(&self.inner.certificate_proxy_url, params);
        debug!(url = %url, "GET certificate proxy");

        self.inner
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))
    }

    /// Append query parameters to an endpoint
    fn build_url(endpoint: &Url, params: &[(&str, &str)]) -> Url {
        let mut url = endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        url
    }

    /// Convert a reqwest failure into a DohError
    fn transport_error(&self, err: &reqwest::Error) -> DohError {
        if err.is_timeout() {
            DohError::Timeout(self.inner.timeout.as_secs())
        } else {
            DohError::Network(err.to_string())
        }
    }

    /// Handle a response that should carry JSON
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await.map_err(|e| self.transport_error(&e))?;
            serde_json::from_str(&body).map_err(|e| DohError::MalformedResponse(e.to_string()))
        } else {
            Self::handle_error(status.as_u16(), response).await
        }
    }

    /// Convert an error response to a DohError
    async fn handle_error<T>(status: u16, response: reqwest::Response) -> Result<T> {
        let body = response.text().await.unwrap_or_default();

        // Resolvers report problems either as {"error": ..} or in "Comment"
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .or_else(|| v.get("Comment"))
                    .and_then(|e| e.as_str())
                    .map(String::from)
            })
            .unwrap_or(body);

        warn!(status, "resolver returned an error status");
        Err(DohError::Upstream { status, message })
    }
}

/// Builder for configuring a [`DohClient`]
pub struct DohClientBuilder {
    config: ClientConfig,
}

impl Default for DohClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DohClientBuilder {
    /// Create a builder with default endpoints
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Start from an existing configuration
    #[must_use]
    pub const fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Set the resolver endpoint (useful for testing)
    #[must_use]
    pub fn resolver_url(mut self, url: impl Into<String>) -> Self {
        self.config.resolver_url = url.into();
        self
    }

    /// Set the certificate proxy endpoint (useful for testing)
    #[must_use]
    pub fn certificate_proxy_url(mut self, url: impl Into<String>) -> Self {
        self.config.certificate_proxy_url = url.into();
        self
    }

    /// Set the per-request deadline
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<DohClient> {
        let resolver_url = parse_endpoint(&self.config.resolver_url)?;
        let certificate_proxy_url = parse_endpoint(&self.config.certificate_proxy_url)?;

        let http = HttpClient::builder()
            .timeout(self.config.timeout)
            .user_agent(&self.config.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| DohError::Config(e.to_string()))?;

        Ok(DohClient {
            inner: Arc::new(ClientInner {
                http,
                resolver_url,
                certificate_proxy_url,
                timeout: self.config.timeout,
            }),
        })
    }
}

fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| DohError::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(DohError::InvalidUrl(format!("{raw}: unsupported scheme {other}"))),
    }
}
