//! Client configuration types.

use std::time::Duration;

/// Google's JSON DNS-over-HTTPS endpoint
pub const DEFAULT_RESOLVER_URL: &str = "https://dns.google/resolve";

/// Fetch proxy that reports the target's certificate expiry as a header
pub const DEFAULT_CERTIFICATE_PROXY_URL: &str = "https://api.allorigins.win/get";

/// Default per-request deadline
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Endpoints and limits used by [`DohClient`](crate::DohClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// DoH JSON endpoint queried with `name` and `type`
    pub resolver_url: String,

    /// Certificate proxy queried with `url`
    pub certificate_proxy_url: String,

    /// Deadline applied to every request
    pub timeout: Duration,

    /// User-Agent header
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientConfig {
    /// Configuration pointing at the public default endpoints
    #[must_use]
    pub fn new() -> Self {
        Self {
            resolver_url: DEFAULT_RESOLVER_URL.to_string(),
            certificate_proxy_url: DEFAULT_CERTIFICATE_PROXY_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("dohscope/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the resolver endpoint
    #[must_use]
    pub fn resolver_url(mut self, url: impl Into<String>) -> Self {
        self.resolver_url = url.into();
        self
    }

    /// Set the certificate proxy endpoint
    #[must_use]
    pub fn certificate_proxy_url(mut self, url: impl Into<String>) -> Self {
        self.certificate_proxy_url = url.into();
        self
    }

    /// Set the per-request deadline
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
