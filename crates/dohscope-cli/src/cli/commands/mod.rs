//! Command implementations.

pub mod cert;
pub mod config;
pub mod estimate;
pub mod inspect;
pub mod resolve;
pub mod types;

use std::time::Duration;

use dohscope::{ClientConfig, DohClient, Domain, RecordType};

use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Resolver endpoint override
    pub resolver_url: Option<String>,

    /// Certificate proxy endpoint override
    pub certificate_proxy_url: Option<String>,

    /// Per-request timeout override in seconds
    pub timeout_secs: Option<u64>,

    /// Output format
    pub output_format: OutputFormat,

    /// Whether to show educational explanations
    pub explain: bool,

    /// Verbose output
    pub verbose: bool,
}

impl Context {
    /// Client configuration with overrides applied over the defaults.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();

        if let Some(url) = &self.resolver_url {
            config = config.resolver_url(url);
        }

        if let Some(url) = &self.certificate_proxy_url {
            config = config.certificate_proxy_url(url);
        }

        if let Some(secs) = self.timeout_secs {
            config = config.timeout(Duration::from_secs(secs));
        }

        config
    }

    /// Create a client for the configured endpoints.
    pub fn client(&self) -> anyhow::Result<DohClient> {
        Ok(dohscope::DohClientBuilder::from_config(self.client_config()).build()?)
    }
}

/// Parse a domain argument.
pub fn parse_domain(raw: &str) -> anyhow::Result<Domain> {
    raw.parse()
        .map_err(|_| anyhow::anyhow!("Domain must not be empty.\n\nExample: dohscope resolve example.com"))
}

/// Parse a record type argument.
pub fn parse_record_type(raw: &str) -> anyhow::Result<RecordType> {
    Ok(raw.parse()?)
}
