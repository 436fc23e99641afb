use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{DohError, Result};

/// A queried host name
///
/// Only non-emptiness is checked; malformed names are left for the upstream
/// resolver to reject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Domain(String);

impl Domain {
    /// Create a domain, trimming surrounding whitespace
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DohError::EmptyDomain);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The domain as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the name contains a `www` label fragment
    #[must_use]
    pub fn mentions_www(&self) -> bool {
        self.0.contains("www")
    }

    /// The `https://` URL the certificate proxy is asked to fetch
    #[must_use]
    pub fn https_url(&self) -> String {
        format!("https://{}", self.0)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Domain {
    type Err = DohError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Domain {
    type Error = DohError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Domain> for String {
    fn from(value: Domain) -> Self {
        value.0
    }
}
