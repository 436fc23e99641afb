use thiserror::Error;

/// Result type alias for dohscope operations
pub type Result<T> = std::result::Result<T, DohError>;

/// Errors that can occur while querying the resolver or the certificate proxy
#[derive(Error, Debug)]
pub enum DohError {
    /// The domain was empty after trimming
    #[error("domain must not be empty")]
    EmptyDomain,

    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Network(String),

    /// Request exceeded the configured deadline
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Upstream answered with a non-success status
    #[error("upstream error ({status}): {message}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Body or error message returned by the upstream
        message: String,
    },

    /// Response body could not be decoded
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An endpoint URL could not be built
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Coarse classification of a [`DohError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport, deadline or upstream status failure
    NetworkFailure,
    /// The upstream answered but the answer could not be understood
    MalformedResponse,
    /// The caller supplied unusable input
    InvalidInput,
}

impl DohError {
    /// Classify the error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) | Self::Timeout(_) | Self::Upstream { .. } => {
                ErrorKind::NetworkFailure
            }
            Self::MalformedResponse(_) | Self::Json(_) | Self::InvalidUrl(_) => {
                ErrorKind::MalformedResponse
            }
            Self::EmptyDomain | Self::Config(_) => ErrorKind::InvalidInput,
        }
    }

    /// Returns true if the error is a deadline expiry
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Returns the HTTP status code if the upstream rejected the request
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}
