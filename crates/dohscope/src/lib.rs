//! DNS-over-HTTPS resolution with CNAME chain following, TTL-based staleness
//! estimates and certificate expiry probes.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dohscope::{DohClient, Domain, RecordType, Staleness};
//!
//! #[tokio::main]
//! async fn main() -> dohscope::Result<()> {
//!     let client = DohClient::new()?;
//!     let domain = Domain::new("www.example.com")?;
//!
//!     // Resolve and follow a leading CNAME by one hop
//!     let result = client.dns().resolve_with_chain(&domain, &RecordType::A).await?;
//!     println!("chain depth: {}", result.depth());
//!
//!     // Estimate the change window from the first record's TTL
//!     let staleness = Staleness::from_answers(result.initial(), chrono::Utc::now());
//!     println!("{staleness:?}");
//!
//!     // Probe the certificate through the fetch proxy
//!     let status = client.certificates().check(&domain).await;
//!     println!("{status:?}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/dohscope/0.1.0")]

pub mod session;

// Re-export core types
pub use dohscope_core::*;

// Re-export client
pub use dohscope_client::{ClientConfig, DohClient, DohClientBuilder};

pub use session::{Operation, Outcome, ResultSlots, Session};

// Re-export runtime for convenience
pub use chrono;
pub use serde;
pub use serde_json;
pub use tokio;
