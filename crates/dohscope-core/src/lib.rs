//! Core types and inference rules for the dohscope resolver.
//!
//! This crate holds everything that does not touch the network:
//!
//! - **Types**: [`Domain`], [`RecordType`], [`ResourceRecord`], [`AnswerSet`]
//!   and [`ChainResult`], plus the DoH JSON wire format
//! - **Errors**: [`DohError`] and its coarse [`ErrorKind`]
//! - **Staleness**: [`estimate_change_window`] and [`Staleness`]
//! - **Certificates**: [`CertificateStatus`] and header classification
//! - **Reference**: provider entry hints for a resolved record
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use dohscope_core::{estimate_change_window, AnswerSet, ResourceRecord, Staleness};
//!
//! let answers = AnswerSet::new(vec![ResourceRecord::new(
//!     "example.com.", 1, 300, "93.184.216.34",
//! )]);
//!
//! let now = Utc::now();
//! let staleness = Staleness::from_answers(&answers, now);
//! assert_eq!(staleness.estimate(), Some(&estimate_change_window(300, now)));
//! ```

pub mod certificate;
mod error;
pub mod reference;
pub mod staleness;
pub mod types;

pub use certificate::CertificateStatus;
pub use error::{DohError, ErrorKind, Result};
pub use staleness::{estimate_change_window, Staleness, StalenessEstimate};
pub use types::*;
