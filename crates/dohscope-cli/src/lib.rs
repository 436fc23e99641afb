//! # dohscope-cli
//!
//! Command-line front end for the dohscope engine.
//!
//! ## Features
//!
//! - **Resolution**: DoH lookups with one-hop CNAME following
//! - **Staleness**: TTL-based estimate of the last record change
//! - **Certificates**: expiry check through a fetch proxy
//! - **Educational mode**: `--explain` describes what a command does
//! - **Multiple output formats**: Pretty tables, JSON, CSV, YAML

pub mod cli;
pub mod config;
pub mod education;
pub mod output;

pub use cli::run;
