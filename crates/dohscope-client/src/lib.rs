//! HTTP client for DNS-over-HTTPS resolution and certificate probing.
//!
//! This crate provides [`DohClient`], which owns the three network-facing
//! engine operations: single queries, one-hop CNAME chain resolution, and
//! the proxy-based certificate expiry probe.

#![doc(html_root_url = "https://docs.rs/dohscope-client/0.1.0")]

mod client;
mod config;
pub mod api;

pub use client::{DohClient, DohClientBuilder};
pub use config::*;
pub use dohscope_core::{DohError, Result};
