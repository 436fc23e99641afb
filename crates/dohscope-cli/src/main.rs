//! dohscope - DNS-over-HTTPS inspector
//!
//! Resolves records, follows CNAME aliases, estimates record staleness and
//! checks certificate expiry from the terminal.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dohscope_cli::run().await
}
