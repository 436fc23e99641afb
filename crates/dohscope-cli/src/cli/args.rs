//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use crate::output::OutputFormat;

/// DNS-over-HTTPS inspector
///
/// Resolve records, follow CNAME aliases, estimate when a record last changed
/// and check certificate expiry. Use --explain on any command to learn what
/// it does.
#[derive(Parser, Debug)]
#[command(name = "dohscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// DoH JSON resolver endpoint
    #[arg(long, env = "DOHSCOPE_RESOLVER", global = true)]
    pub resolver: Option<String>,

    /// Certificate fetch proxy endpoint
    #[arg(long, env = "DOHSCOPE_PROXY", global = true)]
    pub proxy: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Explain what this command does (educational mode)
    #[arg(long, global = true)]
    pub explain: bool,

    /// Increase verbosity (logs requests to stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a record and follow a leading CNAME
    Resolve(ResolveArgs),

    /// Check the certificate a domain serves
    Cert(CertArgs),

    /// Estimate when a record last changed from its TTL
    Estimate(LookupArgs),

    /// Resolve, check the certificate and estimate staleness in one go
    Inspect(LookupArgs),

    /// List supported record types
    Types,

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Resolve command
// ============================================================================

#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub lookup: LookupArgs,

    /// Do not follow a leading CNAME
    #[arg(long)]
    pub no_chain: bool,

    /// Show how to enter the record at common DNS providers
    #[arg(long)]
    pub reference: bool,
}

// ============================================================================
// Shared lookup arguments
// ============================================================================

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Domain name to query
    pub domain: String,

    /// Record type (A, AAAA, CNAME, MX, TXT, NS, SRV, PTR, SOA or any other mnemonic)
    #[arg(short = 't', long = "type", default_value = "A")]
    pub record_type: String,
}

// ============================================================================
// Cert command
// ============================================================================

#[derive(Args, Debug)]
pub struct CertArgs {
    /// Domain whose certificate to check
    pub domain: String,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (e.g., resolver_url, timeout_secs)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}
