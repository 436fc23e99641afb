//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = Config::load()?;

    // Flags win over the config file
    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or(OutputFormat::Pretty);

    let ctx = commands::Context {
        resolver_url: cli.resolver.or_else(|| config.resolver_url.clone()),
        certificate_proxy_url: cli.proxy.or_else(|| config.certificate_proxy_url.clone()),
        timeout_secs: cli.timeout.or(config.timeout_secs),
        output_format,
        explain: cli.explain || config.explain_by_default,
        verbose: cli.verbose,
    };

    tracing::debug!(
        resolver = ?ctx.resolver_url,
        proxy = ?ctx.certificate_proxy_url,
        format = %ctx.output_format,
        "context ready"
    );

    // Dispatch to appropriate command
    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(ctx, args).await,
        Commands::Cert(args) => commands::cert::execute(ctx, args).await,
        Commands::Estimate(args) => commands::estimate::execute(ctx, args).await,
        Commands::Inspect(args) => commands::inspect::execute(ctx, args).await,
        Commands::Types => commands::types::execute(ctx),
        Commands::Config(args) => commands::config::execute(ctx, args),
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the default filter.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "dohscope=debug,dohscope_client=debug,warn"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
