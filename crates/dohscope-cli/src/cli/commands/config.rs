//! `dohscope config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Set { key, value } => set_config(&key, &value),
        ConfigCommands::Path => show_path(),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = Config::load()?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&config)?);
        }
        _ => {
            let unset = || "(default)".dimmed().to_string();

            println!("{}", "Current Configuration:".bold());
            println!();
            println!(
                "  {} {}",
                "resolver_url:".bold(),
                config.resolver_url.clone().unwrap_or_else(unset)
            );
            println!(
                "  {} {}",
                "certificate_proxy_url:".bold(),
                config.certificate_proxy_url.clone().unwrap_or_else(unset)
            );
            println!(
                "  {} {}",
                "timeout_secs:".bold(),
                config
                    .timeout_secs
                    .map_or_else(unset, |secs| secs.to_string())
            );
            println!(
                "  {} {}",
                "output_format:".bold(),
                config.output_format.unwrap_or_default()
            );
            println!(
                "  {} {}",
                "explain_by_default:".bold(),
                config.explain_by_default
            );
        }
    }

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    println!(
        "{} {} set to {}.",
        "Success:".green().bold(),
        key,
        value.cyan()
    );

    Ok(())
}

fn show_path() -> Result<()> {
    let path = Config::path()?;
    println!("{}", path.display());
    Ok(())
}
