//! `dohscope resolve` - DNS lookups with CNAME chain following.

use anyhow::Result;
use colored::Colorize;
use dohscope::reference::{provider_hints, ProviderHint};
use dohscope::{AnswerSet, ChainResult, Domain, RecordType};
use serde::Serialize;

use super::{parse_domain, parse_record_type, Context};
use crate::cli::args::ResolveArgs;
use crate::education::Explain;
use crate::output::{self, OutputFormat};

/// Serializable view of a resolution.
#[derive(Serialize)]
struct ResolveReport<'a> {
    domain: &'a Domain,
    record_type: &'a RecordType,
    chain_depth: usize,
    #[serde(flatten)]
    result: &'a ChainResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<Vec<ProviderHint>>,
}

pub async fn execute(ctx: Context, args: ResolveArgs) -> Result<()> {
    let domain = parse_domain(&args.lookup.domain)?;
    let record_type = parse_record_type(&args.lookup.record_type)?;

    if ctx.explain {
        Explain::resolve(domain.as_str(), record_type.mnemonic(), !args.no_chain).print();
    }

    let client = ctx.client()?;

    let result = if args.no_chain {
        ChainResult::direct(client.dns().resolve(&domain, &record_type).await?)
    } else {
        client.dns().resolve_with_chain(&domain, &record_type).await?
    };

    render(&ctx, &domain, &record_type, &result, args.reference)
}

/// Print a resolution in the context's output format.
pub(crate) fn render(
    ctx: &Context,
    domain: &Domain,
    record_type: &RecordType,
    result: &ChainResult,
    reference: bool,
) -> Result<()> {
    let hints = reference.then(|| provider_hints(domain, record_type, result.initial()));

    match ctx.output_format {
        OutputFormat::Json => {
            let report = ResolveReport {
                domain,
                record_type,
                chain_depth: result.depth(),
                result,
                reference: hints,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Yaml => {
            let report = ResolveReport {
                domain,
                record_type,
                chain_depth: result.depth(),
                result,
                reference: hints,
            };
            print!("{}", serde_yaml::to_string(&report)?);
        }
        OutputFormat::Csv => {
            let all: Vec<_> = result
                .initial()
                .iter()
                .chain(result.chained().into_iter().flatten())
                .cloned()
                .collect();
            output::write_records_csv(&AnswerSet::new(all), std::io::stdout().lock())?;
        }
        OutputFormat::Pretty => {
            print_pretty(domain, record_type, result, hints.as_deref());
        }
    }

    Ok(())
}

fn print_pretty(
    domain: &Domain,
    record_type: &RecordType,
    result: &ChainResult,
    hints: Option<&[ProviderHint]>,
) {
    println!(
        "{} {}  {} {}",
        "Domain:".bold(),
        domain.as_str().cyan(),
        "Type:".bold(),
        record_type.mnemonic().yellow()
    );
    println!("{}", record_type.description().dimmed());
    println!();

    let initial = result.initial();
    if initial.is_empty() {
        println!(
            "No {} records found for {}.",
            record_type.mnemonic(),
            domain.as_str()
        );
        if let Some(status) = initial.status().filter(|s| !s.is_success()) {
            println!("{} {}", "Response Code:".bold(), status.to_string().red());
        }
        return;
    }

    println!("{}", "DNS Records:".bold().underline());
    println!("{}", output::records_table(initial));
    println!();

    println!("{}", "Extra Insights:".bold().underline());
    for (label, value) in output::insight_lines(result) {
        println!("  {} {}", format!("{label}:").bold(), value);
    }

    if let Some(chained) = result.chained() {
        println!();
        let target = initial.chain_target().unwrap_or_default();
        println!(
            "{} {}",
            "CNAME target A records:".bold().underline(),
            target.green()
        );
        if chained.is_empty() {
            println!("  {}", "(no A records)".dimmed());
        } else {
            println!("{}", output::records_table(chained));
        }
    }

    if let Some(hints) = hints.filter(|h| !h.is_empty()) {
        println!();
        println!("{}", "Provider Reference:".bold().underline());
        println!("{}", output::reference_table(hints));
    }
}
