//! `dohscope estimate` - TTL-based estimate of the last record change.

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use dohscope::{Domain, RecordType, Staleness};
use serde::Serialize;

use super::{parse_domain, parse_record_type, Context};
use crate::cli::args::LookupArgs;
use crate::education::Explain;
use crate::output::{self, OutputFormat};

#[derive(Serialize)]
struct EstimateReport<'a> {
    domain: &'a Domain,
    record_type: &'a RecordType,
    ttl: Option<u32>,
    #[serde(flatten)]
    staleness: &'a Staleness,
}

pub async fn execute(ctx: Context, args: LookupArgs) -> Result<()> {
    let domain = parse_domain(&args.domain)?;
    let record_type = parse_record_type(&args.record_type)?;

    if ctx.explain {
        Explain::estimate(domain.as_str(), record_type.mnemonic()).print();
    }

    let client = ctx.client()?;
    let answers = client.dns().resolve(&domain, &record_type).await?;
    let staleness = Staleness::from_answers(&answers, Utc::now());

    render(&ctx, &domain, &record_type, answers.ttl_remaining(), &staleness)
}

/// Print a staleness estimate in the context's output format.
pub(crate) fn render(
    ctx: &Context,
    domain: &Domain,
    record_type: &RecordType,
    ttl: Option<u32>,
    staleness: &Staleness,
) -> Result<()> {
    let report = EstimateReport {
        domain,
        record_type,
        ttl,
        staleness,
    };

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&report)?);
        }
        OutputFormat::Csv => {
            let mut csv = csv::Writer::from_writer(std::io::stdout().lock());
            csv.write_record(["domain", "type", "ttl", "estimated_last_change", "next_refresh"])?;
            let ttl = ttl.map(|t| t.to_string()).unwrap_or_default();
            let (last, next) = staleness.estimate().map_or_else(
                || (String::new(), String::new()),
                |e| (e.estimated_last_change.to_rfc3339(), e.next_refresh.to_rfc3339()),
            );
            csv.write_record([domain.as_str(), record_type.mnemonic(), ttl.as_str(), last.as_str(), next.as_str()])?;
            csv.flush()?;
        }
        OutputFormat::Pretty => {
            println!("{}", "DNS Change Estimate:".bold().underline());
            println!(
                "  {} {} {}",
                "Record:".bold(),
                domain.as_str().cyan(),
                record_type.mnemonic().yellow()
            );
            println!("  {}", output::staleness_line(staleness));
            if staleness.estimate().is_some() {
                println!(
                    "  {}",
                    "Estimated from the TTL alone; the true change time is unknown.".dimmed()
                );
            }
        }
    }

    Ok(())
}
