//! `dohscope inspect` - Every check at once, printed as results arrive.

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use dohscope::{
    AnswerSet, CertificateStatus, ChainResult, Domain, Operation, Outcome, RecordType,
    ResultSlots, Session, Staleness,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use super::{cert, estimate, parse_domain, parse_record_type, resolve, Context};
use crate::cli::args::LookupArgs;
use crate::education::Explain;
use crate::output::OutputFormat;

#[derive(Serialize)]
struct InspectReport<'a> {
    domain: &'a Domain,
    record_type: &'a RecordType,
    resolution: Option<&'a ChainResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolution_error: Option<String>,
    certificate: Option<&'a CertificateStatus>,
    staleness: Option<&'a Staleness>,
}

pub async fn execute(ctx: Context, args: LookupArgs) -> Result<()> {
    let domain = parse_domain(&args.domain)?;
    let record_type = parse_record_type(&args.record_type)?;

    if ctx.explain {
        Explain::inspect(domain.as_str()).print();
    }

    let (mut session, mut rx) = Session::new(ctx.client()?);
    session.resolve(domain.clone(), record_type.clone());
    session.check_certificate(domain.clone());

    let live = ctx.output_format == OutputFormat::Pretty;
    let spinner = (live && !ctx.verbose).then(|| progress_spinner(&domain));

    let mut slots = ResultSlots::default();
    let mut pending = 2;
    let deadline = outcome_deadline(&ctx);

    while pending > 0 {
        let outcome = match tokio::time::timeout(deadline, rx.recv()).await {
            Ok(Some(outcome)) => outcome,
            Ok(None) => break,
            Err(_) => {
                tracing::warn!(pending, ?deadline, "gave up waiting for inspect outcomes");
                break;
            }
        };
        pending -= 1;

        // The estimate always follows the resolution, successful or not
        match &outcome {
            Outcome::Resolved { result, .. } => {
                session.estimate(domain.clone(), result.initial()).await;
                pending += 1;
            }
            Outcome::Failed {
                operation: Operation::Resolve,
                ..
            } => {
                session.estimate(domain.clone(), &AnswerSet::default()).await;
                pending += 1;
            }
            _ => {}
        }

        if live {
            let ttl = slots.answers().and_then(AnswerSet::ttl_remaining);
            let print = || print_outcome(&ctx, &outcome, &record_type, ttl);
            match &spinner {
                Some(bar) => bar.suspend(print)?,
                None => print()?,
            }
        }

        slots.apply(outcome);
    }

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    if !live {
        print_report(&ctx, &domain, &record_type, &slots)?;
    }

    Ok(())
}

/// Longest wait for a single outcome: a chained resolution makes two requests,
/// each bounded by the client timeout.
fn outcome_deadline(ctx: &Context) -> Duration {
    ctx.client_config().timeout * 2 + Duration::from_secs(1)
}

fn progress_spinner(domain: &Domain) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(format!("Inspecting {}...", domain.as_str()));
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn print_outcome(
    ctx: &Context,
    outcome: &Outcome,
    queried: &RecordType,
    ttl: Option<u32>,
) -> Result<()> {
    match outcome {
        Outcome::Resolved {
            domain,
            record_type,
            result,
        } => resolve::render(ctx, domain, record_type, result, false)?,
        Outcome::Certificate { domain, status } => cert::render(ctx, domain, status)?,
        Outcome::Staleness { domain, staleness } => {
            estimate::render(ctx, domain, queried, ttl, staleness)?;
        }
        Outcome::Failed {
            domain,
            operation,
            error,
        } => {
            let what = match operation {
                Operation::Resolve => "DNS resolution",
                Operation::Certificate => "Certificate check",
            };
            println!(
                "{} {} for {} failed: {}",
                "Error:".red().bold(),
                what,
                domain.as_str(),
                error
            );
        }
    }
    println!();
    Ok(())
}

fn print_report(
    ctx: &Context,
    domain: &Domain,
    record_type: &RecordType,
    slots: &ResultSlots,
) -> Result<()> {
    let report = InspectReport {
        domain,
        record_type,
        resolution: slots.resolved.as_ref().map(|(_, _, result)| result),
        resolution_error: slots
            .failure
            .as_ref()
            .filter(|(_, op, _)| *op == Operation::Resolve)
            .map(|(_, _, e)| e.to_string()),
        certificate: slots.certificate.as_ref().map(|(_, status)| status),
        staleness: slots.staleness.as_ref().map(|(_, staleness)| staleness),
    };

    match ctx.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&report)?),
        OutputFormat::Csv => match report.resolution {
            Some(result) => resolve::render(ctx, domain, record_type, result, false)?,
            None => anyhow::bail!(
                "Resolution failed: {}",
                report.resolution_error.unwrap_or_default()
            ),
        },
        OutputFormat::Pretty => {}
    }

    Ok(())
}
