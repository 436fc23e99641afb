//! `dohscope cert` - Certificate expiry check.

use anyhow::Result;
use colored::Colorize;
use dohscope::{CertificateStatus, Domain};
use serde::Serialize;

use super::{parse_domain, Context};
use crate::cli::args::CertArgs;
use crate::education::Explain;
use crate::output::{self, OutputFormat};

#[derive(Serialize)]
struct CertReport<'a> {
    domain: &'a Domain,
    #[serde(flatten)]
    status: &'a CertificateStatus,
}

pub async fn execute(ctx: Context, args: CertArgs) -> Result<()> {
    let domain = parse_domain(&args.domain)?;

    if ctx.explain {
        Explain::cert(domain.as_str()).print();
    }

    let client = ctx.client()?;
    let status = client.certificates().check(&domain).await;

    render(&ctx, &domain, &status)
}

/// Print a certificate status in the context's output format.
pub(crate) fn render(ctx: &Context, domain: &Domain, status: &CertificateStatus) -> Result<()> {
    let report = CertReport { domain, status };

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&report)?);
        }
        OutputFormat::Csv => {
            let mut csv = csv::Writer::from_writer(std::io::stdout().lock());
            csv.write_record(["domain", "status", "expiry", "days_left"])?;
            let (state, expiry, days_left) = match status {
                CertificateStatus::Valid { expiry, days_left } => {
                    ("valid", expiry.to_rfc3339(), days_left.to_string())
                }
                CertificateStatus::Invalid => ("invalid", String::new(), String::new()),
                CertificateStatus::CheckFailed => ("check_failed", String::new(), String::new()),
            };
            csv.write_record([domain.as_str(), state, expiry.as_str(), days_left.as_str()])?;
            csv.flush()?;
        }
        OutputFormat::Pretty => {
            println!("{}", "SSL Check Result:".bold().underline());
            println!("  {} {}", "Domain:".bold(), domain.as_str().cyan());
            println!("  {}", output::colored_certificate_banner(status));
            if status.is_expired() {
                println!("  {}", "The certificate has already expired.".red());
            }
        }
    }

    Ok(())
}
