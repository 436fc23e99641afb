//! Output formatting for different formats.

use clap::ValueEnum;
use colored::Colorize;
use dohscope::reference::ProviderHint;
use dohscope::{AnswerSet, CertificateStatus, ChainResult, Staleness};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed tables with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// YAML output
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "table" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, json, csv, yaml",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    record_type: String,
    #[tabled(rename = "TTL")]
    ttl: u32,
    #[tabled(rename = "Data")]
    data: String,
}

#[derive(Tabled)]
struct HintRow {
    #[tabled(rename = "Provider")]
    provider: &'static str,
    #[tabled(rename = "Type")]
    record_type: String,
    #[tabled(rename = "Name / Host")]
    host: &'static str,
    #[tabled(rename = "Value / Points to")]
    value: String,
    #[tabled(rename = "TTL")]
    ttl: &'static str,
    #[tabled(rename = "Notes")]
    notes: &'static str,
}

/// Render an answer set as a table.
pub fn records_table(answers: &AnswerSet) -> String {
    let rows: Vec<RecordRow> = answers
        .iter()
        .map(|r| RecordRow {
            name: r.name.clone(),
            record_type: r.type_label(),
            ttl: r.ttl,
            data: r.data.clone(),
        })
        .collect();

    Table::new(&rows).with(Style::rounded()).to_string()
}

/// Render the provider reference table.
pub fn reference_table(hints: &[ProviderHint]) -> String {
    let rows: Vec<HintRow> = hints
        .iter()
        .map(|h| HintRow {
            provider: h.provider,
            record_type: h.record_type.clone(),
            host: h.host,
            value: h.value.clone(),
            ttl: h.ttl,
            notes: h.notes,
        })
        .collect();

    Table::new(&rows).with(Style::rounded()).to_string()
}

/// Lines of the "extra insights" block for a resolution.
pub fn insight_lines(result: &ChainResult) -> Vec<(&'static str, String)> {
    let initial = result.initial();

    let ttl = initial
        .ttl_remaining()
        .map_or_else(|| "N/A".to_string(), |ttl| format!("{ttl} seconds"));

    let depth = if result.depth() == 1 {
        "1 (CNAME detected)".to_string()
    } else {
        "0 (Direct record)".to_string()
    };

    let soa = initial.soa_record().map_or_else(
        || "No SOA record found in this query".to_string(),
        |r| format!("{} {} {}", r.name, r.ttl, r.data),
    );

    let mut lines = vec![
        ("TTL Remaining", ttl),
        ("Chain Depth", depth),
        ("SOA Record", soa),
    ];

    if let Some(status) = initial.status().filter(|s| !s.is_success()) {
        lines.push(("Response Code", status.to_string()));
    }

    lines
}

/// One-line certificate banner.
pub fn certificate_banner(status: &CertificateStatus) -> String {
    match status {
        CertificateStatus::Valid { expiry, days_left } => format!(
            "Valid SSL Detected | Expires on: {} | Days Left: {}",
            expiry.format("%a %b %d %Y"),
            days_left
        ),
        CertificateStatus::Invalid => "SSL Check Failed or Expiry Not Found".to_string(),
        CertificateStatus::CheckFailed => "SSL Check Failed".to_string(),
    }
}

/// Colorize a certificate banner by outcome.
pub fn colored_certificate_banner(status: &CertificateStatus) -> String {
    let banner = certificate_banner(status);
    match status {
        CertificateStatus::Valid { .. } if status.is_expired() => banner.red().bold().to_string(),
        CertificateStatus::Valid { days_left, .. } if *days_left <= 30 => {
            banner.yellow().bold().to_string()
        }
        CertificateStatus::Valid { .. } => banner.green().bold().to_string(),
        CertificateStatus::Invalid | CertificateStatus::CheckFailed => {
            banner.red().to_string()
        }
    }
}

/// One-line staleness summary, always worded as an estimate.
pub fn staleness_line(staleness: &Staleness) -> String {
    match staleness.estimate() {
        Some(estimate) => format!(
            "Last Change Estimate: {} | Next Refresh Around: {}",
            estimate.estimated_last_change.format("%Y-%m-%d %H:%M:%S UTC"),
            estimate.next_refresh.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        None => "No DNS info available.".to_string(),
    }
}

/// Write records as CSV.
pub fn write_records_csv<W: Write>(answers: &AnswerSet, writer: W) -> anyhow::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["name", "type", "ttl", "data"])?;
    for r in answers {
        let ttl = r.ttl.to_string();
        let record_type = r.type_label();
        csv.write_record([r.name.as_str(), record_type.as_str(), ttl.as_str(), r.data.as_str()])?;
    }
    csv.flush()?;
    Ok(())
}
