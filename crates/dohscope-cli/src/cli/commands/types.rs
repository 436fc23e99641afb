//! `dohscope types` - Record types the resolver understands.

use anyhow::Result;
use colored::Colorize;
use dohscope::RecordType;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::Context;
use crate::education::Explain;
use crate::output::OutputFormat;

#[derive(Serialize, Tabled)]
struct TypeRow {
    #[tabled(rename = "Type")]
    mnemonic: String,
    #[tabled(rename = "Code")]
    code: u16,
    #[tabled(rename = "Description")]
    description: &'static str,
}

fn rows() -> Vec<TypeRow> {
    RecordType::KNOWN
        .into_iter()
        .map(|t| TypeRow {
            mnemonic: t.mnemonic().to_string(),
            code: t.code().unwrap_or_default(),
            description: t.description(),
        })
        .collect()
}

pub fn execute(ctx: Context) -> Result<()> {
    if ctx.explain {
        Explain::types().print();
    }

    let rows = rows();

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&rows)?);
        }
        OutputFormat::Csv => {
            let mut csv = csv::Writer::from_writer(std::io::stdout().lock());
            for row in &rows {
                csv.serialize(row)?;
            }
            csv.flush()?;
        }
        OutputFormat::Pretty => {
            println!("{}", "Supported Record Types:".bold().underline());
            println!("{}", Table::new(&rows).with(Style::rounded()));
            println!();
            println!(
                "{}",
                "Any other type name is passed to the resolver unchanged.".dimmed()
            );
        }
    }

    Ok(())
}
