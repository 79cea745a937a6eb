use clap::Args;
use colored::Colorize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use mortgage_compare_core::report::{build_report, ComparisonReport, ReportInput};
use mortgage_compare_core::report::document::ClientDetails;

use super::comparison::ScenarioArgs;
use crate::input;

/// Arguments for the client comparison report
#[derive(Args)]
pub struct ReportArgs {
    /// Path to JSON/YAML report input (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Client name the report is prepared for
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    /// Write the report to <dir>/<file_name>
    #[arg(long)]
    pub save_dir: Option<PathBuf>,

    /// Deliver the report to the client's email address
    #[arg(long)]
    pub send: bool,

    #[command(flatten)]
    pub scenario: ScenarioArgs,
}

fn report_input(args: &ReportArgs) -> Result<ReportInput, Box<dyn std::error::Error>> {
    if args.input.is_some() || args.scenario.principal.is_none() {
        return input::load(args.input.as_deref(), "report");
    }
    let name = args
        .name
        .clone()
        .ok_or("--name is required (or provide --input)")?;
    Ok(ReportInput {
        client: ClientDetails {
            name,
            email: args.email.clone(),
            phone: args.phone.clone(),
        },
        bank_name: args.scenario.bank.clone(),
        comparison: args.scenario.comparison_input()?,
        generated_on: chrono::Local::now().date_naive(),
    })
}

fn save(report: &ComparisonReport, dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    let path = dir.join(&report.file_name);
    fs::write(&path, serde_json::to_string_pretty(report)?)?;
    tracing::info!(path = %path.display(), "report saved");
    Ok(path)
}

/// No mail transport is wired in: the report is written to disk and the
/// intended recipient is logged.
fn deliver(report: &ComparisonReport, dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let recipient = report.prepared_for.email.trim();
    if recipient.is_empty() || !recipient.contains('@') {
        return Err(format!(
            "cannot send report for '{}': no valid email address",
            report.prepared_for.name
        )
        .into());
    }
    let path = save(report, dir)?;
    tracing::warn!(
        recipient,
        attachment = %report.file_name,
        "email delivery is simulated; report written locally"
    );
    eprintln!(
        "{}: report for {} would be emailed to {} (saved to {})",
        "note".yellow().bold(),
        report.prepared_for.name,
        recipient,
        path.display()
    );
    Ok(path)
}

pub fn run_report(args: ReportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let report_input = report_input(&args)?;
    let report = build_report(&report_input)?;

    let dir = args.save_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    if args.send {
        deliver(&report, &dir)?;
    } else if args.save_dir.is_some() {
        save(&report, &dir)?;
    }

    Ok(serde_json::to_value(report)?)
}
