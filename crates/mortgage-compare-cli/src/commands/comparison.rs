use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;

use mortgage_compare_core::comparison::balance_chart::{self, BalanceChartInput};
use mortgage_compare_core::comparison::bank_rates::{self, Bank};
use mortgage_compare_core::comparison::refinance::{self, ComparisonInput};
use mortgage_compare_core::comparison::{Preference, RateCandidate, TermCode};
use mortgage_compare_core::{LoanTerms, MortgageType, PaymentFrequency};

use crate::input;

/// Loan, candidate and preference flags shared by comparison commands
#[derive(Args)]
pub struct ScenarioArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Current annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Remaining term in years
    #[arg(long)]
    pub term: Option<Decimal>,

    #[arg(long, default_value = "principal-and-interest")]
    pub mortgage_type: MortgageType,

    /// weekly, fortnightly or monthly
    #[arg(long, default_value = "fortnightly")]
    pub frequency: PaymentFrequency,

    /// lower-repayments (money) or shorter-term (time)
    #[arg(long, default_value = "lower-repayments")]
    pub preference: Preference,

    /// Bank whose rate card supplies the candidates
    #[arg(long)]
    pub bank: Option<String>,

    /// Terms to compare, comma separated (e.g. 1y,2y,floating); all by default
    #[arg(long, value_delimiter = ',')]
    pub terms: Vec<TermCode>,

    /// Replace an advertised rate, as TERM=RATE (repeatable)
    #[arg(long = "rate-override", value_parser = parse_override)]
    pub rate_overrides: Vec<(TermCode, Decimal)>,

    /// Compare a single custom rate instead of a bank's rate card
    #[arg(long, conflicts_with = "bank")]
    pub custom_rate: Option<Decimal>,

    /// Extra amount already paid each period on the current loan
    #[arg(long, default_value = "0")]
    pub current_extra: Decimal,

    /// Extra amount to pay each period on the new loan
    #[arg(long, default_value = "0")]
    pub extra: Decimal,
}

/// Arguments for the refinance comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub scenario: ScenarioArgs,
}

/// Arguments for balance-over-time chart data
#[derive(Args)]
pub struct BalanceChartArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub scenario: ScenarioArgs,
}

/// Arguments for listing bank rate cards
#[derive(Args)]
pub struct BanksArgs {
    /// Show a single bank
    #[arg(long)]
    pub bank: Option<String>,
}

fn parse_override(s: &str) -> Result<(TermCode, Decimal), String> {
    let (term, rate) = s
        .split_once('=')
        .ok_or_else(|| format!("expected TERM=RATE, got '{s}'"))?;
    let term: TermCode = term.parse()?;
    let rate: Decimal = rate
        .trim()
        .parse()
        .map_err(|e| format!("invalid rate '{rate}': {e}"))?;
    Ok((term, rate))
}

impl ScenarioArgs {
    pub fn loan(&self) -> Result<LoanTerms, Box<dyn std::error::Error>> {
        Ok(LoanTerms {
            principal: self.principal.ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: self.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: self.term.ok_or("--term is required (or provide --input)")?,
            mortgage_type: self.mortgage_type,
        })
    }

    pub fn candidates(&self) -> Result<Vec<RateCandidate>, Box<dyn std::error::Error>> {
        if let Some(rate) = self.custom_rate {
            return Ok(vec![RateCandidate {
                term: TermCode::Custom,
                annual_rate_percent: rate,
            }]);
        }
        let name = self
            .bank
            .as_deref()
            .ok_or("--bank or --custom-rate is required (or provide --input)")?;
        let bank = bank_rates::find_bank(name)?;
        let overrides: BTreeMap<TermCode, Decimal> = self.rate_overrides.iter().copied().collect();
        let selected = (!self.terms.is_empty()).then_some(self.terms.as_slice());
        Ok(bank.candidates(selected, &overrides)?)
    }

    pub fn comparison_input(&self) -> Result<ComparisonInput, Box<dyn std::error::Error>> {
        Ok(ComparisonInput {
            loan: self.loan()?,
            frequency: self.frequency,
            current_extra_repayment: self.current_extra,
            preference: self.preference,
            candidates: self.candidates()?,
            extra_repayment: self.extra,
        })
    }
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let comparison_input: ComparisonInput = if args.input.is_some() || args.scenario.principal.is_none() {
        input::load(args.input.as_deref(), "rate comparison")?
    } else {
        args.scenario.comparison_input()?
    };
    let result = refinance::compare_rates(&comparison_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_balance_chart(args: BalanceChartArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let chart_input: BalanceChartInput = if args.input.is_some() || args.scenario.principal.is_none() {
        input::load(args.input.as_deref(), "balance chart")?
    } else {
        let scenario = &args.scenario;
        BalanceChartInput {
            loan: scenario.loan()?,
            frequency: scenario.frequency,
            current_extra_repayment: scenario.current_extra,
            candidates: scenario.candidates()?,
            extra_repayment: scenario.extra,
        }
    };
    let chart = balance_chart::build_balance_chart(&chart_input)?;
    Ok(serde_json::to_value(chart)?)
}

pub fn run_banks(args: BanksArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let banks: Vec<Bank> = match args.bank {
        Some(name) => vec![bank_rates::find_bank(&name)?],
        None => bank_rates::default_banks(),
    };
    Ok(serde_json::to_value(banks)?)
}
