use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use mortgage_compare_core::amortization::frequency::{annual_total, convert_between, to_monthly};
use mortgage_compare_core::amortization::payoff::{self, PayoffInput};
use mortgage_compare_core::amortization::simulation::{self, BalancePoint};
use mortgage_compare_core::amortization::standard;
use mortgage_compare_core::{with_metadata, LoanTerms, MortgageResult, MortgageType, PaymentFrequency};

use crate::input;

/// Arguments for the scheduled payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent (e.g. 6.5)
    #[arg(long)]
    pub rate: Decimal,

    /// Remaining term in years
    #[arg(long)]
    pub term: Decimal,

    /// principal-and-interest or interest-only
    #[arg(long, default_value = "principal-and-interest")]
    pub mortgage_type: MortgageType,
}

/// Arguments for the implied term calculation
#[derive(Args)]
pub struct ImpliedTermArgs {
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Decimal,

    /// Monthly payment
    #[arg(long)]
    pub payment: Decimal,
}

/// Arguments for the balance projection
#[derive(Args)]
pub struct BalanceArgs {
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Decimal,

    /// Monthly payment
    #[arg(long)]
    pub payment: Decimal,

    /// Months elapsed
    #[arg(long)]
    pub months: u32,

    /// Emit the balance for every month instead of the final balance only
    #[arg(long)]
    pub trajectory: bool,
}

/// Arguments for the extra repayment payoff
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PayoffArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Remaining term in years
    #[arg(long)]
    pub term: Option<Decimal>,

    /// Extra amount paid each period
    #[arg(long, default_value = "0")]
    pub extra: Decimal,

    /// weekly, fortnightly or monthly
    #[arg(long, default_value = "fortnightly")]
    pub frequency: PaymentFrequency,

    /// Regular monthly payment (defaults to the scheduled payment)
    #[arg(long)]
    pub payment: Option<Decimal>,

    #[arg(long, default_value = "principal-and-interest")]
    pub mortgage_type: MortgageType,
}

/// Arguments for frequency conversion
#[derive(Args)]
pub struct ConvertArgs {
    #[arg(long)]
    pub amount: Decimal,

    #[arg(long)]
    pub from: PaymentFrequency,

    #[arg(long)]
    pub to: PaymentFrequency,
}

#[derive(Serialize)]
struct PeriodicPayment {
    frequency: PaymentFrequency,
    amount: Decimal,
}

#[derive(Serialize)]
struct PaymentSummary {
    monthly_payment: Decimal,
    payments: Vec<PeriodicPayment>,
    total_interest: Decimal,
}

#[derive(Serialize)]
struct ImpliedTerm {
    term_months: Decimal,
    term_years: Decimal,
}

#[derive(Serialize)]
struct BalanceProjection {
    months_elapsed: u32,
    balance: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    trajectory: Option<Vec<BalancePoint>>,
}

#[derive(Serialize)]
struct Conversion {
    amount: Decimal,
    from: PaymentFrequency,
    to: PaymentFrequency,
    converted: Decimal,
    monthly_equivalent: Decimal,
    annual_total: Decimal,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let loan = LoanTerms {
        principal: args.principal,
        annual_rate_percent: args.rate,
        term_years: args.term,
        mortgage_type: args.mortgage_type,
    };

    let monthly = standard::scheduled_monthly_payment(&loan)?;
    let payments = PaymentFrequency::all()
        .into_iter()
        .map(|frequency| {
            Ok(PeriodicPayment {
                frequency,
                amount: frequency.from_monthly(monthly)?.round_dp(2),
            })
        })
        .collect::<MortgageResult<Vec<_>>>()?;
    let summary = PaymentSummary {
        monthly_payment: monthly.round_dp(2),
        payments,
        total_interest: standard::total_interest(loan.principal, monthly, loan.term_years)?,
    };

    let methodology = match loan.mortgage_type {
        MortgageType::PrincipalAndInterest => "Level Payment Amortization",
        MortgageType::InterestOnly => "Interest-Only Payment",
    };
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(serde_json::to_value(with_metadata(methodology, &loan, Vec::new(), elapsed, summary))?)
}

pub fn run_implied_term(args: ImpliedTermArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let months = standard::implied_term_months(args.principal, args.rate, args.payment)?;
    Ok(serde_json::to_value(ImpliedTerm {
        term_months: months,
        term_years: (months / Decimal::from(12)).round_dp(4),
    })?)
}

pub fn run_balance(args: BalanceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let balance = simulation::simulate_balance(args.principal, args.rate, args.payment, args.months)?;
    let trajectory = if args.trajectory {
        Some(simulation::balance_trajectory(
            args.principal,
            args.rate,
            args.payment,
            args.months,
        )?)
    } else {
        None
    };
    Ok(serde_json::to_value(BalanceProjection {
        months_elapsed: args.months,
        balance,
        trajectory,
    })?)
}

pub fn run_payoff(args: PayoffArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payoff_input: PayoffInput = if args.input.is_some() || args.principal.is_none() {
        input::load(args.input.as_deref(), "extra repayment payoff")?
    } else {
        let loan = LoanTerms {
            principal: args.principal.ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args.term.ok_or("--term is required (or provide --input)")?,
            mortgage_type: args.mortgage_type,
        };
        let regular_monthly_payment = match args.payment {
            Some(p) => p,
            None => standard::scheduled_monthly_payment(&loan)?,
        };
        PayoffInput {
            principal: loan.principal,
            annual_rate_percent: loan.annual_rate_percent,
            regular_monthly_payment,
            extra_amount: args.extra,
            frequency: args.frequency,
            term_years: loan.term_years,
        }
    };

    let result = payoff::extra_payment_payoff(&payoff_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_convert(args: ConvertArgs) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(Conversion {
        amount: args.amount,
        from: args.from,
        to: args.to,
        converted: convert_between(args.amount, args.from, args.to)?.round_dp(2),
        monthly_equivalent: to_monthly(args.amount, args.from)?.round_dp(2),
        annual_total: annual_total(args.amount, args.from)?.round_dp(2),
    })?)
}
