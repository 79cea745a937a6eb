//! Compare refinancing candidates against the current loan.
//!
//! Under [`Preference::LowerRepayments`] each candidate is priced as a new
//! level payment over the current remaining term and compared using the
//! linear total-interest estimate. Under [`Preference::ShorterTerm`] each
//! candidate keeps its new scheduled payment plus an extra repayment, and the
//! payoff simulation reports time and interest saved.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{Preference, RateCandidate, TermCode};
use crate::amortization::frequency::{from_monthly, to_monthly};
use crate::amortization::in_range;
use crate::amortization::payoff::{extra_payment_payoff, PayoffInput};
use crate::amortization::standard::{scheduled_monthly_payment, total_interest};
use crate::error::MortgageError;
use crate::types::{with_metadata, ComputationOutput, LoanTerms, Money, MortgageType, PaymentFrequency, Percent, Years};
use crate::MortgageResult;

/// Longest interest-only period lenders normally allow.
const INTEREST_ONLY_MAX_YEARS: Decimal = dec!(5);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInput {
    /// The borrower's current loan.
    pub loan: LoanTerms,
    /// Cadence the borrower repays at.
    #[serde(default)]
    pub frequency: PaymentFrequency,
    /// Extra amount the borrower already pays each period.
    #[serde(default)]
    pub current_extra_repayment: Money,
    #[serde(default)]
    pub preference: Preference,
    /// Rates to compare, in the order results should be reported.
    pub candidates: Vec<RateCandidate>,
    /// Extra amount per period to pay on the new loan.
    #[serde(default)]
    pub extra_repayment: Money,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A candidate compared on repayment size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepaymentComparison {
    pub term: TermCode,
    pub term_label: String,
    pub current_rate_percent: Percent,
    pub new_rate_percent: Percent,
    /// Current scheduled payment plus current extra, monthly.
    pub current_monthly_payment: Money,
    /// New scheduled payment plus new extra, monthly.
    pub new_monthly_payment: Money,
    pub monthly_savings: Money,
    /// `monthly_savings` expressed at the borrower's frequency.
    pub periodic_savings: Money,
    /// Difference in linear total interest over the remaining term.
    pub total_savings: Money,
    pub frequency: PaymentFrequency,
}

/// A candidate compared on time and interest saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermComparison {
    pub term: TermCode,
    pub term_label: String,
    pub current_rate_percent: Percent,
    pub new_rate_percent: Percent,
    pub current_term_years: Years,
    pub new_term_years: Years,
    pub years_saved: Years,
    pub months_saved: u32,
    /// New scheduled payment, excluding the extra repayment.
    pub new_monthly_payment: Money,
    pub total_interest_saved: Money,
    pub annual_extra_payment: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonRecord {
    LowerRepayments(RepaymentComparison),
    ShorterTerm(TermComparison),
}

impl ComparisonRecord {
    pub fn term(&self) -> TermCode {
        match self {
            ComparisonRecord::LowerRepayments(r) => r.term,
            ComparisonRecord::ShorterTerm(r) => r.term,
        }
    }

    pub fn new_rate_percent(&self) -> Percent {
        match self {
            ComparisonRecord::LowerRepayments(r) => r.new_rate_percent,
            ComparisonRecord::ShorterTerm(r) => r.new_rate_percent,
        }
    }

    /// Figure the best option is chosen on.
    fn score(&self) -> Decimal {
        match self {
            ComparisonRecord::LowerRepayments(r) => r.total_savings,
            ComparisonRecord::ShorterTerm(r) => r.years_saved,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub preference: Preference,
    pub frequency: PaymentFrequency,
    /// Scheduled monthly payment on the current loan, excluding extras.
    pub current_monthly_payment: Money,
    /// `current_monthly_payment` at the borrower's frequency.
    pub current_periodic_payment: Money,
    /// One record per candidate, in candidate order.
    pub results: Vec<ComparisonRecord>,
    /// First candidate with the largest saving.
    pub best_term: Option<TermCode>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compare every candidate rate against the current loan.
pub fn compare_rates(
    input: &ComparisonInput,
) -> MortgageResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();

    let (output, warnings) = compute_comparison(input)?;
    let methodology = match input.preference {
        Preference::LowerRepayments => "Refinance Comparison (Level Payment, Linear Interest)",
        Preference::ShorterTerm => "Refinance Comparison (Extra Repayment Payoff Simulation)",
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, input, warnings, elapsed, output))
}

pub(crate) fn compute_comparison(
    input: &ComparisonInput,
) -> MortgageResult<(ComparisonOutput, Vec<String>)> {
    validate_comparison(input)?;
    let mut warnings: Vec<String> = Vec::new();
    let loan = &input.loan;

    if loan.mortgage_type == MortgageType::InterestOnly && loan.term_years > INTEREST_ONLY_MAX_YEARS {
        warnings.push(format!(
            "Interest-only term of {} years exceeds the usual {}-year maximum",
            loan.term_years, INTEREST_ONLY_MAX_YEARS
        ));
    }
    if input.preference == Preference::ShorterTerm && input.extra_repayment.is_zero() {
        warnings.push("No extra repayment entered; no time or interest will be saved".into());
    }

    let current_payment = scheduled_monthly_payment(loan)?;

    let mut results = Vec::with_capacity(input.candidates.len());
    for candidate in &input.candidates {
        if candidate.annual_rate_percent > loan.annual_rate_percent {
            warnings.push(format!(
                "{} rate of {}% is higher than the current rate of {}%",
                candidate.term.label(),
                candidate.annual_rate_percent,
                loan.annual_rate_percent
            ));
        }
        let record = match input.preference {
            Preference::LowerRepayments => ComparisonRecord::LowerRepayments(
                compare_repayment(input, current_payment, candidate)?,
            ),
            Preference::ShorterTerm => {
                ComparisonRecord::ShorterTerm(compare_term(input, candidate)?)
            }
        };
        results.push(record);
    }

    let best_term = best_option(&results);
    tracing::debug!(
        candidates = results.len(),
        best = ?best_term,
        "refinance comparison complete"
    );

    Ok((
        ComparisonOutput {
            preference: input.preference,
            frequency: input.frequency,
            current_monthly_payment: current_payment.round_dp(2),
            current_periodic_payment: from_monthly(current_payment, input.frequency)?.round_dp(2),
            results,
            best_term,
        },
        warnings,
    ))
}

fn compare_repayment(
    input: &ComparisonInput,
    current_scheduled: Money,
    candidate: &RateCandidate,
) -> MortgageResult<RepaymentComparison> {
    let loan = &input.loan;
    let new_scheduled = scheduled_monthly_payment(&with_rate(loan, candidate.annual_rate_percent))?;

    let current_payment = in_range(
        current_scheduled.checked_add(to_monthly(input.current_extra_repayment, input.frequency)?),
        "current_extra_repayment",
    )?;
    let new_payment = in_range(
        new_scheduled.checked_add(to_monthly(input.extra_repayment, input.frequency)?),
        "extra_repayment",
    )?;
    let monthly_savings = current_payment - new_payment;

    let total_savings = in_range(
        total_interest(loan.principal, current_payment, loan.term_years)?
            .checked_sub(total_interest(loan.principal, new_payment, loan.term_years)?),
        "extra_repayment",
    )?;

    Ok(RepaymentComparison {
        term: candidate.term,
        term_label: candidate.term.label().to_string(),
        current_rate_percent: loan.annual_rate_percent,
        new_rate_percent: candidate.annual_rate_percent,
        current_monthly_payment: current_payment.round_dp(2),
        new_monthly_payment: new_payment.round_dp(2),
        monthly_savings: monthly_savings.round_dp(2),
        periodic_savings: from_monthly(monthly_savings, input.frequency)?.round_dp(2),
        total_savings,
        frequency: input.frequency,
    })
}

fn compare_term(input: &ComparisonInput, candidate: &RateCandidate) -> MortgageResult<TermComparison> {
    let loan = &input.loan;
    let new_scheduled = scheduled_monthly_payment(&with_rate(loan, candidate.annual_rate_percent))?;

    let payoff = extra_payment_payoff(&PayoffInput {
        principal: loan.principal,
        annual_rate_percent: candidate.annual_rate_percent,
        regular_monthly_payment: new_scheduled,
        extra_amount: input.extra_repayment,
        frequency: input.frequency,
        term_years: loan.term_years,
    })?;

    Ok(TermComparison {
        term: candidate.term,
        term_label: candidate.term.label().to_string(),
        current_rate_percent: loan.annual_rate_percent,
        new_rate_percent: candidate.annual_rate_percent,
        current_term_years: loan.term_years,
        new_term_years: payoff.new_term_years,
        years_saved: payoff.years_saved,
        months_saved: payoff.months_saved,
        new_monthly_payment: new_scheduled.round_dp(2),
        total_interest_saved: payoff.total_interest_saved,
        annual_extra_payment: payoff.annual_extra_payment,
    })
}

fn with_rate(loan: &LoanTerms, annual_rate_percent: Percent) -> LoanTerms {
    LoanTerms {
        annual_rate_percent,
        ..loan.clone()
    }
}

fn best_option(results: &[ComparisonRecord]) -> Option<TermCode> {
    let mut best: Option<&ComparisonRecord> = None;
    for record in results {
        match best {
            Some(b) if record.score() <= b.score() => {}
            _ => best = Some(record),
        }
    }
    best.map(ComparisonRecord::term)
}

fn validate_comparison(input: &ComparisonInput) -> MortgageResult<()> {
    if input.candidates.is_empty() {
        return Err(MortgageError::InsufficientData(
            "At least one candidate rate is required".into(),
        ));
    }
    if input.current_extra_repayment < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "current_extra_repayment".into(),
            reason: "Extra repayment cannot be negative".into(),
        });
    }
    if input.extra_repayment < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "extra_repayment".into(),
            reason: "Extra repayment cannot be negative".into(),
        });
    }
    Ok(())
}
