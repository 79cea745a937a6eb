//! Extra-repayment payoff: how much sooner a loan is repaid, and how much
//! interest is avoided, when a fixed extra amount is added to every regular
//! payment.
//!
//! Two simulations run over the loan's remaining term. The baseline pays the
//! regular monthly payment for the full term and accumulates interest. The
//! accelerated run adds the monthly equivalent of the extra amount and stops
//! as soon as the balance reaches zero, or when the term runs out if the
//! combined payment never clears the loan.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::frequency::{annual_total, to_monthly};
use super::simulation::AmortizationState;
use super::{in_range, term_months, validate_principal, validate_rate, validate_term, MONEY_DP, TERM_DP};
use crate::error::MortgageError;
use crate::types::{Money, PaymentFrequency, Percent, Years};
use crate::MortgageResult;

/// Input to [`extra_payment_payoff`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffInput {
    /// Outstanding principal.
    pub principal: Money,
    /// Annual interest rate as a percentage.
    pub annual_rate_percent: Percent,
    /// Regular monthly payment, before any extra amount.
    pub regular_monthly_payment: Money,
    /// Extra amount paid at `frequency`.
    #[serde(default)]
    pub extra_amount: Money,
    #[serde(default)]
    pub frequency: PaymentFrequency,
    /// Remaining term of the current loan, in years.
    pub term_years: Years,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffResult {
    /// Time to repay with the extra amount, in years.
    pub new_term_years: Years,
    /// Whole months to repay with the extra amount.
    pub new_term_months: u32,
    pub months_saved: u32,
    pub years_saved: Years,
    /// Baseline interest minus interest paid with the extra amount.
    pub total_interest_saved: Money,
    /// Extra amount paid over a year at the chosen frequency.
    pub annual_extra_payment: Money,
    /// Balance still owing when the term ran out; zero when repaid.
    pub remaining_balance: Money,
}

pub fn extra_payment_payoff(input: &PayoffInput) -> MortgageResult<PayoffResult> {
    validate_payoff_input(input)?;

    let total_months = term_months(input.term_years)?;
    let monthly_extra = to_monthly(input.extra_amount, input.frequency)?;
    let total_monthly_payment = in_range(
        input.regular_monthly_payment.checked_add(monthly_extra),
        "extra_amount",
    )?;

    let mut baseline = AmortizationState::new(input.principal, input.annual_rate_percent);
    for _ in 0..total_months {
        baseline.advance(input.regular_monthly_payment)?;
    }

    let mut accelerated = AmortizationState::new(input.principal, input.annual_rate_percent);
    while !accelerated.is_settled() && accelerated.months() < total_months {
        accelerated.advance(total_monthly_payment)?;
    }

    let months_elapsed = accelerated.months();
    let new_term_years = Decimal::from(months_elapsed) / dec!(12);
    let interest_saved = baseline.total_interest() - accelerated.total_interest();

    tracing::debug!(
        total_months,
        months_elapsed,
        %monthly_extra,
        settled = accelerated.is_settled(),
        "extra repayment payoff simulated"
    );

    Ok(PayoffResult {
        new_term_years: new_term_years.round_dp(TERM_DP),
        new_term_months: months_elapsed,
        months_saved: total_months - months_elapsed,
        // A partial final month of the term is simulated as a whole month.
        years_saved: (input.term_years - new_term_years)
            .max(Decimal::ZERO)
            .round_dp(TERM_DP),
        total_interest_saved: interest_saved.round_dp(MONEY_DP),
        annual_extra_payment: annual_total(input.extra_amount, input.frequency)?.round_dp(MONEY_DP),
        remaining_balance: accelerated.balance().round_dp(MONEY_DP),
    })
}

fn validate_payoff_input(input: &PayoffInput) -> MortgageResult<()> {
    validate_principal(input.principal)?;
    validate_rate(input.annual_rate_percent)?;
    validate_term(input.term_years)?;
    if input.extra_amount < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "extra_amount".into(),
            reason: "Extra repayment cannot be negative".into(),
        });
    }
    if input.regular_monthly_payment < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "regular_monthly_payment".into(),
            reason: "Regular payment cannot be negative".into(),
        });
    }
    Ok(())
}
