//! Closed-form amortization: level payment, interest-only payment, the term
//! implied by a payment, and the linear total-interest estimate.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use super::{
    growth_factor, in_range, monthly_rate, term_months, validate_principal, validate_rate,
    validate_term, MONEY_DP, TERM_DP,
};
use crate::error::MortgageError;
use crate::types::{LoanTerms, Money, MortgageType, Percent, Years};
use crate::MortgageResult;

/// Level monthly payment that retires `principal` over `term_years`.
///
/// `P·r·(1+r)^n / ((1+r)^n − 1)` with `r` the monthly rate and `n` the
/// number of months. A zero rate amortizes linearly (`P / n`). The result is
/// unrounded so it can feed simulations without losing precision.
pub fn monthly_payment(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: Years,
) -> MortgageResult<Money> {
    validate_principal(principal)?;
    validate_rate(annual_rate_percent)?;
    validate_term(term_years)?;
    term_months(term_years)?;

    let n = term_years * dec!(12);
    let r = monthly_rate(annual_rate_percent);
    if r.is_zero() {
        return in_range(principal.checked_div(n), "principal");
    }

    // Past the Decimal range (1+r)^n / ((1+r)^n − 1) is 1 to full precision.
    let ratio = match growth_factor(r, n) {
        Some(factor) if factor > Decimal::ONE => {
            in_range(factor.checked_div(factor - Decimal::ONE), "term_years")?
        }
        Some(_) => return in_range(principal.checked_div(n), "principal"),
        None => Decimal::ONE,
    };
    in_range(
        principal.checked_mul(r).and_then(|interest| interest.checked_mul(ratio)),
        "principal",
    )
}

/// Monthly payment covering interest only.
pub fn interest_only_payment(principal: Money, annual_rate_percent: Percent) -> MortgageResult<Money> {
    validate_principal(principal)?;
    validate_rate(annual_rate_percent)?;
    Ok(principal * monthly_rate(annual_rate_percent))
}

/// Scheduled monthly payment for a loan, by mortgage type.
///
/// Interest-only loans longer than five years are still priced; capping the
/// term is the caller's policy.
pub fn scheduled_monthly_payment(loan: &LoanTerms) -> MortgageResult<Money> {
    match loan.mortgage_type {
        MortgageType::PrincipalAndInterest => {
            monthly_payment(loan.principal, loan.annual_rate_percent, loan.term_years)
        }
        MortgageType::InterestOnly => {
            validate_term(loan.term_years)?;
            term_months(loan.term_years)?;
            interest_only_payment(loan.principal, loan.annual_rate_percent)
        }
    }
}

/// Number of months a fixed monthly payment takes to retire `principal`,
/// rounded to four decimal places.
///
/// Returns [`MortgageError::UnpayableLoan`] when the payment does not exceed
/// the first month's interest, since such a loan never amortizes.
pub fn implied_term_months(
    principal: Money,
    annual_rate_percent: Percent,
    payment: Money,
) -> MortgageResult<Decimal> {
    validate_principal(principal)?;
    validate_rate(annual_rate_percent)?;

    let r = monthly_rate(annual_rate_percent);
    let interest = principal * r;
    if payment <= interest {
        return Err(MortgageError::UnpayableLoan {
            payment,
            interest: interest.round_dp(MONEY_DP),
        });
    }

    if r.is_zero() {
        return Ok(in_range(principal.checked_div(payment), "payment")?.round_dp(TERM_DP));
    }

    // n = ln(PMT / (PMT − P·r)) / ln(1 + r)
    let ratio = in_range(payment.checked_div(payment - interest), "payment")?;
    let months = ratio.ln() / (Decimal::ONE + r).ln();
    Ok(months.round_dp(TERM_DP))
}

/// Interest paid if `monthly_payment` runs for exactly `term_years`.
///
/// This is a linear estimate (`payment × months − principal`), used for the
/// lower-repayment comparison where no early payoff is modelled.
pub fn total_interest(principal: Money, monthly_payment: Money, term_years: Years) -> MortgageResult<Money> {
    validate_principal(principal)?;
    validate_term(term_years)?;
    term_months(term_years)?;
    let paid = monthly_payment
        .checked_mul(term_years)
        .and_then(|p| p.checked_mul(dec!(12)))
        .and_then(|p| p.checked_sub(principal));
    Ok(in_range(paid, "monthly_payment")?.round_dp(MONEY_DP))
}
