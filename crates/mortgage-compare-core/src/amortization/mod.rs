//! The amortization engine: frequency conversion, closed-form payment and
//! term formulas, month-by-month balance simulation and extra-repayment
//! payoff. Every function is pure and works in `rust_decimal::Decimal`.
//!
//! Running balances and per-period interest keep full decimal precision;
//! values are rounded only when they leave the engine as results.

pub mod frequency;
pub mod payoff;
pub mod simulation;
pub mod standard;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::MortgageError;
use crate::types::{Money, Percent, Years};
use crate::MortgageResult;

/// Decimal places for user-facing money.
pub(crate) const MONEY_DP: u32 = 2;

/// Decimal places for year and month counts.
pub(crate) const TERM_DP: u32 = 4;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Upper bound on simulated months (100 years).
pub(crate) const MAX_TERM_MONTHS: u32 = 1200;

/// Monthly periodic rate from an annual percentage.
pub(crate) fn monthly_rate(annual_rate_percent: Percent) -> Decimal {
    annual_rate_percent / dec!(100) / MONTHS_PER_YEAR
}

/// `(1 + r)^periods`, or `None` once the factor leaves the `Decimal` range.
/// Whole periods are multiplied out exactly; any fractional remainder goes
/// through `powd`.
pub(crate) fn growth_factor(rate: Decimal, periods: Decimal) -> Option<Decimal> {
    let base = Decimal::ONE + rate;
    let whole = periods.trunc();
    let mut factor = Decimal::ONE;
    for _ in 0..whole.to_u32()? {
        factor = factor.checked_mul(base)?;
    }
    let fraction = periods - whole;
    if !fraction.is_zero() {
        factor = factor.checked_mul(base.powd(fraction))?;
    }
    Some(factor)
}

/// Unwrap a checked `Decimal` operation, reporting overflow against `field`.
pub(crate) fn in_range(value: Option<Decimal>, field: &str) -> MortgageResult<Decimal> {
    value.ok_or_else(|| MortgageError::InvalidInput {
        field: field.into(),
        reason: "Result exceeds the representable decimal range".into(),
    })
}

/// Number of whole months simulated for a term, rounding partial months up.
pub(crate) fn term_months(term_years: Years) -> MortgageResult<u32> {
    let months = term_years
        .checked_mul(MONTHS_PER_YEAR)
        .and_then(|m| m.ceil().to_u32());
    match months {
        Some(m) if m <= MAX_TERM_MONTHS => Ok(m),
        _ => Err(MortgageError::InvalidInput {
            field: "term_years".into(),
            reason: format!("Term must not exceed {} years", MAX_TERM_MONTHS / 12),
        }),
    }
}

pub(crate) fn validate_principal(principal: Money) -> MortgageResult<()> {
    if principal <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    Ok(())
}

pub(crate) fn validate_rate(annual_rate_percent: Percent) -> MortgageResult<()> {
    if annual_rate_percent < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if annual_rate_percent > dec!(100) {
        return Err(MortgageError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate must be at most 100%".into(),
        });
    }
    Ok(())
}

pub(crate) fn validate_term(term_years: Years) -> MortgageResult<()> {
    if term_years <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must be positive".into(),
        });
    }
    Ok(())
}
