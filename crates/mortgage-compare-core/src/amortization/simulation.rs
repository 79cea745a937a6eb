//! Month-by-month balance projection under a fixed monthly payment.
//!
//! Projections always run for the requested number of months, holding at a
//! zero balance once the loan is repaid, so that several series projected
//! over the same horizon share one x-axis.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{monthly_rate, validate_principal, validate_rate, MAX_TERM_MONTHS, MONEY_DP};
use crate::error::MortgageError;
use crate::types::{Money, Percent};
use crate::MortgageResult;

/// Remaining balance after `month_index` payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub month_index: u32,
    pub balance: Money,
}

/// Running state of a loan being paid down one month at a time.
///
/// Balance and accumulated interest are kept unrounded.
#[derive(Debug, Clone)]
pub(crate) struct AmortizationState {
    balance: Decimal,
    monthly_rate: Decimal,
    total_interest: Decimal,
    months: u32,
}

impl AmortizationState {
    pub(crate) fn new(principal: Money, annual_rate_percent: Percent) -> Self {
        Self {
            balance: principal,
            monthly_rate: monthly_rate(annual_rate_percent),
            total_interest: Decimal::ZERO,
            months: 0,
        }
    }

    /// Charge one month of interest and apply `payment`. The balance is
    /// floored at zero; a payment below the interest grows it.
    pub(crate) fn advance(&mut self, payment: Money) -> MortgageResult<()> {
        let interest = self
            .balance
            .checked_mul(self.monthly_rate)
            .ok_or_else(|| overflow(self.months))?;
        let principal_paid = payment
            .checked_sub(interest)
            .ok_or_else(|| overflow(self.months))?;
        let balance = self
            .balance
            .checked_sub(principal_paid)
            .ok_or_else(|| overflow(self.months))?;

        self.balance = balance.max(Decimal::ZERO);
        self.total_interest = self
            .total_interest
            .checked_add(interest)
            .ok_or_else(|| overflow(self.months))?;
        self.months += 1;
        Ok(())
    }

    pub(crate) fn is_settled(&self) -> bool {
        self.balance <= Decimal::ZERO
    }

    pub(crate) fn balance(&self) -> Decimal {
        self.balance
    }

    pub(crate) fn total_interest(&self) -> Decimal {
        self.total_interest
    }

    pub(crate) fn months(&self) -> u32 {
        self.months
    }
}

fn overflow(month: u32) -> MortgageError {
    MortgageError::InvalidInput {
        field: "monthly_payment".into(),
        reason: format!("Balance exceeds representable range at month {}", month + 1),
    }
}

fn validate_horizon(months: u32) -> MortgageResult<()> {
    if months > MAX_TERM_MONTHS {
        return Err(MortgageError::InvalidInput {
            field: "months_elapsed".into(),
            reason: format!("Projection horizon must not exceed {MAX_TERM_MONTHS} months"),
        });
    }
    Ok(())
}

/// Balance remaining after `months_elapsed` monthly payments, rounded to
/// cents. Never negative.
pub fn simulate_balance(
    principal: Money,
    annual_rate_percent: Percent,
    monthly_payment: Money,
    months_elapsed: u32,
) -> MortgageResult<Money> {
    validate_principal(principal)?;
    validate_rate(annual_rate_percent)?;
    validate_horizon(months_elapsed)?;

    let mut state = AmortizationState::new(principal, annual_rate_percent);
    for _ in 0..months_elapsed {
        state.advance(monthly_payment)?;
    }
    Ok(state.balance().round_dp(MONEY_DP))
}

/// Balance at every month from 0 (the opening principal) to `months`
/// inclusive, rounded to cents.
pub fn balance_trajectory(
    principal: Money,
    annual_rate_percent: Percent,
    monthly_payment: Money,
    months: u32,
) -> MortgageResult<Vec<BalancePoint>> {
    validate_principal(principal)?;
    validate_rate(annual_rate_percent)?;
    validate_horizon(months)?;

    let mut state = AmortizationState::new(principal, annual_rate_percent);
    let mut points = Vec::with_capacity(months as usize + 1);
    points.push(BalancePoint {
        month_index: 0,
        balance: principal.round_dp(MONEY_DP),
    });
    for _ in 0..months {
        state.advance(monthly_payment)?;
        points.push(BalancePoint {
            month_index: state.months(),
            balance: state.balance().round_dp(MONEY_DP),
        });
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::standard::monthly_payment;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_months_returns_principal() {
        let b = simulate_balance(dec!(250000), dec!(5), dec!(1500), 0).unwrap();
        assert_eq!(b, dec!(250000));
    }

    #[test]
    fn test_one_month_step() {
        // Interest 100,000 × 0.5% = 500; principal paid 500
        let b = simulate_balance(dec!(100000), dec!(6), dec!(1000), 1).unwrap();
        assert_eq!(b, dec!(99500));
    }

    #[test]
    fn test_full_term_pays_off() {
        let pmt = monthly_payment(dec!(500000), dec!(6), dec!(30)).unwrap();
        let b = simulate_balance(dec!(500000), dec!(6), pmt, 360).unwrap();
        assert!(b.abs() <= dec!(0.01), "residual balance {b}");
    }

    #[test]
    fn test_continues_at_zero_after_payoff() {
        let b = simulate_balance(dec!(10000), dec!(5), dec!(5000), 24).unwrap();
        assert_eq!(b, Decimal::ZERO);
    }

    #[test]
    fn test_insufficient_payment_grows_balance() {
        let b = simulate_balance(dec!(500000), dec!(6), dec!(1000), 12).unwrap();
        assert!(b > dec!(500000));
    }

    #[test]
    fn test_negative_payment_never_negative_balance() {
        let b = simulate_balance(dec!(1000), dec!(0), dec!(-50), 10).unwrap();
        assert_eq!(b, dec!(1500));
    }

    #[test]
    fn test_trajectory_length_and_endpoints() {
        let pmt = monthly_payment(dec!(200000), dec!(4), dec!(10)).unwrap();
        let points = balance_trajectory(dec!(200000), dec!(4), pmt, 150).unwrap();
        assert_eq!(points.len(), 151);
        assert_eq!(points[0].balance, dec!(200000));
        assert_eq!(points[150].month_index, 150);
        assert_eq!(points[150].balance, Decimal::ZERO);
        for pair in points.windows(2) {
            assert!(pair[1].balance <= pair[0].balance);
        }
    }

    #[test]
    fn test_trajectory_matches_simulate_balance() {
        let points = balance_trajectory(dec!(300000), dec!(5.5), dec!(2000), 60).unwrap();
        let direct = simulate_balance(dec!(300000), dec!(5.5), dec!(2000), 60).unwrap();
        assert_eq!(points[60].balance, direct);
    }

    #[test]
    fn test_extreme_negative_payment_is_invalid_not_panic() {
        assert!(matches!(
            simulate_balance(dec!(1000), dec!(6), Decimal::MIN, 1),
            Err(MortgageError::InvalidInput { .. })
        ));
        assert!(matches!(
            balance_trajectory(dec!(1000), dec!(6), Decimal::MIN, 3),
            Err(MortgageError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_horizon_limit() {
        assert!(simulate_balance(dec!(1000), dec!(5), dec!(10), 5000).is_err());
    }
}
