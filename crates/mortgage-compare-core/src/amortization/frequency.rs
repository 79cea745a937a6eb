//! Conversion of periodic amounts between weekly, fortnightly and monthly
//! cadences. Monthly is the pivot: every conversion between two cadences
//! goes through the monthly equivalent so that converting there and back
//! returns the original amount.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::in_range;
use crate::types::{Money, PaymentFrequency};
use crate::MortgageResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

impl PaymentFrequency {
    /// Fixed number of payments per year (52, 26 or 12).
    pub fn payments_per_year(&self) -> Decimal {
        match self {
            PaymentFrequency::Weekly => dec!(52),
            PaymentFrequency::Fortnightly => dec!(26),
            PaymentFrequency::Monthly => dec!(12),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentFrequency::Weekly => "Weekly",
            PaymentFrequency::Fortnightly => "Fortnightly",
            PaymentFrequency::Monthly => "Monthly",
        }
    }

    pub fn to_monthly(&self, amount: Money) -> MortgageResult<Money> {
        to_monthly(amount, *self)
    }

    pub fn from_monthly(&self, monthly_amount: Money) -> MortgageResult<Money> {
        from_monthly(monthly_amount, *self)
    }

    pub fn all() -> [PaymentFrequency; 3] {
        [
            PaymentFrequency::Weekly,
            PaymentFrequency::Fortnightly,
            PaymentFrequency::Monthly,
        ]
    }
}

/// Monthly equivalent of an amount paid at `frequency`.
pub fn to_monthly(amount: Money, frequency: PaymentFrequency) -> MortgageResult<Money> {
    match frequency {
        PaymentFrequency::Monthly => Ok(amount),
        _ => {
            let yearly = in_range(amount.checked_mul(frequency.payments_per_year()), "amount")?;
            Ok(yearly / MONTHS_PER_YEAR)
        }
    }
}

/// Amount paid at `frequency` equivalent to a monthly amount.
pub fn from_monthly(monthly_amount: Money, frequency: PaymentFrequency) -> MortgageResult<Money> {
    match frequency {
        PaymentFrequency::Monthly => Ok(monthly_amount),
        _ => {
            let yearly = in_range(monthly_amount.checked_mul(MONTHS_PER_YEAR), "amount")?;
            Ok(yearly / frequency.payments_per_year())
        }
    }
}

/// Total paid over a year at `frequency`.
pub fn annual_total(amount: Money, frequency: PaymentFrequency) -> MortgageResult<Money> {
    in_range(amount.checked_mul(frequency.payments_per_year()), "amount")
}

pub fn convert_between(amount: Money, from: PaymentFrequency, to: PaymentFrequency) -> MortgageResult<Money> {
    from_monthly(to_monthly(amount, from)?, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MortgageError;

    #[test]
    fn test_weekly_to_monthly() {
        // 120 * 52 / 12 = 520
        assert_eq!(to_monthly(dec!(120), PaymentFrequency::Weekly).unwrap(), dec!(520));
    }

    #[test]
    fn test_fortnightly_to_monthly() {
        // 240 * 26 / 12 = 520
        assert_eq!(to_monthly(dec!(240), PaymentFrequency::Fortnightly).unwrap(), dec!(520));
    }

    #[test]
    fn test_monthly_is_identity() {
        assert_eq!(to_monthly(dec!(1234.56), PaymentFrequency::Monthly).unwrap(), dec!(1234.56));
        assert_eq!(from_monthly(dec!(1234.56), PaymentFrequency::Monthly).unwrap(), dec!(1234.56));
    }

    #[test]
    fn test_from_monthly_inverts_to_monthly() {
        for f in PaymentFrequency::all() {
            let back = from_monthly(to_monthly(dec!(987.65), f).unwrap(), f).unwrap();
            assert!((back - dec!(987.65)).abs() < dec!(0.0000001), "{f}: {back}");
        }
    }

    #[test]
    fn test_annual_total() {
        assert_eq!(annual_total(dec!(100), PaymentFrequency::Weekly).unwrap(), dec!(5200));
        assert_eq!(annual_total(dec!(100), PaymentFrequency::Fortnightly).unwrap(), dec!(2600));
        assert_eq!(annual_total(dec!(100), PaymentFrequency::Monthly).unwrap(), dec!(1200));
    }

    #[test]
    fn test_negative_amounts_scale_linearly() {
        assert_eq!(to_monthly(dec!(-120), PaymentFrequency::Weekly).unwrap(), dec!(-520));
    }

    #[test]
    fn test_convert_weekly_to_fortnightly() {
        let f = convert_between(dec!(100), PaymentFrequency::Weekly, PaymentFrequency::Fortnightly)
            .unwrap();
        assert!((f - dec!(200)).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_out_of_range_amounts_are_invalid_input() {
        let huge = dec!(2000000000000000000000000000);
        assert!(matches!(
            to_monthly(huge, PaymentFrequency::Weekly),
            Err(MortgageError::InvalidInput { .. })
        ));
        assert!(matches!(
            from_monthly(Decimal::MAX, PaymentFrequency::Fortnightly),
            Err(MortgageError::InvalidInput { .. })
        ));
        assert!(matches!(
            annual_total(huge, PaymentFrequency::Weekly),
            Err(MortgageError::InvalidInput { .. })
        ));
        assert!(matches!(
            convert_between(huge, PaymentFrequency::Weekly, PaymentFrequency::Monthly),
            Err(MortgageError::InvalidInput { .. })
        ));
        // monthly is the identity and cannot overflow
        assert_eq!(to_monthly(Decimal::MAX, PaymentFrequency::Monthly).unwrap(), Decimal::MAX);
    }
}
