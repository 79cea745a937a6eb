use mortgage_compare_core::amortization::frequency::{annual_total, convert_between, from_monthly, to_monthly};
use mortgage_compare_core::amortization::payoff::{extra_payment_payoff, PayoffInput};
use mortgage_compare_core::amortization::simulation::{balance_trajectory, simulate_balance};
use mortgage_compare_core::amortization::standard::{
    implied_term_months, interest_only_payment, monthly_payment, total_interest,
};
use mortgage_compare_core::{MortgageError, PaymentFrequency};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected} ± {tol}, got {actual}"
    );
}

fn payoff_input(extra: Decimal, frequency: PaymentFrequency) -> PayoffInput {
    PayoffInput {
        principal: dec!(500000),
        annual_rate_percent: dec!(6),
        regular_monthly_payment: monthly_payment(dec!(500000), dec!(6), dec!(30)).unwrap(),
        extra_amount: extra,
        frequency,
        term_years: dec!(30),
    }
}

// ===========================================================================
// Frequency conversion
// ===========================================================================

#[test]
fn test_convert_between_round_trips_every_pair() {
    let amounts = [dec!(0), dec!(0.01), dec!(1), dec!(123.45), dec!(2998.42), dec!(1000000)];
    for amount in amounts {
        for from in PaymentFrequency::all() {
            for to in PaymentFrequency::all() {
                let there = convert_between(amount, from, to).unwrap();
                let back = convert_between(there, to, from).unwrap();
                assert_close(back, amount, dec!(0.01));
            }
        }
    }
}

#[test]
fn test_convert_between_goes_through_monthly() {
    let direct =
        convert_between(dec!(300), PaymentFrequency::Fortnightly, PaymentFrequency::Weekly).unwrap();
    let monthly = to_monthly(dec!(300), PaymentFrequency::Fortnightly).unwrap();
    let composed = from_monthly(monthly, PaymentFrequency::Weekly).unwrap();
    assert_eq!(direct, composed);
    assert_close(direct, dec!(150), dec!(0.0000001));
}

#[test]
fn test_annual_total_matches_monthly_equivalent() {
    for f in PaymentFrequency::all() {
        let annual = annual_total(dec!(250), f).unwrap();
        assert_close(to_monthly(dec!(250), f).unwrap() * dec!(12), annual, dec!(0.0000001));
    }
}

// ===========================================================================
// Standard amortization
// ===========================================================================

#[test]
fn test_monthly_payment_zero_rate() {
    assert_eq!(monthly_payment(dec!(120000), dec!(0), dec!(10)).unwrap(), dec!(1000.00));
}

#[test]
fn test_monthly_payment_known_answer() {
    // 500,000 at 6% over 30 years
    let pmt = monthly_payment(dec!(500000), dec!(6), dec!(30)).unwrap();
    assert_close(pmt, dec!(2997.75), dec!(0.01));
}

#[test]
fn test_total_interest_linear_known_answer() {
    let interest = total_interest(dec!(500000), dec!(2998.42), dec!(30)).unwrap();
    assert_close(interest, dec!(579431.20), dec!(1.00));
}

#[test]
fn test_interest_only_below_amortizing_payment() {
    let io = interest_only_payment(dec!(500000), dec!(6)).unwrap();
    let pi = monthly_payment(dec!(500000), dec!(6), dec!(30)).unwrap();
    assert!(io < pi);
}

#[test]
fn test_implied_term_unpayable_loan() {
    let result = implied_term_months(dec!(500000), dec!(6), dec!(1000));
    assert!(matches!(result, Err(MortgageError::UnpayableLoan { .. })));
}

#[test]
fn test_implied_term_higher_payment_shorter_term() {
    let base = implied_term_months(dec!(500000), dec!(6), dec!(3000)).unwrap();
    let faster = implied_term_months(dec!(500000), dec!(6), dec!(4000)).unwrap();
    assert!(faster < base);
    assert!(base > Decimal::ZERO);
}

// ===========================================================================
// Balance simulation
// ===========================================================================

#[test]
fn test_balance_floor_for_any_payment() {
    let payments = [dec!(-500), dec!(0), dec!(100), dec!(2500), dec!(2997.75), dec!(10000), dec!(600000)];
    for payment in payments {
        for months in [0u32, 1, 12, 120, 360] {
            let b = simulate_balance(dec!(500000), dec!(6), payment, months).unwrap();
            assert!(b >= Decimal::ZERO, "payment {payment}, month {months}: {b}");
        }
    }
}

#[test]
fn test_trajectory_is_fixed_length_after_payoff() {
    let points = balance_trajectory(dec!(50000), dec!(5), dec!(5000), 36).unwrap();
    assert_eq!(points.len(), 37);
    assert_eq!(points.last().unwrap().balance, Decimal::ZERO);
}

// ===========================================================================
// Extra-payment payoff
// ===========================================================================

#[test]
fn test_zero_extra_idempotence_all_frequencies() {
    for f in PaymentFrequency::all() {
        let out = extra_payment_payoff(&payoff_input(Decimal::ZERO, f)).unwrap();
        assert_close(out.years_saved, Decimal::ZERO, dec!(0.01));
        assert_close(out.total_interest_saved, Decimal::ZERO, dec!(0.01));
    }
}

#[test]
fn test_fortnightly_200_scenario() {
    let out = extra_payment_payoff(&payoff_input(dec!(200), PaymentFrequency::Fortnightly)).unwrap();
    assert!(out.years_saved > Decimal::ZERO);
    assert!(out.total_interest_saved > Decimal::ZERO);
    assert!(out.new_term_years < dec!(30));
    assert_eq!(out.annual_extra_payment, dec!(5200));
}

#[test]
fn test_monotonic_in_extra_amount() {
    let extras = [dec!(0), dec!(25), dec!(50), dec!(100), dec!(200), dec!(500), dec!(1000), dec!(5000)];
    for f in PaymentFrequency::all() {
        let mut prev_years = Decimal::MIN;
        let mut prev_interest = Decimal::MIN;
        for extra in extras {
            let out = extra_payment_payoff(&payoff_input(extra, f)).unwrap();
            assert!(out.years_saved >= prev_years, "{f} extra {extra}: years_saved decreased");
            assert!(
                out.total_interest_saved >= prev_interest,
                "{f} extra {extra}: interest saved decreased"
            );
            prev_years = out.years_saved;
            prev_interest = out.total_interest_saved;
        }
    }
}

#[test]
fn test_weekly_extra_beats_monthly_extra_of_same_amount() {
    let weekly = extra_payment_payoff(&payoff_input(dec!(100), PaymentFrequency::Weekly)).unwrap();
    let monthly = extra_payment_payoff(&payoff_input(dec!(100), PaymentFrequency::Monthly)).unwrap();
    assert!(weekly.months_saved > monthly.months_saved);
}

#[test]
fn test_zero_rate_payoff() {
    let input = PayoffInput {
        principal: dec!(120000),
        annual_rate_percent: dec!(0),
        regular_monthly_payment: dec!(1000),
        extra_amount: dec!(1000),
        frequency: PaymentFrequency::Monthly,
        term_years: dec!(10),
    };
    let out = extra_payment_payoff(&input).unwrap();
    assert_eq!(out.new_term_months, 60);
    assert_eq!(out.months_saved, 60);
    assert_eq!(out.years_saved, dec!(5));
    assert_eq!(out.total_interest_saved, Decimal::ZERO);
}

// ===========================================================================
// Range limits
// ===========================================================================

#[test]
fn test_out_of_range_inputs_return_errors() {
    let huge = dec!(10000000000000000000000000000);
    assert!(matches!(
        monthly_payment(huge, dec!(0), dec!(0.01)),
        Err(MortgageError::InvalidInput { .. })
    ));
    assert!(matches!(
        simulate_balance(dec!(1000), dec!(6), Decimal::MIN, 1),
        Err(MortgageError::InvalidInput { .. })
    ));
    assert!(matches!(
        total_interest(dec!(1000), dec!(1000000000000000000000000000), dec!(100)),
        Err(MortgageError::InvalidInput { .. })
    ));

    let payoff = PayoffInput {
        principal: dec!(500000),
        annual_rate_percent: dec!(6),
        regular_monthly_payment: dec!(3000),
        extra_amount: dec!(2000000000000000000000000000),
        frequency: PaymentFrequency::Weekly,
        term_years: dec!(30),
    };
    assert!(matches!(
        extra_payment_payoff(&payoff),
        Err(MortgageError::InvalidInput { .. })
    ));
}

#[test]
fn test_pricing_shares_the_payoff_horizon() {
    assert!(monthly_payment(dec!(100000), dec!(5), dec!(100)).is_ok());
    assert!(matches!(
        monthly_payment(dec!(100000), dec!(0.0000000000000000001), dec!(5000000)),
        Err(MortgageError::InvalidInput { .. })
    ));
    assert!(matches!(
        total_interest(dec!(100000), dec!(800), dec!(101)),
        Err(MortgageError::InvalidInput { .. })
    ));
}
