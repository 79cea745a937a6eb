#![cfg(feature = "comparison")]

use mortgage_compare_core::comparison::balance_chart::{build_balance_chart, BalanceChartInput};
use mortgage_compare_core::comparison::bank_rates::find_bank;
use mortgage_compare_core::comparison::refinance::{compare_rates, ComparisonInput, ComparisonRecord};
use mortgage_compare_core::comparison::{Preference, RateCandidate, TermCode};
use mortgage_compare_core::{LoanTerms, MortgageType, PaymentFrequency};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

fn current_loan() -> LoanTerms {
    LoanTerms {
        principal: dec!(650000),
        annual_rate_percent: dec!(7.25),
        term_years: dec!(28),
        mortgage_type: MortgageType::PrincipalAndInterest,
    }
}

fn westpac_input(preference: Preference, extra: Decimal) -> ComparisonInput {
    let candidates = find_bank("Westpac")
        .unwrap()
        .candidates(None, &BTreeMap::new())
        .unwrap();
    ComparisonInput {
        loan: current_loan(),
        frequency: PaymentFrequency::Fortnightly,
        current_extra_repayment: Decimal::ZERO,
        preference,
        candidates,
        extra_repayment: extra,
    }
}

// ===========================================================================
// Lower repayments
// ===========================================================================

#[test]
fn test_lower_repayments_results_follow_candidate_order() {
    let out = compare_rates(&westpac_input(Preference::LowerRepayments, Decimal::ZERO)).unwrap();
    let terms: Vec<TermCode> = out.result.results.iter().map(|r| r.term()).collect();
    assert_eq!(
        terms,
        vec![
            TermCode::SixMonths,
            TermCode::OneYear,
            TermCode::EighteenMonths,
            TermCode::TwoYears,
            TermCode::ThreeYears,
            TermCode::FourYears,
            TermCode::FiveYears,
            TermCode::Floating,
        ]
    );
    assert_eq!(out.result.best_term, Some(TermCode::TwoYears));
}

#[test]
fn test_lower_rate_gives_positive_savings() {
    let out = compare_rates(&westpac_input(Preference::LowerRepayments, Decimal::ZERO)).unwrap();
    for record in &out.result.results {
        let ComparisonRecord::LowerRepayments(r) = record else {
            panic!("expected a repayment comparison");
        };
        assert!(r.new_rate_percent < r.current_rate_percent);
        assert!(r.monthly_savings > Decimal::ZERO, "{}: {}", r.term_label, r.monthly_savings);
        assert!(r.total_savings > Decimal::ZERO);
        // fortnightly savings are 12/26 of monthly savings
        let expected = (r.monthly_savings * dec!(12) / dec!(26)).round_dp(2);
        assert!((r.periodic_savings - expected).abs() <= dec!(0.01));
    }
}

#[test]
fn test_total_savings_uses_linear_interest() {
    let mut input = westpac_input(Preference::LowerRepayments, Decimal::ZERO);
    input.candidates = vec![RateCandidate {
        term: TermCode::Custom,
        annual_rate_percent: dec!(5.0),
    }];
    let out = compare_rates(&input).unwrap();
    let ComparisonRecord::LowerRepayments(r) = &out.result.results[0] else {
        panic!("expected a repayment comparison");
    };
    // savings ≈ monthly savings × months in term
    let approx = r.monthly_savings * dec!(28) * dec!(12);
    assert!((r.total_savings - approx).abs() <= dec!(5));
}

#[test]
fn test_current_extra_repayment_raises_current_payment() {
    let mut input = westpac_input(Preference::LowerRepayments, Decimal::ZERO);
    let base = compare_rates(&input).unwrap();
    input.current_extra_repayment = dec!(100);
    let with_extra = compare_rates(&input).unwrap();

    let (ComparisonRecord::LowerRepayments(a), ComparisonRecord::LowerRepayments(b)) =
        (&base.result.results[0], &with_extra.result.results[0])
    else {
        panic!("expected repayment comparisons");
    };
    // 100 fortnightly ≈ 216.67 monthly
    assert!((b.current_monthly_payment - a.current_monthly_payment - dec!(216.67)).abs() <= dec!(0.01));
}

// ===========================================================================
// Shorter term
// ===========================================================================

#[test]
fn test_shorter_term_saves_time_and_interest() {
    let out = compare_rates(&westpac_input(Preference::ShorterTerm, dec!(200))).unwrap();
    assert_eq!(out.result.results.len(), 8);
    for record in &out.result.results {
        let ComparisonRecord::ShorterTerm(r) = record else {
            panic!("expected a term comparison");
        };
        assert!(r.years_saved > Decimal::ZERO);
        assert!(r.total_interest_saved > Decimal::ZERO);
        assert!(r.new_term_years < r.current_term_years);
        assert_eq!(r.annual_extra_payment, dec!(5200));
    }
}

#[test]
fn test_shorter_term_best_has_most_years_saved() {
    let out = compare_rates(&westpac_input(Preference::ShorterTerm, dec!(200))).unwrap();
    let most = out
        .result
        .results
        .iter()
        .filter_map(|r| match r {
            ComparisonRecord::ShorterTerm(t) => Some(t.years_saved),
            _ => None,
        })
        .max()
        .unwrap();
    let first_best = out
        .result
        .results
        .iter()
        .find(|r| matches!(r, ComparisonRecord::ShorterTerm(t) if t.years_saved == most))
        .map(|r| r.term());
    assert_eq!(out.result.best_term, first_best);
    assert!(out.methodology.contains("Payoff"));
}

#[test]
fn test_interest_only_over_five_years_warns() {
    let mut input = westpac_input(Preference::LowerRepayments, Decimal::ZERO);
    input.loan.mortgage_type = MortgageType::InterestOnly;
    let out = compare_rates(&input).unwrap();
    assert!(out.warnings.iter().any(|w| w.contains("Interest-only")));
}

#[test]
fn test_comparison_is_repeatable() {
    let input = westpac_input(Preference::ShorterTerm, dec!(75));
    let a = compare_rates(&input).unwrap();
    let b = compare_rates(&input).unwrap();
    assert_eq!(a.result, b.result);
}

// ===========================================================================
// Balance chart
// ===========================================================================

#[test]
fn test_balance_chart_series_share_length() {
    let input = westpac_input(Preference::ShorterTerm, dec!(200));
    let chart = build_balance_chart(&BalanceChartInput {
        loan: input.loan.clone(),
        frequency: input.frequency,
        current_extra_repayment: Decimal::ZERO,
        candidates: input.candidates.clone(),
        extra_repayment: input.extra_repayment,
    })
    .unwrap();

    assert_eq!(chart.rows.len(), 29);
    assert_eq!(chart.series.len(), 8);
    for row in &chart.rows {
        assert_eq!(row.balances.len(), chart.series.len());
        for b in &row.balances {
            assert!(b.balance >= Decimal::ZERO);
            assert!(b.balance <= row.current_balance);
        }
    }
    let last = chart.rows.last().unwrap();
    assert!(last.balances.iter().all(|b| b.balance == Decimal::ZERO));
}
