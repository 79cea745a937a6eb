//! Balance-over-time series for the current loan and each candidate rate,
//! sampled once per year over the current remaining term.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RateCandidate;
use super::TermCode;
use crate::amortization::frequency::to_monthly;
use crate::amortization::in_range;
use crate::amortization::simulation::simulate_balance;
use crate::amortization::standard::scheduled_monthly_payment;
use crate::error::MortgageError;
use crate::types::{LoanTerms, Money, PaymentFrequency};
use crate::MortgageResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceChartInput {
    pub loan: LoanTerms,
    #[serde(default)]
    pub frequency: PaymentFrequency,
    /// Extra amount per period already paid on the current loan.
    #[serde(default)]
    pub current_extra_repayment: Money,
    pub candidates: Vec<RateCandidate>,
    /// Extra amount per period paid on each candidate loan.
    #[serde(default)]
    pub extra_repayment: Money,
}

/// Balance of one candidate at a sample point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesBalance {
    pub term: TermCode,
    pub balance: Money,
}

/// All series at one year mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceChartRow {
    pub year: u32,
    pub current_balance: Money,
    pub balances: Vec<SeriesBalance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceChart {
    /// Series keys in display order.
    pub series: Vec<TermCode>,
    pub rows: Vec<BalanceChartRow>,
}

/// Project every series at years `0..=ceil(term_years)`.
pub fn build_balance_chart(input: &BalanceChartInput) -> MortgageResult<BalanceChart> {
    let loan = &input.loan;
    let years = loan
        .term_years
        .ceil()
        .to_u32()
        .filter(|y| *y > 0)
        .ok_or_else(|| MortgageError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must be a positive number of years".into(),
        })?;

    let mut candidates: Vec<&RateCandidate> = input.candidates.iter().collect();
    candidates.sort_by_key(|c| c.term);
    // Series are keyed by term, so each term may appear once.
    if let Some(pair) = candidates.windows(2).find(|pair| pair[0].term == pair[1].term) {
        return Err(MortgageError::InvalidInput {
            field: "candidates".into(),
            reason: format!("{} appears more than once", pair[0].term.label()),
        });
    }

    let current_payment = in_range(
        scheduled_monthly_payment(loan)?
            .checked_add(to_monthly(input.current_extra_repayment, input.frequency)?),
        "current_extra_repayment",
    )?;
    let new_extra = to_monthly(input.extra_repayment, input.frequency)?;
    let candidate_payments = candidates
        .iter()
        .map(|c| {
            let terms = LoanTerms {
                annual_rate_percent: c.annual_rate_percent,
                ..loan.clone()
            };
            in_range(
                scheduled_monthly_payment(&terms)?.checked_add(new_extra),
                "extra_repayment",
            )
        })
        .collect::<MortgageResult<Vec<Decimal>>>()?;

    let mut rows = Vec::with_capacity(years as usize + 1);
    for year in 0..=years {
        let months = year * 12;
        let current_balance =
            simulate_balance(loan.principal, loan.annual_rate_percent, current_payment, months)?;
        let balances = candidates
            .iter()
            .zip(&candidate_payments)
            .map(|(c, payment)| {
                Ok(SeriesBalance {
                    term: c.term,
                    balance: simulate_balance(loan.principal, c.annual_rate_percent, *payment, months)?,
                })
            })
            .collect::<MortgageResult<Vec<_>>>()?;
        rows.push(BalanceChartRow {
            year,
            current_balance,
            balances,
        });
    }

    Ok(BalanceChart {
        series: candidates.iter().map(|c| c.term).collect(),
        rows,
    })
}
