//! Advertised home-loan rate cards. The figures are indicative reference
//! data; borrowers may override any rate before comparing.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{RateCandidate, TermCode};
use crate::error::MortgageError;
use crate::types::Percent;
use crate::MortgageResult;

type RateCard = &'static [(TermCode, Decimal)];

static RATE_CARDS: &[(&str, RateCard)] = &[
    (
        "ANZ",
        &[
            (TermCode::SixMonths, dec!(6.49)),
            (TermCode::OneYear, dec!(5.89)),
            (TermCode::EighteenMonths, dec!(5.79)),
            (TermCode::TwoYears, dec!(5.59)),
            (TermCode::ThreeYears, dec!(5.89)),
            (TermCode::FourYears, dec!(5.99)),
            (TermCode::FiveYears, dec!(5.99)),
            (TermCode::Floating, dec!(6.89)),
        ],
    ),
    (
        "ASB",
        &[
            (TermCode::SixMonths, dec!(5.89)),
            (TermCode::OneYear, dec!(5.25)),
            (TermCode::EighteenMonths, dec!(5.19)),
            (TermCode::TwoYears, dec!(4.99)),
            (TermCode::ThreeYears, dec!(5.35)),
            (TermCode::FourYears, dec!(5.79)),
            (TermCode::FiveYears, dec!(5.79)),
            (TermCode::Floating, dec!(6.89)),
        ],
    ),
    (
        "Co-operative Bank",
        &[
            (TermCode::SixMonths, dec!(6.39)),
            (TermCode::OneYear, dec!(5.99)),
            (TermCode::EighteenMonths, dec!(5.99)),
            (TermCode::TwoYears, dec!(5.99)),
            (TermCode::ThreeYears, dec!(6.19)),
            (TermCode::FourYears, dec!(6.29)),
            (TermCode::FiveYears, dec!(6.39)),
            (TermCode::Floating, dec!(6.45)),
        ],
    ),
    (
        "Kiwibank",
        &[
            (TermCode::SixMonths, dec!(6.69)),
            (TermCode::OneYear, dec!(6.09)),
            (TermCode::TwoYears, dec!(6.09)),
            (TermCode::ThreeYears, dec!(6.39)),
            (TermCode::FourYears, dec!(6.59)),
            (TermCode::FiveYears, dec!(6.69)),
            (TermCode::Floating, dec!(6.75)),
        ],
    ),
    (
        "TSB",
        &[
            (TermCode::SixMonths, dec!(6.69)),
            (TermCode::OneYear, dec!(6.15)),
            (TermCode::EighteenMonths, dec!(6.29)),
            (TermCode::TwoYears, dec!(6.09)),
            (TermCode::ThreeYears, dec!(6.39)),
            (TermCode::FourYears, dec!(6.59)),
            (TermCode::FiveYears, dec!(6.69)),
            (TermCode::Floating, dec!(7.69)),
        ],
    ),
    (
        "Westpac",
        &[
            (TermCode::SixMonths, dec!(6.49)),
            (TermCode::OneYear, dec!(5.89)),
            (TermCode::EighteenMonths, dec!(5.79)),
            (TermCode::TwoYears, dec!(5.59)),
            (TermCode::ThreeYears, dec!(5.99)),
            (TermCode::FourYears, dec!(5.99)),
            (TermCode::FiveYears, dec!(5.99)),
            (TermCode::Floating, dec!(6.99)),
        ],
    ),
    (
        "Other",
        &[
            (TermCode::SixMonths, dec!(6.49)),
            (TermCode::OneYear, dec!(5.89)),
            (TermCode::EighteenMonths, dec!(5.79)),
            (TermCode::TwoYears, dec!(5.59)),
            (TermCode::ThreeYears, dec!(5.99)),
            (TermCode::FourYears, dec!(5.99)),
            (TermCode::FiveYears, dec!(5.99)),
            (TermCode::Floating, dec!(6.99)),
        ],
    ),
];

/// A lender and its advertised rate for each term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    pub name: String,
    pub rates: BTreeMap<TermCode, Percent>,
}

impl Bank {
    /// Rate candidates in display order.
    ///
    /// `selected` restricts the comparison to some terms (all terms on the
    /// card when `None`); `overrides` replaces the advertised rate for a term.
    pub fn candidates(
        &self,
        selected: Option<&[TermCode]>,
        overrides: &BTreeMap<TermCode, Percent>,
    ) -> MortgageResult<Vec<RateCandidate>> {
        let mut terms: Vec<TermCode> = match selected {
            Some(terms) => terms.to_vec(),
            None => self.rates.keys().copied().collect(),
        };
        terms.sort();
        terms.dedup();

        terms
            .into_iter()
            .map(|term| {
                let advertised = self.rates.get(&term).ok_or_else(|| MortgageError::InvalidInput {
                    field: "terms".into(),
                    reason: format!("{} does not offer a {} rate", self.name, term.label()),
                })?;
                Ok(RateCandidate {
                    term,
                    annual_rate_percent: overrides.get(&term).copied().unwrap_or(*advertised),
                })
            })
            .collect()
    }
}

/// All banks on the built-in rate table.
pub fn default_banks() -> Vec<Bank> {
    RATE_CARDS
        .iter()
        .map(|(name, card)| Bank {
            name: (*name).to_string(),
            rates: card.iter().copied().collect(),
        })
        .collect()
}

/// Look up a bank by name, ignoring case.
pub fn find_bank(name: &str) -> MortgageResult<Bank> {
    let wanted = name.trim();
    default_banks()
        .into_iter()
        .find(|b| b.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| MortgageError::InvalidInput {
            field: "bank".into(),
            reason: format!("Unknown bank '{wanted}'"),
        })
}
