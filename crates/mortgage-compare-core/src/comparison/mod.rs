//! Refinance comparison built on the amortization engine: candidate rates
//! from a bank's rate card, per-candidate savings under a borrower's
//! preference, and balance-over-time series for charting.

pub mod balance_chart;
pub mod bank_rates;
pub mod refinance;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::Percent;

/// Fixed-rate period offered on a bank's rate card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TermCode {
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "18m")]
    EighteenMonths,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "3y")]
    ThreeYears,
    #[serde(rename = "4y")]
    FourYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "floating")]
    Floating,
    /// A rate entered by the borrower rather than taken from a rate card.
    #[serde(rename = "custom", alias = "Custom")]
    Custom,
}

impl TermCode {
    /// Every term in display order.
    pub const ALL: [TermCode; 9] = [
        TermCode::SixMonths,
        TermCode::OneYear,
        TermCode::EighteenMonths,
        TermCode::TwoYears,
        TermCode::ThreeYears,
        TermCode::FourYears,
        TermCode::FiveYears,
        TermCode::Floating,
        TermCode::Custom,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TermCode::SixMonths => "6m",
            TermCode::OneYear => "1y",
            TermCode::EighteenMonths => "18m",
            TermCode::TwoYears => "2y",
            TermCode::ThreeYears => "3y",
            TermCode::FourYears => "4y",
            TermCode::FiveYears => "5y",
            TermCode::Floating => "floating",
            TermCode::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TermCode::SixMonths => "6 Month",
            TermCode::OneYear => "1 Year",
            TermCode::EighteenMonths => "18 Month",
            TermCode::TwoYears => "2 Year",
            TermCode::ThreeYears => "3 Year",
            TermCode::FourYears => "4 Year",
            TermCode::FiveYears => "5 Year",
            TermCode::Floating => "Floating",
            TermCode::Custom => "Custom Rate",
        }
    }
}

impl fmt::Display for TermCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TermCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        TermCode::ALL
            .into_iter()
            .find(|t| t.code() == wanted)
            .ok_or_else(|| format!("unknown term code '{s}'"))
    }
}

/// What the borrower wants from refinancing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    /// Lower regular repayments over the same term.
    #[default]
    #[serde(alias = "money")]
    LowerRepayments,
    /// Keep repaying extra to finish sooner and pay less interest.
    #[serde(alias = "time")]
    ShorterTerm,
}

impl FromStr for Preference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "lower_repayments" | "money" => Ok(Preference::LowerRepayments),
            "shorter_term" | "time" => Ok(Preference::ShorterTerm),
            other => Err(format!("unknown preference '{other}'")),
        }
    }
}

/// A new rate to compare against the current loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCandidate {
    pub term: TermCode,
    pub annual_rate_percent: Percent,
}
