use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// All monetary values, in dollars (never cents).
pub type Money = Decimal;

/// Annual interest rates expressed as percentages (6.5 = 6.5%).
pub type Percent = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Repayment structure of a mortgage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MortgageType {
    #[default]
    PrincipalAndInterest,
    /// Payments cover interest only; callers cap these at five years.
    InterestOnly,
}

impl MortgageType {
    pub fn label(&self) -> &'static str {
        match self {
            MortgageType::PrincipalAndInterest => "Principal and Interest",
            MortgageType::InterestOnly => "Interest Only",
        }
    }
}

impl FromStr for MortgageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "principal-and-interest" | "p&i" | "pi" => Ok(MortgageType::PrincipalAndInterest),
            "interest-only" | "io" => Ok(MortgageType::InterestOnly),
            other => Err(format!("unknown mortgage type '{other}'")),
        }
    }
}

/// Repayment cadence. Uses fixed counts of 52, 26 and 12 payments a year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFrequency {
    Weekly,
    #[default]
    Fortnightly,
    Monthly,
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" | "w" => Ok(PaymentFrequency::Weekly),
            "fortnightly" | "f" | "biweekly" => Ok(PaymentFrequency::Fortnightly),
            "monthly" | "m" => Ok(PaymentFrequency::Monthly),
            other => Err(format!("unknown payment frequency '{other}'")),
        }
    }
}

/// Description of an existing loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Outstanding principal.
    pub principal: Money,
    /// Annual interest rate as a percentage.
    pub annual_rate_percent: Percent,
    /// Remaining term in years.
    pub term_years: Years,
    #[serde(default)]
    pub mortgage_type: MortgageType,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    for warning in &warnings {
        tracing::warn!(methodology, "{warning}");
    }
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
