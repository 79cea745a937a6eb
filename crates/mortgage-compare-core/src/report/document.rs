use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::frequency::from_monthly;
use crate::amortization::payoff::{extra_payment_payoff, PayoffInput};
use crate::amortization::standard::scheduled_monthly_payment;
use crate::comparison::balance_chart::{build_balance_chart, BalanceChart, BalanceChartInput};
use crate::comparison::refinance::{compute_comparison, ComparisonInput, ComparisonOutput};
use crate::types::{Money, PaymentFrequency, Percent, Years};
use crate::MortgageResult;

const DISCLAIMER: &str = "This report is provided for informational purposes only. \
Rates and calculations are estimates and may vary. Please consult a mortgage \
adviser for personalised recommendations.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientDetails {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInput {
    pub client: ClientDetails,
    #[serde(default)]
    pub bank_name: Option<String>,
    pub comparison: ComparisonInput,
    pub generated_on: NaiveDate,
}

/// A duration split into whole years and remaining months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearsMonths {
    pub years: u32,
    pub months: u32,
}

impl YearsMonths {
    pub fn from_months(total_months: u32) -> Self {
        Self {
            years: total_months / 12,
            months: total_months % 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentMortgageSummary {
    pub loan_amount: Money,
    pub interest_rate_percent: Percent,
    pub remaining_term_years: Years,
    pub mortgage_type: String,
    pub payment_frequency: String,
    /// Scheduled payment at the borrower's frequency, excluding extras.
    pub scheduled_payment: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_extra_repayment: Option<Money>,
}

/// Effect of the extra repayment on the current loan at its current rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraRepaymentImpact {
    pub additional_payment: Money,
    pub frequency: PaymentFrequency,
    pub new_term: YearsMonths,
    pub time_saved: YearsMonths,
    pub total_interest_saved: Money,
    pub annual_extra_payment: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub prepared_for: ClientDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    pub generated_on: NaiveDate,
    pub current_mortgage: CurrentMortgageSummary,
    pub comparison: ComparisonOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_repayment_impact: Option<ExtraRepaymentImpact>,
    pub balance_chart: BalanceChart,
    pub warnings: Vec<String>,
    pub disclaimer: String,
    /// Suggested file name when the report is saved or sent.
    pub file_name: String,
}

pub fn build_report(input: &ReportInput) -> MortgageResult<ComparisonReport> {
    let comparison_input = &input.comparison;
    let loan = &comparison_input.loan;
    let frequency = comparison_input.frequency;

    let (comparison, warnings) = compute_comparison(comparison_input)?;
    let scheduled = scheduled_monthly_payment(loan)?;

    let current_mortgage = CurrentMortgageSummary {
        loan_amount: loan.principal,
        interest_rate_percent: loan.annual_rate_percent,
        remaining_term_years: loan.term_years,
        mortgage_type: loan.mortgage_type.label().to_string(),
        payment_frequency: frequency.label().to_string(),
        scheduled_payment: from_monthly(scheduled, frequency)?.round_dp(2),
        current_extra_repayment: Some(comparison_input.current_extra_repayment)
            .filter(|extra| *extra > Decimal::ZERO),
    };

    let extra_repayment_impact = if comparison_input.extra_repayment > Decimal::ZERO {
        let payoff = extra_payment_payoff(&PayoffInput {
            principal: loan.principal,
            annual_rate_percent: loan.annual_rate_percent,
            regular_monthly_payment: scheduled,
            extra_amount: comparison_input.extra_repayment,
            frequency,
            term_years: loan.term_years,
        })?;
        Some(ExtraRepaymentImpact {
            additional_payment: comparison_input.extra_repayment,
            frequency,
            new_term: YearsMonths::from_months(payoff.new_term_months),
            time_saved: YearsMonths::from_months(payoff.months_saved),
            total_interest_saved: payoff.total_interest_saved,
            annual_extra_payment: payoff.annual_extra_payment,
        })
    } else {
        None
    };

    let balance_chart = build_balance_chart(&BalanceChartInput {
        loan: loan.clone(),
        frequency,
        current_extra_repayment: comparison_input.current_extra_repayment,
        candidates: comparison_input.candidates.clone(),
        extra_repayment: comparison_input.extra_repayment,
    })?;

    Ok(ComparisonReport {
        file_name: report_file_name(&input.client.name),
        prepared_for: input.client.clone(),
        bank_name: input.bank_name.clone(),
        generated_on: input.generated_on,
        current_mortgage,
        comparison,
        extra_repayment_impact,
        balance_chart,
        warnings,
        disclaimer: DISCLAIMER.to_string(),
    })
}

/// `mortgage-report-<name>.json`, with the name lower-cased and hyphenated.
pub fn report_file_name(client_name: &str) -> String {
    let slug = client_name
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "mortgage-report.json".to_string()
    } else {
        format!("mortgage-report-{slug}.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_years_months_split() {
        assert_eq!(YearsMonths::from_months(0), YearsMonths { years: 0, months: 0 });
        assert_eq!(YearsMonths::from_months(29), YearsMonths { years: 2, months: 5 });
        assert_eq!(YearsMonths::from_months(360), YearsMonths { years: 30, months: 0 });
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name("Jane  Q. Smith"), "mortgage-report-jane-q-smith.json");
        assert_eq!(report_file_name("   "), "mortgage-report.json");
    }
}
