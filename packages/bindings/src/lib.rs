use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mortgage_compare_core::amortization::{frequency, payoff, simulation, standard};
use mortgage_compare_core::comparison::{balance_chart, bank_rates, refinance};
use mortgage_compare_core::{report, LoanTerms, PaymentFrequency};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn to_json(value: &impl Serialize) -> NapiResult<String> {
    serde_json::to_string(value).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ImpliedTermInput {
    principal: Decimal,
    annual_rate_percent: Decimal,
    monthly_payment: Decimal,
}

#[derive(Deserialize)]
struct BalanceInput {
    principal: Decimal,
    annual_rate_percent: Decimal,
    monthly_payment: Decimal,
    months: u32,
}

#[derive(Deserialize)]
struct ConvertInput {
    amount: Decimal,
    from: PaymentFrequency,
    to: PaymentFrequency,
}

#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    let loan: LoanTerms = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let payment = standard::scheduled_monthly_payment(&loan).map_err(to_napi_error)?;
    to_json(&payment.round_dp(2))
}

#[napi]
pub fn implied_term_months(input_json: String) -> NapiResult<String> {
    let input: ImpliedTermInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let months = standard::implied_term_months(
        input.principal,
        input.annual_rate_percent,
        input.monthly_payment,
    )
    .map_err(to_napi_error)?;
    to_json(&months)
}

#[napi]
pub fn balance_trajectory(input_json: String) -> NapiResult<String> {
    let input: BalanceInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let points = simulation::balance_trajectory(
        input.principal,
        input.annual_rate_percent,
        input.monthly_payment,
        input.months,
    )
    .map_err(to_napi_error)?;
    to_json(&points)
}

#[napi]
pub fn extra_payment_payoff(input_json: String) -> NapiResult<String> {
    let input: payoff::PayoffInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = payoff::extra_payment_payoff(&input).map_err(to_napi_error)?;
    to_json(&output)
}

#[napi]
pub fn convert_payment(input_json: String) -> NapiResult<String> {
    let input: ConvertInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let converted =
        frequency::convert_between(input.amount, input.from, input.to).map_err(to_napi_error)?;
    to_json(&converted.round_dp(2))
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[napi]
pub fn list_banks() -> NapiResult<String> {
    to_json(&bank_rates::default_banks())
}

#[napi]
pub fn compare_rates(input_json: String) -> NapiResult<String> {
    let input: refinance::ComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = refinance::compare_rates(&input).map_err(to_napi_error)?;
    to_json(&output)
}

#[napi]
pub fn build_balance_chart(input_json: String) -> NapiResult<String> {
    let input: balance_chart::BalanceChartInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = balance_chart::build_balance_chart(&input).map_err(to_napi_error)?;
    to_json(&output)
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[napi]
pub fn build_report(input_json: String) -> NapiResult<String> {
    let input: report::ReportInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = report::build_report(&input).map_err(to_napi_error)?;
    to_json(&output)
}
