use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortisation
// ---------------------------------------------------------------------------

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let input: home_loan_core::amortization::schedule::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = home_loan_core::amortization::schedule::build_schedule(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_prepayment(input_json: String) -> NapiResult<String> {
    let input: home_loan_core::scenarios::prepayment::PrepaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = home_loan_core::scenarios::prepayment::analyze_prepayment(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_rate_change(input_json: String) -> NapiResult<String> {
    let input: home_loan_core::scenarios::rate_change::RateChangeInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = home_loan_core::scenarios::rate_change::analyze_rate_change(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_loan(input_json: String) -> NapiResult<String> {
    let input: home_loan_core::scenarios::analysis::LoanAnalysisInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        home_loan_core::scenarios::analysis::analyze_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
