use napi::Result as NapiResult;
use napi_derive::napi;

use amort_core::engine::LoanRequest;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

#[napi]
pub fn calculate_loan(input_json: String) -> NapiResult<String> {
    let request: LoanRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let engine = request.into_engine().map_err(to_napi_error)?;
    let output = engine.calculate().map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn loan_context_at(input_json: String, period: u32) -> NapiResult<String> {
    let request: LoanRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let engine = request.into_engine().map_err(to_napi_error)?;
    let context = engine.context_at(period).map_err(to_napi_error)?;
    serde_json::to_string(&context).map_err(to_napi_error)
}
