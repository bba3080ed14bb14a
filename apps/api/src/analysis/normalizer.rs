//! Turns the model's textual answer into an `AnalysisResult`.
//!
//! Contract: strip known wrapper markers, then parse; if parsing fails, degrade to a
//! result that carries the raw text instead of failing the request.

use tracing::{debug, warn};

use crate::analysis::models::AnalysisResult;

pub const PARSE_FAILURE_PREFIX: &str = "Failed to parse structured response. Raw model output:";

/// `strip` is the provider's wrapper rule (see `GenerativeModel::strip_wrapper`).
pub fn normalize_reply<F>(raw: &str, strip: F) -> AnalysisResult
where
    F: for<'a> Fn(&'a str) -> &'a str,
{
    let payload = strip(raw);
    match serde_json::from_str::<AnalysisResult>(payload) {
        Ok(result) => result,
        Err(e) => {
            warn!("Failed to parse model JSON response: {e}");
            debug!("Problematic JSON string: {payload}");
            degraded_result(raw)
        }
    }
}

fn degraded_result(raw: &str) -> AnalysisResult {
    AnalysisResult {
        fit_assessment: format!("{PARSE_FAILURE_PREFIX}\n{raw}"),
        ..AnalysisResult::default()
    }
}
