//! Axum route handler for the Analysis API.

use axum::{extract::State, Json};
use bytes::Bytes;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::analysis::analyzer::{analyze_company, AnalyzeOptions};
use crate::analysis::models::{AnalysisRequest, AnalysisResult};
use crate::errors::AppError;
use crate::extraction::url_validator::is_valid_url;
use crate::state::AppState;

pub const INVALID_BODY_MESSAGE: &str = "Invalid JSON request body.";
pub const INVALID_URL_MESSAGE: &str = "Invalid or missing \"companyUrl\" in request body. \
    Must be a valid URL starting with http:// or https://.";

/// POST /api/analyze
///
/// Validates the company URL, extracts the page, asks the model for a sales-fit
/// analysis and returns the normalized result. The body is taken as raw bytes so a
/// malformed payload gets the stable 400 message.
pub async fn handle_analyze(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalysisResult>, AppError> {
    info!("Received request to /api/analyze");
    let company_url = parse_company_url(&body)?;

    let Some(model) = state.model.clone() else {
        return Err(AppError::Configuration(
            "GEMINI_API_KEY is not set".to_string(),
        ));
    };

    let request_id = Uuid::new_v4();
    let span = info_span!("analyze", %request_id, url = %company_url);
    async move {
        let options = AnalyzeOptions {
            include_debug_summary: state.config.include_debug_summary,
        };
        let result =
            analyze_company(&state.extractor, model.as_ref(), &company_url, options).await?;
        info!("Analysis complete, returning results");
        Ok::<_, AppError>(Json(result))
    }
    .instrument(span)
    .await
}

fn parse_company_url(body: &[u8]) -> Result<String, AppError> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
        warn!("Failed to parse request body: {e}");
        AppError::Validation(INVALID_BODY_MESSAGE.to_string())
    })?;

    match serde_json::from_value::<AnalysisRequest>(value) {
        Ok(request) if is_valid_url(&request.company_url) => Ok(request.company_url),
        Ok(request) => {
            warn!("Invalid company URL received: {}", request.company_url);
            Err(AppError::Validation(INVALID_URL_MESSAGE.to_string()))
        }
        Err(e) => {
            warn!("Missing or non-string companyUrl: {e}");
            Err(AppError::Validation(INVALID_URL_MESSAGE.to_string()))
        }
    }
}
