//! Analysis pipeline: page extract → prompt → model → normalized result.
//!
//! The two outbound calls are strictly sequential. Extraction cannot fail; only the
//! generation call (transport, status, envelope) produces errors.

use tracing::{debug, info};

use crate::analysis::models::AnalysisResult;
use crate::analysis::normalizer::normalize_reply;
use crate::analysis::prompts::build_analysis_prompt;
use crate::errors::AppError;
use crate::extraction::page::PageExtractor;
use crate::llm_client::GenerativeModel;

const DEBUG_SUMMARY_LEN: usize = 500;

/// Options that shape the returned result but not the analysis itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzeOptions {
    pub include_debug_summary: bool,
}

pub async fn analyze_company(
    extractor: &PageExtractor,
    model: &dyn GenerativeModel,
    company_url: &str,
    options: AnalyzeOptions,
) -> Result<AnalysisResult, AppError> {
    let page_text = extractor.extract(company_url).await;
    let mut result = compose_and_normalize(model, &page_text, company_url).await?;

    // Only the server decides whether a summary is exposed; drop anything the model echoed.
    result.debug_summary = options
        .include_debug_summary
        .then(|| debug_summary(&page_text));
    Ok(result)
}

/// Builds the prompt, invokes the model once and normalizes the reply.
pub async fn compose_and_normalize(
    model: &dyn GenerativeModel,
    page_text: &str,
    company_url: &str,
) -> Result<AnalysisResult, AppError> {
    let prompt = build_analysis_prompt(page_text, company_url);

    info!("Calling {} for {company_url}", model.name());
    let raw = model.generate(&prompt).await?;
    debug!("Raw model response text: {raw}");

    Ok(normalize_reply(&raw, |text| model.strip_wrapper(text)))
}

fn debug_summary(page_text: &str) -> String {
    let head: String = page_text.chars().take(DEBUG_SUMMARY_LEN).collect();
    format!("{head}...")
}
