use serde::{Deserialize, Serialize};

/// Inbound body of `POST /api/analyze`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub company_url: String,
}

/// Talking points and discovery questions for a sales call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Battlecard {
    #[serde(default)]
    pub talking_points: Vec<String>,
    #[serde(default)]
    pub questions: Vec<String>,
}

/// Structured model output returned to the caller as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(alias = "mxdrFitAnalysis")]
    pub fit_assessment: String,
    #[serde(default)]
    pub cold_outreach_emails: Vec<String>,
    #[serde(default)]
    pub follow_up_emails: Vec<String>,
    #[serde(default, alias = "callBattlecard")]
    pub battlecard: Battlecard,
    /// Leading slice of the extracted page text, only when enabled in config.
    #[serde(
        default,
        alias = "scrapedDataSummary",
        skip_serializing_if = "Option::is_none"
    )]
    pub debug_summary: Option<String>,
}
