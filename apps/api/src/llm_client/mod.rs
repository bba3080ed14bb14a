/// LLM Client — the single point of entry for generation-service calls.
///
/// ARCHITECTURAL RULE: No other module may call a provider API directly.
/// Callers depend on the `GenerativeModel` trait; the concrete provider is chosen
/// at startup and carried in `AppState`.
use async_trait::async_trait;
use thiserror::Error;

pub mod gemini;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

/// A text-generation backend.
///
/// `generate` sends one prompt as a single content block and returns the model's
/// textual answer, already lifted out of the provider envelope. Transport failures,
/// non-success statuses and envelopes without a text field are hard errors.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Removes provider-specific wrapper markers around a JSON answer.
    /// Providers with different formatting habits override this.
    fn strip_wrapper<'a>(&self, text: &'a str) -> &'a str {
        strip_json_fences(text)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_suffix("```") {
        stripped.trim_end()
    } else {
        text
    }
}
