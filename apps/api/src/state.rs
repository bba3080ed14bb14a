use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::warn;

use crate::config::Config;
use crate::extraction::page::PageExtractor;
use crate::llm_client::gemini::GeminiClient;
use crate::llm_client::GenerativeModel;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; every analysis is independent.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub extractor: PageExtractor,
    /// Generation backend. `None` when no API key is configured; handlers answer
    /// with a configuration error instead of calling out.
    pub model: Option<Arc<dyn GenerativeModel>>,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self> {
        let extractor =
            PageExtractor::new(config.fetch_timeout).context("Failed to build page fetch client")?;

        let model: Option<Arc<dyn GenerativeModel>> = match &config.gemini_api_key {
            Some(key) => Some(Arc::new(
                GeminiClient::new(
                    key.clone(),
                    config.gemini_api_base.clone(),
                    config.gemini_model.clone(),
                    config.generation_timeout,
                )
                .context("Failed to build Gemini client")?,
            )),
            None => {
                warn!("GEMINI_API_KEY is not set; analysis requests will fail with 500");
                None
            }
        };

        Ok(Self {
            config,
            extractor,
            model,
        })
    }
}
