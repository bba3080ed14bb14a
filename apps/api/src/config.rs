use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";

/// Application configuration loaded from environment variables.
///
/// The generation-service key is optional here: a missing key does not stop the
/// server, it is reported on every analysis request as a configuration error.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub gemini_model: String,
    pub fetch_timeout: Duration,
    pub generation_timeout: Duration,
    pub include_debug_summary: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_api_base: optional_env("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            gemini_model: optional_env("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            fetch_timeout: Duration::from_secs(parse_env("FETCH_TIMEOUT_SECS", 10)?),
            generation_timeout: Duration::from_secs(parse_env("GENERATION_TIMEOUT_SECS", 60)?),
            include_debug_summary: parse_env("INCLUDE_DEBUG_SUMMARY", false)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads a variable, treating unset and blank values alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u64 = parse_env("PROSPECT_TEST_UNSET_TIMEOUT", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("PROSPECT_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = parse_env("PROSPECT_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
    }

    #[test]
    fn test_optional_env_treats_blank_as_missing() {
        std::env::set_var("PROSPECT_TEST_BLANK_KEY", "   ");
        assert_eq!(optional_env("PROSPECT_TEST_BLANK_KEY"), None);
    }
}
