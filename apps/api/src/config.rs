use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::{CallPolicy, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::presenter::HtmlPolicy;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub generation_policy: CallPolicy,
    pub html_policy: HtmlPolicy,
    pub session_idle_ttl: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let timeout_secs: u64 = parse_env("GENERATION_TIMEOUT_SECS", 120)?;
        let max_attempts: u32 = parse_env("GENERATION_MAX_ATTEMPTS", 1)?;
        if max_attempts == 0 {
            bail!("GENERATION_MAX_ATTEMPTS must be at least 1");
        }

        let html_policy = match std::env::var("HTML_POLICY") {
            Ok(name) => HtmlPolicy::from_name(&name).with_context(|| {
                format!("HTML_POLICY must be 'trusted' or 'sanitized', got '{name}'")
            })?,
            Err(_) => HtmlPolicy::default(),
        };

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            generation_policy: CallPolicy {
                max_attempts,
                timeout: Duration::from_secs(timeout_secs),
            },
            html_policy,
            session_idle_ttl: Duration::from_secs(parse_env("SESSION_IDLE_TTL_SECS", 3600)?),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
