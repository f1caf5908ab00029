use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Settings injected into the completion client at construction.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// `None` means no backend is configured; every analysis uses the fallback path.
    pub api_key: Option<String>,
    pub api_url: String,
    pub request_timeout: Duration,
}

/// Settings injected into the GitHub metadata fetcher at construction.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub request_timeout: Duration,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub github: GitHubConfig,
    /// Single overall deadline for one analysis call (fetch + completion).
    pub analysis_deadline: Duration,
    pub completion_max_attempts: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let request_timeout = Duration::from_secs(parse_env("HTTP_TIMEOUT_SECS", 30)?);

        Ok(Config {
            llm: LlmConfig {
                api_key: optional_env("ANTHROPIC_API_KEY"),
                api_url: optional_env("ANTHROPIC_API_URL")
                    .unwrap_or_else(|| DEFAULT_ANTHROPIC_API_URL.to_string()),
                request_timeout,
            },
            github: GitHubConfig {
                api_url: optional_env("GITHUB_API_URL")
                    .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
                token: optional_env("GITHUB_TOKEN"),
                request_timeout,
            },
            analysis_deadline: Duration::from_secs(parse_env("ANALYSIS_DEADLINE_SECS", 45)?),
            completion_max_attempts: parse_env("COMPLETION_MAX_ATTEMPTS", 2)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Returns the variable's value, treating an empty string as unset.
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
