//! Suggestion service configuration loaded from environment variables.

use std::time::Duration;

use crate::api::DEFAULT_BASE_URL;
use crate::fetcher::FetcherConfig;

/// Default debounce window between the last keystroke and the request.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Queries shorter than this (after trimming) never reach the service.
pub const DEFAULT_MIN_QUERY_CHARS: usize = 3;

/// Number of candidates requested per lookup.
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// HTTP request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Configuration for the suggestion client and fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestConfig {
    /// Service root (default: `https://suggestions.dadata.ru`).
    pub base_url: String,
    /// Debounce window in milliseconds (default: `500`).
    pub debounce_ms: u64,
    /// Minimum trimmed query length (default: `3`).
    pub min_query_chars: usize,
    /// Candidates requested per lookup (default: `10`).
    pub max_results: u32,
    /// HTTP request timeout in seconds (default: `10`).
    pub request_timeout_secs: u64,
}

/// A configuration value that could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

impl SuggestConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                          |
    /// |--------------------------------|----------------------------------|
    /// | `DADATA_BASE_URL`              | `https://suggestions.dadata.ru`  |
    /// | `SUGGEST_DEBOUNCE_MS`          | `500`                            |
    /// | `SUGGEST_MIN_QUERY_CHARS`      | `3`                              |
    /// | `SUGGEST_MAX_RESULTS`          | `10`                             |
    /// | `SUGGEST_REQUEST_TIMEOUT_SECS` | `10`                             |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("DADATA_BASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "DADATA_BASE_URL",
                value: base_url,
            });
        }

        Ok(Self {
            base_url,
            debounce_ms: parse_or(&lookup, "SUGGEST_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS)?,
            min_query_chars: parse_or(&lookup, "SUGGEST_MIN_QUERY_CHARS", DEFAULT_MIN_QUERY_CHARS)?,
            max_results: parse_or(&lookup, "SUGGEST_MAX_RESULTS", DEFAULT_MAX_RESULTS)?,
            request_timeout_secs: parse_or(
                &lookup,
                "SUGGEST_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Fetcher settings derived from this configuration.
    pub fn fetcher(&self) -> FetcherConfig {
        FetcherConfig {
            debounce: Duration::from_millis(self.debounce_ms),
            min_query_chars: self.min_query_chars,
            max_results: self.max_results,
        }
    }
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            max_results: DEFAULT_MAX_RESULTS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
