//! Centralized configuration for Placefind.
//!
//! Secrets come from the environment (or a `.env` file next to the binary);
//! every other setting has a default that can be overridden through
//! `PLACEFIND_*` variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::{PlacefindError, Result};

/// Environment variable holding the Kakao REST API key.
pub const SEARCH_API_KEY_VAR: &str = "KakaoMapApiKey";
/// Environment variable holding the full ePost lookup URL, key included.
pub const POSTAL_LOOKUP_URL_VAR: &str = "EpostUrlWithApiKey";

/// Central configuration for all Placefind components.
#[derive(Debug, Clone, Default)]
pub struct PlacefindConfig {
    pub credentials: CredentialsConfig,
    pub network: NetworkConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// Secrets for the two remote services.
///
/// Both values are required; an empty default only exists so test
/// configurations can be assembled field by field.
#[derive(Clone, Default)]
pub struct CredentialsConfig {
    /// Kakao REST API key sent as `Authorization: KakaoAK <key>`
    pub search_api_key: String,
    /// ePost lookup URL with its own `ServiceKey` already embedded
    pub postal_lookup_url: String,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("search_api_key", &"<redacted>")
            .field("postal_lookup_url", &"<redacted>")
            .finish()
    }
}

/// HTTP settings shared by the search and postal lookup clients.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Keyword search endpoint
    pub search_endpoint: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            search_endpoint: "https://dapi.kakao.com/v2/local/search/keyword.json".to_string(),
            request_timeout: Duration::from_secs(10),
            user_agent: "placefind/0.1.0",
        }
    }
}

/// Spreadsheet export settings.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output file, overwritten on every export
    pub output_path: PathBuf,
    /// Worksheet name
    pub sheet_name: &'static str,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("검색결과.xlsx"),
            sheet_name: "검색결과",
        }
    }
}

/// Error log location.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directory receiving `error-YYYY-MM-DD.log` files
    pub logs_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            logs_dir: PathBuf::from("logs"),
        }
    }
}

impl PlacefindConfig {
    /// Loads `.env` if present, then builds the configuration from the
    /// process environment.
    ///
    /// # Errors
    ///
    /// - `PlacefindError::Configuration` - A required secret is missing or an
    ///   override cannot be parsed
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(PlacefindError::Configuration {
                    reason: format!("failed to read .env file: {e}"),
                });
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// - `PlacefindError::Configuration` - A required secret is missing or an
    ///   override cannot be parsed
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            credentials: CredentialsConfig {
                search_api_key: required(&lookup, SEARCH_API_KEY_VAR)?,
                postal_lookup_url: required(&lookup, POSTAL_LOOKUP_URL_VAR)?,
            },
            ..Default::default()
        };

        if let Some(endpoint) = lookup("PLACEFIND_SEARCH_ENDPOINT") {
            config.network.search_endpoint = endpoint;
        }

        if let Some(timeout) = lookup("PLACEFIND_REQUEST_TIMEOUT") {
            let seconds = timeout
                .trim()
                .parse::<u64>()
                .map_err(|e| PlacefindError::Configuration {
                    reason: format!("PLACEFIND_REQUEST_TIMEOUT must be whole seconds: {e}"),
                })?;
            config.network.request_timeout = Duration::from_secs(seconds);
        }

        if let Some(path) = lookup("PLACEFIND_EXPORT_PATH") {
            config.export.output_path = PathBuf::from(path);
        }

        if let Some(dir) = lookup("PLACEFIND_LOGS_DIR") {
            config.logging.logs_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Creates a configuration pointing both services at local test servers.
    pub fn for_testing(search_endpoint: &str, postal_lookup_url: &str) -> Self {
        Self {
            credentials: CredentialsConfig {
                search_api_key: "test-key".to_string(),
                postal_lookup_url: postal_lookup_url.to_string(),
            },
            network: NetworkConfig {
                search_endpoint: search_endpoint.to_string(),
                request_timeout: Duration::from_secs(2),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(PlacefindError::Configuration {
            reason: format!("{key} is not set"),
        }),
    }
}
