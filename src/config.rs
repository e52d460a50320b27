//! Runtime configuration read from the environment.
//!
//! `main` loads a `.env` file first (via `dotenvy`), so every variable below
//! can live there too. Empty values count as unset.
//!
//! | Variable                | Default                                  |
//! |-------------------------|------------------------------------------|
//! | `TASKFLOW_STORE`        | `.taskflow`                              |
//! | `GEMINI_API_KEY`        | falls back to `API_KEY`, else none       |
//! | `TASKFLOW_MODEL`        | `gemini-2.5-flash`                       |
//! | `TASKFLOW_LLM_ENDPOINT` | the public Gemini v1beta endpoint        |
//! | `TASKFLOW_BASE_URL`     | `http://localhost:3000/`                 |

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::adapters::live::llm::GEMINI_API_ENDPOINT;

/// Store directory used when `TASKFLOW_STORE` is unset.
pub const DEFAULT_STORE_DIR: &str = ".taskflow";
/// Model used when `TASKFLOW_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Share-link base used when `TASKFLOW_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/";

/// A configuration value that could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `TASKFLOW_BASE_URL` is not an absolute URL.
    #[error("TASKFLOW_BASE_URL {value:?} is not a valid URL: {source}")]
    InvalidBaseUrl {
        /// The rejected value.
        value: String,
        /// Parser error.
        source: url::ParseError,
    },
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding `tasks.json`.
    pub store_dir: PathBuf,
    /// Gemini API key, if any.
    pub api_key: Option<String>,
    /// Model used for planning and advice.
    pub model: String,
    /// API root for the LLM client.
    pub llm_endpoint: String,
    /// Page URL that share links are built on.
    pub base_url: Url,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `TASKFLOW_BASE_URL` is set but not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, treating empty values as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL value is not a valid URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base = get("TASKFLOW_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base)
            .map_err(|source| ConfigError::InvalidBaseUrl { value: base.clone(), source })?;

        Ok(Self {
            store_dir: get("TASKFLOW_STORE").map_or_else(|| PathBuf::from(DEFAULT_STORE_DIR), PathBuf::from),
            api_key: get("GEMINI_API_KEY").or_else(|| get("API_KEY")),
            model: get("TASKFLOW_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_endpoint: get("TASKFLOW_LLM_ENDPOINT")
                .unwrap_or_else(|| GEMINI_API_ENDPOINT.to_string()),
            base_url,
        })
    }
}
