//! Configuration for the decision oracle client.
//!
//! All settings come from environment variables, keeping endpoints and
//! credentials out of `vivarium-config.yaml`.

use std::time::Duration;

use crate::error::OracleError;

/// Complete oracle client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleClientConfig {
    /// Which protocol to speak.
    pub backend: BackendType,
    /// Endpoint. For `http` the full decision URL; for the LLM backends the
    /// API base URL (e.g. `https://api.groq.com/openai/v1`).
    pub url: String,
    /// API key, required by the LLM backends.
    pub api_key: Option<String>,
    /// Model identifier for the LLM backends.
    pub model: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Maximum requests in flight at once.
    pub max_concurrent: usize,
}

/// Supported oracle protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// POST the decision request JSON and read `{"action": ...}` back.
    Http,
    /// `OpenAI`-compatible chat completions API (`OpenAI`, Groq, Ollama).
    OpenAi,
    /// Anthropic Messages API.
    Anthropic,
}

impl BackendType {
    /// Parse a backend name as written in `ORACLE_BACKEND`.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Config`] for an unknown backend name.
    pub fn parse(raw: &str) -> Result<Self, OracleError> {
        match raw.trim().to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "openai" | "groq" | "ollama" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            other => Err(OracleError::Config(format!("unknown ORACLE_BACKEND: {other}"))),
        }
    }

    /// Model used when `ORACLE_MODEL` is unset.
    pub const fn default_model(self) -> &'static str {
        match self {
            Self::Http => "",
            Self::OpenAi => "llama-3.3-70b-versatile",
            Self::Anthropic => "claude-3-5-haiku-latest",
        }
    }
}

impl OracleClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `Ok(None)` when `ORACLE_URL` is unset, meaning no external
    /// oracle is configured.
    ///
    /// Variables:
    /// - `ORACLE_URL` -- endpoint (required to enable the oracle)
    /// - `ORACLE_BACKEND` -- `http`, `openai` or `anthropic` (default `http`)
    /// - `ORACLE_API_KEY` -- required for `openai` and `anthropic`
    /// - `ORACLE_MODEL` -- model name (default depends on backend)
    /// - `ORACLE_TIMEOUT_MS` -- request timeout (default 5000)
    /// - `ORACLE_MAX_CONCURRENT` -- parallel request limit (default 8)
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Config`] if a variable is present but invalid.
    pub fn from_env() -> Result<Option<Self>, OracleError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<Self>, OracleError> {
        let Some(url) = lookup("ORACLE_URL").filter(|u| !u.trim().is_empty()) else {
            return Ok(None);
        };

        let backend = lookup("ORACLE_BACKEND")
            .map_or(Ok(BackendType::Http), |raw| BackendType::parse(&raw))?;

        let api_key = lookup("ORACLE_API_KEY").filter(|k| !k.is_empty());
        if backend != BackendType::Http && api_key.is_none() {
            return Err(OracleError::Config(String::from(
                "ORACLE_API_KEY is required for LLM backends",
            )));
        }

        let model = lookup("ORACLE_MODEL").unwrap_or_else(|| backend.default_model().to_owned());

        let timeout_ms: u64 = lookup("ORACLE_TIMEOUT_MS")
            .unwrap_or_else(|| "5000".to_owned())
            .parse()
            .map_err(|e| OracleError::Config(format!("invalid ORACLE_TIMEOUT_MS: {e}")))?;

        let max_concurrent: usize = lookup("ORACLE_MAX_CONCURRENT")
            .unwrap_or_else(|| "8".to_owned())
            .parse()
            .map_err(|e| OracleError::Config(format!("invalid ORACLE_MAX_CONCURRENT: {e}")))?;

        Ok(Some(Self {
            backend,
            url: url.trim_end_matches('/').to_owned(),
            api_key,
            model,
            timeout: Duration::from_millis(timeout_ms),
            max_concurrent: max_concurrent.max(1),
        }))
    }
}
