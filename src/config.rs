//! Process configuration.
//!
//! Settings are read once at startup (after loading an optional `.env`) into
//! an explicit [`Settings`] value that is passed by reference to everything
//! that needs it. Validation is a pure function over that value so every
//! configuration problem surfaces before the first network call.

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Pravaah";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ═══════════════════════════════════════════════════════════
// Remote resource names
// ═══════════════════════════════════════════════════════════

/// Time-series data stream holding vitals readings.
pub const INDEX_VITALS: &str = "metrics-patient-vitals";
pub const INDEX_PATIENTS: &str = "patients";
pub const INDEX_CAPACITY: &str = "hospital-capacity";
pub const INDEX_DECISIONS: &str = "agent-decisions";
pub const INDEX_DISCHARGE: &str = "discharge-plans";

/// Index template backing the vitals data stream.
pub const VITALS_TEMPLATE: &str = "metrics-patient-vitals";

// ═══════════════════════════════════════════════════════════
// Defaults
// ═══════════════════════════════════════════════════════════

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BULK_TIMEOUT_SECS: u64 = 60;
/// How many document-level bulk failures are quoted in an error message.
pub const DEFAULT_BULK_ERROR_LIMIT: usize = 3;

const MIN_API_KEY_LEN: usize = 20;

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "pravaah_lib=info,pravaah=info,warn"
}

// ═══════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "Missing required environment variables: {}. Copy .env.example to .env and fill in values.",
        .0.join(", ")
    )]
    Missing(Vec<&'static str>),

    #[error("{0} must use HTTPS for secure communication.")]
    InsecureUrl(&'static str),

    #[error("{0} looks too short - check your API key.")]
    KeyTooShort(&'static str),

    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

// ═══════════════════════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════════════════════

/// Console (Kibana) endpoint and credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSettings {
    pub url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Search endpoint, without trailing slash.
    pub es_url: String,
    pub es_api_key: String,
    /// Console endpoint, without trailing slash. Empty when not configured.
    pub kibana_url: String,
    pub kibana_api_key: String,
    /// Preconfigured LLM connector attached to registered agents.
    pub llm_connector_id: Option<String>,
    pub request_timeout_secs: u64,
    pub bulk_timeout_secs: u64,
    pub bulk_error_limit: usize,
}

impl Settings {
    /// Load `.env` (if present) and read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    ///
    /// Only numeric parsing can fail here; required-field and sanity checks
    /// live in [`Settings::validate`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        let connector = text("LLM_CONNECTOR_ID");

        Ok(Self {
            es_url: text("ES_URL").trim_end_matches('/').to_string(),
            es_api_key: text("ES_API_KEY"),
            kibana_url: text("KIBANA_URL").trim_end_matches('/').to_string(),
            kibana_api_key: text("KIBANA_API_KEY"),
            llm_connector_id: (!connector.is_empty()).then_some(connector),
            request_timeout_secs: parse_number(
                &lookup,
                "PRAVAAH_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            bulk_timeout_secs: parse_number(
                &lookup,
                "PRAVAAH_BULK_TIMEOUT_SECS",
                DEFAULT_BULK_TIMEOUT_SECS,
            )?,
            bulk_error_limit: parse_number(
                &lookup,
                "PRAVAAH_BULK_ERROR_LIMIT",
                DEFAULT_BULK_ERROR_LIMIT as u64,
            )? as usize,
        })
    }

    /// Check required values and basic sanity of endpoints and keys.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut missing = Vec::new();
        if self.es_url.is_empty() {
            missing.push("ES_URL");
        }
        if self.es_api_key.is_empty() {
            missing.push("ES_API_KEY");
        }
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        if !self.es_url.starts_with("https://") {
            return Err(ConfigError::InsecureUrl("ES_URL"));
        }
        if !self.kibana_url.is_empty() && !self.kibana_url.starts_with("https://") {
            return Err(ConfigError::InsecureUrl("KIBANA_URL"));
        }
        if self.es_api_key.len() < MIN_API_KEY_LEN {
            return Err(ConfigError::KeyTooShort("ES_API_KEY"));
        }
        if !self.kibana_api_key.is_empty() && self.kibana_api_key.len() < MIN_API_KEY_LEN {
            return Err(ConfigError::KeyTooShort("KIBANA_API_KEY"));
        }
        Ok(())
    }

    /// Console settings, when both URL and key are present.
    pub fn console(&self) -> Option<ConsoleSettings> {
        if self.kibana_url.is_empty() || self.kibana_api_key.is_empty() {
            return None;
        }
        Some(ConsoleSettings {
            url: self.kibana_url.clone(),
            api_key: self.kibana_api_key.clone(),
        })
    }
}

fn parse_number<F>(lookup: &F, var: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var).map(|v| v.trim().to_string()) {
        None => Ok(default),
        Some(v) if v.is_empty() => Ok(default),
        Some(v) => match v.parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::InvalidNumber { var, value: v }),
        },
    }
}

/// Redacted form of an API key, safe for logs.
pub fn redacted_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() < 8 {
        return "***".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
