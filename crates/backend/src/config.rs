use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const VAR_BASE_URL: &str = "CAREER_API_URL";
const VAR_TOKEN: &str = "CAREER_API_TOKEN";
const VAR_TIMEOUT: &str = "CAREER_API_TIMEOUT_SECS";

/// Connection settings for the HTTP backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
    /// Sent as `Authorization: Bearer <token>` when present.
    pub auth_token: Option<String>,
    /// Per-request timeout; expiry surfaces as an ordinary request failure.
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            auth_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl BackendConfig {
    /// Read settings from `CAREER_API_URL`, `CAREER_API_TOKEN` and `CAREER_API_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`BackendConfig::from_env`] but with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set but unusable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(VAR_BASE_URL) {
            config = config.with_base_url(raw)?;
        }

        config.auth_token = lookup(VAR_TOKEN).filter(|token| !token.trim().is_empty());

        if let Some(raw) = lookup(VAR_TIMEOUT) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: VAR_TIMEOUT,
                raw: raw.clone(),
            })?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    var: VAR_TIMEOUT,
                    raw,
                });
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Override the base URL, normalizing trailing slashes.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Empty` for a blank URL and `ConfigError::Invalid` for a
    /// URL that does not parse or lacks an http(s) scheme and a host.
    pub fn with_base_url(mut self, raw: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = raw.into();
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::Empty { var: VAR_BASE_URL });
        }
        let valid = Url::parse(trimmed).is_ok_and(|parsed| {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|host| !host.is_empty())
        });
        if !valid {
            return Err(ConfigError::Invalid {
                var: VAR_BASE_URL,
                raw,
            });
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    /// Join a path onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
