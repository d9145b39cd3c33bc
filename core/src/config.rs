//! Client configuration: service base URL and API token.

use std::fmt;

use url::Url;

use crate::error::ConfigError;

pub const BASE_URL_VAR: &str = "HITOBITO_BASE_URL";
pub const TOKEN_VAR: &str = "HITOBITO_TOKEN";

/// Immutable connection settings shared by every request.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: String,
}

impl ClientConfig {
    /// Validates that `base_url` is an absolute http(s) URL.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        match Url::parse(&base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ConfigError::InvalidBaseUrl(base_url)),
        }
        Ok(Self {
            base_url,
            token: token.into(),
        })
    }

    /// Reads `HITOBITO_BASE_URL` and `HITOBITO_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ClientConfig::from_env`] with a custom variable source.
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };
        Self::new(var(BASE_URL_VAR)?, var(TOKEN_VAR)?)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"[redacted]")
            .finish()
    }
}
