//! Error types for the membership API client.
//!
//! # Design
//! Authentication, missing resources and throttling get dedicated variants
//! because callers branch on them (re-login, treat as absent, back off).
//! Every other non-2xx status, an unparseable body, or a network failure
//! lands in `Transport`. `Validation` is raised when a well-formed JSON body
//! does not match the expected JSON:API shape for the requested kind.
//!
//! None of these are retried by the client.

use thiserror::Error;

/// Errors returned by the client's build, parse and accessor methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 401 (bad or missing token) or 403 (token lacks
    /// permission for this resource).
    #[error("unauthorized (HTTP {status})")]
    Unauthorized { status: u16 },

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned 429. `retry_after` is taken from the
    /// `Retry-After` header when it carries a number of seconds.
    #[error("rate limited")]
    RateLimited { retry_after: Option<u64> },

    /// The document did not match the expected resource shape.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Any other non-2xx status, a non-JSON body, or a network failure.
    /// `status` is `None` when no HTTP response was available.
    #[error("transport failure: {message}")]
    Transport { status: Option<u16>, message: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    pub(crate) fn validation(kind: &str, detail: impl std::fmt::Display) -> Self {
        ApiError::Validation(format!("{kind}: {detail}"))
    }

    /// True for 403 responses, where the token is valid but not permitted.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, ApiError::Unauthorized { status: 403 })
    }
}

/// Errors raised while loading client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable `{0}` is not set")]
    MissingVar(&'static str),

    #[error("base url `{0}` is not an absolute http(s) url")]
    InvalidBaseUrl(String),
}
