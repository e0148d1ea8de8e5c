use thiserror::Error;

/// Errors surfaced by backend adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("backend request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status carried by the failure, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus(status) => Some(status.as_u16()),
            ApiError::Http(err) => err.status().map(|status| status.as_u16()),
            ApiError::Connection(_) | ApiError::Decode(_) => None,
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Http(err) if err.is_timeout())
    }

    /// True when the request never reached the server.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        match self {
            ApiError::Http(err) => err.is_connect(),
            ApiError::Connection(_) => true,
            ApiError::HttpStatus(_) | ApiError::Decode(_) => false,
        }
    }
}

/// Errors produced while reading backend configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{var} must not be empty")]
    Empty { var: &'static str },

    #[error("invalid {var} value: {raw}")]
    Invalid { var: &'static str, raw: String },
}
