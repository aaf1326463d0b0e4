use std::time::Duration;
use thiserror::Error;
use waymark_core::core::error::StoreError;
use waymark_core::theme::error::ThemeError;

/// Outcome of a failed boundary call, as seen by the presentation layer.
///
/// Values cross threads and the wire, so store errors are flattened to text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Duplicate address: {0}")]
    DuplicateAddress(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Store worker disconnected")]
    Disconnected,

    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl ApiError {
    /// Stable identifier used in wire error envelopes.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidAddress(_) => "invalidAddress",
            ApiError::DuplicateAddress(_) => "duplicateAddress",
            ApiError::Persistence(_) => "persistence",
            ApiError::Navigation(_) => "navigation",
            ApiError::Timeout(_) => "timeout",
            ApiError::Disconnected => "disconnected",
            ApiError::Protocol(_) => "protocol",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidAddress(input) => ApiError::InvalidAddress(input),
            StoreError::DuplicateAddress(url) => ApiError::DuplicateAddress(url),
            StoreError::Persistence(e) => ApiError::Persistence(e.to_string()),
        }
    }
}

impl From<ThemeError> for ApiError {
    fn from(err: ThemeError) -> Self {
        match err {
            ThemeError::Persistence(e) => ApiError::Persistence(e.to_string()),
        }
    }
}

/// The page-render step failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct NavigationError(pub String);

impl From<NavigationError> for ApiError {
    fn from(err: NavigationError) -> Self {
        ApiError::Navigation(err.0)
    }
}
