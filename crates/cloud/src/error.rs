//! Error types for the elevation client.

use thiserror::Error;

/// Errors produced while looking up elevations.
///
/// None of these escape the provider: every one is logged and answered with
/// the synthetic surface.
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid elevation response: {reason}")]
    InvalidResponse { reason: String },

    #[error("core error: {0}")]
    Core(#[from] terrasun_core::Error),
}

/// Result alias for cloud operations.
pub type Result<T> = std::result::Result<T, CloudError>;
