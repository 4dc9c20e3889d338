//! Error types for the trading post price tracker

use thiserror::Error;

/// Errors that can occur when fetching prices from a provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Invalid response from provider
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Provider API error
    #[error("Provider API error: {0}")]
    ApiError(String),
}

/// Errors that can occur when reading the published request state
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// The container owning the state has been dropped
    #[error("price state read after its container was dropped")]
    Detached,
}
