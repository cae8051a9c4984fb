//! Error types for the data providers
use thiserror::Error;

/// Failure talking to an external data provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Provider answered with a non-success status
    #[error("{endpoint} responded with status {status}")]
    Status { endpoint: &'static str, status: u16 },

    /// Request never produced a response
    #[error("Request failed: {0}")]
    Transport(String),

    /// Response body could not be understood
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Provider has nothing for this request (e.g. not configured)
    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

/// Type alias for Results using ProviderError
pub type Result<T> = std::result::Result<T, ProviderError>;
