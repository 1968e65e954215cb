//! Error types for the marketplace client.

use thiserror::Error;

/// Result type for marketplace client operations.
pub type Result<T> = std::result::Result<T, MarketplaceError>;

#[derive(Debug, Error)]
pub enum MarketplaceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the marketplace API
    #[error("Marketplace API error ({status}): {message}")]
    Api { status: u16, message: String },
}
