//! Error types for the vendor client.

use thiserror::Error;

/// Result type for vendor client operations.
pub type Result<T> = std::result::Result<T, VendorError>;

/// Transport-level vendor client errors.
///
/// Business rejections are not errors at this level: they come back as
/// [`crate::VendorResult::StructuredError`] or [`crate::VendorResult::RawError`].
#[derive(Debug, Error)]
pub enum VendorError {
    /// Configuration error (missing endpoint, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Parse error (successful status with a body that is not JSON)
    #[error("Parse error: {0}")]
    Parse(String),
}
