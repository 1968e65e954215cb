use marketplace_client::ParamUpdate;
use thiserror::Error;

pub type FulfillmentResult<T> = std::result::Result<T, FulfillmentError>;

/// Ways a fulfillment request can end without being approved.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FulfillmentError {
    /// Transient: leave the request pending so it is delivered again.
    #[error("Request skipped: {0}")]
    Skip(String),

    /// Terminal: the request fails and the customer sees the message.
    #[error("Request failed: {0}")]
    Fail(String),

    /// The customer must supply or correct ordering parameters.
    #[error("Request needs input: {message}")]
    Inquire {
        message: String,
        params: Vec<ParamUpdate>,
    },
}

impl FulfillmentError {
    pub fn message(&self) -> &str {
        match self {
            FulfillmentError::Skip(message) | FulfillmentError::Fail(message) => message,
            FulfillmentError::Inquire { message, .. } => message,
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, FulfillmentError::Skip(_))
    }
}
