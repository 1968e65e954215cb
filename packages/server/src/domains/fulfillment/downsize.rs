use tracing::error;

use super::errors::{FulfillmentError, FulfillmentResult};
use super::models::LineItem;
use crate::common::Messages;

/// True when any item asks for fewer units than are provisioned now.
pub fn is_downsize(items: &[LineItem]) -> bool {
    items.iter().any(|item| item.quantity < item.old_quantity)
}

/// Fail a disallowed downsize before anything reaches the vendor.
pub fn ensure_not_downsize(
    items: &[LineItem],
    allow_downsize: bool,
    messages: &Messages,
) -> FulfillmentResult<()> {
    if !allow_downsize && is_downsize(items) {
        error!(
            items = items.len(),
            "Change request reduces item quantities; downsize is not allowed"
        );
        return Err(FulfillmentError::Fail(
            messages.not_allowed_downsize.to_string(),
        ));
    }
    Ok(())
}
