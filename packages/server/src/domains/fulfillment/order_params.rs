use lazy_static::lazy_static;
use marketplace_client::ParamUpdate;
use regex::Regex;

use super::errors::{FulfillmentError, FulfillmentResult};
use super::models::Asset;
use crate::common::Messages;

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-z0-9]+[\._]?[a-z0-9]+[@]\w+[.]\w{2,3}$").expect("Invalid email regex");
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Ask the customer for a usable admin email before creating anything.
pub fn check_order_parameters(
    asset: &Asset,
    email_param: &str,
    messages: &Messages,
) -> FulfillmentResult<()> {
    let (value, error) = match asset.param_value(email_param) {
        Some(email) if is_valid_email(email) => return Ok(()),
        Some(email) => (email.to_string(), messages.invalid_admin_email),
        None => (String::new(), messages.missing_admin_email),
    };

    Err(FulfillmentError::Inquire {
        message: error.to_string(),
        params: vec![ParamUpdate::new(email_param, value).with_error(error)],
    })
}
