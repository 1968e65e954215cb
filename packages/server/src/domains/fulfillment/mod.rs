//! Subscription fulfillment: lifecycle dispatch, vendor outcome
//! classification, guards and the webhook surface.

pub mod activation;
pub mod dispatcher;
pub mod disposition;
pub mod downsize;
pub mod errors;
pub mod models;
pub mod order_params;
pub mod outcome;
pub mod payload;
pub mod portal_config;
pub mod webhook;

pub use dispatcher::{Dispatcher, FulfillmentPolicy};
pub use disposition::{report_outcome, Disposition};
pub use downsize::{ensure_not_downsize, is_downsize};
pub use errors::{FulfillmentError, FulfillmentResult};
pub use order_params::{check_order_parameters, is_valid_email};
pub use outcome::{classify, OperationOutcome, OutcomeStatus};
pub use payload::build_payload;
pub use portal_config::{PortalConfigResolver, CREDENTIALS_PARAM};
pub use webhook::{router, WebhookState};
