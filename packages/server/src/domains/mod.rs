// Business domains
pub mod fulfillment;
