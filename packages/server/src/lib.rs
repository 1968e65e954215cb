// Subscription Fulfillment Processor - Core
//
// Receives marketplace fulfillment requests (purchase, change, suspend,
// resume, cancel), turns each one into a vendor subscription call and reports
// the outcome back as approve / skip / fail / inquire.
//
// The marketplace is the system of record; nothing here persists state.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
