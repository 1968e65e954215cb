// Common types shared across the application

pub mod messages;

pub use messages::{Messages, MESSAGES};
