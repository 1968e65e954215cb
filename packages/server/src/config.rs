use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::domains::fulfillment::FulfillmentPolicy;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub marketplace_api_url: String,
    pub marketplace_api_key: String,
    pub webhook_secret: Option<String>,
    pub allow_downsize: bool,
    pub order_email_parameter: Option<String>,
    pub vendor_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            marketplace_api_url: env::var("MARKETPLACE_API_URL")
                .context("MARKETPLACE_API_URL must be set")?,
            marketplace_api_key: env::var("MARKETPLACE_API_KEY")
                .context("MARKETPLACE_API_KEY must be set")?,
            webhook_secret: env::var("WEBHOOK_SECRET").ok().filter(|s| !s.is_empty()),
            allow_downsize: env::var("ALLOW_DOWNSIZE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            order_email_parameter: env::var("ORDER_EMAIL_PARAMETER")
                .ok()
                .filter(|s| !s.is_empty()),
            vendor_timeout_secs: env::var("VENDOR_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("VENDOR_TIMEOUT_SECS must be a valid number")?,
        })
    }

    pub fn policy(&self) -> FulfillmentPolicy {
        FulfillmentPolicy {
            allow_downsize: self.allow_downsize,
            order_email_parameter: self.order_email_parameter.clone(),
        }
    }
}
