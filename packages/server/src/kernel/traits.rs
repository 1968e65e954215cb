// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Classification, guards and dispatch live in domains/fulfillment and use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseVendorGateway, BaseMarketplace)

use anyhow::Result;
use async_trait::async_trait;
use marketplace_client::ParamUpdate;
use serde_json::Value;
use vendor_client::{VendorCredentials, VendorResult};

use crate::domains::fulfillment::models::{Configuration, TemplateKind};

// =============================================================================
// Vendor Gateway Trait (Infrastructure - vendor subscription API)
// =============================================================================

/// An `Err` is a transport failure; vendor rejections come back as `Ok(VendorResult)`.
#[async_trait]
pub trait BaseVendorGateway: Send + Sync {
    async fn create_subscription(
        &self,
        credentials: &VendorCredentials,
        payload: &Value,
    ) -> Result<VendorResult>;

    async fn change_subscription(
        &self,
        credentials: &VendorCredentials,
        payload: &Value,
        subscription_id: &str,
    ) -> Result<VendorResult>;

    async fn cancel_subscription(
        &self,
        credentials: &VendorCredentials,
        payload: &Value,
        subscription_id: &str,
    ) -> Result<VendorResult>;

    async fn suspend_subscription(
        &self,
        credentials: &VendorCredentials,
        payload: &Value,
        subscription_id: &str,
    ) -> Result<VendorResult>;

    async fn resume_subscription(
        &self,
        credentials: &VendorCredentials,
        payload: &Value,
        subscription_id: &str,
    ) -> Result<VendorResult>;
}

// =============================================================================
// Marketplace Trait (Infrastructure - request state owned by the platform)
// =============================================================================

#[async_trait]
pub trait BaseMarketplace: Send + Sync {
    /// Persist fulfillment parameters against a request
    async fn update_parameters(&self, request_id: &str, params: &[ParamUpdate]) -> Result<()>;

    /// Move a request to approved with the given template
    async fn approve(&self, request_id: &str, template_id: &str) -> Result<()>;

    /// Move a request to failed
    async fn fail(&self, request_id: &str, reason: &str) -> Result<()>;

    /// Write parameter errors and move a request to inquiring
    async fn inquire(&self, request_id: &str, params: &[ParamUpdate]) -> Result<()>;
}

// =============================================================================
// Portal Configuration Trait (Infrastructure - credentials and templates)
// =============================================================================

pub trait BaseConfigResolver: Send + Sync {
    /// Vendor credentials for a marketplace and connection type
    fn credentials(
        &self,
        marketplace_id: &str,
        configuration: &Configuration,
        connection_type: &str,
    ) -> Result<VendorCredentials>;

    /// Template id for a transition kind; empty when nothing is configured
    fn activation_template(
        &self,
        configuration: &Configuration,
        marketplace_id: &str,
        kind: TemplateKind,
    ) -> Result<String>;
}
