//! Server dependencies for the dispatcher (using traits for testability)
//!
//! This module provides the central dependency container used by the fulfillment domain.
//! All external services use trait abstractions to enable testing.

use anyhow::{Context, Result};
use async_trait::async_trait;
use marketplace_client::{MarketplaceClient, ParamUpdate};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use vendor_client::{VendorClient, VendorCredentials, VendorResult};

use crate::config::Config;
use crate::domains::fulfillment::PortalConfigResolver;
use crate::kernel::{BaseConfigResolver, BaseMarketplace, BaseVendorGateway};

// =============================================================================
// VendorClient Adapter (implements BaseVendorGateway trait)
// =============================================================================

/// Builds a [`VendorClient`] per call from the request's credentials,
/// sharing one connection pool and timeout.
pub struct VendorGatewayAdapter {
    http_client: reqwest::Client,
}

impl VendorGatewayAdapter {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build vendor HTTP client")?;
        Ok(Self { http_client })
    }

    fn client(&self, credentials: &VendorCredentials) -> VendorClient {
        VendorClient::with_http_client(self.http_client.clone(), credentials.clone())
    }
}

#[async_trait]
impl BaseVendorGateway for VendorGatewayAdapter {
    async fn create_subscription(
        &self,
        credentials: &VendorCredentials,
        payload: &Value,
    ) -> Result<VendorResult> {
        Ok(self.client(credentials).create_subscription(payload).await?)
    }

    async fn change_subscription(
        &self,
        credentials: &VendorCredentials,
        payload: &Value,
        subscription_id: &str,
    ) -> Result<VendorResult> {
        Ok(self
            .client(credentials)
            .change_subscription(payload, subscription_id)
            .await?)
    }

    async fn cancel_subscription(
        &self,
        credentials: &VendorCredentials,
        payload: &Value,
        subscription_id: &str,
    ) -> Result<VendorResult> {
        Ok(self
            .client(credentials)
            .cancel_subscription(payload, subscription_id)
            .await?)
    }

    async fn suspend_subscription(
        &self,
        credentials: &VendorCredentials,
        payload: &Value,
        subscription_id: &str,
    ) -> Result<VendorResult> {
        Ok(self
            .client(credentials)
            .suspend_subscription(payload, subscription_id)
            .await?)
    }

    async fn resume_subscription(
        &self,
        credentials: &VendorCredentials,
        payload: &Value,
        subscription_id: &str,
    ) -> Result<VendorResult> {
        Ok(self
            .client(credentials)
            .resume_subscription(payload, subscription_id)
            .await?)
    }
}

// =============================================================================
// MarketplaceClient Adapter (implements BaseMarketplace trait)
// =============================================================================

/// Wrapper around MarketplaceClient that implements BaseMarketplace trait
pub struct MarketplaceAdapter(pub Arc<MarketplaceClient>);

impl MarketplaceAdapter {
    pub fn new(client: Arc<MarketplaceClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseMarketplace for MarketplaceAdapter {
    async fn update_parameters(&self, request_id: &str, params: &[ParamUpdate]) -> Result<()> {
        Ok(self.0.update_parameters(request_id, params).await?)
    }

    async fn approve(&self, request_id: &str, template_id: &str) -> Result<()> {
        Ok(self.0.approve(request_id, template_id).await?)
    }

    async fn fail(&self, request_id: &str, reason: &str) -> Result<()> {
        Ok(self.0.fail(request_id, reason).await?)
    }

    async fn inquire(&self, request_id: &str, params: &[ParamUpdate]) -> Result<()> {
        Ok(self.0.inquire(request_id, params).await?)
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Dependencies shared by every request (immutable, cheap to clone)
#[derive(Clone)]
pub struct ServerDeps {
    pub vendor: Arc<dyn BaseVendorGateway>,
    pub marketplace: Arc<dyn BaseMarketplace>,
    pub config_resolver: Arc<dyn BaseConfigResolver>,
}

impl ServerDeps {
    pub fn new(
        vendor: Arc<dyn BaseVendorGateway>,
        marketplace: Arc<dyn BaseMarketplace>,
        config_resolver: Arc<dyn BaseConfigResolver>,
    ) -> Self {
        Self {
            vendor,
            marketplace,
            config_resolver,
        }
    }

    /// Production wiring: real vendor and marketplace clients, portal configuration resolver
    pub fn from_config(config: &Config) -> Result<Self> {
        let vendor = VendorGatewayAdapter::new(Duration::from_secs(config.vendor_timeout_secs))?;
        let marketplace = MarketplaceClient::new(
            config.marketplace_api_url.clone(),
            config.marketplace_api_key.clone(),
        );

        Ok(Self::new(
            Arc::new(vendor),
            Arc::new(MarketplaceAdapter::new(Arc::new(marketplace))),
            Arc::new(PortalConfigResolver),
        ))
    }
}
