// TestDependencies - mock implementations for testing
//
// Provides recording mocks that can be injected into ServerDeps for tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use marketplace_client::ParamUpdate;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use vendor_client::{VendorCredentials, VendorResult};

use super::{BaseConfigResolver, BaseMarketplace, BaseVendorGateway, ServerDeps};
use crate::domains::fulfillment::models::{Configuration, TemplateKind};
use crate::domains::fulfillment::PortalConfigResolver;

// =============================================================================
// Mock Vendor Gateway
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorOperation {
    Create,
    Change,
    Cancel,
    Suspend,
    Resume,
}

/// Arguments captured from a vendor call
#[derive(Debug, Clone)]
pub struct VendorCall {
    pub operation: VendorOperation,
    pub subscription_id: Option<String>,
    pub payload: Value,
    pub credentials: VendorCredentials,
}

/// Returns queued results in order; once the queue is empty every call
/// succeeds with a `tenantId` of `MOCK-TENANT`.
pub struct MockVendorGateway {
    responses: Arc<Mutex<Vec<std::result::Result<VendorResult, String>>>>,
    calls: Arc<Mutex<Vec<VendorCall>>>,
}

impl MockVendorGateway {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a vendor result
    pub fn with_result(self, result: VendorResult) -> Self {
        self.responses.lock().unwrap().push(Ok(result));
        self
    }

    /// Queue a vendor result decoded from a JSON body
    pub fn with_json(self, body: Value) -> Self {
        let result = VendorResult::from_response(200, &body.to_string())
            .expect("mock vendor body should be JSON");
        self.with_result(result)
    }

    /// Queue a transport failure
    pub fn with_transport_error(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(Err(message.to_string()));
        self
    }

    /// Get all calls made so far
    pub fn calls(&self) -> Vec<VendorCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Check if an operation was called
    pub fn was_called(&self, operation: VendorOperation) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.operation == operation)
    }

    fn record(
        &self,
        operation: VendorOperation,
        credentials: &VendorCredentials,
        payload: &Value,
        subscription_id: Option<&str>,
    ) -> Result<VendorResult> {
        self.calls.lock().unwrap().push(VendorCall {
            operation,
            subscription_id: subscription_id.map(str::to_string),
            payload: payload.clone(),
            credentials: credentials.clone(),
        });

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            let data = json!({"tenantId": "MOCK-TENANT"})
                .as_object()
                .cloned()
                .unwrap_or_default();
            return Ok(VendorResult::Success { data });
        }
        responses.remove(0).map_err(|e| anyhow!(e))
    }
}

impl Default for MockVendorGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseVendorGateway for MockVendorGateway {
    async fn create_subscription(
        &self,
        credentials: &VendorCredentials,
        payload: &Value,
    ) -> Result<VendorResult> {
        self.record(VendorOperation::Create, credentials, payload, None)
    }

    async fn change_subscription(
        &self,
        credentials: &VendorCredentials,
        payload: &Value,
        subscription_id: &str,
    ) -> Result<VendorResult> {
        self.record(
            VendorOperation::Change,
            credentials,
            payload,
            Some(subscription_id),
        )
    }

    async fn cancel_subscription(
        &self,
        credentials: &VendorCredentials,
        payload: &Value,
        subscription_id: &str,
    ) -> Result<VendorResult> {
        self.record(
            VendorOperation::Cancel,
            credentials,
            payload,
            Some(subscription_id),
        )
    }

    async fn suspend_subscription(
        &self,
        credentials: &VendorCredentials,
        payload: &Value,
        subscription_id: &str,
    ) -> Result<VendorResult> {
        self.record(
            VendorOperation::Suspend,
            credentials,
            payload,
            Some(subscription_id),
        )
    }

    async fn resume_subscription(
        &self,
        credentials: &VendorCredentials,
        payload: &Value,
        subscription_id: &str,
    ) -> Result<VendorResult> {
        self.record(
            VendorOperation::Resume,
            credentials,
            payload,
            Some(subscription_id),
        )
    }
}

// =============================================================================
// Mock Marketplace
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum MarketplaceCall {
    UpdateParameters {
        request_id: String,
        params: Vec<ParamUpdate>,
    },
    Approve {
        request_id: String,
        template_id: String,
    },
    Fail {
        request_id: String,
        reason: String,
    },
    Inquire {
        request_id: String,
        params: Vec<ParamUpdate>,
    },
}

pub struct MockMarketplace {
    calls: Arc<Mutex<Vec<MarketplaceCall>>>,
    fail_updates: bool,
    fail_reports: bool,
}

impl MockMarketplace {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_updates: false,
            fail_reports: false,
        }
    }

    /// Make `update_parameters` return an error
    pub fn with_failing_updates(mut self) -> Self {
        self.fail_updates = true;
        self
    }

    /// Make approve / fail / inquire return an error
    pub fn with_failing_reports(mut self) -> Self {
        self.fail_reports = true;
        self
    }

    pub fn calls(&self) -> Vec<MarketplaceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// All parameter updates, flattened in call order
    pub fn updated_params(&self) -> Vec<ParamUpdate> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                MarketplaceCall::UpdateParameters { params, .. } => Some(params.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    fn push(&self, call: MarketplaceCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn report(&self, call: MarketplaceCall) -> Result<()> {
        self.push(call);
        if self.fail_reports {
            return Err(anyhow!("mock marketplace is unavailable"));
        }
        Ok(())
    }
}

impl Default for MockMarketplace {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMarketplace for MockMarketplace {
    async fn update_parameters(&self, request_id: &str, params: &[ParamUpdate]) -> Result<()> {
        if self.fail_updates {
            return Err(anyhow!("mock marketplace rejected parameter update"));
        }
        self.push(MarketplaceCall::UpdateParameters {
            request_id: request_id.to_string(),
            params: params.to_vec(),
        });
        Ok(())
    }

    async fn approve(&self, request_id: &str, template_id: &str) -> Result<()> {
        self.report(MarketplaceCall::Approve {
            request_id: request_id.to_string(),
            template_id: template_id.to_string(),
        })
    }

    async fn fail(&self, request_id: &str, reason: &str) -> Result<()> {
        self.report(MarketplaceCall::Fail {
            request_id: request_id.to_string(),
            reason: reason.to_string(),
        })
    }

    async fn inquire(&self, request_id: &str, params: &[ParamUpdate]) -> Result<()> {
        self.report(MarketplaceCall::Inquire {
            request_id: request_id.to_string(),
            params: params.to_vec(),
        })
    }
}

// =============================================================================
// Mock Config Resolver
// =============================================================================

/// Fixed credentials; template lookups return the configured result.
pub struct MockConfigResolver {
    pub credentials: std::result::Result<VendorCredentials, String>,
    pub template: std::result::Result<String, String>,
}

impl MockConfigResolver {
    pub fn with_template_error(message: &str) -> Self {
        Self {
            credentials: Ok(mock_credentials()),
            template: Err(message.to_string()),
        }
    }

    pub fn with_credentials_error(message: &str) -> Self {
        Self {
            credentials: Err(message.to_string()),
            template: Ok("TL-MOCK".to_string()),
        }
    }
}

impl BaseConfigResolver for MockConfigResolver {
    fn credentials(
        &self,
        _marketplace_id: &str,
        _configuration: &Configuration,
        _connection_type: &str,
    ) -> Result<VendorCredentials> {
        self.credentials.clone().map_err(|e| anyhow!(e))
    }

    fn activation_template(
        &self,
        _configuration: &Configuration,
        _marketplace_id: &str,
        _kind: TemplateKind,
    ) -> Result<String> {
        self.template.clone().map_err(|e| anyhow!(e))
    }
}

pub fn mock_credentials() -> VendorCredentials {
    VendorCredentials {
        api_url: "https://vendor.test/v1".to_string(),
        api_key: "test-key".to_string(),
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Mock handles for a test, convertible into ServerDeps.
///
/// The handles stay shared with the ServerDeps so tests can inspect calls
/// after dispatching.
pub struct TestDependencies {
    pub vendor: Arc<MockVendorGateway>,
    pub marketplace: Arc<MockMarketplace>,
    pub config_resolver: Arc<dyn BaseConfigResolver>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            vendor: Arc::new(MockVendorGateway::new()),
            marketplace: Arc::new(MockMarketplace::new()),
            config_resolver: Arc::new(PortalConfigResolver),
        }
    }

    /// Set a mock vendor gateway
    pub fn mock_vendor(mut self, vendor: MockVendorGateway) -> Self {
        self.vendor = Arc::new(vendor);
        self
    }

    /// Set a mock marketplace
    pub fn mock_marketplace(mut self, marketplace: MockMarketplace) -> Self {
        self.marketplace = Arc::new(marketplace);
        self
    }

    /// Replace the portal configuration resolver
    pub fn config_resolver(mut self, resolver: impl BaseConfigResolver + 'static) -> Self {
        self.config_resolver = Arc::new(resolver);
        self
    }

    pub fn deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.vendor.clone(),
            self.marketplace.clone(),
            self.config_resolver.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
