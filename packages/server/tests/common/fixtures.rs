//! Test fixtures for building fulfillment requests.
//!
//! Requests come with a portal configuration holding vendor credentials and
//! both approval templates, so the real `PortalConfigResolver` can be used.

#![allow(dead_code)]

use fulfillment_core::domains::fulfillment::models::{
    Asset, Configuration, Connection, LifecycleRequest, LineItem, Marketplace, Parameter,
    ParameterPhase, RequestStatus, RequestType,
};
use serde_json::{json, Value};

pub const MARKETPLACE_ID: &str = "MP-1";
pub const ACTIVATION_TEMPLATE: &str = "TL-ACTIVATE";
pub const SUSPEND_TEMPLATE: &str = "TL-SUSPEND";
pub const SUBSCRIPTION_ID: &str = "SUB-1";
pub const VENDOR_API_URL: &str = "https://vendor.test/v1";
pub const ADMIN_EMAIL_PARAM: &str = "customer_admin_email";

/// Portal configuration with credentials scoped to `MP-1` / `test`.
pub fn portal_configuration() -> Configuration {
    Configuration {
        params: vec![
            Parameter::new("vendorCredentials", "").with_structured_value(json!({
                MARKETPLACE_ID: {
                    "test": {"api_url": VENDOR_API_URL, "api_key": "vendor-key"}
                }
            })),
            Parameter::new("activationTemplate", ACTIVATION_TEMPLATE),
            Parameter::new(
                "suspendSubscriptionTemplate",
                json!({ MARKETPLACE_ID: SUSPEND_TEMPLATE }).to_string(),
            ),
        ],
    }
}

pub struct RequestFixture {
    req: LifecycleRequest,
}

impl RequestFixture {
    /// A pending request of the given type. Everything except purchase
    /// already carries a stored subscription id.
    pub fn new(request_type: RequestType) -> Self {
        let mut params = vec![
            Parameter::new(ADMIN_EMAIL_PARAM, "admin@example.com").with_phase(ParameterPhase::Ordering),
            Parameter::new("seats_note", "pilot").with_phase(ParameterPhase::Ordering),
        ];
        if request_type != RequestType::Purchase {
            params.push(
                Parameter::new("subscriptionId", SUBSCRIPTION_ID)
                    .with_phase(ParameterPhase::Fulfillment),
            );
        }

        Self {
            req: LifecycleRequest {
                id: format!("PR-{}", request_type),
                request_type,
                status: Some(RequestStatus::Pending),
                asset: Asset {
                    id: "AS-1".to_string(),
                    external_id: "EXT-1".to_string(),
                    marketplace: Marketplace {
                        id: MARKETPLACE_ID.to_string(),
                    },
                    connection: Connection {
                        connection_type: "test".to_string(),
                    },
                    params,
                    configuration: portal_configuration(),
                    items: vec![LineItem::new("PRD-1", 0, 5)],
                },
            },
        }
    }

    pub fn items(mut self, items: Vec<LineItem>) -> Self {
        self.req.asset.items = items;
        self
    }

    /// Set or replace an asset parameter
    pub fn param(mut self, id: &str, value: &str) -> Self {
        let params = &mut self.req.asset.params;
        params.retain(|p| p.id != id);
        params.push(Parameter::new(id, value).with_phase(ParameterPhase::Ordering));
        self
    }

    pub fn without_param(mut self, id: &str) -> Self {
        self.req.asset.params.retain(|p| p.id != id);
        self
    }

    pub fn without_config_param(mut self, id: &str) -> Self {
        self.req.asset.configuration.params.retain(|p| p.id != id);
        self
    }

    pub fn status(mut self, status: RequestStatus) -> Self {
        self.req.status = Some(status);
        self
    }

    pub fn build(self) -> LifecycleRequest {
        self.req
    }

    pub fn json(self) -> Value {
        serde_json::to_value(self.req).expect("request serializes")
    }
}

pub fn request(request_type: RequestType) -> LifecycleRequest {
    RequestFixture::new(request_type).build()
}
