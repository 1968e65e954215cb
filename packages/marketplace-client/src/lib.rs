//! Pure marketplace fulfillment REST API client.
//!
//! The marketplace owns request and asset state; this client only writes
//! fulfillment parameters and moves a request to approved, failed or
//! inquiring.
//!
//! # Example
//!
//! ```rust,ignore
//! use marketplace_client::{MarketplaceClient, ParamUpdate};
//!
//! let client = MarketplaceClient::new("https://api.marketplace.example/public/v1", "key");
//! client.update_parameters("PR-1", &[ParamUpdate::new("subscriptionId", "T1")]).await?;
//! client.approve("PR-1", "TL-123").await?;
//! ```

pub mod error;
pub mod types;

pub use error::{MarketplaceError, Result};
pub use types::ParamUpdate;

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use tracing::debug;
use types::{ApproveBody, AssetParams, FailBody, UpdateRequestBody};

#[derive(Clone)]
pub struct MarketplaceClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MarketplaceClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Persist fulfillment parameters against a request.
    pub async fn update_parameters(&self, request_id: &str, params: &[ParamUpdate]) -> Result<()> {
        let url = format!("{}/requests/{}", self.base_url, request_id);
        let body = UpdateRequestBody {
            asset: AssetParams { params },
        };
        self.execute(self.client.put(&url), &body).await?;
        debug!(request_id, count = params.len(), "Updated request parameters");
        Ok(())
    }

    /// Approve a request with an activation template.
    pub async fn approve(&self, request_id: &str, template_id: &str) -> Result<()> {
        let url = format!("{}/requests/{}/approve", self.base_url, request_id);
        self.execute(self.client.post(&url), &ApproveBody { template_id })
            .await
    }

    /// Fail a request. The reason is shown to the customer.
    pub async fn fail(&self, request_id: &str, reason: &str) -> Result<()> {
        let url = format!("{}/requests/{}/fail", self.base_url, request_id);
        self.execute(self.client.post(&url), &FailBody { reason })
            .await
    }

    /// Write parameter errors, then move the request to inquiring.
    pub async fn inquire(&self, request_id: &str, params: &[ParamUpdate]) -> Result<()> {
        if !params.is_empty() {
            self.update_parameters(request_id, params).await?;
        }
        let url = format!("{}/requests/{}/inquire", self.base_url, request_id);
        self.execute(self.client.post(&url), &serde_json::json!({}))
            .await
    }

    async fn execute<B: Serialize>(&self, builder: RequestBuilder, body: &B) -> Result<()> {
        let resp = builder
            .header("Authorization", format!("ApiKey {}", self.api_key))
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MarketplaceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn update_parameters_wraps_params_in_asset() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/requests/PR-1"))
            .and(header("authorization", "ApiKey k"))
            .and(body_json(json!({
                "asset": {"params": [{"id": "subscriptionId", "value": "T1"}]}
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = MarketplaceClient::new(server.uri(), "k");
        client
            .update_parameters("PR-1", &[ParamUpdate::new("subscriptionId", "T1")])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn approve_sends_template_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/requests/PR-1/approve"))
            .and(body_json(json!({"template_id": "TL-1"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = MarketplaceClient::new(format!("{}/", server.uri()), "k");
        client.approve("PR-1", "TL-1").await.unwrap();
    }

    #[tokio::test]
    async fn inquire_writes_param_errors_first() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/requests/PR-2"))
            .and(body_json(json!({
                "asset": {"params": [{
                    "id": "customer_admin_email",
                    "value": "nope",
                    "value_error": "invalid"
                }]}
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/requests/PR-2/inquire"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = MarketplaceClient::new(server.uri(), "k");
        let params = [ParamUpdate::new("customer_admin_email", "nope").with_error("invalid")];
        client.inquire("PR-2", &params).await.unwrap();
    }

    #[tokio::test]
    async fn error_status_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/requests/PR-3/fail"))
            .respond_with(ResponseTemplate::new(409).set_body_string("already failed"))
            .mount(&server)
            .await;

        let client = MarketplaceClient::new(server.uri(), "k");
        let err = client.fail("PR-3", "nope").await.unwrap_err();
        match err {
            MarketplaceError::Api { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "already failed");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
