//! Pure vendor subscription REST API client.
//!
//! Covers the subscription lifecycle (create, change, suspend, resume,
//! cancel). Every call returns a [`VendorResult`] decoded once from the HTTP
//! response; only transport problems surface as [`VendorError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use vendor_client::{VendorClient, VendorCredentials, VendorResult};
//!
//! let client = VendorClient::new(VendorCredentials {
//!     api_url: "https://api.vendor.example/v1".into(),
//!     api_key: "key".into(),
//! });
//!
//! match client.create_subscription(&payload).await? {
//!     VendorResult::Success { data } => println!("{:?}", data.get("tenantId")),
//!     other => println!("rejected: {:?}", other),
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{Result, VendorError};
pub use types::{
    correlation_id, VendorCredentials, VendorResult, CORRELATION_FIELDS, UNKNOWN_ERROR_CODE,
};

use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, warn};

/// Vendor API client bound to one set of credentials.
#[derive(Clone)]
pub struct VendorClient {
    http_client: Client,
    credentials: VendorCredentials,
}

impl VendorClient {
    pub fn new(credentials: VendorCredentials) -> Self {
        Self::with_http_client(Client::new(), credentials)
    }

    /// Reuse a preconfigured `reqwest` client (timeouts, proxies).
    pub fn with_http_client(http_client: Client, credentials: VendorCredentials) -> Self {
        Self {
            http_client,
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        self.credentials.api_url.trim_end_matches('/')
    }

    /// Create a new subscription.
    pub async fn create_subscription(&self, payload: &Value) -> Result<VendorResult> {
        self.send(Method::POST, "subscriptions".to_string(), payload)
            .await
    }

    /// Change an existing subscription (quantities, items).
    pub async fn change_subscription(
        &self,
        payload: &Value,
        subscription_id: &str,
    ) -> Result<VendorResult> {
        self.send(
            Method::PUT,
            format!("subscriptions/{}", subscription_id),
            payload,
        )
        .await
    }

    pub async fn cancel_subscription(
        &self,
        payload: &Value,
        subscription_id: &str,
    ) -> Result<VendorResult> {
        self.action(payload, subscription_id, "cancel").await
    }

    pub async fn suspend_subscription(
        &self,
        payload: &Value,
        subscription_id: &str,
    ) -> Result<VendorResult> {
        self.action(payload, subscription_id, "suspend").await
    }

    pub async fn resume_subscription(
        &self,
        payload: &Value,
        subscription_id: &str,
    ) -> Result<VendorResult> {
        self.action(payload, subscription_id, "resume").await
    }

    async fn action(
        &self,
        payload: &Value,
        subscription_id: &str,
        action: &str,
    ) -> Result<VendorResult> {
        self.send(
            Method::POST,
            format!("subscriptions/{}/{}", subscription_id, action),
            payload,
        )
        .await
    }

    async fn send(&self, method: Method, path: String, payload: &Value) -> Result<VendorResult> {
        if self.credentials.api_url.trim().is_empty() {
            return Err(VendorError::Config("vendor api_url is empty".into()));
        }

        let url = format!("{}/{}", self.base_url(), path);
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .request(method.clone(), &url)
            .bearer_auth(&self.credentials.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, url = %url, "Vendor request failed");
                VendorError::Network(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis(),
            "Vendor API call"
        );

        VendorResult::from_response(status.as_u16(), &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> VendorClient {
        VendorClient::new(VendorCredentials {
            api_url: format!("{}/v1/", server.uri()),
            api_key: "test-key".into(),
        })
    }

    #[tokio::test]
    async fn create_posts_payload_with_bearer_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/subscriptions"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"tenantId": "T1"})))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .create_subscription(&json!({"external_id": "E1"}))
            .await
            .unwrap();

        assert_eq!(result.correlation_id().as_deref(), Some("T1"));
    }

    #[tokio::test]
    async fn change_puts_to_subscription_path() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1/subscriptions/SUB-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "Success"})))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .change_subscription(&json!({}), "SUB-1")
            .await
            .unwrap();

        assert!(matches!(result, VendorResult::Success { .. }));
    }

    #[tokio::test]
    async fn lifecycle_actions_use_action_paths() {
        let server = MockServer::start().await;
        for action in ["cancel", "suspend", "resume"] {
            Mock::given(method("POST"))
                .and(path(format!("/v1/subscriptions/SUB-1/{}", action)))
                .respond_with(ResponseTemplate::new(204))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = client_for(&server);
        let payload = json!({});
        assert!(matches!(
            client.cancel_subscription(&payload, "SUB-1").await.unwrap(),
            VendorResult::Success { .. }
        ));
        assert!(matches!(
            client.suspend_subscription(&payload, "SUB-1").await.unwrap(),
            VendorResult::Success { .. }
        ));
        assert!(matches!(
            client.resume_subscription(&payload, "SUB-1").await.unwrap(),
            VendorResult::Success { .. }
        ));
    }

    #[tokio::test]
    async fn rejection_body_is_decoded_from_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/subscriptions/SUB-9/cancel"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errors": [{"errorCode": "NOT_FOUND", "errorMessage": "no such subscription"}]
            })))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .cancel_subscription(&json!({}), "SUB-9")
            .await
            .unwrap();

        assert_eq!(
            result,
            VendorResult::StructuredError {
                code: Some("NOT_FOUND".into()),
                message: "no such subscription".into(),
            }
        );
    }

    #[tokio::test]
    async fn empty_api_url_is_config_error() {
        let client = VendorClient::new(VendorCredentials {
            api_url: " ".into(),
            api_key: "k".into(),
        });
        let err = client.create_subscription(&json!({})).await.unwrap_err();
        assert!(matches!(err, VendorError::Config(_)));
    }
}
