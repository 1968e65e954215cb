//! What the marketplace is told about a processed request.

use anyhow::Result;
use axum::http::StatusCode;
use serde::Serialize;
use tracing::info;

use super::errors::{FulfillmentError, FulfillmentResult};
use super::models::ActivationArtifact;
use crate::kernel::BaseMarketplace;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Disposition {
    Approve {
        request_id: String,
        template_id: String,
    },
    Skip {
        request_id: String,
        message: String,
    },
    Fail {
        request_id: String,
        message: String,
    },
    Inquire {
        request_id: String,
        message: String,
    },
    /// The request was not pending; nothing was done.
    Ignored { request_id: String },
}

impl Disposition {
    pub fn from_result(request_id: &str, result: &FulfillmentResult<ActivationArtifact>) -> Self {
        let request_id = request_id.to_string();
        match result {
            Ok(artifact) => Disposition::Approve {
                request_id,
                template_id: artifact.template_id.clone(),
            },
            Err(FulfillmentError::Skip(message)) => Disposition::Skip {
                request_id,
                message: message.clone(),
            },
            Err(FulfillmentError::Fail(message)) => Disposition::Fail {
                request_id,
                message: message.clone(),
            },
            Err(FulfillmentError::Inquire { message, .. }) => Disposition::Inquire {
                request_id,
                message: message.clone(),
            },
        }
    }

    /// HTTP status for the webhook response. Skip answers 503 so the
    /// marketplace delivers the request again.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Disposition::Skip { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::OK,
        }
    }
}

/// Move the request to approved, failed or inquiring. Skipped requests stay
/// pending and are not reported.
pub async fn report_outcome(
    marketplace: &dyn BaseMarketplace,
    request_id: &str,
    result: &FulfillmentResult<ActivationArtifact>,
) -> Result<()> {
    match result {
        Ok(artifact) => {
            marketplace.approve(request_id, &artifact.template_id).await?;
            info!(request_id, template_id = %artifact.template_id, "Request approved");
        }
        Err(FulfillmentError::Fail(reason)) => {
            marketplace.fail(request_id, reason).await?;
            info!(request_id, "Request marked failed");
        }
        Err(FulfillmentError::Inquire { params, .. }) => {
            marketplace.inquire(request_id, params).await?;
            info!(request_id, "Request moved to inquiring");
        }
        Err(FulfillmentError::Skip(_)) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{MarketplaceCall, MockMarketplace};
    use marketplace_client::ParamUpdate;
    use serde_json::json;

    #[test]
    fn approve_serializes_with_action_tag() {
        let result = Ok(ActivationArtifact {
            template_id: "TL-1".into(),
        });
        let disposition = Disposition::from_result("PR-1", &result);
        assert_eq!(disposition.status_code(), StatusCode::OK);
        assert_eq!(
            serde_json::to_value(&disposition).unwrap(),
            json!({"action": "approve", "request_id": "PR-1", "template_id": "TL-1"})
        );
    }

    #[test]
    fn skip_is_service_unavailable() {
        let result = Err(FulfillmentError::Skip("timeout".into()));
        let disposition = Disposition::from_result("PR-1", &result);
        assert_eq!(disposition.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            serde_json::to_value(&disposition).unwrap()["action"],
            json!("skip")
        );
    }

    #[tokio::test]
    async fn skip_reports_nothing() {
        let marketplace = MockMarketplace::new();
        report_outcome(&marketplace, "PR-1", &Err(FulfillmentError::Skip("x".into())))
            .await
            .unwrap();
        assert!(marketplace.calls().is_empty());
    }

    #[tokio::test]
    async fn inquire_forwards_params() {
        let marketplace = MockMarketplace::new();
        let params = vec![ParamUpdate::new("email", "").with_error("required")];
        let result = Err(FulfillmentError::Inquire {
            message: "required".into(),
            params: params.clone(),
        });
        report_outcome(&marketplace, "PR-2", &result).await.unwrap();
        assert_eq!(
            marketplace.calls(),
            vec![MarketplaceCall::Inquire {
                request_id: "PR-2".into(),
                params,
            }]
        );
    }

    #[tokio::test]
    async fn report_failure_propagates() {
        let marketplace = MockMarketplace::new().with_failing_reports();
        let result = Err(FulfillmentError::Fail("rejected".into()));
        assert!(report_outcome(&marketplace, "PR-3", &result).await.is_err());
    }
}
