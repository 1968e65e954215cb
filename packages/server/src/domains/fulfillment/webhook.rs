//! Marketplace fulfillment webhook.
//!
//! Receives a lifecycle request, dispatches it, reports the outcome back to
//! the marketplace and answers with the disposition. A skipped request is
//! answered with 503 and left pending so the marketplace delivers it again.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use super::disposition::{report_outcome, Disposition};
use super::models::LifecycleRequest;
use super::Dispatcher;
use crate::kernel::BaseMarketplace;

/// State shared with the webhook handler.
#[derive(Clone)]
pub struct WebhookState {
    pub dispatcher: Arc<Dispatcher>,
    pub marketplace: Arc<dyn BaseMarketplace>,
    /// Expected bearer token; unauthenticated when `None`.
    pub webhook_secret: Option<String>,
}

/// Build the axum router for webhook endpoints.
pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/webhooks/fulfillment", post(handle_fulfillment_request))
        .with_state(state)
}

async fn handle_fulfillment_request(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // Authenticate before the body is looked at.
    if !authorized(&headers, state.webhook_secret.as_deref()) {
        tracing::warn!("Rejected webhook with missing or invalid token");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "unauthorized"})),
        )
            .into_response();
    }

    let req: LifecycleRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected malformed fulfillment request");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"error": format!("invalid request: {}", e)})),
            )
                .into_response();
        }
    };

    if !req.is_pending() {
        tracing::debug!(
            request_id = %req.id,
            status = ?req.status,
            "Ignoring request that is not pending"
        );
        let disposition = Disposition::Ignored {
            request_id: req.id.clone(),
        };
        return (StatusCode::OK, Json(disposition)).into_response();
    }

    let result = state.dispatcher.dispatch(&req).await;
    let disposition = Disposition::from_result(&req.id, &result);

    if let Err(e) = report_outcome(state.marketplace.as_ref(), &req.id, &result).await {
        tracing::error!(
            request_id = %req.id,
            asset_id = %req.asset.id,
            error = %e,
            "Failed to report request outcome to marketplace"
        );
        return (
            StatusCode::BAD_GATEWAY,
            Json(json!({
                "error": "marketplace report failed",
                "request_id": req.id,
                "disposition": disposition,
            })),
        )
            .into_response();
    }

    (disposition.status_code(), Json(disposition)).into_response()
}

fn authorized(headers: &HeaderMap, secret: Option<&str>) -> bool {
    let Some(secret) = secret else {
        return true;
    };
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| token.trim() == secret)
}
