//! Application setup and router wiring.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::domains::fulfillment::{self, Dispatcher, FulfillmentPolicy, WebhookState};
use crate::kernel::ServerDeps;
use crate::server::routes::health_handler;

/// Build the Axum application router
pub fn build_app(
    server_deps: ServerDeps,
    policy: FulfillmentPolicy,
    webhook_secret: Option<String>,
) -> Router {
    let marketplace = server_deps.marketplace.clone();
    let dispatcher = Arc::new(Dispatcher::new(server_deps, policy));

    let webhook_state = WebhookState {
        dispatcher,
        marketplace,
        webhook_secret,
    };

    Router::new()
        // Health check (unauthenticated)
        .route("/health", get(health_handler))
        .merge(fulfillment::router(webhook_state))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
