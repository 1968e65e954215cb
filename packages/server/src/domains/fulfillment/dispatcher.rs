//! Lifecycle request dispatcher.
//!
//! One handler per request type. Each handler runs an optional pre-check,
//! calls the vendor, and on success persists correlation parameters and
//! resolves the approval template. Once the vendor has provisioned, nothing
//! that goes wrong afterwards may fail the request terminally.

use chrono::Utc;
use marketplace_client::ParamUpdate;
use serde_json::{Map, Value};
use tracing::{debug, error, info, instrument, warn, Span};

use super::activation;
use super::downsize::ensure_not_downsize;
use super::errors::{FulfillmentError, FulfillmentResult};
use super::models::{
    ActivationArtifact, LifecycleRequest, RequestType, TemplateKind, CREATION_DATE_PARAM,
    SUBSCRIPTION_ID_PARAM,
};
use super::order_params::check_order_parameters;
use super::outcome::classify;
use super::payload::build_payload;
use crate::common::Messages;
use crate::kernel::ServerDeps;

/// Operator policy applied to every request.
#[derive(Debug, Clone, Default)]
pub struct FulfillmentPolicy {
    /// Accept change requests that reduce item quantities.
    pub allow_downsize: bool,
    /// Ordering parameter holding the customer admin email; checked on
    /// purchase when set.
    pub order_email_parameter: Option<String>,
}

/// Vendor operation selected by a handler.
#[derive(Debug, Clone, Copy)]
enum VendorOp<'a> {
    Create,
    Change(&'a str),
    Cancel(&'a str),
    Suspend(&'a str),
    Resume(&'a str),
}

pub struct Dispatcher {
    deps: ServerDeps,
    policy: FulfillmentPolicy,
    messages: Messages,
}

impl Dispatcher {
    pub fn new(deps: ServerDeps, policy: FulfillmentPolicy) -> Self {
        Self {
            deps,
            policy,
            messages: Messages::default(),
        }
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Process one lifecycle request and return the approval artifact.
    #[instrument(
        skip_all,
        fields(
            request_id = %req.id,
            asset_id = %req.asset.id,
            request_type = %req.request_type,
            subscription_id = tracing::field::Empty,
        )
    )]
    pub async fn dispatch(&self, req: &LifecycleRequest) -> FulfillmentResult<ActivationArtifact> {
        let result = match req.request_type {
            RequestType::Purchase => self.purchase(req).await,
            RequestType::Change => self.change(req).await,
            RequestType::Suspend => self.suspend(req).await,
            RequestType::Resume => self.resume(req).await,
            RequestType::Cancel => self.cancel(req).await,
        };

        match &result {
            Ok(artifact) => info!(template_id = %artifact.template_id, "Request processed"),
            Err(e) => self.log_failure(req, e),
        }
        result
    }

    async fn purchase(&self, req: &LifecycleRequest) -> FulfillmentResult<ActivationArtifact> {
        if let Some(email_param) = self.policy.order_email_parameter.as_deref() {
            check_order_parameters(&req.asset, email_param, &self.messages)?;
        }

        let data = self.call_vendor(req, VendorOp::Create).await?;

        // The vendor has provisioned by now, so this must stay redeliverable.
        let subscription_id = vendor_client::correlation_id(&data).ok_or_else(|| {
            error!(
                request_id = %req.id,
                asset_id = %req.asset.id,
                "Vendor contract violation: purchase accepted without a subscription id"
            );
            FulfillmentError::Skip(self.messages.missing_tenant_id.to_string())
        })?;
        Span::current().record("subscription_id", subscription_id.as_str());

        self.persist(req, vec![ParamUpdate::new(SUBSCRIPTION_ID_PARAM, &subscription_id)])
            .await?;
        self.approval(req, TemplateKind::Activation)
    }

    async fn change(&self, req: &LifecycleRequest) -> FulfillmentResult<ActivationArtifact> {
        ensure_not_downsize(&req.asset.items, self.policy.allow_downsize, &self.messages)?;

        let subscription_id = self.subscription_id(req)?;
        self.call_vendor(req, VendorOp::Change(subscription_id))
            .await?;

        let now = Utc::now().to_rfc3339();
        self.persist(req, vec![ParamUpdate::new(CREATION_DATE_PARAM, now)])
            .await?;
        self.approval(req, TemplateKind::Activation)
    }

    async fn suspend(&self, req: &LifecycleRequest) -> FulfillmentResult<ActivationArtifact> {
        let subscription_id = self.subscription_id(req)?;
        self.call_vendor(req, VendorOp::Suspend(subscription_id))
            .await?;
        self.approval(req, TemplateKind::SuspendSubscription)
    }

    async fn resume(&self, req: &LifecycleRequest) -> FulfillmentResult<ActivationArtifact> {
        let subscription_id = self.subscription_id(req)?;
        self.call_vendor(req, VendorOp::Resume(subscription_id))
            .await?;
        self.approval(req, TemplateKind::Activation)
    }

    // Cancel approves with the suspend template.
    async fn cancel(&self, req: &LifecycleRequest) -> FulfillmentResult<ActivationArtifact> {
        let subscription_id = self.subscription_id(req)?;
        self.call_vendor(req, VendorOp::Cancel(subscription_id))
            .await?;
        self.approval(req, TemplateKind::SuspendSubscription)
    }

    fn subscription_id<'a>(&self, req: &'a LifecycleRequest) -> FulfillmentResult<&'a str> {
        let subscription_id = req.asset.fulfillment_value(SUBSCRIPTION_ID_PARAM).ok_or_else(|| {
            FulfillmentError::Fail(Messages::fill(
                self.messages.missing_subscription_id,
                &req.asset.id,
            ))
        })?;
        Span::current().record("subscription_id", subscription_id);
        Ok(subscription_id)
    }

    /// Build the payload, resolve credentials, call the vendor and classify.
    async fn call_vendor(
        &self,
        req: &LifecycleRequest,
        op: VendorOp<'_>,
    ) -> FulfillmentResult<Map<String, Value>> {
        let asset = &req.asset;
        let payload = build_payload(req);

        let credentials = self
            .deps
            .config_resolver
            .credentials(
                asset.marketplace_id(),
                &asset.configuration,
                &asset.connection.connection_type,
            )
            .map_err(|e| {
                FulfillmentError::Skip(Messages::fill(self.messages.credentials_unavailable, e))
            })?;

        debug!(operation = ?op, "Calling vendor");

        let vendor = &self.deps.vendor;
        let raw = match op {
            VendorOp::Create => vendor.create_subscription(&credentials, &payload).await,
            VendorOp::Change(id) => vendor.change_subscription(&credentials, &payload, id).await,
            VendorOp::Cancel(id) => vendor.cancel_subscription(&credentials, &payload, id).await,
            VendorOp::Suspend(id) => vendor.suspend_subscription(&credentials, &payload, id).await,
            VendorOp::Resume(id) => vendor.resume_subscription(&credentials, &payload, id).await,
        }
        .map_err(|e| FulfillmentError::Skip(Messages::fill(self.messages.vendor_unreachable, e)))?;

        classify(raw).into_result()
    }

    /// Store fulfillment parameters after the vendor has provisioned.
    async fn persist(
        &self,
        req: &LifecycleRequest,
        params: Vec<ParamUpdate>,
    ) -> FulfillmentResult<()> {
        self.deps
            .marketplace
            .update_parameters(&req.id, &params)
            .await
            .map_err(|e| {
                FulfillmentError::Skip(Messages::fill(self.messages.parameter_update_error, e))
            })
    }

    /// Resolve the approval template after the vendor has provisioned.
    fn approval(
        &self,
        req: &LifecycleRequest,
        kind: TemplateKind,
    ) -> FulfillmentResult<ActivationArtifact> {
        activation::resolve(
            self.deps.config_resolver.as_ref(),
            &self.messages,
            &req.asset.configuration,
            req.asset.marketplace_id(),
            kind,
        )
        .map_err(|e| match e {
            FulfillmentError::Skip(_) => e,
            other => FulfillmentError::Skip(Messages::fill(
                self.messages.activating_template_error,
                other.message(),
            )),
        })
    }

    fn log_failure(&self, req: &LifecycleRequest, err: &FulfillmentError) {
        let subscription_id = req
            .asset
            .fulfillment_value(SUBSCRIPTION_ID_PARAM)
            .unwrap_or("");
        match err {
            FulfillmentError::Skip(message) => warn!(
                request_id = %req.id,
                asset_id = %req.asset.id,
                subscription_id,
                error = %message,
                "Request skipped"
            ),
            FulfillmentError::Fail(message) => error!(
                request_id = %req.id,
                asset_id = %req.asset.id,
                subscription_id,
                error = %message,
                "Request failed"
            ),
            FulfillmentError::Inquire { message, params } => info!(
                request_id = %req.id,
                asset_id = %req.asset.id,
                params = params.len(),
                reason = %message,
                "Request needs customer input"
            ),
        }
    }
}
