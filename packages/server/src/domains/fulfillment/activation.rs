use tracing::warn;

use super::errors::{FulfillmentError, FulfillmentResult};
use super::models::{ActivationArtifact, Configuration, TemplateKind};
use crate::common::Messages;
use crate::kernel::BaseConfigResolver;

/// Resolve the approval template for a transition.
///
/// An empty template id is a portal configuration gap, so it skips rather
/// than fails: the work is done and the request can be delivered again once
/// the operator fixes the configuration. Lookup errors come back as `Fail`
/// and are downgraded by the dispatcher.
pub fn resolve(
    resolver: &dyn BaseConfigResolver,
    messages: &Messages,
    configuration: &Configuration,
    marketplace_id: &str,
    kind: TemplateKind,
) -> FulfillmentResult<ActivationArtifact> {
    let template_id = resolver
        .activation_template(configuration, marketplace_id, kind)
        .map_err(|e| FulfillmentError::Fail(e.to_string()))?;

    if template_id.is_empty() {
        warn!(
            marketplace_id,
            template_kind = %kind,
            "No activation template configured"
        );
        return Err(FulfillmentError::Skip(Messages::fill(
            messages.empty_activation_tile,
            marketplace_id,
        )));
    }

    Ok(ActivationArtifact { template_id })
}
