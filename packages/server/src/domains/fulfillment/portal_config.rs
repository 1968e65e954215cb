//! Portal configuration lookups: vendor credentials and activation templates.
//!
//! Both live in the asset's configuration parameters. A value may be scoped
//! by marketplace id (and, for credentials, by connection type); unscoped
//! values apply everywhere.

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use vendor_client::VendorCredentials;

use super::models::{Configuration, TemplateKind};
use crate::kernel::BaseConfigResolver;

/// Configuration parameter holding the vendor credentials JSON.
pub const CREDENTIALS_PARAM: &str = "vendorCredentials";

#[derive(Debug, Clone, Copy, Default)]
pub struct PortalConfigResolver;

impl BaseConfigResolver for PortalConfigResolver {
    fn credentials(
        &self,
        marketplace_id: &str,
        configuration: &Configuration,
        connection_type: &str,
    ) -> Result<VendorCredentials> {
        let value = configuration
            .param(CREDENTIALS_PARAM)
            .and_then(|p| p.json_value())
            .ok_or_else(|| anyhow!("configuration parameter {} is not set", CREDENTIALS_PARAM))?;

        let scoped = scope(scope(&value, marketplace_id), connection_type);

        let credentials: VendorCredentials = serde_json::from_value(scoped.clone())
            .with_context(|| {
                format!(
                    "{} for marketplace {} ({}) is malformed",
                    CREDENTIALS_PARAM, marketplace_id, connection_type
                )
            })?;

        if credentials.api_url.trim().is_empty() || credentials.api_key.trim().is_empty() {
            return Err(anyhow!(
                "{} for marketplace {} ({}) has an empty api_url or api_key",
                CREDENTIALS_PARAM,
                marketplace_id,
                connection_type
            ));
        }
        Ok(credentials)
    }

    fn activation_template(
        &self,
        configuration: &Configuration,
        marketplace_id: &str,
        kind: TemplateKind,
    ) -> Result<String> {
        let template_id = configuration
            .param(kind.param_id())
            .and_then(|p| p.json_value())
            .and_then(|value| match scope(&value, marketplace_id) {
                Value::String(id) => Some(id.trim().to_string()),
                _ => None,
            })
            .unwrap_or_default();
        Ok(template_id)
    }
}

/// Descend into `key` when the value is an object that has it.
fn scope<'a>(value: &'a Value, key: &str) -> &'a Value {
    match value {
        Value::Object(map) => map.get(key).unwrap_or(value),
        _ => value,
    }
}
