//! Customer- and operator-facing message table.
//!
//! Templates use a single `{}` placeholder filled by [`Messages::fill`].

#[derive(Debug, Clone)]
pub struct Messages {
    pub not_allowed_downsize: &'static str,
    pub activating_template_error: &'static str,
    pub empty_activation_tile: &'static str,
    pub parameter_update_error: &'static str,
    pub missing_subscription_id: &'static str,
    pub missing_tenant_id: &'static str,
    pub credentials_unavailable: &'static str,
    pub vendor_unreachable: &'static str,
    pub missing_admin_email: &'static str,
    pub invalid_admin_email: &'static str,
}

pub static MESSAGES: Messages = Messages {
    not_allowed_downsize: "Not allowed downsize: item quantities cannot be reduced.",
    activating_template_error: "Error while activating template: {}",
    empty_activation_tile: "Activation template is not configured for marketplace {}",
    parameter_update_error: "Error while saving fulfillment parameters: {}",
    missing_subscription_id: "Subscription id is missing for asset {}",
    missing_tenant_id: "Vendor did not return a subscription id",
    credentials_unavailable: "Vendor credentials are not available: {}",
    vendor_unreachable: "Vendor API call failed: {}",
    missing_admin_email: "Please enter customer admin email.",
    invalid_admin_email: "Please enter a valid customer admin email.",
};

impl Messages {
    pub fn fill(template: &str, detail: impl std::fmt::Display) -> String {
        template.replacen("{}", &detail.to_string(), 1)
    }
}

impl Default for Messages {
    fn default() -> Self {
        MESSAGES.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_replaces_first_placeholder_only() {
        assert_eq!(Messages::fill("a {} b {}", "x"), "a x b {}");
    }

    #[test]
    fn empty_tile_names_marketplace() {
        let msg = Messages::fill(MESSAGES.empty_activation_tile, "MP-1");
        assert!(msg.ends_with("MP-1"));
    }
}
