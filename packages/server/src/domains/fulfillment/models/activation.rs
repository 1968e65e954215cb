use serde::{Deserialize, Serialize};

/// Approval artifact handed back to the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationArtifact {
    pub template_id: String,
}

/// Kind of approval template, named after its portal configuration parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Activation,
    SuspendSubscription,
}

impl TemplateKind {
    pub fn param_id(self) -> &'static str {
        match self {
            TemplateKind::Activation => "activationTemplate",
            TemplateKind::SuspendSubscription => "suspendSubscriptionTemplate",
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.param_id())
    }
}
