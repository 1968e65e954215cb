use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fulfillment parameter that carries the vendor subscription id across requests.
pub const SUBSCRIPTION_ID_PARAM: &str = "subscriptionId";

/// Fulfillment parameter refreshed on every successful change.
pub const CREATION_DATE_PARAM: &str = "creationDate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterPhase {
    Ordering,
    Fulfillment,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<ParameterPhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_error: Option<String>,
}

impl Parameter {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: Some(value.into()),
            structured_value: None,
            phase: None,
            value_error: None,
        }
    }

    pub fn with_phase(mut self, phase: ParameterPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn with_structured_value(mut self, value: Value) -> Self {
        self.structured_value = Some(value);
        self
    }

    /// Trimmed value, `None` when absent or blank.
    pub fn value(&self) -> Option<&str> {
        self.value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Value as JSON: the structured value when present, else the string
    /// value parsed as JSON, else the string value itself.
    pub fn json_value(&self) -> Option<Value> {
        if let Some(structured) = &self.structured_value {
            if !structured.is_null() {
                return Some(structured.clone());
            }
        }
        let raw = self.value()?;
        Some(serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())))
    }
}

/// Lookup over a parameter list by id.
pub fn find_param<'a>(params: &'a [Parameter], id: &str) -> Option<&'a Parameter> {
    params.iter().find(|p| p.id == id)
}
