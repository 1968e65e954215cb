use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::parameter::{find_param, Parameter, ParameterPhase};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marketplace {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// `production`, `test` or `preview`.
    #[serde(rename = "type")]
    pub connection_type: String,
}

/// Product configuration attached to an asset (portal settings).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub params: Vec<Parameter>,
}

impl Configuration {
    pub fn param(&self, id: &str) -> Option<&Parameter> {
        find_param(&self.params, id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    #[serde(deserialize_with = "quantity")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "quantity")]
    pub old_quantity: i64,
}

impl LineItem {
    pub fn new(id: impl Into<String>, old_quantity: i64, quantity: i64) -> Self {
        Self {
            id: id.into(),
            quantity,
            old_quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    #[serde(default)]
    pub external_id: String,
    pub marketplace: Marketplace,
    pub connection: Connection,
    #[serde(default)]
    pub params: Vec<Parameter>,
    #[serde(default)]
    pub configuration: Configuration,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl Asset {
    pub fn param(&self, id: &str) -> Option<&Parameter> {
        find_param(&self.params, id)
    }

    /// Non-blank value of a parameter.
    pub fn param_value(&self, id: &str) -> Option<&str> {
        self.param(id).and_then(Parameter::value)
    }

    /// Non-blank value of a parameter written during fulfillment. Ordering
    /// parameters are customer input and never match.
    pub fn fulfillment_value(&self, id: &str) -> Option<&str> {
        self.params
            .iter()
            .filter(|p| p.id == id && p.phase != Some(ParameterPhase::Ordering))
            .find_map(Parameter::value)
    }

    pub fn ordering_params(&self) -> impl Iterator<Item = &Parameter> {
        self.params
            .iter()
            .filter(|p| p.phase == Some(ParameterPhase::Ordering))
    }

    pub fn marketplace_id(&self) -> &str {
        &self.marketplace.id
    }
}

/// Quantities arrive either as JSON numbers or numeric strings.
fn quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| serde::de::Error::custom(format!("invalid quantity: {}", n))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid quantity: {}", s))),
        Value::Null => Ok(0),
        other => Err(serde::de::Error::custom(format!(
            "invalid quantity: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quantities_accept_strings_and_numbers() {
        let item: LineItem =
            serde_json::from_value(json!({"id": "PRD-1", "quantity": "5", "old_quantity": 3}))
                .unwrap();
        assert_eq!(item.quantity, 5);
        assert_eq!(item.old_quantity, 3);
    }

    #[test]
    fn missing_old_quantity_is_zero() {
        let item: LineItem = serde_json::from_value(json!({"id": "PRD-1", "quantity": 2})).unwrap();
        assert_eq!(item.old_quantity, 0);
    }

    fn asset_with(params: Vec<Parameter>) -> Asset {
        Asset {
            id: "AS-1".into(),
            external_id: String::new(),
            marketplace: Marketplace { id: "MP-1".into() },
            connection: Connection {
                connection_type: "test".into(),
            },
            params,
            configuration: Configuration::default(),
            items: vec![],
        }
    }

    #[test]
    fn fulfillment_value_ignores_ordering_params() {
        let ordering_only = asset_with(vec![
            Parameter::new("subscriptionId", "ORDER-SUPPLIED").with_phase(ParameterPhase::Ordering),
        ]);
        assert_eq!(ordering_only.fulfillment_value("subscriptionId"), None);

        let both = asset_with(vec![
            Parameter::new("subscriptionId", "ORDER-SUPPLIED").with_phase(ParameterPhase::Ordering),
            Parameter::new("subscriptionId", "SUB-1").with_phase(ParameterPhase::Fulfillment),
        ]);
        assert_eq!(both.fulfillment_value("subscriptionId"), Some("SUB-1"));
    }

    #[test]
    fn non_numeric_quantity_is_rejected() {
        let result: Result<LineItem, _> =
            serde_json::from_value(json!({"id": "PRD-1", "quantity": "lots"}));
        assert!(result.is_err());
    }
}
