use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, VendorError};

/// Error code the vendor uses when it cannot say what went wrong.
pub const UNKNOWN_ERROR_CODE: &str = "UNKNOWN_ERROR";

/// Response fields that carry the vendor-side subscription id, in lookup order.
pub const CORRELATION_FIELDS: [&str; 2] = ["tenantId", "subscriptionId"];

const STATUS_FIELDS: [&str; 2] = ["status", "statusCode"];

/// Credentials for one vendor tenant.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorCredentials {
    pub api_url: String,
    pub api_key: String,
}

impl fmt::Debug for VendorCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VendorCredentials")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Result of a vendor operation, decoded once at the client boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum VendorResult {
    /// The vendor accepted the operation.
    Success { data: Map<String, Value> },
    /// The vendor rejected the operation with an `errors` list.
    StructuredError {
        code: Option<String>,
        message: String,
    },
    /// The vendor answered with a bare `error` field and no structured list.
    RawError { message: String },
}

impl VendorResult {
    /// Build a result from an HTTP status and raw response body.
    ///
    /// Recognised JSON shapes win over the status code. Anything else is a
    /// plain acknowledgement on 2xx and a code-less structured error otherwise,
    /// so unexplained HTTP failures stay retryable.
    pub fn from_response(status: u16, body: &str) -> Result<Self> {
        let is_success = (200..300).contains(&status);
        let trimmed = body.trim();

        let value = if trimmed.is_empty() {
            None
        } else {
            match serde_json::from_str::<Value>(trimmed) {
                Ok(value) => Some(value),
                Err(e) if is_success => {
                    return Err(VendorError::Parse(format!(
                        "vendor returned status {} with a non-JSON body: {}",
                        status, e
                    )));
                }
                Err(_) => None,
            }
        };

        if let Some(result) = value.as_ref().and_then(Self::from_json) {
            return Ok(result);
        }

        if is_success {
            let data = match value {
                Some(Value::Object(map)) => map,
                Some(other) => {
                    let mut map = Map::new();
                    map.insert("body".to_string(), other);
                    map
                }
                None => Map::new(),
            };
            return Ok(VendorResult::Success { data });
        }

        let message = if trimmed.is_empty() {
            format!("vendor returned status {}", status)
        } else {
            format!("vendor returned status {}: {}", status, trimmed)
        };
        Ok(VendorResult::StructuredError {
            code: None,
            message,
        })
    }

    /// Decode one of the documented response shapes, if the body has one.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        if correlation_id(object).is_some() || has_success_status(object) {
            return Some(VendorResult::Success {
                data: object.clone(),
            });
        }

        if let Some(first) = object
            .get("errors")
            .and_then(Value::as_array)
            .and_then(|errors| errors.first())
        {
            let code = first
                .get("errorCode")
                .and_then(Value::as_str)
                .map(str::to_string);
            let message = first
                .get("errorMessage")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| first.to_string());
            return Some(VendorResult::StructuredError { code, message });
        }

        object.get("error").map(|error| VendorResult::RawError {
            message: match error {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        })
    }

    /// The vendor-side subscription id, when the result carries one.
    pub fn correlation_id(&self) -> Option<String> {
        match self {
            VendorResult::Success { data } => correlation_id(data),
            _ => None,
        }
    }
}

/// First non-empty correlation field of a response object.
pub fn correlation_id(data: &Map<String, Value>) -> Option<String> {
    CORRELATION_FIELDS.iter().find_map(|field| match data.get(*field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn has_success_status(data: &Map<String, Value>) -> bool {
    STATUS_FIELDS.iter().any(|field| {
        data.get(*field)
            .and_then(Value::as_str)
            .is_some_and(|s| s.eq_ignore_ascii_case("success"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tenant_id_is_success() {
        let result = VendorResult::from_response(201, r#"{"tenantId":"T1"}"#).unwrap();
        assert_eq!(result.correlation_id().as_deref(), Some("T1"));
    }

    #[test]
    fn empty_tenant_id_falls_through_to_errors() {
        let body = json!({
            "tenantId": "",
            "errors": [{"errorCode": "INVALID_EMAIL", "errorMessage": "bad email"}]
        });
        let result = VendorResult::from_json(&body).unwrap();
        assert_eq!(
            result,
            VendorResult::StructuredError {
                code: Some("INVALID_EMAIL".into()),
                message: "bad email".into(),
            }
        );
    }

    #[test]
    fn status_code_success_is_case_insensitive() {
        let result = VendorResult::from_json(&json!({"statusCode": "SUCCESS"})).unwrap();
        assert!(matches!(result, VendorResult::Success { .. }));
    }

    #[test]
    fn first_error_entry_wins() {
        let body = json!({"errors": [
            {"errorMessage": "timeout"},
            {"errorCode": "INVALID", "errorMessage": "ignored"}
        ]});
        let result = VendorResult::from_json(&body).unwrap();
        assert_eq!(
            result,
            VendorResult::StructuredError {
                code: None,
                message: "timeout".into(),
            }
        );
    }

    #[test]
    fn bare_error_field_is_raw() {
        let result = VendorResult::from_response(500, r#"{"error":"boom"}"#).unwrap();
        assert_eq!(
            result,
            VendorResult::RawError {
                message: "boom".into()
            }
        );
    }

    #[test]
    fn empty_acknowledgement_is_success() {
        let result = VendorResult::from_response(204, "").unwrap();
        assert_eq!(result, VendorResult::Success { data: Map::new() });
    }

    #[test]
    fn unexplained_http_failure_has_no_code() {
        let result = VendorResult::from_response(503, "<html>down</html>").unwrap();
        match result {
            VendorResult::StructuredError { code, message } => {
                assert!(code.is_none());
                assert!(message.contains("503"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn garbage_on_success_is_parse_error() {
        let err = VendorResult::from_response(200, "not json").unwrap_err();
        assert!(matches!(err, VendorError::Parse(_)));
    }

    #[test]
    fn credentials_debug_hides_key() {
        let creds = VendorCredentials {
            api_url: "https://vendor.test".into(),
            api_key: "s3cret".into(),
        };
        assert!(!format!("{:?}", creds).contains("s3cret"));
    }
}
