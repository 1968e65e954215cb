//! Vendor result classification.
//!
//! Unknown or code-less vendor errors are worth a redelivery; a named error
//! code is a business rejection that would repeat on every retry.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::error;
use vendor_client::{VendorResult, UNKNOWN_ERROR_CODE};

use super::errors::{FulfillmentError, FulfillmentResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    TransientFailure,
    TerminalFailure,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperationOutcome {
    pub status: OutcomeStatus,
    pub message: String,
    pub data: Option<Map<String, Value>>,
}

impl OperationOutcome {
    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }

    /// Success data, or the failure mapped to skip / fail.
    pub fn into_result(self) -> FulfillmentResult<Map<String, Value>> {
        match self.status {
            OutcomeStatus::Success => Ok(self.data.unwrap_or_default()),
            OutcomeStatus::TransientFailure => Err(FulfillmentError::Skip(self.message)),
            OutcomeStatus::TerminalFailure => Err(FulfillmentError::Fail(self.message)),
        }
    }
}

pub fn classify(raw: VendorResult) -> OperationOutcome {
    match raw {
        VendorResult::Success { data } => OperationOutcome {
            status: OutcomeStatus::Success,
            message: "success".to_string(),
            data: Some(data),
        },
        VendorResult::StructuredError { code, message } => {
            let status = match code.as_deref() {
                None | Some(UNKNOWN_ERROR_CODE) => OutcomeStatus::TransientFailure,
                Some(_) => OutcomeStatus::TerminalFailure,
            };
            OperationOutcome {
                status,
                message,
                data: None,
            }
        }
        VendorResult::RawError { message } => {
            error!(error = %message, "Vendor contract violation: bare error field without an errors list");
            OperationOutcome {
                status: OutcomeStatus::TerminalFailure,
                message,
                data: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn structured(code: Option<&str>, message: &str) -> VendorResult {
        VendorResult::StructuredError {
            code: code.map(str::to_string),
            message: message.to_string(),
        }
    }

    #[test]
    fn success_keeps_data() {
        let data = json!({"tenantId": "T1"}).as_object().cloned().unwrap();
        let outcome = classify(VendorResult::Success { data: data.clone() });
        assert!(outcome.is_success());
        assert_eq!(outcome.into_result().unwrap(), data);
    }

    #[test]
    fn unknown_error_is_transient() {
        let outcome = classify(structured(Some("UNKNOWN_ERROR"), "timeout"));
        assert_eq!(outcome.status, OutcomeStatus::TransientFailure);
        assert_eq!(
            outcome.into_result().unwrap_err(),
            FulfillmentError::Skip("timeout".into())
        );
    }

    #[test]
    fn missing_code_is_transient() {
        let outcome = classify(structured(None, "hiccup"));
        assert_eq!(outcome.status, OutcomeStatus::TransientFailure);
    }

    #[test]
    fn named_code_is_terminal() {
        let outcome = classify(structured(Some("INVALID_DATA"), "bad address"));
        assert_eq!(
            outcome.into_result().unwrap_err(),
            FulfillmentError::Fail("bad address".into())
        );
    }

    #[test]
    fn code_match_is_exact() {
        let outcome = classify(structured(Some("unknown_error"), "lowercase code"));
        assert_eq!(outcome.status, OutcomeStatus::TerminalFailure);
    }

    #[test]
    fn raw_error_is_terminal_with_raw_message() {
        let outcome = classify(VendorResult::RawError {
            message: "Internal Server Error".into(),
        });
        assert_eq!(outcome.status, OutcomeStatus::TerminalFailure);
        assert_eq!(outcome.message, "Internal Server Error");
    }
}
