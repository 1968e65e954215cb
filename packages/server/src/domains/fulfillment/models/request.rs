use serde::{Deserialize, Serialize};

use super::asset::Asset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    Purchase,
    Change,
    Suspend,
    Resume,
    Cancel,
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RequestType::Purchase => "purchase",
            RequestType::Change => "change",
            RequestType::Suspend => "suspend",
            RequestType::Resume => "resume",
            RequestType::Cancel => "cancel",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Inquiring,
    Approved,
    Failed,
    #[serde(other)]
    Other,
}

/// A fulfillment request as delivered by the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RequestStatus>,
    pub asset: Asset,
}

impl LifecycleRequest {
    /// Only pending requests (or requests without a status) are processed.
    pub fn is_pending(&self) -> bool {
        matches!(self.status, None | Some(RequestStatus::Pending))
    }
}
