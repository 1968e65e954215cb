use serde::{Deserialize, Serialize};

/// A request parameter update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamUpdate {
    pub id: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_error: Option<String>,
}

impl ParamUpdate {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            value_error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.value_error = Some(error.into());
        self
    }
}

/// Body of `PUT /requests/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRequestBody<'a> {
    pub asset: AssetParams<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetParams<'a> {
    pub params: &'a [ParamUpdate],
}

/// Body of `POST /requests/{id}/approve`.
#[derive(Debug, Clone, Serialize)]
pub struct ApproveBody<'a> {
    pub template_id: &'a str,
}

/// Body of `POST /requests/{id}/fail`.
#[derive(Debug, Clone, Serialize)]
pub struct FailBody<'a> {
    pub reason: &'a str,
}
