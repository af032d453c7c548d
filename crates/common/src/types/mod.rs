use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body returned by the increment endpoint.
///
/// `visit_count` is `-1` whenever `error` is present.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VisitCount {
    pub visit_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VisitCount {
    pub fn ok(count: i64) -> Self {
        Self { visit_count: count, error: None }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { visit_count: -1, error: Some(message.into()) }
    }
}
