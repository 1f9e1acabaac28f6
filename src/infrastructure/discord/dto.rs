use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::error_format::ErrorNode;

/// Discord API error response structure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorResponse {
    /// Error message from Discord.
    pub message: String,
    /// JSON error code, e.g. `50035` for an invalid form body.
    #[serde(default)]
    pub code: Option<u64>,
    /// Per-field errors keyed by field path, in document order.
    #[serde(default, deserialize_with = "ordered_fields")]
    pub errors: Vec<(String, ErrorNode)>,
}

impl ErrorResponse {
    /// Error body without field details.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, path: impl Into<String>, node: ErrorNode) -> Self {
        self.errors.push((path.into(), node));
        self
    }
}

fn ordered_fields<'de, D>(deserializer: D) -> Result<Vec<(String, ErrorNode)>, D::Error>
where
    D: Deserializer<'de>,
{
    let fields = Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(fields
        .into_iter()
        .map(|(key, value)| (key, ErrorNode::from(value)))
        .collect())
}
