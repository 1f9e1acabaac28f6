//! Flattening of Discord's nested form-body errors.
//!
//! Discord reports validation failures as a tree keyed by field path:
//!
//! ```json
//! {"message": "Invalid Form Body", "errors": {
//!     "embeds": {"0": {"title": {"_errors": [{"code": "BASE_TYPE_MAX_LENGTH", "message": "..."}]}}}
//! }}
//! ```
//!
//! [`format_discord_error`] turns that into a single line such as
//! `Invalid Form Body - In embeds.0.title: ... (BASE_TYPE_MAX_LENGTH)`.

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::dto::ErrorResponse;

const ERRORS_KEY: &str = "_errors";
const MESSAGE_SEPARATOR: &str = " | ";

/// One `{code, message}` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub code: String,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let message = value.get("message")?.as_str()?;
        let code = match value.get("code")? {
            Value::String(code) => code.clone(),
            Value::Number(code) => code.to_string(),
            _ => return None,
        };
        Some(Self::new(code, message))
    }
}

/// A node of the error tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorNode {
    /// Errors reported for this exact field, either as a bare list or under `_errors`.
    Errors(Vec<FieldError>),
    /// Sub-fields keyed by name, in document order.
    Nested(Vec<(String, ErrorNode)>),
    /// Any other shape. Contributes nothing.
    Malformed,
}

impl From<Value> for ErrorNode {
    fn from(value: Value) -> Self {
        match value {
            // A list holding the literal "_errors" has no usable structure.
            Value::Array(items) if items.iter().any(|item| item == ERRORS_KEY) => Self::Malformed,
            Value::Array(items) => Self::Errors(field_errors(&items)),
            Value::Object(mut fields) => match fields.remove(ERRORS_KEY) {
                Some(Value::Array(items)) => Self::Errors(field_errors(&items)),
                Some(_) => Self::Malformed,
                None => Self::Nested(
                    fields
                        .into_iter()
                        .map(|(key, value)| (key, Self::from(value)))
                        .collect(),
                ),
            },
            _ => Self::Malformed,
        }
    }
}

impl<'de> Deserialize<'de> for ErrorNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from)
    }
}

fn field_errors(items: &[Value]) -> Vec<FieldError> {
    items.iter().filter_map(FieldError::from_value).collect()
}

/// A field error located by its dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrorEntry {
    pub path: String,
    pub code: String,
    pub message: String,
}

impl fmt::Display for FieldErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "In {}: {} ({})", self.path, self.message, self.code)
    }
}

fn collect(path: &str, node: &ErrorNode, out: &mut Vec<FieldErrorEntry>) {
    match node {
        ErrorNode::Errors(errors) => {
            out.extend(errors.iter().map(|error| FieldErrorEntry {
                path: path.to_string(),
                code: error.code.clone(),
                message: error.message.clone(),
            }));
        }
        ErrorNode::Nested(children) => {
            for (key, child) in children {
                collect(&format!("{path}.{key}"), child, out);
            }
        }
        ErrorNode::Malformed => {}
    }
}

impl ErrorResponse {
    /// All field errors in document order.
    #[must_use]
    pub fn field_errors(&self) -> Vec<FieldErrorEntry> {
        let mut entries = Vec::new();
        for (path, node) in &self.errors {
            collect(path, node, &mut entries);
        }
        entries
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;

        let entries = self.field_errors();
        for (i, entry) in entries.iter().enumerate() {
            let separator = if i == 0 { " - " } else { MESSAGE_SEPARATOR };
            write!(f, "{separator}{entry}")?;
        }
        Ok(())
    }
}

/// Renders an error response as one human-readable line.
#[must_use]
pub fn format_discord_error(response: &ErrorResponse) -> String {
    response.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> ErrorResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_underscore_errors_leaf() {
        let response = parse(json!({
            "message": "Invalid Form Body",
            "errors": {"username": {"_errors": [{"code": "E1", "message": "too short"}]}}
        }));

        assert_eq!(
            format_discord_error(&response),
            "Invalid Form Body - In username: too short (E1)"
        );
    }

    #[test]
    fn test_no_errors_returns_message() {
        assert_eq!(
            format_discord_error(&parse(json!({"message": "Unknown Channel", "code": 10003}))),
            "Unknown Channel"
        );
        assert_eq!(
            format_discord_error(&parse(json!({"message": "Unknown Channel", "errors": {}}))),
            "Unknown Channel"
        );
        assert_eq!(
            format_discord_error(&parse(json!({"message": "Unknown Channel", "errors": null}))),
            "Unknown Channel"
        );
    }

    #[test]
    fn test_nested_paths_keep_document_order() {
        let body = r#"{
            "code": 50035,
            "message": "Invalid Form Body",
            "errors": {
                "embeds": {
                    "0": {
                        "title": {"_errors": [{"code": "BASE_TYPE_MAX_LENGTH", "message": "Must be 256 or fewer in length."}]},
                        "description": {"_errors": [{"code": "BASE_TYPE_REQUIRED", "message": "This field is required"}]}
                    }
                },
                "content": {"_errors": [{"code": "BASE_TYPE_MAX_LENGTH", "message": "Must be 2000 or fewer in length."}]}
            }
        }"#;
        let response: ErrorResponse = serde_json::from_str(body).unwrap();

        assert_eq!(
            format_discord_error(&response),
            "Invalid Form Body - \
             In embeds.0.title: Must be 256 or fewer in length. (BASE_TYPE_MAX_LENGTH) | \
             In embeds.0.description: This field is required (BASE_TYPE_REQUIRED) | \
             In content: Must be 2000 or fewer in length. (BASE_TYPE_MAX_LENGTH)"
        );
    }

    #[test]
    fn test_bare_list_node() {
        let response = parse(json!({
            "message": "Bad",
            "errors": {"name": [
                {"code": "A", "message": "first"},
                {"code": "B", "message": "second"}
            ]}
        }));

        assert_eq!(
            response.to_string(),
            "Bad - In name: first (A) | In name: second (B)"
        );
    }

    #[test]
    fn test_underscore_errors_hides_siblings() {
        let response = parse(json!({
            "message": "Bad",
            "errors": {"avatar": {
                "_errors": [{"code": "X", "message": "bad image"}],
                "size": {"_errors": [{"code": "Y", "message": "too big"}]}
            }}
        }));

        assert_eq!(response.to_string(), "Bad - In avatar: bad image (X)");
    }

    #[test]
    fn test_malformed_nodes_are_skipped() {
        let response = parse(json!({
            "message": "Bad",
            "errors": {
                "a": ["_errors", {"code": "X", "message": "ignored"}],
                "b": "not a node",
                "c": {"_errors": "not a list"},
                "d": [{"message": "no code"}, 17],
                "e": {"_errors": [{"code": 42, "message": "numeric code"}]}
            }
        }));

        assert_eq!(response.to_string(), "Bad - In e: numeric code (42)");
    }

    #[test]
    fn test_field_errors_structured_access() {
        let response = ErrorResponse::new("Invalid Form Body").with_field(
            "roles",
            ErrorNode::Nested(vec![(
                "3".to_string(),
                ErrorNode::Errors(vec![FieldError::new("UNKNOWN_ROLE", "Unknown role")]),
            )]),
        );

        let entries = response.field_errors();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "roles.3");
        assert_eq!(entries[0].to_string(), "In roles.3: Unknown role (UNKNOWN_ROLE)");
    }
}
