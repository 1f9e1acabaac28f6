//! Response wrapping error types.

use thiserror::Error;

/// Failures while turning a raw API response into domain objects.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ResponseError {
    #[error("request failed: {message}")]
    Request { message: String },

    #[error("failed to decode {type_name}: {message}")]
    Decode {
        type_name: &'static str,
        message: String,
    },

    #[error("expected an object at index {index}, found {found}")]
    UnexpectedItem { index: usize, found: &'static str },

    #[error("failed to construct {type_name}: {message}")]
    Construct {
        type_name: &'static str,
        message: String,
    },
}

impl ResponseError {
    /// Creates request error.
    #[must_use]
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(type_name: &'static str, message: impl std::fmt::Display) -> Self {
        Self::Decode {
            type_name,
            message: message.to_string(),
        }
    }

    /// Creates construction error.
    #[must_use]
    pub fn construct(type_name: &'static str, message: impl Into<String>) -> Self {
        Self::Construct {
            type_name,
            message: message.into(),
        }
    }

    /// Returns whether the failure happened before any data was received.
    #[must_use]
    pub const fn is_request_error(&self) -> bool {
        matches!(self, Self::Request { .. })
    }
}
