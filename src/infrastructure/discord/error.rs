use thiserror::Error;

use super::dto::ErrorResponse;
use crate::domain::errors::ResponseError;

pub type CdnResult<T> = Result<T, CdnError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CdnError {
    #[error("size must be between {min} and {max}, got {size}")]
    InvalidSize { size: u32, min: u32, max: u32 },

    #[error("no value supplied for route placeholder {{{name}}}")]
    MissingPlaceholder { name: String },
}

impl CdnError {
    #[must_use]
    pub fn missing_placeholder(name: impl Into<String>) -> Self {
        Self::MissingPlaceholder { name: name.into() }
    }

    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidSize { .. })
    }
}

/// Error returned by the Discord REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP {status}: {response}")]
    Rejected {
        status: u16,
        response: ErrorResponse,
    },

    #[error("malformed error body: {message}")]
    MalformedBody { message: String },
}

impl ApiError {
    /// Decodes a non-success response body.
    #[must_use]
    pub fn from_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(response) => Self::Rejected { status, response },
            Err(e) => Self::MalformedBody {
                message: e.to_string(),
            },
        }
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        if let Self::Rejected { status, .. } = self {
            Some(*status)
        } else {
            None
        }
    }

    /// Discord's JSON error code, when the body carried one.
    #[must_use]
    pub const fn code(&self) -> Option<u64> {
        if let Self::Rejected { response, .. } = self {
            response.code
        } else {
            None
        }
    }
}

impl From<ApiError> for ResponseError {
    fn from(error: ApiError) -> Self {
        Self::request(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_renders_formatted_body() {
        let body = r#"{"code":50035,"message":"Invalid Form Body","errors":{"name":{"_errors":[{"code":"BASE_TYPE_REQUIRED","message":"This field is required"}]}}}"#;
        let error = ApiError::from_body(400, body);

        assert_eq!(error.status(), Some(400));
        assert_eq!(error.code(), Some(50035));
        assert_eq!(
            error.to_string(),
            "HTTP 400: Invalid Form Body - In name: This field is required (BASE_TYPE_REQUIRED)"
        );
    }

    #[test]
    fn test_malformed_body() {
        let error = ApiError::from_body(502, "<html>Bad Gateway</html>");
        assert!(matches!(error, ApiError::MalformedBody { .. }));
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_into_response_error() {
        let error: ResponseError = ApiError::from_body(404, r#"{"message":"Unknown Emoji","code":10014}"#).into();
        assert_eq!(error.to_string(), "request failed: HTTP 404: Unknown Emoji");
    }

    #[test]
    fn test_cdn_error_classification() {
        let size = CdnError::InvalidSize {
            size: 8,
            min: 16,
            max: 4096,
        };
        assert!(size.is_invalid_argument());
        assert!(!CdnError::missing_placeholder("guild_id").is_invalid_argument());
        assert_eq!(
            CdnError::missing_placeholder("guild_id").to_string(),
            "no value supplied for route placeholder {guild_id}"
        );
    }
}
