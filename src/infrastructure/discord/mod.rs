//! Discord API helpers.

pub mod cdn;
mod dto;
mod error;
pub mod error_format;
pub mod response;

pub use cdn::{CDN_BASE_URL, CdnUrl, cdn_url};
pub use dto::ErrorResponse;
pub use error::{ApiError, CdnError, CdnResult};
pub use error_format::{ErrorNode, FieldError, FieldErrorEntry, format_discord_error};
pub use response::{Construction, RawResponse, Wrapped, wrap_to_async};
