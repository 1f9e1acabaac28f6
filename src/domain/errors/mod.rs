//! Domain error types.

mod response_error;

pub use response_error::ResponseError;
