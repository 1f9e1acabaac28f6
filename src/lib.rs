//! dico - helper layer for a Discord API client.
//!
//! Builds CDN image URLs, flattens form-body error responses, normalizes
//! emoji arguments, wraps raw responses into domain objects and runs event
//! listeners as isolated background tasks.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing callback adapters and listener dispatch.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing configuration and Discord API helpers.
pub mod infrastructure;

/// Current version of the library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = "dico";
