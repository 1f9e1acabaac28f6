//! Domain layer with entities, error types and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;
/// Pure domain services.
pub mod services;

pub use entities::{Emoji, EmojiId, NamedEmoji};
pub use errors::ResponseError;
pub use ports::{DiagnosticPort, FromResponse, RawObject};
pub use services::{EmojiRef, from_emoji};
