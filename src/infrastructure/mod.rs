//! Infrastructure layer with configuration and Discord API adapters.

/// Application configuration.
pub mod config;
/// Discord API helpers.
pub mod discord;

pub use config::{AppConfig, CdnConfig, CliArgs, Command, LogLevel, StorageManager};
pub use discord::{
    ApiError, CdnError, CdnUrl, Construction, ErrorResponse, Wrapped, cdn_url,
    format_discord_error, wrap_to_async,
};
