use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "dico",
    version,
    about = "Discord API helpers: CDN URLs, error bodies and emoji strings",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// CDN host to build URLs against.
    #[arg(long, value_name = "URL", env = "DICO_CDN_BASE_URL", global = true)]
    pub cdn_base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a CDN image URL.
    CdnUrl {
        /// Route template, e.g. `icons/{guild_id}`.
        route: String,

        /// Image hash.
        #[arg(long)]
        hash: String,

        /// Image extension.
        #[arg(short, long)]
        extension: Option<String>,

        /// Image size, 16 to 4096.
        #[arg(short, long)]
        size: Option<u32>,

        /// Route placeholder value.
        #[arg(long = "id", value_name = "NAME=ID", value_parser = parse_id)]
        ids: Vec<(String, u64)>,
    },

    /// Render a Discord error body as one line.
    FormatError {
        /// JSON file; standard input when omitted.
        file: Option<PathBuf>,
    },

    /// Print the API form of an emoji.
    Emoji {
        /// Emoji, `<:name:id>` markup or `name:id`.
        #[arg(required_unless_present = "json", conflicts_with = "json")]
        input: Option<String>,

        /// JSON file holding an emoji object or a list of them.
        #[arg(long, value_name = "PATH")]
        json: Option<PathBuf>,
    },
}

fn parse_id(raw: &str) -> Result<(String, u64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=ID, got {raw:?}"))?;
    let value = value
        .parse::<u64>()
        .map_err(|e| format!("invalid snowflake {value:?}: {e}"))?;
    Ok((name.to_string(), value))
}
