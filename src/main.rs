use std::path::Path;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use dico::domain::{Emoji, ResponseError, from_emoji};
use dico::infrastructure::{
    AppConfig, CliArgs, Command, Construction, ErrorResponse, StorageManager, format_discord_error,
    wrap_to_async,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = match &args.config {
        Some(path) => StorageManager::at(path.clone()),
        None => StorageManager::new()?,
    };

    let mut config = storage.load_config()?;
    config.merge_with_args(args);
    Ok(config)
}

async fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .wrap_err_with(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            tokio::io::stdin().read_to_string(&mut input).await?;
            Ok(input)
        }
    }
}

async fn run(config: &AppConfig, command: Command) -> Result<()> {
    match command {
        Command::CdnUrl {
            route,
            hash,
            extension,
            size,
            ids,
        } => {
            let mut url = config.cdn.url(route, hash).ids(ids);
            if let Some(extension) = extension {
                url = url.extension(extension);
            }
            if let Some(size) = size {
                url = url.size(size);
            }
            println!("{}", url.build()?);
        }
        Command::FormatError { file } => {
            let body = read_input(file.as_deref()).await?;
            let response: ErrorResponse =
                serde_json::from_str(&body).wrap_err("input is not a Discord error body")?;
            println!("{}", format_discord_error(&response));
        }
        Command::Emoji { input, json } => {
            if let Some(path) = json {
                let pending = async {
                    let body = read_input(Some(path.as_path()))
                        .await
                        .map_err(|e| ResponseError::request(e.to_string()))?;
                    serde_json::from_str::<Value>(&body)
                        .map_err(|e| ResponseError::decode("JSON document", e))
                };
                let emojis =
                    wrap_to_async::<Emoji, (), _>(None, pending, Construction::Create, &()).await?;
                debug!(?emojis, "Decoded emoji payload");
                for emoji in emojis.into_vec() {
                    println!("{}", from_emoji(&emoji));
                }
            } else if let Some(input) = input {
                println!("{}", from_emoji(input.as_str()));
            } else {
                return Err(eyre!("either an emoji or --json is required"));
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = dico::VERSION, "Starting dico");

    run(&config, args.command).await
}
