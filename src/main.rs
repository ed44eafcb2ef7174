//! Quotecard - compose a daily quote image and publish it.

mod adapters;
mod background;
mod cassette;
mod cli;
mod compose;
mod config;
mod context;
mod error;
mod history;
mod logging;
mod pipeline;
mod ports;
mod publish;
mod retry;
mod selector;
#[cfg(test)]
mod testing;

use std::path::Path;
use std::process;

use clap::Parser;

use crate::cli::Cli;
use crate::config::{Config, Settings};
use crate::context::ServiceContext;
use crate::pipeline::RunOutcome;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), error::PostError> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("ignoring unreadable .env: {e}"),
    }

    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(error::PostError::Config)?;
    let credentials = config.credentials(|name| std::env::var(name).ok());
    let settings = Settings::resolve(config, credentials, cli.overrides());

    tracing::debug!(
        config = %config_path.display(),
        photo_search = settings.credentials.pixabay_key.is_some(),
        telegram = settings.credentials.telegram().is_some(),
        webhook = settings.credentials.webhook_url.is_some(),
        "settings resolved"
    );

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("QUOTECARD_REPLAY").ok();
    let is_recording = std::env::var("QUOTECARD_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        tracing::info!(cassette = %cassette_path, "replaying");
        (ServiceContext::replaying(Path::new(cassette_path), &settings.credentials)?, None)
    } else if is_recording {
        tracing::info!("recording mode enabled");
        let (ctx, session) = ServiceContext::recording(&settings.credentials)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&settings.credentials)?, None)
    };

    let outcome = pipeline::run(&ctx, &settings).await?;
    drop(ctx);

    match outcome {
        RunOutcome::Published { quote, url, delivered } => {
            tracing::info!(%quote, %url, sinks = delivered.len(), "post published");
        }
        RunOutcome::DryRun { quote } => {
            tracing::info!(%quote, path = %settings.output_path.display(), "dry run complete");
        }
        RunOutcome::Aborted { reached, reason } => {
            tracing::error!(%reached, "run aborted, nothing published: {reason}");
        }
    }

    // Finish recording if active
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => tracing::info!(path = %path.display(), "cassette saved"),
            Err(e) => tracing::warn!("failed to save cassette: {e}"),
        }
    }

    Ok(())
}
