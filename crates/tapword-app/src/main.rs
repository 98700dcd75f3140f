use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod io;
pub mod profile;
pub mod services;
pub mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::services::Services;
use self::state::AppState;

/// Selection-to-translation engine for a PDF reading frontend. Speaks JSON
/// lines on stdin/stdout.
#[derive(Parser, Debug)]
#[command(name = "tapword", version)]
struct Args {
    /// Config file to use instead of a profile
    #[arg(long)]
    config: Option<PathBuf>,

    /// Profile name under the user config directory
    #[arg(long, default_value = "main")]
    profile: String,

    /// Write the default main profile if it does not exist, then continue
    #[arg(long)]
    init_profile: bool,

    /// Log as JSON instead of plain text
    #[arg(long)]
    log_json: bool,

    /// Document to open on start
    document: Option<String>,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(false).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.log_json);

    let root = profile::config_root()?;
    if args.init_profile {
        profile::init_user_config(&root)?;
    }

    let config = profile::load_config(args.config.as_deref(), &root, &args.profile)?;
    config.validate()?;

    let services = Services::from_config(&config);
    if let Some(flashcards) = &services.flashcards {
        let client = flashcards.client.clone();
        tokio::spawn(async move {
            match client.version().await {
                Ok(version) => tracing::info!("AnkiConnect v{version} available"),
                Err(e) => tracing::warn!("AnkiConnect unavailable, cards will fail: {e:#}"),
            }
        });
    }

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(services, args.document).await?;

    let mut exit_code = 0;
    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task finished, shutting down"),
                Ok(Err(e)) => {
                    tracing::error!("Task failed: {e:#}");
                    exit_code = 1;
                }
                Err(e) => {
                    tracing::error!("Task panicked: {e}");
                    exit_code = 1;
                }
            }
        }
    }

    controller.shutdown();
    tasks.abort_all();
    while tasks.join_next().await.is_some() {}

    // the stdin reader can stay parked in the blocking pool and hold the runtime open
    std::process::exit(exit_code);
}
