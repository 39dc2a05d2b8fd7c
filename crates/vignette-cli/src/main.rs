//! Vignette terminal player entry point.

use std::process::ExitCode;

use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;
use vignette_cli::config::CliConfig;
use vignette_cli::error::AppError;
use vignette_cli::host::media::SimulatedMediaPlayer;
use vignette_cli::host::scheduler::DeadlineScheduler;
use vignette_cli::host::stage::TerminalStage;
use vignette_cli::host::{self, Exit};
use vignette_narrative::Director;
use vignette_script::load_script;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the story.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(exit) => {
            tracing::info!(?exit, "vignette exiting");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, "vignette failed");
            eprintln!("vignette: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<Exit, AppError> {
    let config = CliConfig::from_env(std::env::args().nth(1))?;
    let loaded = load_script(&config.script_path)?;
    tracing::info!(
        path = %config.script_path.display(),
        title = ?loaded.script.title,
        digest = %loaded.digest,
        "script loaded"
    );

    let mut director = Director::new(
        TerminalStage::new(std::io::stdout()),
        DeadlineScheduler::default(),
        SimulatedMediaPlayer::new(config.media_root.clone(), config.media_duration),
    )
    .with_config(config.playback.clone());
    director.start(loaded.script)?;

    host::drive(&mut director, BufReader::new(tokio::io::stdin())).await
}
