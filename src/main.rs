//! Strictly RPS - Unified CLI
//!
//! Plays camera rock-paper-scissors rounds from recorded hand frames.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use strictly_rps::{FileSource, GameConfig, GestureClassifier, play_rounds};
use tracing::{info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            frames,
            config,
            rounds,
            seed,
        } => run_play(&frames, &config, rounds, seed).await,
        Command::Classify { frames, config } => run_classify(&frames, &config),
    }
}

/// Play rounds headless
#[instrument(skip_all, fields(frames = %frames.display()))]
async fn run_play(frames: &Path, config: &Path, rounds: usize, seed: Option<u64>) -> Result<()> {
    let config = GameConfig::load_or_default(config)?.with_seed(seed);
    let source = FileSource::from_file(frames)?;

    info!(rounds, "Starting headless session");
    let report = play_rounds(&config, source, rounds).await?;

    for round in report.rounds() {
        println!("{}", round);
    }
    println!("Final score: {}", report.score());
    Ok(())
}

/// Classify recorded frames
#[instrument(skip_all, fields(frames = %frames.display()))]
fn run_classify(frames: &Path, config: &Path) -> Result<()> {
    let config = GameConfig::load_or_default(config)?;
    let source = FileSource::from_file(frames)?;
    let classifier = GestureClassifier::new(*config.classifier());

    for (i, frame) in source.frames().iter().enumerate() {
        let classification = classifier.classify(frame.as_deref());
        println!("Frame {}: {}", i, classification);
    }
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,strictly_rps=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
