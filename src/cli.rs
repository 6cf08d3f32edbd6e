//! Command-line interface for strictly_rps.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly RPS - rock-paper-scissors against a random AI, by hand gesture
#[derive(Parser, Debug)]
#[command(name = "strictly_rps")]
#[command(about = "Hand-gesture rock-paper-scissors", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play rounds headless against recorded hand frames
    Play {
        /// JSON file of recorded frames
        #[arg(short, long)]
        frames: PathBuf,

        /// Path to game config
        #[arg(short, long, default_value = "strictly_rps.toml")]
        config: PathBuf,

        /// Number of rounds to play
        #[arg(short, long, default_value = "3")]
        rounds: usize,

        /// Seed for the AI move generator (overrides config)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Classify each recorded frame and print the gesture
    Classify {
        /// JSON file of recorded frames
        #[arg(short, long)]
        frames: PathBuf,

        /// Path to game config
        #[arg(short, long, default_value = "strictly_rps.toml")]
        config: PathBuf,
    },
}
