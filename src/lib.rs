//! Strictly RPS library - camera rock-paper-scissors on tokio
//!
//! Runs the pure round machine from `strictly_rps_core` against a keypoint
//! source, with timers, AI draws and presenter events handled by an async
//! driver.
//!
//! # Architecture
//!
//! - **Config**: TOML game configuration
//! - **Source**: keypoint sources producing hand landmarks
//! - **Driver**: effect interpreter around the round state machine
//! - **Session**: headless multi-round play
//!
//! # Example
//!
//! ```no_run
//! use strictly_rps::{GameConfig, ScriptedSource, play_rounds};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let report = play_rounds(&GameConfig::default(), ScriptedSource::new([None]), 1).await?;
//! println!("{}", report.score());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod driver;
mod session;
mod source;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig, TimingConfig};

// Crate-level exports - Keypoint sources
pub use source::{Detection, FileSource, KeypointSource, ScriptedSource, SourceError};

// Crate-level exports - Driver
pub use driver::{Command, GameEvent, RoundDriver};

// Crate-level exports - Headless sessions
pub use session::{RoundSummary, SessionReport, play_rounds};

// Crate-level exports - Game types
pub use strictly_rps_core::{
    Classification, ClassifierConfig, GestureClassifier, HandLandmark, Landmark, Move, Phase,
    RoundId, RoundOutcome, Score, Snapshot, ThresholdMode, Verdict,
};
