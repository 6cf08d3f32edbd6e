//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_rps_core::{ClassifierConfig, RoundTiming};
use tracing::{debug, info, instrument};

/// Top-level game configuration.
///
/// Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, Default, PartialEq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Gesture classifier tuning.
    #[serde(default)]
    classifier: ClassifierConfig,

    /// Round delays.
    #[serde(default)]
    timing: TimingConfig,

    /// Seed for the AI move generator. Random if absent.
    #[serde(default)]
    seed: Option<u64>,
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        info!(threshold = config.classifier.threshold(), seed = ?config.seed, "Config loaded");
        Ok(config)
    }

    /// Loads configuration from `path` if it exists, defaults otherwise.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the RNG seed.
    pub fn with_seed(self, seed: Option<u64>) -> Self {
        Self {
            seed: seed.or(self.seed),
            ..self
        }
    }
}

/// Round delays in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Length of one countdown tick.
    #[serde(default = "default_countdown_step_ms")]
    countdown_step_ms: u64,

    /// How long "no hand" and "unclear" results stay up.
    #[serde(default = "default_no_hand_display_ms")]
    no_hand_display_ms: u64,

    /// Suspense pause between capture and AI draw.
    #[serde(default = "default_reveal_delay_ms")]
    reveal_delay_ms: u64,

    /// Time from capture until the next round can start.
    #[serde(default = "default_round_lifetime_ms")]
    round_lifetime_ms: u64,
}

fn default_countdown_step_ms() -> u64 {
    1000
}

fn default_no_hand_display_ms() -> u64 {
    1500
}

fn default_reveal_delay_ms() -> u64 {
    1200
}

fn default_round_lifetime_ms() -> u64 {
    4000
}

impl TimingConfig {
    /// Converts to the state machine's timing.
    pub fn to_timing(&self) -> RoundTiming {
        RoundTiming::from_millis(
            self.countdown_step_ms,
            self.no_hand_display_ms,
            self.reveal_delay_ms,
            self.round_lifetime_ms,
        )
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            countdown_step_ms: default_countdown_step_ms(),
            no_hand_display_ms: default_no_hand_display_ms(),
            reveal_delay_ms: default_reveal_delay_ms(),
            round_lifetime_ms: default_round_lifetime_ms(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use strictly_rps_core::{DEFAULT_THRESHOLD, ThresholdMode};

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = GameConfig::from_toml("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(*config.classifier().threshold(), DEFAULT_THRESHOLD);
        assert_eq!(*config.classifier().mode(), ThresholdMode::Fixed);
        assert_eq!(config.timing().to_timing(), RoundTiming::default());
        assert_eq!(*config.seed(), None);
    }

    #[test]
    fn test_partial_config() {
        let config = GameConfig::from_toml(
            r#"
            seed = 7

            [classifier]
            threshold = 40.0

            [timing]
            reveal_delay_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(*config.seed(), Some(7));
        assert_eq!(*config.classifier().threshold(), 40.0);
        let timing = config.timing().to_timing();
        assert_eq!(*timing.reveal_delay(), Duration::from_millis(500));
        assert_eq!(*timing.countdown_step(), Duration::from_secs(1));
    }

    #[test]
    fn test_palm_scaled_mode() {
        let config = GameConfig::from_toml(
            r#"
            [classifier]
            mode = { palm_scaled = { ratio = 0.6 } }
            "#,
        )
        .unwrap();
        assert_eq!(
            *config.classifier().mode(),
            ThresholdMode::PalmScaled { ratio: 0.6 }
        );
    }

    #[test]
    fn test_invalid_config_is_error() {
        let err = GameConfig::from_toml("seed = \"not a number\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_seed_override() {
        let config = GameConfig::from_toml("seed = 1").unwrap();
        assert_eq!(*config.clone().with_seed(Some(9)).seed(), Some(9));
        assert_eq!(*config.with_seed(None).seed(), Some(1));
    }
}
