//! Keypoint sources: where hand poses come from.
//!
//! A real deployment would wrap a camera and a landmark model. The sources
//! here replay recorded or scripted detections so rounds can run headless.

use derive_more::{Display, Error};
use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;
use strictly_rps_core::Landmark;
use tracing::{debug, info, instrument};

/// Raw output of one detection: zero or one hand.
pub type Detection = Option<Vec<Landmark>>;

/// Trait for anything that can produce hand landmarks on demand.
#[async_trait::async_trait]
pub trait KeypointSource: Send {
    /// Whether the underlying detector is initialized.
    fn is_ready(&self) -> bool;

    /// Runs one detection.
    async fn detect(&mut self) -> Result<Detection, SourceError>;

    /// Returns the source's display name.
    fn name(&self) -> &str;
}

/// Keypoint source error.
#[derive(Debug, Clone, Display, Error)]
#[display("Keypoint source error: {} at {}:{}", message, file, line)]
pub struct SourceError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SourceError {
    /// Creates a new source error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Scripted
// ─────────────────────────────────────────────────────────────

/// Serves a fixed queue of detections, once each.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: VecDeque<Detection>,
    latency: Duration,
    ready: bool,
}

impl ScriptedSource {
    /// Creates a ready source that serves `script` in order.
    pub fn new(script: impl IntoIterator<Item = Detection>) -> Self {
        Self {
            script: script.into_iter().collect(),
            latency: Duration::ZERO,
            ready: true,
        }
    }

    /// Simulates inference time on every detection.
    pub fn with_latency(self, latency: Duration) -> Self {
        Self { latency, ..self }
    }

    /// Marks the detector as not yet initialized.
    pub fn not_ready(self) -> Self {
        Self {
            ready: false,
            ..self
        }
    }

    /// Detections not yet served.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

#[async_trait::async_trait]
impl KeypointSource for ScriptedSource {
    fn is_ready(&self) -> bool {
        self.ready
    }

    #[instrument(skip(self), fields(remaining = self.script.len()))]
    async fn detect(&mut self) -> Result<Detection, SourceError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.script
            .pop_front()
            .ok_or_else(|| SourceError::new("Script exhausted"))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

// ─────────────────────────────────────────────────────────────
//  File
// ─────────────────────────────────────────────────────────────

/// Replays frames recorded as JSON, cycling when the end is reached.
///
/// The file holds an array with one entry per frame: `null` for no hand,
/// or an array of `{"x": .., "y": ..}` points.
#[derive(Debug, Clone)]
pub struct FileSource {
    name: String,
    frames: Vec<Detection>,
    cursor: usize,
}

impl FileSource {
    /// Loads frames from a JSON file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SourceError::new(format!("Failed to read frames file: {}", e)))?;
        let source = Self::from_json(path.as_ref().display().to_string(), &content)?;
        info!(frames = source.frames.len(), "Frames loaded");
        Ok(source)
    }

    /// Parses frames from JSON text.
    pub fn from_json(name: impl Into<String>, content: &str) -> Result<Self, SourceError> {
        let frames: Vec<Detection> = serde_json::from_str(content)
            .map_err(|e| SourceError::new(format!("Failed to parse frames: {}", e)))?;
        if frames.is_empty() {
            return Err(SourceError::new("Frames file contains no frames"));
        }
        Ok(Self {
            name: name.into(),
            frames,
            cursor: 0,
        })
    }

    /// All recorded frames.
    pub fn frames(&self) -> &[Detection] {
        &self.frames
    }
}

#[async_trait::async_trait]
impl KeypointSource for FileSource {
    fn is_ready(&self) -> bool {
        true
    }

    async fn detect(&mut self) -> Result<Detection, SourceError> {
        let frame = self.frames[self.cursor].clone();
        debug!(frame = self.cursor, hand = frame.is_some(), "Serving recorded frame");
        self.cursor = (self.cursor + 1) % self.frames.len();
        Ok(frame)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
