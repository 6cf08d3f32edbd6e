//! Single-frame gesture classification from hand landmarks.
//!
//! A fingertip counts as extended when it sits more than a threshold
//! above the wrist. The classifier ignores the thumb and makes no attempt
//! to handle rotated hands, occlusion or camera distance: a pose is judged
//! purely on fingertip height relative to the wrist.

use super::landmark::{HandLandmark, HandPose, Landmark};
use super::Move;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Default fingertip lift, in pixels, for a finger to count as extended.
pub const DEFAULT_THRESHOLD: f32 = 45.0;

/// Result of classifying one detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Classification {
    /// A recognized move.
    #[display("{}", _0)]
    Move(Move),
    /// A hand was found but matched no gesture.
    #[display("Unclear")]
    Unclear,
    /// No usable hand was found.
    #[display("No hand")]
    NoHand,
}

impl Classification {
    /// Returns the recognized move, if any.
    pub fn as_move(&self) -> Option<Move> {
        match self {
            Classification::Move(mv) => Some(*mv),
            _ => None,
        }
    }
}

/// How the extension threshold is derived for each pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMode {
    /// Use [`ClassifierConfig::threshold`] as-is.
    #[default]
    Fixed,
    /// Scale the threshold by the detected palm width.
    PalmScaled {
        /// Multiplier applied to the palm width.
        ratio: f32,
    },
}

/// Classifier tuning.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Fixed extension threshold in pixels.
    #[serde(default = "default_threshold")]
    threshold: f32,
    /// Threshold derivation mode.
    #[serde(default)]
    mode: ThresholdMode,
}

fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}

impl ClassifierConfig {
    /// Creates a fixed-threshold configuration.
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            mode: ThresholdMode::Fixed,
        }
    }

    /// Switches to palm-scaled thresholds.
    pub fn palm_scaled(self, ratio: f32) -> Self {
        Self {
            mode: ThresholdMode::PalmScaled { ratio },
            ..self
        }
    }

    /// Resolves the threshold to apply to a specific pose.
    ///
    /// Palm-scaled mode falls back to the fixed threshold when the palm
    /// width is degenerate.
    pub fn threshold_for(&self, pose: &HandPose) -> f32 {
        match self.mode {
            ThresholdMode::Fixed => self.threshold,
            ThresholdMode::PalmScaled { ratio } => {
                let scaled = pose.palm_width() * ratio;
                if scaled.is_finite() && scaled > 0.0 {
                    scaled
                } else {
                    self.threshold
                }
            }
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

/// Maps hand landmarks to a [`Classification`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureClassifier {
    config: ClassifierConfig,
}

impl GestureClassifier {
    /// Creates a classifier with the given tuning.
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Returns the classifier tuning.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classifies raw detector output.
    ///
    /// Absent detections and skeletons without exactly 21 points both
    /// yield [`Classification::NoHand`].
    #[instrument(skip(self, detection), fields(points = detection.map(<[Landmark]>::len)))]
    pub fn classify(&self, detection: Option<&[Landmark]>) -> Classification {
        let Some(points) = detection else {
            debug!("No hand in detection");
            return Classification::NoHand;
        };

        match HandPose::from_landmarks(points) {
            Ok(pose) => self.classify_pose(&pose),
            Err(e) => {
                warn!(error = %e, "Malformed detection treated as no hand");
                Classification::NoHand
            }
        }
    }

    /// Classifies a validated pose.
    pub fn classify_pose(&self, pose: &HandPose) -> Classification {
        let threshold = self.config.threshold_for(pose);
        let cutoff = pose.get(HandLandmark::Wrist).y - threshold;
        let [index, middle, ring, pinky] =
            HandLandmark::FINGERTIPS.map(|tip| pose.get(tip).y < cutoff);
        let extended = [index, middle, ring, pinky].iter().filter(|&&e| e).count();

        let classification = if extended == 0 {
            Classification::Move(Move::Rock)
        } else if extended >= 3 {
            Classification::Move(Move::Paper)
        } else if index && middle && !ring && !pinky {
            Classification::Move(Move::Scissors)
        } else {
            Classification::Unclear
        };

        debug!(threshold, extended, %classification, "Pose classified");
        classification
    }
}
