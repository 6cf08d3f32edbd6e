//! Pure rock-paper-scissors logic for camera play.
//!
//! - **Landmarks**: 21-point hand skeletons from an external detector
//! - **Classifier**: fingertip-height thresholds mapping a pose to a move
//! - **Rules**: the cyclic beats-relation
//! - **Score**: running win/loss tally
//! - **Round**: a pure state machine emitting declarative effects
//!
//! Nothing in this crate performs I/O, sleeps or draws random numbers.
//!
//! # Example
//!
//! ```
//! use strictly_rps_core::{Effect, Event, RoundMachine};
//!
//! let mut machine = RoundMachine::default();
//! machine.handle(Event::DetectorReady(true));
//! let transition = machine.handle(Event::Start);
//! assert!(matches!(transition.effects[0], Effect::StartTimer { .. }));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod classifier;
pub mod invariants;
mod landmark;
mod moves;
pub mod round;
pub mod rules;
mod score;

pub use classifier::{
    Classification, ClassifierConfig, DEFAULT_THRESHOLD, GestureClassifier, ThresholdMode,
};
pub use invariants::{Invariant, InvariantSet, InvariantViolation, RoundInvariants};
pub use landmark::{HandLandmark, HandPose, LANDMARK_COUNT, Landmark, PoseError};
pub use moves::{Move, Verdict};
pub use round::{
    Effect, Event, Phase, Round, RoundError, RoundId, RoundMachine, RoundOutcome, RoundTiming,
    Snapshot, Timer, Transition,
};
pub use score::Score;
