//! Round phases and the per-round record.

use crate::{Classification, Move, Verdict};
use serde::{Deserialize, Serialize};

/// Number the countdown starts from.
pub const COUNTDOWN_FROM: u8 = 3;

/// Where the round state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Phase {
    /// Waiting for the player to start a round.
    #[display("Idle")]
    Idle,
    /// Counting down; the player holds their pose.
    #[display("Countdown {}", _0)]
    Countdown(u8),
    /// Waiting on one hand detection.
    #[display("Capturing")]
    Capturing,
    /// Player move committed; AI move pending.
    #[display("Revealing")]
    Revealing,
    /// Outcome shown, waiting to return to idle.
    #[display("Finished")]
    Finished,
}

impl Phase {
    /// Returns true while a round is in flight.
    pub fn is_active(&self) -> bool {
        !matches!(self, Phase::Idle)
    }
}

/// Generation counter identifying one round.
///
/// Effects carry the id of the round that issued them so completions that
/// arrive after a reset can be discarded.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("#{}", _0)]
pub struct RoundId(pub u64);

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum RoundOutcome {
    /// Player won.
    Win,
    /// AI won.
    Lose,
    /// Same move.
    Tie,
    /// No usable hand in the capture.
    #[display("No hand")]
    NoHand,
    /// Hand found but gesture not recognized.
    Unclear,
}

impl RoundOutcome {
    /// Returns the verdict for decided rounds.
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            RoundOutcome::Win => Some(Verdict::Win),
            RoundOutcome::Lose => Some(Verdict::Lose),
            RoundOutcome::Tie => Some(Verdict::Tie),
            RoundOutcome::NoHand | RoundOutcome::Unclear => None,
        }
    }

    /// Returns the error for rounds that could not be decided.
    pub fn error(&self) -> Option<RoundError> {
        match self {
            RoundOutcome::NoHand => Some(RoundError::NoHandDetected),
            RoundOutcome::Unclear => Some(RoundError::UnclearGesture),
            _ => None,
        }
    }

    /// Message shown when the round ends.
    pub fn message(&self) -> String {
        match (self.verdict(), self.error()) {
            (Some(verdict), _) => verdict.message().to_string(),
            (None, Some(error)) => error.to_string(),
            (None, None) => String::new(),
        }
    }
}

impl From<Verdict> for RoundOutcome {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Win => RoundOutcome::Win,
            Verdict::Lose => RoundOutcome::Lose,
            Verdict::Tie => RoundOutcome::Tie,
        }
    }
}

/// Recoverable round failures.
///
/// None of these abort the process; each ends the round and returns the
/// machine to [`Phase::Idle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RoundError {
    /// The capture contained no hand.
    #[display("No hand detected")]
    NoHandDetected,
    /// The hand matched no gesture.
    #[display("Unclear gesture")]
    UnclearGesture,
    /// The keypoint detector is not initialized yet.
    #[display("Detector not ready")]
    DetectorUnavailable,
    /// The detector returned a malformed skeleton.
    #[display("Malformed hand skeleton")]
    CaptureInputInvalid,
}

impl std::error::Error for RoundError {}

/// One play cycle, from countdown to reveal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    id: RoundId,
    player: Option<Classification>,
    ai_move: Option<Move>,
    outcome: Option<RoundOutcome>,
}

impl Round {
    pub(super) fn new(id: RoundId) -> Self {
        Self {
            id,
            player: None,
            ai_move: None,
            outcome: None,
        }
    }

    /// Round generation.
    pub fn id(&self) -> RoundId {
        self.id
    }

    /// Classified player gesture, once captured.
    pub fn player(&self) -> Option<Classification> {
        self.player
    }

    /// Committed player move, if the capture produced one.
    pub fn player_move(&self) -> Option<Move> {
        self.player.and_then(|c| c.as_move())
    }

    /// AI move, once revealed.
    pub fn ai_move(&self) -> Option<Move> {
        self.ai_move
    }

    /// Final outcome, once the round has ended.
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    pub(super) fn capture(&mut self, classification: Classification) {
        self.player = Some(classification);
    }

    pub(super) fn reveal(&mut self, ai_move: Move, verdict: Verdict) {
        self.ai_move = Some(ai_move);
        self.outcome = Some(verdict.into());
    }

    pub(super) fn abandon(&mut self, outcome: RoundOutcome) {
        self.outcome = Some(outcome);
    }
}
