//! The round state machine.
//!
//! The machine is a pure `(state, event) -> (snapshot, effects)` function.
//! It never sleeps, detects or draws random numbers itself: it asks its
//! driver to do so through [`Effect`]s and receives the results as
//! [`Event`]s.

use super::event::{Effect, Event, RoundTiming, Timer};
use super::phase::{COUNTDOWN_FROM, Phase, Round, RoundError, RoundId, RoundOutcome};
use crate::invariants::{InvariantSet, RoundInvariants};
use crate::{
    Classification, GestureClassifier, LANDMARK_COUNT, Landmark, Move, Score, Verdict, rules,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Label shown for a move that is not known yet.
pub const PLACEHOLDER_LABEL: &str = "?";

/// Message shown while idle.
pub const IDLE_MESSAGE: &str = "Press start";

// ─────────────────────────────────────────────────────────────
//  Snapshot
// ─────────────────────────────────────────────────────────────

/// Immutable view of everything a presenter displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    phase: Phase,
    round: Option<Round>,
    score: Score,
    message: String,
    can_start: bool,
}

impl Snapshot {
    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current or most recently finished round.
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Running score.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Status message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether a start command would be accepted.
    pub fn can_start(&self) -> bool {
        self.can_start
    }

    /// Display label for the player's gesture.
    pub fn player_label(&self) -> String {
        match self.round.as_ref().and_then(Round::player) {
            Some(Classification::Move(mv)) => format!("{} {}", mv.emoji(), mv),
            Some(other) => other.to_string(),
            None => PLACEHOLDER_LABEL.to_string(),
        }
    }

    /// Display label for the AI's move.
    pub fn ai_label(&self) -> String {
        match self.round.as_ref().and_then(Round::ai_move) {
            Some(mv) => format!("{} {}", mv.emoji(), mv),
            None => PLACEHOLDER_LABEL.to_string(),
        }
    }
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// State after the event.
    pub snapshot: Snapshot,
    /// Work requested by the machine, in order.
    pub effects: Vec<Effect>,
}

// ─────────────────────────────────────────────────────────────
//  Machine
// ─────────────────────────────────────────────────────────────

/// Drives rounds through countdown, capture, reveal and back to idle.
#[derive(Debug, Clone)]
pub struct RoundMachine {
    classifier: GestureClassifier,
    timing: RoundTiming,
    phase: Phase,
    round: Option<Round>,
    score: Score,
    message: String,
    detector_ready: bool,
    reveal_due: bool,
    next_id: u64,
}

impl RoundMachine {
    /// Creates an idle machine with an empty score.
    ///
    /// The detector starts out not ready.
    #[instrument(skip(classifier))]
    pub fn new(classifier: GestureClassifier, timing: RoundTiming) -> Self {
        Self {
            classifier,
            timing,
            phase: Phase::Idle,
            round: None,
            score: Score::new(),
            message: IDLE_MESSAGE.to_string(),
            detector_ready: false,
            reveal_due: false,
            next_id: 1,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Running score.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Round timing.
    pub fn timing(&self) -> &RoundTiming {
        &self.timing
    }

    /// Builds the presenter view of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            round: self.round.clone(),
            score: self.score,
            message: self.message.clone(),
            can_start: self.detector_ready && self.phase == Phase::Idle,
        }
    }

    /// Applies one event.
    #[instrument(skip(self, event), fields(phase = %self.phase))]
    pub fn handle(&mut self, event: Event) -> Transition {
        let effects = match event {
            Event::DetectorReady(ready) => {
                debug!(ready, "Detector readiness changed");
                self.detector_ready = ready;
                Vec::new()
            }
            Event::Start => self.start(),
            Event::Reset => self.reset(),
            Event::TimerElapsed { round, timer } if self.is_current(round) => {
                self.timer_elapsed(round, timer)
            }
            Event::Detected { round, detection } if self.is_current(round) => {
                self.detected(round, detection)
            }
            Event::AiMoveDrawn { round, ai_move } if self.is_current(round) => {
                self.ai_move_drawn(round, ai_move)
            }
            stale => {
                debug!(?stale, "Ignoring event for inactive round");
                Vec::new()
            }
        };

        let snapshot = self.snapshot();
        debug_assert!(
            RoundInvariants::check_all(&snapshot).is_ok(),
            "Round invariants violated: {:?}",
            RoundInvariants::check_all(&snapshot)
        );
        Transition { snapshot, effects }
    }

    fn is_current(&self, id: RoundId) -> bool {
        self.phase.is_active() && self.round.as_ref().is_some_and(|r| r.id() == id)
    }

    fn start(&mut self) -> Vec<Effect> {
        if !self.detector_ready {
            debug!(error = %RoundError::DetectorUnavailable, "Start ignored");
            return Vec::new();
        }
        if self.phase != Phase::Idle {
            debug!("Start ignored, round already in flight");
            return Vec::new();
        }

        let id = RoundId(self.next_id);
        self.next_id += 1;
        self.round = Some(Round::new(id));
        self.reveal_due = false;
        self.phase = Phase::Countdown(COUNTDOWN_FROM);
        self.message = COUNTDOWN_FROM.to_string();
        info!(round = %id, "Round started");

        vec![self.timer(id, Timer::CountdownStep)]
    }

    fn reset(&mut self) -> Vec<Effect> {
        info!(score = %self.score, "Resetting score");
        self.score.reset();
        self.round = None;
        self.reveal_due = false;
        self.phase = Phase::Idle;
        self.message = IDLE_MESSAGE.to_string();
        Vec::new()
    }

    fn timer_elapsed(&mut self, id: RoundId, timer: Timer) -> Vec<Effect> {
        match (self.phase, timer) {
            (Phase::Countdown(n), Timer::CountdownStep) if n > 1 => {
                self.phase = Phase::Countdown(n - 1);
                self.message = (n - 1).to_string();
                vec![self.timer(id, Timer::CountdownStep)]
            }
            (Phase::Countdown(_), Timer::CountdownStep) => {
                self.phase = Phase::Capturing;
                self.message = "Hold it!".to_string();
                vec![Effect::RequestDetection { round: id }]
            }
            (Phase::Revealing, Timer::Reveal) => {
                self.reveal_due = true;
                vec![Effect::DrawAiMove { round: id }]
            }
            (Phase::Finished, Timer::ReturnToIdle) => {
                debug!(round = %id, "Round over");
                self.phase = Phase::Idle;
                self.message = IDLE_MESSAGE.to_string();
                Vec::new()
            }
            (phase, timer) => {
                warn!(%phase, %timer, "Timer does not apply to phase");
                Vec::new()
            }
        }
    }

    fn detected(&mut self, id: RoundId, detection: Option<Vec<Landmark>>) -> Vec<Effect> {
        if self.phase != Phase::Capturing {
            warn!(phase = %self.phase, "Detection outside capture");
            return Vec::new();
        }
        if let Some(points) = &detection
            && points.len() != LANDMARK_COUNT
        {
            warn!(error = %RoundError::CaptureInputInvalid, points = points.len(), "Bad capture");
        }

        let classification = self.classifier.classify(detection.as_deref());
        let Some(round) = self.round.as_mut() else {
            return Vec::new();
        };
        round.capture(classification);

        match classification {
            Classification::Move(mv) => {
                debug!(round = %id, player = %mv, "Player move committed");
                self.phase = Phase::Revealing;
                self.message = "AI is choosing...".to_string();
                vec![self.timer(id, Timer::Reveal)]
            }
            Classification::NoHand => self.abandon(id, RoundOutcome::NoHand),
            Classification::Unclear => self.abandon(id, RoundOutcome::Unclear),
        }
    }

    fn abandon(&mut self, id: RoundId, outcome: RoundOutcome) -> Vec<Effect> {
        info!(round = %id, %outcome, "Round ended without a decision");
        if let Some(round) = self.round.as_mut() {
            round.abandon(outcome);
        }
        self.phase = Phase::Finished;
        self.message = outcome.message();
        vec![Effect::StartTimer {
            round: id,
            timer: Timer::ReturnToIdle,
            after: *self.timing.no_hand_display(),
        }]
    }

    fn ai_move_drawn(&mut self, id: RoundId, ai_move: Move) -> Vec<Effect> {
        if self.phase != Phase::Revealing || !self.reveal_due {
            warn!(phase = %self.phase, "AI move drawn before reveal");
            return Vec::new();
        }
        let Some(round) = self.round.as_mut() else {
            return Vec::new();
        };
        let Some(player) = round.player_move() else {
            return Vec::new();
        };

        let verdict = rules::judge(player, ai_move);
        round.reveal(ai_move, verdict);
        self.score.record(verdict);
        self.reveal_due = false;
        self.phase = Phase::Finished;
        self.message = verdict.message().to_string();
        info!(round = %id, %player, ai = %ai_move, %verdict, score = %self.score, "Round decided");

        let mut effects = Vec::with_capacity(2);
        if verdict == Verdict::Win {
            effects.push(Effect::Celebrate { round: id });
        }
        effects.push(Effect::StartTimer {
            round: id,
            timer: Timer::ReturnToIdle,
            after: self.timing.after_reveal(),
        });
        effects
    }

    fn timer(&self, round: RoundId, timer: Timer) -> Effect {
        let after = match timer {
            Timer::CountdownStep => *self.timing.countdown_step(),
            Timer::Reveal => *self.timing.reveal_delay(),
            Timer::ReturnToIdle => self.timing.after_reveal(),
        };
        Effect::StartTimer { round, timer, after }
    }
}

impl Default for RoundMachine {
    fn default() -> Self {
        Self::new(GestureClassifier::default(), RoundTiming::default())
    }
}
