//! Inputs to and declarative outputs from the round state machine.

use super::RoundId;
use crate::{Landmark, Move};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timers the machine can ask its driver to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Timer {
    /// One countdown tick.
    CountdownStep,
    /// Suspense pause before the AI move is drawn.
    Reveal,
    /// Display period before returning to idle.
    ReturnToIdle,
}

/// Something that happened, fed into [`RoundMachine::handle`](super::RoundMachine::handle).
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Detector readiness changed.
    DetectorReady(bool),
    /// Player asked to start a round.
    Start,
    /// Player asked to zero the score.
    Reset,
    /// A requested timer fired.
    TimerElapsed {
        /// Round that requested the timer.
        round: RoundId,
        /// Which timer fired.
        timer: Timer,
    },
    /// A requested detection completed.
    Detected {
        /// Round that requested the detection.
        round: RoundId,
        /// Raw detector output.
        detection: Option<Vec<Landmark>>,
    },
    /// The driver drew the AI move.
    AiMoveDrawn {
        /// Round that requested the draw.
        round: RoundId,
        /// The drawn move.
        ai_move: Move,
    },
}

/// Work the driver must perform on behalf of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Sleep, then feed back [`Event::TimerElapsed`].
    StartTimer {
        /// Requesting round.
        round: RoundId,
        /// Which timer.
        timer: Timer,
        /// How long to wait.
        after: Duration,
    },
    /// Grab one hand pose, then feed back [`Event::Detected`].
    RequestDetection {
        /// Requesting round.
        round: RoundId,
    },
    /// Draw a uniformly random move, then feed back [`Event::AiMoveDrawn`].
    DrawAiMove {
        /// Requesting round.
        round: RoundId,
    },
    /// The player won; presenters may celebrate.
    Celebrate {
        /// Winning round.
        round: RoundId,
    },
}

/// Round delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct RoundTiming {
    /// Length of one countdown tick.
    countdown_step: Duration,
    /// How long "no hand" and "unclear" results stay up.
    no_hand_display: Duration,
    /// Pause between capture and AI draw.
    reveal_delay: Duration,
    /// Time from capture until the machine is idle again.
    round_lifetime: Duration,
}

impl RoundTiming {
    /// Creates timing from millisecond values.
    pub fn from_millis(
        countdown_step: u64,
        no_hand_display: u64,
        reveal_delay: u64,
        round_lifetime: u64,
    ) -> Self {
        Self {
            countdown_step: Duration::from_millis(countdown_step),
            no_hand_display: Duration::from_millis(no_hand_display),
            reveal_delay: Duration::from_millis(reveal_delay),
            round_lifetime: Duration::from_millis(round_lifetime),
        }
    }

    /// Remaining display time after the reveal.
    pub fn after_reveal(&self) -> Duration {
        self.round_lifetime.saturating_sub(self.reveal_delay)
    }
}

impl Default for RoundTiming {
    fn default() -> Self {
        Self::from_millis(1000, 1500, 1200, 4000)
    }
}
