//! Timed round state machine.
//!
//! Idle → Countdown(3..1) → Capturing → Revealing → Finished → Idle.
//! Rounds that capture no hand or an unclear gesture skip straight from
//! Capturing to Finished.

mod event;
mod machine;
mod phase;

pub use event::{Effect, Event, RoundTiming, Timer};
pub use machine::{IDLE_MESSAGE, PLACEHOLDER_LABEL, RoundMachine, Snapshot, Transition};
pub use phase::{COUNTDOWN_FROM, Phase, Round, RoundError, RoundId, RoundOutcome};
