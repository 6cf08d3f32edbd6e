//! First-class invariants for rounds.
//!
//! Invariants are logical properties of every [`Snapshot`] the machine
//! produces. They are checked after each transition in debug builds and
//! can be tested independently.

use crate::round::{Phase, Snapshot};
use crate::Classification;
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        warn!(invariant = I::description(), "Invariant violated");
        violations.push(InvariantViolation::new(I::description()));
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        check::<S, I3>(state, &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// A decided outcome needs both moves.
pub struct OutcomeRequiresMoves;

impl Invariant<Snapshot> for OutcomeRequiresMoves {
    fn holds(snapshot: &Snapshot) -> bool {
        snapshot.round().is_none_or(|round| {
            round.outcome().and_then(|o| o.verdict()).is_none()
                || (round.player_move().is_some() && round.ai_move().is_some())
        })
    }

    fn description() -> &'static str {
        "Win, lose and tie outcomes have both a player and an AI move"
    }
}

/// The AI never moves before the player has committed a move.
pub struct AiMoveFollowsPlayerMove;

impl Invariant<Snapshot> for AiMoveFollowsPlayerMove {
    fn holds(snapshot: &Snapshot) -> bool {
        snapshot
            .round()
            .is_none_or(|round| round.ai_move().is_none() || round.player_move().is_some())
    }

    fn description() -> &'static str {
        "AI move is only present after a player move"
    }
}

/// Round contents agree with the phase.
pub struct PhaseMatchesRound;

impl Invariant<Snapshot> for PhaseMatchesRound {
    fn holds(snapshot: &Snapshot) -> bool {
        let round = snapshot.round();
        match snapshot.phase() {
            Phase::Idle => round.is_none_or(|r| r.outcome().is_some()),
            Phase::Countdown(_) | Phase::Capturing => {
                round.is_some_and(|r| r.player().is_none() && r.outcome().is_none())
            }
            Phase::Revealing => round.is_some_and(|r| {
                matches!(r.player(), Some(Classification::Move(_))) && r.outcome().is_none()
            }),
            Phase::Finished => round.is_some_and(|r| r.outcome().is_some()),
        }
    }

    fn description() -> &'static str {
        "Phase and round record agree"
    }
}

/// All round invariants as a composable set.
pub type RoundInvariants = (OutcomeRequiresMoves, AiMoveFollowsPlayerMove, PhaseMatchesRound);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::{Event, RoundMachine, Timer};
    use crate::{LANDMARK_COUNT, Landmark, Move};

    #[test]
    fn test_invariant_set_holds_for_fresh_machine() {
        let machine = RoundMachine::default();
        assert!(RoundInvariants::check_all(&machine.snapshot()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_through_a_round() {
        let mut machine = RoundMachine::default();
        machine.handle(Event::DetectorReady(true));
        let t = machine.handle(Event::Start);
        assert!(RoundInvariants::check_all(&t.snapshot).is_ok());
        let round = t.snapshot.round().unwrap().id();

        let mut snapshots = Vec::new();
        for _ in 0..3 {
            snapshots.push(
                machine
                    .handle(Event::TimerElapsed { round, timer: Timer::CountdownStep })
                    .snapshot,
            );
        }
        snapshots.push(
            machine
                .handle(Event::Detected {
                    round,
                    detection: Some(vec![Landmark::new(0.0, 100.0); LANDMARK_COUNT]),
                })
                .snapshot,
        );
        snapshots.push(
            machine
                .handle(Event::TimerElapsed { round, timer: Timer::Reveal })
                .snapshot,
        );
        snapshots.push(
            machine
                .handle(Event::AiMoveDrawn { round, ai_move: Move::Paper })
                .snapshot,
        );
        snapshots.push(
            machine
                .handle(Event::TimerElapsed { round, timer: Timer::ReturnToIdle })
                .snapshot,
        );

        for snapshot in &snapshots {
            assert!(RoundInvariants::check_all(snapshot).is_ok(), "{snapshot:?}");
        }
        assert_eq!(snapshots.last().unwrap().phase(), Phase::Idle);
    }

    #[test]
    fn test_two_invariants_as_set() {
        let machine = RoundMachine::default();
        type TwoInvariants = (OutcomeRequiresMoves, AiMoveFollowsPlayerMove);
        assert!(TwoInvariants::check_all(&machine.snapshot()).is_ok());
    }
}
