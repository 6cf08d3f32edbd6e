//! Outcome rules for rock-paper-scissors.
//!
//! The beats-relation is cyclic: Rock > Scissors > Paper > Rock.

use super::{Move, Verdict};
use tracing::instrument;

/// Judges a round from the player's perspective.
#[instrument]
pub fn judge(player: Move, ai: Move) -> Verdict {
    if player == ai {
        Verdict::Tie
    } else if player.beats(ai) {
        Verdict::Win
    } else {
        Verdict::Lose
    }
}
