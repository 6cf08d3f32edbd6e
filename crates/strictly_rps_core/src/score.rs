//! Running win/loss tally.

use super::Verdict;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player and AI win counters.
///
/// Ties never change the tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Score {
    player_wins: u32,
    ai_wins: u32,
}

impl Score {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rounds won by the player.
    pub fn player_wins(&self) -> u32 {
        self.player_wins
    }

    /// Rounds won by the AI.
    pub fn ai_wins(&self) -> u32 {
        self.ai_wins
    }

    /// Records a decided round.
    #[instrument(skip(self))]
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Win => self.player_wins = self.player_wins.saturating_add(1),
            Verdict::Lose => self.ai_wins = self.ai_wins.saturating_add(1),
            Verdict::Tie => {}
        }
    }

    /// Zeroes both counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "You {} - {} AI", self.player_wins, self.ai_wins)
    }
}
