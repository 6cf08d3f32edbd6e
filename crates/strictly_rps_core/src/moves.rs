//! Core domain types for rock-paper-scissors.

use serde::{Deserialize, Serialize};
use strum::Display;

/// A hand a player can throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Move {
    /// Closed fist.
    Rock,
    /// Open hand.
    Paper,
    /// Index and middle fingers raised.
    Scissors,
}

impl Move {
    /// All three moves in a fixed order.
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Returns the move this one defeats.
    pub fn defeats(self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Scissors => Move::Paper,
            Move::Paper => Move::Rock,
        }
    }

    /// Returns true if this move defeats `other`.
    pub fn beats(self, other: Move) -> bool {
        self.defeats() == other
    }

    /// Hand emoji used by presenters.
    pub fn emoji(self) -> &'static str {
        match self {
            Move::Rock => "✊",
            Move::Paper => "✋",
            Move::Scissors => "✌️",
        }
    }
}

/// Result of a decided round, from the player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Verdict {
    /// Player's move beats the AI's.
    Win,
    /// AI's move beats the player's.
    Lose,
    /// Both threw the same move.
    Tie,
}

impl Verdict {
    /// Message shown when the round is revealed.
    pub fn message(self) -> &'static str {
        match self {
            Verdict::Win => "You win!",
            Verdict::Lose => "AI wins!",
            Verdict::Tie => "It's a tie!",
        }
    }
}
