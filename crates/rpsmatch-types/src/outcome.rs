//! Match outcome: derived at resolution time, never stored on a player.

use serde::{Deserialize, Serialize};

use crate::{AccountId, Choice};

/// Result of one resolved match.
///
/// On a draw, `winner`/`loser` keep the order the two sides were supplied
/// in and carry no meaning beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub is_draw: bool,
    pub winner: AccountId,
    pub loser: AccountId,
    pub winner_choice: Choice,
    pub loser_choice: Choice,
}

impl MatchOutcome {
    /// The two accounts that took part, winner first.
    #[must_use]
    pub fn players(&self) -> (AccountId, AccountId) {
        (self.winner, self.loser)
    }
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_draw {
            write!(f, "DRAW ({})", self.winner_choice)
        } else {
            write!(
                f,
                "{} beats {}",
                self.winner_choice, self.loser_choice
            )
        }
    }
}
