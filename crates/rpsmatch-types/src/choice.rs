//! Move choices.
//!
//! On the wire a choice is one byte: `0` is "no move yet", `1..=3` are
//! Rock, Paper, Scissors. In memory the "no move yet" state is `None` on an
//! `Option<Choice>`, so a played move can never be the empty choice.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::RpsError;

/// Wire byte for "awaiting this side's move".
pub const NO_CHOICE: u8 = 0;

/// A played move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    pub const ALL: [Self; 3] = [Self::Rock, Self::Paper, Self::Scissors];

    /// Rock beats Scissors, Scissors beats Paper, Paper beats Rock.
    #[must_use]
    pub fn beats(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Rock, Self::Scissors) | (Self::Scissors, Self::Paper) | (Self::Paper, Self::Rock)
        )
    }

    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Rock => 1,
            Self::Paper => 2,
            Self::Scissors => 3,
        }
    }

    /// Encode an optional choice; `None` encodes as [`NO_CHOICE`].
    #[must_use]
    pub fn encode(choice: Option<Self>) -> u8 {
        choice.map_or(NO_CHOICE, Self::as_u8)
    }
}

impl TryFrom<u8> for Choice {
    type Error = RpsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Rock),
            2 => Ok(Self::Paper),
            3 => Ok(Self::Scissors),
            other => Err(RpsError::InvalidChoice(other)),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rock => write!(f, "ROCK"),
            Self::Paper => write!(f, "PAPER"),
            Self::Scissors => write!(f, "SCISSORS"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beats_relation_is_a_cycle() {
        assert!(Choice::Rock.beats(Choice::Scissors));
        assert!(Choice::Scissors.beats(Choice::Paper));
        assert!(Choice::Paper.beats(Choice::Rock));
        for c in Choice::ALL {
            assert!(!c.beats(c), "{c} must not beat itself");
        }
    }

    #[test]
    fn exactly_one_side_wins_distinct_choices() {
        for a in Choice::ALL {
            for b in Choice::ALL {
                if a != b {
                    assert!(a.beats(b) ^ b.beats(a), "{a} vs {b}");
                }
            }
        }
    }

    #[test]
    fn wire_encoding() {
        for c in Choice::ALL {
            assert_eq!(Choice::try_from(c.as_u8()).unwrap(), c);
        }
        assert_eq!(Choice::encode(None), NO_CHOICE);
        assert_eq!(
            Choice::try_from(NO_CHOICE).unwrap_err(),
            RpsError::InvalidChoice(0)
        );
        assert_eq!(Choice::try_from(4).unwrap_err(), RpsError::InvalidChoice(4));
    }
}
