//! Winner resolution.
//!
//! A pure function of two choices. It knows nothing about players: the
//! two sides are opaque labels, mapped back to accounts by the caller.

use rpsmatch_types::{AccountId, Choice, MatchOutcome};

/// Opaque side label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl Side {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Result of comparing two choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Draw,
    Decisive { winner: Side },
}

impl Resolution {
    #[must_use]
    pub fn is_draw(&self) -> bool {
        matches!(self, Self::Draw)
    }

    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        match self {
            Self::Draw => None,
            Self::Decisive { winner } => Some(*winner),
        }
    }

    #[must_use]
    pub fn loser(&self) -> Option<Side> {
        self.winner().map(Side::other)
    }
}

/// Rock beats Scissors, Scissors beats Paper, Paper beats Rock; equal
/// choices draw.
#[must_use]
pub fn resolve(a: Choice, b: Choice) -> Resolution {
    if a.beats(b) {
        Resolution::Decisive { winner: Side::A }
    } else if b.beats(a) {
        Resolution::Decisive { winner: Side::B }
    } else {
        Resolution::Draw
    }
}

/// Resolve two `(account, choice)` sides into a [`MatchOutcome`].
///
/// On a draw, side A is reported in the `winner` slot.
#[must_use]
pub fn outcome(a: (AccountId, Choice), b: (AccountId, Choice)) -> MatchOutcome {
    let (winner, loser) = match resolve(a.1, b.1) {
        Resolution::Decisive { winner: Side::B } => (b, a),
        Resolution::Decisive { winner: Side::A } | Resolution::Draw => (a, b),
    };
    MatchOutcome {
        is_draw: a.1 == b.1,
        winner: winner.0,
        loser: loser.0,
        winner_choice: winner.1,
        loser_choice: loser.1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpsmatch_types::Choice::{Paper, Rock, Scissors};

    #[test]
    fn full_resolution_table() {
        let cases = [
            (Rock, Rock, None),
            (Paper, Paper, None),
            (Scissors, Scissors, None),
            (Rock, Scissors, Some(Side::A)),
            (Scissors, Rock, Some(Side::B)),
            (Scissors, Paper, Some(Side::A)),
            (Paper, Scissors, Some(Side::B)),
            (Paper, Rock, Some(Side::A)),
            (Rock, Paper, Some(Side::B)),
        ];
        for (a, b, expected) in cases {
            let r = resolve(a, b);
            assert_eq!(r.winner(), expected, "{a} vs {b}");
            assert_eq!(r.is_draw(), expected.is_none(), "{a} vs {b}");
            assert_eq!(r.loser(), expected.map(Side::other));
        }
    }

    #[test]
    fn resolution_is_antisymmetric() {
        for a in Choice::ALL {
            for b in Choice::ALL {
                let fwd = resolve(a, b).winner();
                let rev = resolve(b, a).winner();
                assert_eq!(fwd, rev.map(Side::other), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn outcome_maps_sides_to_accounts() {
        let x = AccountId::random();
        let y = AccountId::random();

        let o = outcome((x, Rock), (y, Scissors));
        assert!(!o.is_draw);
        assert_eq!((o.winner, o.loser), (x, y));
        assert_eq!((o.winner_choice, o.loser_choice), (Rock, Scissors));

        let o = outcome((x, Rock), (y, Paper));
        assert_eq!((o.winner, o.loser), (y, x));
        assert_eq!(o.winner_choice, Paper);

        let o = outcome((x, Paper), (y, Paper));
        assert!(o.is_draw);
        assert_eq!(o.players(), (x, y));
    }
}
