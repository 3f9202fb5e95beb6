//! Journal events for the RpsMatch audit trail.
//!
//! Every accepted state transition produces one [`MatchEvent`]. Rejected
//! operations produce none.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, EventId, MatchOutcome};

/// Which settlement channel resolved a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementPath {
    /// Propose, then counter-move against the open session.
    Session,
    /// Two signed move commitments, no session.
    Signed,
}

impl std::fmt::Display for SettlementPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Session => write!(f, "SESSION"),
            Self::Signed => write!(f, "SIGNED"),
        }
    }
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Enrolled { player: AccountId, balance: u64 },
    Credited { player: AccountId, amount: u64 },
    Debited { player: AccountId, amount: u64 },
    Activated { player: AccountId },
    Deactivated { player: AccountId },
    Blocked { player: AccountId, other: AccountId },
    Unblocked { player: AccountId, other: AccountId },
    /// A session was opened and the mover's bet escrowed.
    MatchProposed {
        mover: AccountId,
        opponent: AccountId,
        bet: u64,
    },
    /// Both moves known, escrow released and balances settled.
    MatchResolved {
        outcome: MatchOutcome,
        bet: u64,
        via: SettlementPath,
    },
}

/// A journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub id: EventId,
    pub kind: EventKind,
    pub recorded_at: DateTime<Utc>,
}

impl MatchEvent {
    #[must_use]
    pub fn now(kind: EventKind) -> Self {
        Self {
            id: EventId::new(),
            kind,
            recorded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settlement_path_display() {
        assert_eq!(SettlementPath::Session.to_string(), "SESSION");
        assert_eq!(SettlementPath::Signed.to_string(), "SIGNED");
    }

    #[test]
    fn event_serde_roundtrip() {
        let ev = MatchEvent::now(EventKind::MatchProposed {
            mover: AccountId::random(),
            opponent: AccountId::random(),
            bet: 20,
        });
        let json = serde_json::to_string(&ev).unwrap();
        let back: MatchEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(ev, back);
    }
}
