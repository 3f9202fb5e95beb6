//! Player and pending-move records.
//!
//! A player's `balance` is everything credited to them; `escrowed` is the
//! part of it committed to open bets. The difference is the surplus, the
//! only amount that can back a new match or leave as a withdrawal.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{AccountId, Choice};

/// Ledger record for one enrolled account.
///
/// Fields are public for reads; every mutation goes through the balance
/// ledger so `escrowed <= balance` is enforced in one place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub account: AccountId,
    pub display_name: String,
    /// Total custodial funds credited to the player.
    pub balance: u64,
    /// Sum of all currently active bets committed by the player.
    pub escrowed: u64,
    /// Whether the player currently accepts matches.
    pub active: bool,
    /// Set once at registration.
    pub enrolled: bool,
    /// Accounts this player refuses to match against.
    pub blacklist: BTreeSet<AccountId>,
    /// Next nonce expected on a signed move commitment.
    pub nonce: u64,
}

impl Player {
    /// A freshly enrolled, active player with nothing escrowed.
    #[must_use]
    pub fn enrolled(account: AccountId, display_name: impl Into<String>, balance: u64) -> Self {
        Self {
            account,
            display_name: display_name.into(),
            balance,
            escrowed: 0,
            active: true,
            enrolled: true,
            blacklist: BTreeSet::new(),
            nonce: 0,
        }
    }

    /// `balance - escrowed`, or `None` if that would underflow.
    #[must_use]
    pub fn surplus(&self) -> Option<u64> {
        self.balance.checked_sub(self.escrowed)
    }

    /// Whether the surplus covers `amount`.
    #[must_use]
    pub fn covers(&self, amount: u64) -> bool {
        self.surplus().is_some_and(|s| s >= amount)
    }

    #[must_use]
    pub fn has_blocked(&self, other: &AccountId) -> bool {
        self.blacklist.contains(other)
    }
}

/// One side of an open match session.
///
/// `choice == None` means this side has not moved yet. The bet is the
/// same on both mirrored entries of a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingMove {
    pub choice: Option<Choice>,
    pub bet: u64,
}

impl PendingMove {
    #[must_use]
    pub fn played(choice: Choice, bet: u64) -> Self {
        Self {
            choice: Some(choice),
            bet,
        }
    }

    #[must_use]
    pub fn awaiting(bet: u64) -> Self {
        Self { choice: None, bet }
    }

    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.choice.is_some()
    }
}
