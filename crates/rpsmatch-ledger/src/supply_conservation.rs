//! Supply conservation invariant checker.
//!
//! Invariant enforced after every operation:
//! ```text
//! Σ(balance) == Σ(credits) - Σ(debits)
//! ```
//!
//! Gameplay only moves funds between players, so a match never changes
//! either side of the equation. Keeping the tracked supply inside `u64`
//! also bounds every individual balance, which is what lets a settlement
//! credit the winner without overflow.

use rpsmatch_types::{AccountId, Result, RpsError};

/// Tracks total credited and debited funds.
#[derive(Debug, Default)]
pub struct SupplyConservation {
    credits: u128,
    debits: u128,
}

impl SupplyConservation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that crediting `amount` keeps total supply representable.
    ///
    /// # Errors
    /// Returns `InsufficientSurplus` if the supply would overflow `u64`.
    pub fn check_credit(&self, player: AccountId, amount: u64) -> Result<()> {
        let headroom = u64::MAX - self.expected_supply();
        if amount > headroom {
            return Err(RpsError::InsufficientSurplus {
                player,
                needed: amount,
                available: headroom,
            });
        }
        Ok(())
    }

    /// Record a credit. Callers run [`Self::check_credit`] first.
    pub fn record_credit(&mut self, amount: u64) {
        self.credits += u128::from(amount);
    }

    /// Record a debit.
    pub fn record_debit(&mut self, amount: u64) {
        self.debits += u128::from(amount);
    }

    /// Expected total supply: credits - debits.
    #[must_use]
    pub fn expected_supply(&self) -> u64 {
        u64::try_from(self.credits.saturating_sub(self.debits)).unwrap_or(u64::MAX)
    }

    #[must_use]
    pub fn total_credits(&self) -> u128 {
        self.credits
    }

    #[must_use]
    pub fn total_debits(&self) -> u128 {
        self.debits
    }

    /// Verify the actual supply (sum of all balances) against the expected.
    ///
    /// # Errors
    /// Returns [`RpsError::SupplyInvariantViolation`] if actual ≠ expected.
    pub fn verify(&self, actual_supply: u128) -> Result<()> {
        let expected = u128::from(self.expected_supply());
        if actual_supply != expected {
            return Err(RpsError::SupplyInvariantViolation {
                reason: format!(
                    "actual supply {actual_supply} != expected {expected} \
                     (credits={}, debits={})",
                    self.credits, self.debits
                ),
            });
        }
        Ok(())
    }
}
