//! The balance ledger: sole owner of every player record.
//!
//! Tracks per-player `balance`/`escrowed` accounting. All mutations are
//! atomic: either the full operation succeeds or the ledger is unchanged.
//! For every player, `escrowed <= balance` holds before and after each
//! public operation; this is what stops the same funds from backing two
//! overlapping matches.

use std::collections::HashMap;

use rpsmatch_types::{AccountId, Player, Result, RpsError};

use crate::batch::LedgerBatch;
use crate::guard;
use crate::supply_conservation::SupplyConservation;

/// Player registry plus balance and escrow bookkeeping.
///
/// Gameplay components never write player fields directly; they open a
/// [`LedgerBatch`] and commit it.
#[derive(Debug, Default)]
pub struct BalanceLedger {
    players: HashMap<AccountId, Player>,
    supply: SupplyConservation,
}

impl BalanceLedger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------
    // Registration collaborator
    // -----------------------------------------------------------------

    /// Register a player: enrolled, active, nothing escrowed, nonce 0.
    ///
    /// # Errors
    /// - `AlreadyEnrolled` on a second call for the same account
    /// - `InvalidAccount` for the null account
    /// - `InsufficientSurplus` if the initial balance would overflow total supply
    pub fn enroll(
        &mut self,
        account: AccountId,
        display_name: impl Into<String>,
        initial_balance: u64,
    ) -> Result<()> {
        if account.is_null() {
            return Err(RpsError::InvalidAccount {
                reason: "the null account cannot enroll".into(),
            });
        }
        if self.players.contains_key(&account) {
            return Err(RpsError::AlreadyEnrolled(account));
        }
        self.supply.check_credit(account, initial_balance)?;

        let player = Player::enrolled(account, display_name, initial_balance);
        tracing::info!(
            player = %account,
            name = %player.display_name,
            balance = initial_balance,
            "Player enrolled"
        );
        self.players.insert(account, player);
        self.supply.record_credit(initial_balance);
        Ok(())
    }

    /// Start accepting matches again.
    ///
    /// # Errors
    /// `NotEnrolled`, or `PlayerAlreadyActive` if the player is active.
    pub fn activate(&mut self, account: AccountId) -> Result<()> {
        let p = self.require_mut(account)?;
        if p.active {
            return Err(RpsError::PlayerAlreadyActive(account));
        }
        p.active = true;
        tracing::debug!(player = %account, "Player activated");
        Ok(())
    }

    /// Stop accepting matches. Open sessions and their escrow stay as
    /// they are.
    ///
    /// # Errors
    /// `NotEnrolled`, or `PlayerInactive` if the player is already inactive.
    pub fn deactivate(&mut self, account: AccountId) -> Result<()> {
        let p = self.require_mut(account)?;
        if !p.active {
            return Err(RpsError::PlayerInactive(account));
        }
        p.active = false;
        tracing::debug!(
            player = %account,
            escrowed = p.escrowed,
            "Player deactivated"
        );
        Ok(())
    }

    /// Add `other` to the player's blacklist. Returns `false` if it was
    /// already there.
    pub fn block(&mut self, account: AccountId, other: AccountId) -> Result<bool> {
        if account == other {
            return Err(RpsError::SelfMatch(account));
        }
        Ok(self.require_mut(account)?.blacklist.insert(other))
    }

    /// Remove `other` from the player's blacklist. Returns `false` if it
    /// was not there.
    pub fn unblock(&mut self, account: AccountId, other: AccountId) -> Result<bool> {
        Ok(self.require_mut(account)?.blacklist.remove(&other))
    }

    // -----------------------------------------------------------------
    // Custodial collaborator
    // -----------------------------------------------------------------

    /// Credit funds already verified as received.
    ///
    /// # Errors
    /// `NotEnrolled`, or `InsufficientSurplus` if total supply would overflow.
    pub fn credit(&mut self, account: AccountId, amount: u64) -> Result<()> {
        self.supply.check_credit(account, amount)?;
        let p = self.require_mut(account)?;
        // supply bound covers every individual balance
        p.balance += amount;
        self.supply.record_credit(amount);
        Ok(())
    }

    /// Debit funds for withdrawal. Only surplus may leave; escrow stays.
    ///
    /// # Errors
    /// `NotEnrolled`, or `InsufficientSurplus` if `balance - escrowed < amount`.
    pub fn debit(&mut self, account: AccountId, amount: u64) -> Result<()> {
        let p = self.require_mut(account)?;
        if !p.covers(amount) {
            return Err(RpsError::InsufficientSurplus {
                player: account,
                needed: amount,
                available: p.surplus().unwrap_or(0),
            });
        }
        p.balance -= amount;
        self.supply.record_debit(amount);
        Ok(())
    }

    // -----------------------------------------------------------------
    // Gameplay escrow operations
    // -----------------------------------------------------------------

    /// Open a staged batch of gameplay mutations.
    pub fn batch(&mut self) -> LedgerBatch<'_> {
        LedgerBatch::new(self)
    }

    /// Escrow `amount` from the player's surplus.
    ///
    /// # Errors
    /// `InsufficientSurplus` if `balance - escrowed < amount`.
    pub fn reserve(&mut self, account: AccountId, amount: u64) -> Result<()> {
        let mut batch = self.batch();
        batch.reserve(account, amount)?;
        batch.commit();
        Ok(())
    }

    /// Release `amount` of escrow on both sides and move `amount` from
    /// `loser` to `winner`.
    ///
    /// # Errors
    /// `InvariantViolation` if either side never reserved `amount`.
    pub fn release_and_transfer(
        &mut self,
        winner: AccountId,
        loser: AccountId,
        amount: u64,
    ) -> Result<()> {
        let mut batch = self.batch();
        batch.release_and_transfer(winner, loser, amount)?;
        batch.commit();
        Ok(())
    }

    /// Release `amount` of escrow on both sides; balances unchanged.
    ///
    /// # Errors
    /// `InvariantViolation` if either side never reserved `amount`.
    pub fn release_draw(&mut self, a: AccountId, b: AccountId, amount: u64) -> Result<()> {
        let mut batch = self.batch();
        batch.release_draw(a, b, amount)?;
        batch.commit();
        Ok(())
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    #[must_use]
    pub fn player(&self, account: &AccountId) -> Option<&Player> {
        self.players.get(account)
    }

    /// Look up an enrolled player.
    ///
    /// # Errors
    /// `NotEnrolled` if the account has never enrolled.
    pub fn require(&self, account: AccountId) -> Result<&Player> {
        self.players
            .get(&account)
            .ok_or(RpsError::NotEnrolled(account))
    }

    #[must_use]
    pub fn is_enrolled(&self, account: &AccountId) -> bool {
        self.players.get(account).is_some_and(|p| p.enrolled)
    }

    /// Symmetric blacklist check over two enrolled players.
    pub fn may_interact(&self, a: AccountId, b: AccountId) -> Result<bool> {
        Ok(guard::may_interact(self.require(a)?, self.require(b)?))
    }

    /// Sum of every player's balance.
    #[must_use]
    pub fn total_balance(&self) -> u128 {
        self.players.values().map(|p| u128::from(p.balance)).sum()
    }

    /// Sum of every player's escrow.
    #[must_use]
    pub fn total_escrowed(&self) -> u128 {
        self.players.values().map(|p| u128::from(p.escrowed)).sum()
    }

    /// Verify total balance against credits minus debits.
    pub fn verify_supply(&self) -> Result<()> {
        self.supply.verify(self.total_balance())
    }

    /// Verify `escrowed <= balance` for every player, then supply.
    pub fn verify_invariants(&self) -> Result<()> {
        if let Some(p) = self.players.values().find(|p| p.escrowed > p.balance) {
            return Err(RpsError::InvariantViolation {
                reason: format!(
                    "{} has {} escrowed against a balance of {}",
                    p.account, p.escrowed, p.balance
                ),
            });
        }
        self.verify_supply()
    }

    /// Number of enrolled players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    fn require_mut(&mut self, account: AccountId) -> Result<&mut Player> {
        self.players
            .get_mut(&account)
            .ok_or(RpsError::NotEnrolled(account))
    }

    pub(crate) fn write_back(&mut self, player: Player) {
        self.players.insert(player.account, player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enrolled(ledger: &mut BalanceLedger, balance: u64) -> AccountId {
        let id = AccountId::random();
        ledger.enroll(id, "player", balance).unwrap();
        id
    }

    #[test]
    fn enroll_initializes_player() {
        let mut ledger = BalanceLedger::new();
        let id = enrolled(&mut ledger, 100);
        let p = ledger.require(id).unwrap();
        assert!(p.enrolled && p.active);
        assert_eq!((p.balance, p.escrowed, p.nonce), (100, 0, 0));
        assert!(ledger.is_enrolled(&id));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn double_enroll_fails() {
        let mut ledger = BalanceLedger::new();
        let id = enrolled(&mut ledger, 100);
        assert_eq!(
            ledger.enroll(id, "again", 5).unwrap_err(),
            RpsError::AlreadyEnrolled(id)
        );
        assert_eq!(ledger.require(id).unwrap().balance, 100);
    }

    #[test]
    fn null_account_cannot_enroll() {
        let mut ledger = BalanceLedger::new();
        assert!(matches!(
            ledger.enroll(AccountId::NULL, "nobody", 1),
            Err(RpsError::InvalidAccount { .. })
        ));
    }

    #[test]
    fn reserve_respects_surplus() {
        let mut ledger = BalanceLedger::new();
        let id = enrolled(&mut ledger, 100);
        ledger.reserve(id, 60).unwrap();
        let err = ledger.reserve(id, 41).unwrap_err();
        assert_eq!(
            err,
            RpsError::InsufficientSurplus {
                player: id,
                needed: 41,
                available: 40
            }
        );
        ledger.reserve(id, 40).unwrap();
        assert_eq!(ledger.require(id).unwrap().escrowed, 100);
        ledger.verify_invariants().unwrap();
    }

    #[test]
    fn release_and_transfer_is_zero_sum() {
        let mut ledger = BalanceLedger::new();
        let w = enrolled(&mut ledger, 100);
        let l = enrolled(&mut ledger, 100);
        ledger.reserve(w, 25).unwrap();
        ledger.reserve(l, 25).unwrap();
        ledger.release_and_transfer(w, l, 25).unwrap();
        assert_eq!(ledger.require(w).unwrap().balance, 125);
        assert_eq!(ledger.require(l).unwrap().balance, 75);
        assert_eq!(ledger.total_escrowed(), 0);
        assert_eq!(ledger.total_balance(), 200);
        ledger.verify_invariants().unwrap();
    }

    #[test]
    fn release_draw_keeps_balances() {
        let mut ledger = BalanceLedger::new();
        let a = enrolled(&mut ledger, 50);
        let b = enrolled(&mut ledger, 80);
        ledger.reserve(a, 10).unwrap();
        ledger.reserve(b, 10).unwrap();
        ledger.release_draw(a, b, 10).unwrap();
        assert_eq!(ledger.require(a).unwrap().balance, 50);
        assert_eq!(ledger.require(b).unwrap().balance, 80);
        assert_eq!(ledger.total_escrowed(), 0);
    }

    #[test]
    fn failed_transfer_mutates_nothing() {
        let mut ledger = BalanceLedger::new();
        let w = enrolled(&mut ledger, 100);
        let l = enrolled(&mut ledger, 100);
        ledger.reserve(w, 25).unwrap();
        let err = ledger.release_and_transfer(w, l, 25).unwrap_err();
        assert!(matches!(err, RpsError::InvariantViolation { .. }));
        assert_eq!(ledger.require(w).unwrap().escrowed, 25);
        assert_eq!(ledger.require(l).unwrap().balance, 100);
    }

    #[test]
    fn debit_only_from_surplus() {
        let mut ledger = BalanceLedger::new();
        let id = enrolled(&mut ledger, 100);
        ledger.reserve(id, 70).unwrap();
        assert!(matches!(
            ledger.debit(id, 31),
            Err(RpsError::InsufficientSurplus { available: 30, .. })
        ));
        ledger.debit(id, 30).unwrap();
        let p = ledger.require(id).unwrap();
        assert_eq!((p.balance, p.escrowed), (70, 70));
        ledger.verify_invariants().unwrap();
    }

    #[test]
    fn credit_tracks_supply() {
        let mut ledger = BalanceLedger::new();
        let id = enrolled(&mut ledger, 10);
        ledger.credit(id, 15).unwrap();
        assert_eq!(ledger.require(id).unwrap().balance, 25);
        ledger.verify_supply().unwrap();
        assert!(matches!(
            ledger.credit(id, u64::MAX),
            Err(RpsError::InsufficientSurplus { .. })
        ));
        let ghost = AccountId::random();
        assert_eq!(
            ledger.credit(ghost, 1).unwrap_err(),
            RpsError::NotEnrolled(ghost)
        );
        ledger.verify_supply().unwrap();
    }

    #[test]
    fn activation_toggles() {
        let mut ledger = BalanceLedger::new();
        let id = enrolled(&mut ledger, 10);
        assert_eq!(
            ledger.activate(id).unwrap_err(),
            RpsError::PlayerAlreadyActive(id)
        );
        ledger.deactivate(id).unwrap();
        assert!(!ledger.require(id).unwrap().active);
        assert_eq!(
            ledger.deactivate(id).unwrap_err(),
            RpsError::PlayerInactive(id)
        );
        ledger.activate(id).unwrap();
        assert!(ledger.require(id).unwrap().active);
    }

    #[test]
    fn deactivation_keeps_escrow() {
        let mut ledger = BalanceLedger::new();
        let id = enrolled(&mut ledger, 10);
        ledger.reserve(id, 4).unwrap();
        ledger.deactivate(id).unwrap();
        assert_eq!(ledger.require(id).unwrap().escrowed, 4);
    }

    #[test]
    fn blacklist_edits() {
        let mut ledger = BalanceLedger::new();
        let a = enrolled(&mut ledger, 10);
        let b = enrolled(&mut ledger, 10);
        assert!(ledger.may_interact(a, b).unwrap());
        assert!(ledger.block(a, b).unwrap());
        assert!(!ledger.block(a, b).unwrap());
        assert!(!ledger.may_interact(a, b).unwrap());
        assert!(!ledger.may_interact(b, a).unwrap());
        assert!(ledger.unblock(a, b).unwrap());
        assert!(ledger.may_interact(b, a).unwrap());
        assert_eq!(ledger.block(a, a).unwrap_err(), RpsError::SelfMatch(a));
    }
}
