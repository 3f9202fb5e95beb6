//! Staged ledger mutations.
//!
//! A [`LedgerBatch`] copies each player it touches, applies every operation
//! to those copies, and writes them back only on [`LedgerBatch::commit`].
//! Dropping a batch without committing discards everything, so a
//! multi-step operation (reserve the responder, then settle the match) is
//! all-or-nothing even when a later step fails.
//!
//! Each operation validates before it writes to its staged copies: a failed
//! step leaves the batch exactly as it was before that step.

use std::collections::BTreeMap;

use rpsmatch_types::{AccountId, Player, Result, RpsError};

use crate::balance_ledger::BalanceLedger;

/// An uncommitted set of balance, escrow, and nonce changes.
pub struct LedgerBatch<'a> {
    ledger: &'a mut BalanceLedger,
    staged: BTreeMap<AccountId, Player>,
}

impl<'a> LedgerBatch<'a> {
    pub(crate) fn new(ledger: &'a mut BalanceLedger) -> Self {
        Self {
            ledger,
            staged: BTreeMap::new(),
        }
    }

    fn stage(&mut self, account: AccountId) -> Result<&mut Player> {
        if !self.staged.contains_key(&account) {
            let current = self.ledger.require(account)?.clone();
            self.staged.insert(account, current);
        }
        self.staged
            .get_mut(&account)
            .ok_or(RpsError::NotEnrolled(account))
    }

    /// The player as this batch currently sees them.
    pub fn player(&mut self, account: AccountId) -> Result<&Player> {
        self.stage(account).map(|p| &*p)
    }

    /// Escrow `amount` if the player's surplus covers it.
    ///
    /// # Errors
    /// Returns `InsufficientSurplus` if `balance - escrowed < amount`, or if
    /// that subtraction would underflow.
    pub fn reserve(&mut self, account: AccountId, amount: u64) -> Result<()> {
        let p = self.stage(account)?;
        let available = p.surplus().unwrap_or(0);
        if !p.covers(amount) {
            return Err(RpsError::InsufficientSurplus {
                player: account,
                needed: amount,
                available,
            });
        }
        // covers() bounds escrowed + amount by balance
        p.escrowed += amount;
        tracing::debug!(player = %account, amount, escrowed = p.escrowed, "Escrow reserved");
        Ok(())
    }

    /// Release `amount` of escrow on both sides and move `amount` of
    /// balance from `loser` to `winner`.
    ///
    /// Both sides must have reserved `amount` earlier; anything else is a
    /// programming error and surfaces as `InvariantViolation`.
    pub fn release_and_transfer(
        &mut self,
        winner: AccountId,
        loser: AccountId,
        amount: u64,
    ) -> Result<()> {
        if winner == loser {
            return Err(RpsError::InvariantViolation {
                reason: format!("transfer from {winner} to itself"),
            });
        }
        let mut w = self.stage(winner)?.clone();
        let mut l = self.stage(loser)?.clone();

        w.escrowed = w
            .escrowed
            .checked_sub(amount)
            .ok_or_else(|| unreserved(winner, amount))?;
        l.escrowed = l
            .escrowed
            .checked_sub(amount)
            .ok_or_else(|| unreserved(loser, amount))?;
        l.balance = l
            .balance
            .checked_sub(amount)
            .ok_or_else(|| unreserved(loser, amount))?;
        w.balance = w
            .balance
            .checked_add(amount)
            .ok_or_else(|| RpsError::InvariantViolation {
                reason: format!("balance overflow crediting {winner}"),
            })?;

        self.staged.insert(winner, w);
        self.staged.insert(loser, l);
        Ok(())
    }

    /// Release `amount` of escrow on both sides; balances unchanged.
    pub fn release_draw(&mut self, a: AccountId, b: AccountId, amount: u64) -> Result<()> {
        if a == b {
            return Err(RpsError::InvariantViolation {
                reason: format!("draw release for {a} against itself"),
            });
        }
        let mut pa = self.stage(a)?.clone();
        let mut pb = self.stage(b)?.clone();

        pa.escrowed = pa
            .escrowed
            .checked_sub(amount)
            .ok_or_else(|| unreserved(a, amount))?;
        pb.escrowed = pb
            .escrowed
            .checked_sub(amount)
            .ok_or_else(|| unreserved(b, amount))?;

        self.staged.insert(a, pa);
        self.staged.insert(b, pb);
        Ok(())
    }

    /// Accept `supplied` iff it is the player's next expected nonce, then
    /// advance the stored nonce.
    ///
    /// # Errors
    /// Returns `NonceAlreadyUsed` on any other value.
    pub fn consume_nonce(&mut self, account: AccountId, supplied: u64) -> Result<()> {
        let p = self.stage(account)?;
        let expected = p.nonce;
        let used = RpsError::NonceAlreadyUsed {
            player: account,
            expected,
            supplied,
        };
        if supplied != expected {
            return Err(used);
        }
        p.nonce = expected.checked_add(1).ok_or(used)?;
        Ok(())
    }

    /// Number of players touched so far.
    #[must_use]
    pub fn touched(&self) -> usize {
        self.staged.len()
    }

    /// Write every staged player back to the ledger.
    pub fn commit(self) {
        for (account, player) in self.staged {
            debug_assert!(
                player.escrowed <= player.balance,
                "escrow invariant broken for {account}"
            );
            self.ledger.write_back(player);
        }
    }
}

fn unreserved(account: AccountId, amount: u64) -> RpsError {
    RpsError::InvariantViolation {
        reason: format!("{account} has less than {amount} escrowed"),
    }
}
