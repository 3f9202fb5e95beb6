//! Signature-authorized settlement.
//!
//! Two players settle a match without a session: each signs a
//! [`MoveCommitment`] naming the other, their current nonce, and the bet.
//! Either party (or anyone holding both) submits the pair.
//!
//! Checks run in order; the first failure wins and nothing is written:
//! 1. Recover both signers (`InvalidSignature`)
//! 2. Mutual addressing (`OpponentMismatch`)
//! 3. Equal bets at or above the minimum (`BetMismatch`, `InvalidBet`)
//! 4. Both signers enrolled with fresh nonces (`NotEnrolled`, `NonceAlreadyUsed`)
//! 5. Active, not blacklisted (`PlayerInactive`, `Blacklisted`)
//! 6. Both surpluses cover the bet (`InsufficientSurplus`, deficient side named)
//! 7. Both nonces advanced, then resolve and settle
//!
//! A replayed pair therefore always fails with `NonceAlreadyUsed`, whatever
//! has happened to either player since. Steps 6 and 7 are staged in one
//! [`LedgerBatch`](rpsmatch_ledger::LedgerBatch) and committed together. The session store is never consulted.

use rpsmatch_ledger::{BalanceLedger, ensure_eligible};
use rpsmatch_matchcore::resolve_and_settle;
use rpsmatch_types::{
    AccountId, MatchOutcome, Player, Result, RpsError, SignedCommitment, constants,
};

use crate::recovery::SignerRecovery;
use crate::typed_data::TypedDataHasher;

/// Settles pairs of signed move commitments against a ledger.
pub struct SignedSettler {
    hasher: TypedDataHasher,
    recovery: Box<dyn SignerRecovery>,
    min_bet: u64,
}

impl SignedSettler {
    #[must_use]
    pub fn new(hasher: TypedDataHasher, recovery: Box<dyn SignerRecovery>) -> Self {
        Self::with_min_bet(hasher, recovery, constants::DEFAULT_MIN_BET)
    }

    #[must_use]
    pub fn with_min_bet(
        hasher: TypedDataHasher,
        recovery: Box<dyn SignerRecovery>,
        min_bet: u64,
    ) -> Self {
        Self {
            hasher,
            recovery,
            min_bet,
        }
    }

    #[must_use]
    pub fn hasher(&self) -> &TypedDataHasher {
        &self.hasher
    }

    #[must_use]
    pub fn scheme(&self) -> &'static str {
        self.recovery.scheme()
    }

    /// Recover the account that signed `signed`.
    pub fn recover(&self, signed: &SignedCommitment) -> Result<AccountId> {
        let digest = self.hasher.digest(&signed.commitment);
        self.recovery
            .verify_and_recover(&digest, &signed.signature)
    }

    /// Settle a match from two signed commitments.
    ///
    /// The outcome lists the first commitment's signer as side A, so a
    /// draw reports it in the `winner` slot.
    pub fn settle(
        &self,
        ledger: &mut BalanceLedger,
        a: &SignedCommitment,
        b: &SignedCommitment,
    ) -> Result<MatchOutcome> {
        let result = self.try_settle(ledger, a, b);
        if let Err(e) = &result {
            tracing::warn!(
                scheme = self.recovery.scheme(),
                nonce_a = a.commitment.nonce,
                nonce_b = b.commitment.nonce,
                error = %e,
                "Signed settlement rejected"
            );
        }
        result
    }

    fn try_settle(
        &self,
        ledger: &mut BalanceLedger,
        a: &SignedCommitment,
        b: &SignedCommitment,
    ) -> Result<MatchOutcome> {
        let signer_a = self.recover(a)?;
        let signer_b = self.recover(b)?;

        let (ca, cb) = (&a.commitment, &b.commitment);
        if ca.opponent != signer_b {
            return Err(RpsError::OpponentMismatch {
                claimed: ca.opponent,
                actual: signer_b,
            });
        }
        if cb.opponent != signer_a {
            return Err(RpsError::OpponentMismatch {
                claimed: cb.opponent,
                actual: signer_a,
            });
        }

        if ca.bet != cb.bet {
            return Err(RpsError::BetMismatch {
                expected: ca.bet,
                actual: cb.bet,
            });
        }
        let bet = ca.bet;
        if bet < self.min_bet {
            return Err(RpsError::InvalidBet {
                bet,
                min: self.min_bet,
            });
        }

        let (pa, pb) = (ledger.require(signer_a)?, ledger.require(signer_b)?);
        ensure_fresh_nonce(pa, ca.nonce)?;
        ensure_fresh_nonce(pb, cb.nonce)?;
        ensure_eligible(pa, pb)?;

        let mut batch = ledger.batch();
        batch.reserve(signer_a, bet)?;
        batch.reserve(signer_b, bet)?;
        batch.consume_nonce(signer_a, ca.nonce)?;
        batch.consume_nonce(signer_b, cb.nonce)?;
        let outcome = resolve_and_settle(
            &mut batch,
            (signer_a, ca.choice),
            (signer_b, cb.choice),
            bet,
        )?;
        batch.commit();

        tracing::info!(
            winner = %outcome.winner,
            loser = %outcome.loser,
            draw = outcome.is_draw,
            bet,
            scheme = self.recovery.scheme(),
            outcome = %outcome,
            "Signed match settled"
        );
        Ok(outcome)
    }
}

/// A replayed commitment is reported as such before anything about the
/// players' current state is looked at.
fn ensure_fresh_nonce(player: &Player, supplied: u64) -> Result<()> {
    if supplied == player.nonce {
        Ok(())
    } else {
        Err(RpsError::NonceAlreadyUsed {
            player: player.account,
            expected: player.nonce,
            supplied,
        })
    }
}

impl std::fmt::Debug for SignedSettler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedSettler")
            .field("domain_separator", &hex::encode(self.hasher.domain_separator()))
            .field("scheme", &self.recovery.scheme())
            .field("min_bet", &self.min_bet)
            .finish()
    }
}
