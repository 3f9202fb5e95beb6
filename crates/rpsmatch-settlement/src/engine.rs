//! The match engine: one transaction boundary over ledger, sessions,
//! signed settlement, and the journal.
//!
//! Every public method on [`MatchEngine`] takes `&mut self`, reads and
//! writes under that single borrow, and journals exactly one event on
//! success. [`SharedEngine`] puts the engine behind a mutex so concurrent
//! callers are strictly ordered; there is no read-then-write window on
//! `balance` or `escrowed` between two operations.

use std::sync::Arc;

use parking_lot::Mutex;
use rpsmatch_ledger::BalanceLedger;
use rpsmatch_matchcore::{SessionStep, SessionStore};
use rpsmatch_types::{
    AccountId, Choice, EngineConfig, EventKind, MatchOutcome, MoveCommitment, PendingMove, Player,
    Result, SettlementPath, SignedCommitment, constants,
};

use crate::journal::EventJournal;
use crate::recovery::SignerRecovery;
use crate::signed::SignedSettler;
use crate::typed_data::TypedDataHasher;

#[derive(Debug)]
pub struct MatchEngine {
    config: EngineConfig,
    ledger: BalanceLedger,
    sessions: SessionStore,
    signed: SignedSettler,
    journal: EventJournal,
}

impl MatchEngine {
    /// Build an engine for `config`, verifying signed moves with `recovery`.
    ///
    /// # Errors
    /// `Configuration` if the config does not validate.
    pub fn new(config: EngineConfig, recovery: Box<dyn SignerRecovery>) -> Result<Self> {
        config.validate()?;
        let hasher = TypedDataHasher::new(&config.domain);
        tracing::info!(
            engine = constants::ENGINE_NAME,
            version = constants::VERSION,
            domain = %config.domain.name,
            chain_id = config.domain.chain_id,
            scheme = recovery.scheme(),
            min_bet = config.min_bet,
            "Match engine started"
        );
        Ok(Self {
            ledger: BalanceLedger::new(),
            sessions: SessionStore::with_min_bet(config.min_bet),
            signed: SignedSettler::with_min_bet(hasher, recovery, config.min_bet),
            journal: EventJournal::new(config.event_journal_capacity),
            config,
        })
    }

    // -----------------------------------------------------------------
    // Registration and custody
    // -----------------------------------------------------------------

    pub fn enroll(
        &mut self,
        account: AccountId,
        display_name: impl Into<String>,
        initial_balance: u64,
    ) -> Result<()> {
        self.ledger.enroll(account, display_name, initial_balance)?;
        self.journal.record(EventKind::Enrolled {
            player: account,
            balance: initial_balance,
        });
        Ok(())
    }

    pub fn credit(&mut self, account: AccountId, amount: u64) -> Result<()> {
        self.ledger.credit(account, amount)?;
        self.journal.record(EventKind::Credited {
            player: account,
            amount,
        });
        Ok(())
    }

    /// Withdraw surplus. Escrowed funds never leave.
    pub fn debit(&mut self, account: AccountId, amount: u64) -> Result<()> {
        self.ledger.debit(account, amount)?;
        self.journal.record(EventKind::Debited {
            player: account,
            amount,
        });
        Ok(())
    }

    pub fn activate(&mut self, account: AccountId) -> Result<()> {
        self.ledger.activate(account)?;
        self.journal
            .record(EventKind::Activated { player: account });
        Ok(())
    }

    /// Stop accepting matches. Open sessions stay open and escrowed.
    pub fn deactivate(&mut self, account: AccountId) -> Result<()> {
        self.ledger.deactivate(account)?;
        self.journal
            .record(EventKind::Deactivated { player: account });
        Ok(())
    }

    /// Returns `true` if `other` was newly blocked.
    pub fn block(&mut self, account: AccountId, other: AccountId) -> Result<bool> {
        let changed = self.ledger.block(account, other)?;
        if changed {
            self.journal.record(EventKind::Blocked {
                player: account,
                other,
            });
        }
        Ok(changed)
    }

    /// Returns `true` if `other` was on the blacklist.
    pub fn unblock(&mut self, account: AccountId, other: AccountId) -> Result<bool> {
        let changed = self.ledger.unblock(account, other)?;
        if changed {
            self.journal.record(EventKind::Unblocked {
                player: account,
                other,
            });
        }
        Ok(changed)
    }

    // -----------------------------------------------------------------
    // Matches
    // -----------------------------------------------------------------

    /// Open a session against `opponent`, or complete the one awaiting
    /// `mover`'s move.
    pub fn propose(
        &mut self,
        mover: AccountId,
        opponent: AccountId,
        choice: Choice,
        bet: u64,
    ) -> Result<SessionStep> {
        let step = self
            .sessions
            .propose(&mut self.ledger, mover, opponent, choice, bet)?;
        self.journal.record(match step {
            SessionStep::Opened => EventKind::MatchProposed {
                mover,
                opponent,
                bet,
            },
            SessionStep::Resolved(outcome) => EventKind::MatchResolved {
                outcome,
                bet,
                via: SettlementPath::Session,
            },
        });
        Ok(step)
    }

    /// Counter-move against a session `opponent` opened.
    pub fn respond(
        &mut self,
        player: AccountId,
        opponent: AccountId,
        choice: Choice,
        bet: u64,
    ) -> Result<MatchOutcome> {
        let outcome = self
            .sessions
            .respond(&mut self.ledger, player, opponent, choice, bet)?;
        self.journal.record(EventKind::MatchResolved {
            outcome,
            bet,
            via: SettlementPath::Session,
        });
        Ok(outcome)
    }

    /// Settle a match from two signed commitments, bypassing sessions.
    pub fn settle_signed(
        &mut self,
        a: &SignedCommitment,
        b: &SignedCommitment,
    ) -> Result<MatchOutcome> {
        let outcome = self.signed.settle(&mut self.ledger, a, b)?;
        self.journal.record(EventKind::MatchResolved {
            outcome,
            bet: a.commitment.bet,
            via: SettlementPath::Signed,
        });
        Ok(outcome)
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    #[must_use]
    pub fn player(&self, account: &AccountId) -> Option<&Player> {
        self.ledger.player(account)
    }

    pub fn may_interact(&self, a: AccountId, b: AccountId) -> Result<bool> {
        self.ledger.may_interact(a, b)
    }

    #[must_use]
    pub fn pending_move(&self, mover: AccountId, opponent: AccountId) -> Option<&PendingMove> {
        self.sessions.pending_move(mover, opponent)
    }

    #[must_use]
    pub fn open_opponents(&self, player: AccountId) -> Vec<AccountId> {
        self.sessions.open_opponents(player)
    }

    /// The digest a player must sign for `commitment` on this engine.
    #[must_use]
    pub fn digest_for(&self, commitment: &MoveCommitment) -> [u8; 32] {
        self.signed.hasher().digest(commitment)
    }

    #[must_use]
    pub fn hasher(&self) -> &TypedDataHasher {
        self.signed.hasher()
    }

    #[must_use]
    pub fn domain_separator(&self) -> [u8; 32] {
        self.signed.hasher().domain_separator()
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn ledger(&self) -> &BalanceLedger {
        &self.ledger
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    #[must_use]
    pub fn journal(&self) -> &EventJournal {
        &self.journal
    }

    /// Per-player escrow bound, then total supply.
    pub fn verify_invariants(&self) -> Result<()> {
        self.ledger.verify_invariants()
    }
}

// =====================================================================
// Shared handle
// =====================================================================

/// Cloneable, thread-safe handle to one [`MatchEngine`].
///
/// Each call holds the lock for the whole operation.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<MatchEngine>>,
}

impl SharedEngine {
    #[must_use]
    pub fn new(engine: MatchEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Run `f` as one serialized transaction.
    pub fn transact<R>(&self, f: impl FnOnce(&mut MatchEngine) -> R) -> R {
        let mut engine = self.inner.lock();
        f(&mut engine)
    }

    pub fn enroll(&self, account: AccountId, display_name: &str, balance: u64) -> Result<()> {
        self.transact(|e| e.enroll(account, display_name, balance))
    }

    pub fn credit(&self, account: AccountId, amount: u64) -> Result<()> {
        self.transact(|e| e.credit(account, amount))
    }

    pub fn propose(
        &self,
        mover: AccountId,
        opponent: AccountId,
        choice: Choice,
        bet: u64,
    ) -> Result<SessionStep> {
        self.transact(|e| e.propose(mover, opponent, choice, bet))
    }

    pub fn respond(
        &self,
        player: AccountId,
        opponent: AccountId,
        choice: Choice,
        bet: u64,
    ) -> Result<MatchOutcome> {
        self.transact(|e| e.respond(player, opponent, choice, bet))
    }

    pub fn settle_signed(&self, a: &SignedCommitment, b: &SignedCommitment) -> Result<MatchOutcome> {
        self.transact(|e| e.settle_signed(a, b))
    }

    /// Snapshot of a player record.
    #[must_use]
    pub fn player(&self, account: &AccountId) -> Option<Player> {
        self.transact(|e| e.player(account).cloned())
    }

    pub fn verify_invariants(&self) -> Result<()> {
        self.transact(|e| e.verify_invariants())
    }
}
