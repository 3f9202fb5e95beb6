//! Match session store: propose, then respond.
//!
//! A session is two mirrored [`PendingMove`] entries keyed by ordered
//! pair: `(mover, opponent)` holds the proposer's move, `(opponent, mover)`
//! holds `None` until the opponent moves. Whether a side has moved is one
//! map lookup.
//!
//! ## Lifecycle
//!
//! ```text
//!   propose(x, y)            respond(y, x)
//!   ┌──────────────┐         ┌─────────────────────────────┐
//!   │ (x,y)=Some   │────────▶│ reserve y, resolve, settle, │
//!   │ (y,x)=None   │         │ delete (x,y) and (y,x)      │
//!   │ reserve x    │         └─────────────────────────────┘
//!   └──────────────┘
//! ```
//!
//! Entries never outlive resolution; a rematch opens a fresh session.

use std::collections::HashMap;

use rpsmatch_ledger::{BalanceLedger, ensure_eligible};
use rpsmatch_types::{AccountId, Choice, MatchOutcome, PendingMove, Result, RpsError, constants};

use crate::settle::resolve_and_settle;

/// What a `propose` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    /// A new session was opened and the mover's bet escrowed.
    Opened,
    /// The call completed an awaiting session; it is resolved and gone.
    Resolved(MatchOutcome),
}

/// Open sessions, keyed by `(mover, opponent)`.
#[derive(Debug)]
pub struct SessionStore {
    moves: HashMap<(AccountId, AccountId), PendingMove>,
    min_bet: u64,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_min_bet(constants::DEFAULT_MIN_BET)
    }

    #[must_use]
    pub fn with_min_bet(min_bet: u64) -> Self {
        Self {
            moves: HashMap::new(),
            min_bet,
        }
    }

    /// Open a session against `opponent`, or complete the one `opponent`
    /// already opened against `mover`.
    ///
    /// Opening escrows `bet` from the mover only. Completing requires the
    /// same `bet`, escrows it from the mover, resolves, settles, and deletes
    /// both entries in one step.
    ///
    /// # Errors
    /// - `NotEnrolled`, `SelfMatch`, `PlayerInactive`, `Blacklisted`
    /// - `ChoiceAlreadyMade` if the mover already has a move outstanding
    /// - `BetMismatch` when completing with a different bet
    /// - `InvalidBet` when opening below the minimum bet
    /// - `InsufficientSurplus` if the mover cannot cover `bet`
    pub fn propose(
        &mut self,
        ledger: &mut BalanceLedger,
        mover: AccountId,
        opponent: AccountId,
        choice: Choice,
        bet: u64,
    ) -> Result<SessionStep> {
        check_participants(ledger, mover, opponent)?;

        match self.moves.get(&(mover, opponent)).copied() {
            Some(own) if own.has_moved() => Err(RpsError::ChoiceAlreadyMade { mover, opponent }),
            Some(awaiting) => self
                .complete(ledger, mover, opponent, choice, bet, awaiting)
                .map(SessionStep::Resolved),
            None => {
                self.open(ledger, mover, opponent, choice, bet)?;
                Ok(SessionStep::Opened)
            }
        }
    }

    /// Counter-move against a session `opponent` opened.
    ///
    /// # Errors
    /// As [`Self::propose`], plus `SessionNotFound` if no session is
    /// awaiting `player`'s move against `opponent`.
    pub fn respond(
        &mut self,
        ledger: &mut BalanceLedger,
        player: AccountId,
        opponent: AccountId,
        choice: Choice,
        bet: u64,
    ) -> Result<MatchOutcome> {
        if !self.moves.contains_key(&(player, opponent)) {
            return Err(RpsError::SessionNotFound {
                mover: opponent,
                opponent: player,
            });
        }
        match self.propose(ledger, player, opponent, choice, bet)? {
            SessionStep::Resolved(outcome) => Ok(outcome),
            SessionStep::Opened => Err(RpsError::InvariantViolation {
                reason: format!("respond by {player} opened a session instead of completing one"),
            }),
        }
    }

    fn open(
        &mut self,
        ledger: &mut BalanceLedger,
        mover: AccountId,
        opponent: AccountId,
        choice: Choice,
        bet: u64,
    ) -> Result<()> {
        if bet < self.min_bet {
            return Err(RpsError::InvalidBet {
                bet,
                min: self.min_bet,
            });
        }
        ledger.reserve(mover, bet)?;

        self.moves
            .insert((mover, opponent), PendingMove::played(choice, bet));
        self.moves
            .insert((opponent, mover), PendingMove::awaiting(bet));

        tracing::debug!(
            mover = %mover,
            opponent = %opponent,
            bet,
            "Match proposed"
        );
        Ok(())
    }

    fn complete(
        &mut self,
        ledger: &mut BalanceLedger,
        mover: AccountId,
        opponent: AccountId,
        choice: Choice,
        bet: u64,
        awaiting: PendingMove,
    ) -> Result<MatchOutcome> {
        if bet != awaiting.bet {
            return Err(RpsError::BetMismatch {
                expected: awaiting.bet,
                actual: bet,
            });
        }
        let proposer_choice = self
            .moves
            .get(&(opponent, mover))
            .and_then(|m| m.choice)
            .ok_or_else(|| RpsError::InvariantViolation {
                reason: format!("session {opponent} -> {mover} has no proposer move"),
            })?;

        let mut batch = ledger.batch();
        batch.reserve(mover, bet)?;
        let outcome = resolve_and_settle(
            &mut batch,
            (opponent, proposer_choice),
            (mover, choice),
            bet,
        )?;
        batch.commit();

        self.moves.remove(&(mover, opponent));
        self.moves.remove(&(opponent, mover));

        tracing::info!(
            winner = %outcome.winner,
            loser = %outcome.loser,
            draw = outcome.is_draw,
            bet,
            outcome = %outcome,
            "Session match resolved"
        );
        Ok(outcome)
    }

    /// The entry for `(mover, opponent)`, if a session is open.
    #[must_use]
    pub fn pending_move(&self, mover: AccountId, opponent: AccountId) -> Option<&PendingMove> {
        self.moves.get(&(mover, opponent))
    }

    /// Opponents with whom `player` has an open session, in account order.
    #[must_use]
    pub fn open_opponents(&self, player: AccountId) -> Vec<AccountId> {
        let mut opponents: Vec<AccountId> = self
            .moves
            .keys()
            .filter(|(mover, _)| *mover == player)
            .map(|(_, opponent)| *opponent)
            .collect();
        opponents.sort_unstable();
        opponents
    }

    /// Number of open sessions.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.moves.len() / 2
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn check_participants(ledger: &BalanceLedger, mover: AccountId, opponent: AccountId) -> Result<()> {
    if mover == opponent {
        return Err(RpsError::SelfMatch(mover));
    }
    ensure_eligible(ledger.require(mover)?, ledger.require(opponent)?)
}
