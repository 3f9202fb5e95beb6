//! Error types for the RpsMatch engine.
//!
//! All errors use the `RPS_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Registration / player state errors
//! - 2xx: Ledger errors
//! - 3xx: Match session errors
//! - 4xx: Signature settlement errors
//! - 9xx: General / internal errors
//!
//! Every error is a validation failure: when one is returned, no ledger or
//! session state has been written.

use thiserror::Error;

use crate::AccountId;

/// Central error enum for all RpsMatch operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RpsError {
    // =================================================================
    // Registration / Player State Errors (1xx)
    // =================================================================
    /// The account has no enrollment record.
    #[error("RPS_ERR_100: Player not enrolled: {0}")]
    NotEnrolled(AccountId),

    /// `enroll` was called twice for the same account.
    #[error("RPS_ERR_101: Player already enrolled: {0}")]
    AlreadyEnrolled(AccountId),

    /// The player is not accepting matches (or is already inactive).
    #[error("RPS_ERR_102: Player inactive: {0}")]
    PlayerInactive(AccountId),

    /// `activate` was called on a player who is already active.
    #[error("RPS_ERR_103: Player already active: {0}")]
    PlayerAlreadyActive(AccountId),

    /// One side has blacklisted the other.
    #[error("RPS_ERR_104: Blacklisted: {a} and {b} may not interact")]
    Blacklisted { a: AccountId, b: AccountId },

    /// A player named themselves as opponent.
    #[error("RPS_ERR_105: Player cannot match against themselves: {0}")]
    SelfMatch(AccountId),

    /// An account identifier could not be parsed.
    #[error("RPS_ERR_106: Invalid account: {reason}")]
    InvalidAccount { reason: String },

    // =================================================================
    // Ledger Errors (2xx)
    // =================================================================
    /// `balance - escrowed` does not cover the amount (or the arithmetic
    /// would overflow).
    #[error("RPS_ERR_200: Insufficient surplus for {player}: need {needed}, have {available}")]
    InsufficientSurplus {
        player: AccountId,
        needed: u64,
        available: u64,
    },

    /// A bet below the configured minimum.
    #[error("RPS_ERR_201: Invalid bet {bet}: minimum is {min}")]
    InvalidBet { bet: u64, min: u64 },

    /// Total balance no longer matches credits minus debits.
    #[error("RPS_ERR_202: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // Match Session Errors (3xx)
    // =================================================================
    /// The caller already has a move outstanding against this opponent.
    #[error("RPS_ERR_300: Choice already made by {mover} against {opponent}")]
    ChoiceAlreadyMade {
        mover: AccountId,
        opponent: AccountId,
    },

    /// The completing bet differs from the escrowed bet.
    #[error("RPS_ERR_301: Bet mismatch: expected {expected}, got {actual}")]
    BetMismatch { expected: u64, actual: u64 },

    /// No open session is awaiting this player's move.
    #[error("RPS_ERR_302: No open session between {mover} and {opponent}")]
    SessionNotFound {
        mover: AccountId,
        opponent: AccountId,
    },

    /// A choice byte outside Rock/Paper/Scissors, or `None` played as a move.
    #[error("RPS_ERR_303: Invalid choice: {0}")]
    InvalidChoice(u8),

    // =================================================================
    // Signature Settlement Errors (4xx)
    // =================================================================
    /// The signature is malformed or recovers to the null account.
    #[error("RPS_ERR_400: Invalid signature: {reason}")]
    InvalidSignature { reason: String },

    /// A commitment's claimed opponent is not the other signer.
    #[error("RPS_ERR_401: Opponent mismatch: commitment names {claimed}, signer is {actual}")]
    OpponentMismatch {
        claimed: AccountId,
        actual: AccountId,
    },

    /// The commitment nonce is not the player's next expected nonce.
    #[error("RPS_ERR_402: Nonce already used by {player}: expected {expected}, got {supplied}")]
    NonceAlreadyUsed {
        player: AccountId,
        expected: u64,
        supplied: u64,
    },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// A settlement was attempted against escrow that was never reserved.
    /// This is a programming error, not a user-facing condition.
    #[error("RPS_ERR_900: Escrow invariant violation: {reason}")]
    InvariantViolation { reason: String },

    /// Configuration error (invalid config file, bad values, etc.).
    #[error("RPS_ERR_901: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, RpsError>;

impl From<serde_json::Error> for RpsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = RpsError::NotEnrolled(AccountId::NULL);
        let msg = format!("{err}");
        assert!(msg.starts_with("RPS_ERR_100"), "Got: {msg}");
    }

    #[test]
    fn insufficient_surplus_display() {
        let err = RpsError::InsufficientSurplus {
            player: AccountId::NULL,
            needed: 25,
            available: 10,
        };
        let msg = format!("{err}");
        assert!(msg.contains("RPS_ERR_200"));
        assert!(msg.contains("25"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn all_errors_have_rps_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(RpsError::BetMismatch {
                expected: 20,
                actual: 25,
            }),
            Box::new(RpsError::InvalidChoice(7)),
            Box::new(RpsError::InvalidSignature {
                reason: "null signer".into(),
            }),
            Box::new(RpsError::InvariantViolation {
                reason: "test".into(),
            }),
            Box::new(RpsError::Configuration("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("RPS_ERR_"),
                "Error missing RPS_ERR_ prefix: {msg}"
            );
        }
    }

    #[test]
    fn json_errors_become_configuration() {
        let err: RpsError = serde_json::from_str::<u64>("nope").unwrap_err().into();
        assert!(matches!(err, RpsError::Configuration(_)));
    }
}
