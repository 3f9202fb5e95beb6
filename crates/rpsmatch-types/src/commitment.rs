//! Signed move commitments: the input to signature-authorized settlement.
//!
//! Each player independently signs `(choice, opponent, nonce, bet)` over a
//! domain-separated digest. Two such commitments, one per player, settle a
//! match without either player opening a session first.

use serde::{Deserialize, Serialize};

use crate::{AccountId, Choice, Result};

/// The structured message a player signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveCommitment {
    pub choice: Choice,
    /// The account the signer believes they are playing against.
    pub opponent: AccountId,
    /// Must equal the signer's next expected nonce.
    pub nonce: u64,
    pub bet: u64,
}

impl MoveCommitment {
    #[must_use]
    pub fn new(choice: Choice, opponent: AccountId, nonce: u64, bet: u64) -> Self {
        Self {
            choice,
            opponent,
            nonce,
            bet,
        }
    }

    /// Build a commitment from its wire form, where the choice is a raw byte.
    ///
    /// # Errors
    /// Returns `InvalidChoice` for `0` (no move) or any byte above `3`.
    pub fn from_wire(choice: u8, opponent: AccountId, nonce: u64, bet: u64) -> Result<Self> {
        Ok(Self::new(Choice::try_from(choice)?, opponent, nonce, bet))
    }
}

/// A commitment together with the signature produced over its digest.
///
/// The signature layout depends on the recovery scheme in use; the
/// settlement engine never inspects it beyond handing it to the recoverer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedCommitment {
    pub commitment: MoveCommitment,
    pub signature: Vec<u8>,
}

impl SignedCommitment {
    #[must_use]
    pub fn new(commitment: MoveCommitment, signature: Vec<u8>) -> Self {
        Self {
            commitment,
            signature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RpsError;

    #[test]
    fn from_wire_rejects_empty_choice() {
        let err = MoveCommitment::from_wire(0, AccountId::random(), 0, 10).unwrap_err();
        assert_eq!(err, RpsError::InvalidChoice(0));
    }

    #[test]
    fn from_wire_accepts_played_choice() {
        let opp = AccountId::random();
        let c = MoveCommitment::from_wire(3, opp, 4, 10).unwrap();
        assert_eq!(c, MoveCommitment::new(Choice::Scissors, opp, 4, 10));
    }

    #[test]
    fn signed_commitment_serde() {
        let c = SignedCommitment::new(
            MoveCommitment::new(Choice::Paper, AccountId::random(), 1, 5),
            vec![7u8; 65],
        );
        let json = serde_json::to_string(&c).unwrap();
        let back: SignedCommitment = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
