//! Domain-separated structured hashing of move commitments.
//!
//! The digest a player signs is bound to both the message shape and the
//! engine instance:
//!
//! ```text
//! domain_separator = keccak(DOMAIN_TYPEHASH ‖ keccak(name) ‖ keccak(version)
//!                           ‖ chainId ‖ verifyingContract)
//! struct_hash      = keccak(MOVE_TYPEHASH ‖ choice ‖ opponent ‖ nonce ‖ bet)
//! digest           = keccak(0x19 ‖ 0x01 ‖ domain_separator ‖ struct_hash)
//! ```
//!
//! Every field is left-padded to a 32-byte word. A signature over one
//! domain or one message type never verifies under another.

use rpsmatch_types::{AccountId, MoveCommitment, SigningDomain};
use sha3::{Digest, Keccak256};

/// Type string of the domain struct.
pub const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Type string of a signed move.
pub const MOVE_TYPE: &str = "Move(uint8 choice,address opponent,uint256 nonce,uint256 bet)";

/// Keccak-256 of `data`.
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

fn word_u64(v: u64) -> [u8; 32] {
    let mut w = [0u8; 32];
    w[24..].copy_from_slice(&v.to_be_bytes());
    w
}

fn word_u8(v: u8) -> [u8; 32] {
    let mut w = [0u8; 32];
    w[31] = v;
    w
}

fn word_address(a: &AccountId) -> [u8; 32] {
    let mut w = [0u8; 32];
    w[12..].copy_from_slice(a.as_bytes());
    w
}

/// Hashes commitments for one signing domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedDataHasher {
    domain_separator: [u8; 32],
}

impl TypedDataHasher {
    #[must_use]
    pub fn new(domain: &SigningDomain) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(keccak256(DOMAIN_TYPE.as_bytes()));
        hasher.update(keccak256(domain.name.as_bytes()));
        hasher.update(keccak256(domain.version.as_bytes()));
        hasher.update(word_u64(domain.chain_id));
        hasher.update(word_address(&domain.verifying_contract));
        Self {
            domain_separator: hasher.finalize().into(),
        }
    }

    #[must_use]
    pub fn domain_separator(&self) -> [u8; 32] {
        self.domain_separator
    }

    /// Hash of the commitment fields alone, independent of the domain.
    #[must_use]
    pub fn struct_hash(commitment: &MoveCommitment) -> [u8; 32] {
        let mut hasher = Keccak256::new();
        hasher.update(keccak256(MOVE_TYPE.as_bytes()));
        hasher.update(word_u8(commitment.choice.as_u8()));
        hasher.update(word_address(&commitment.opponent));
        hasher.update(word_u64(commitment.nonce));
        hasher.update(word_u64(commitment.bet));
        hasher.finalize().into()
    }

    /// The 32-byte digest a player signs.
    #[must_use]
    pub fn digest(&self, commitment: &MoveCommitment) -> [u8; 32] {
        let mut hasher = Keccak256::new();
        hasher.update([0x19, 0x01]);
        hasher.update(self.domain_separator);
        hasher.update(Self::struct_hash(commitment));
        hasher.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use rpsmatch_types::Choice;

    use super::*;

    fn commitment() -> MoveCommitment {
        MoveCommitment::new(Choice::Rock, AccountId::from_bytes([7u8; 20]), 0, 20)
    }

    #[test]
    fn keccak_of_empty_input() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn digest_is_deterministic() {
        let h = TypedDataHasher::new(&SigningDomain::default());
        assert_eq!(h.digest(&commitment()), h.digest(&commitment()));
    }

    #[test]
    fn digest_binds_every_field() {
        let h = TypedDataHasher::new(&SigningDomain::default());
        let base = h.digest(&commitment());

        let mut c = commitment();
        c.choice = Choice::Paper;
        assert_ne!(h.digest(&c), base);

        let mut c = commitment();
        c.opponent = AccountId::from_bytes([8u8; 20]);
        assert_ne!(h.digest(&c), base);

        let mut c = commitment();
        c.nonce = 1;
        assert_ne!(h.digest(&c), base);

        let mut c = commitment();
        c.bet = 21;
        assert_ne!(h.digest(&c), base);
    }

    #[test]
    fn digest_binds_the_domain() {
        let a = TypedDataHasher::new(&SigningDomain::default());
        let mut other = SigningDomain::default();
        other.chain_id = 5;
        let b = TypedDataHasher::new(&other);
        assert_ne!(a.domain_separator(), b.domain_separator());
        assert_ne!(a.digest(&commitment()), b.digest(&commitment()));

        let mut other = SigningDomain::default();
        other.verifying_contract = AccountId::from_bytes([1u8; 20]);
        assert_ne!(
            a.digest(&commitment()),
            TypedDataHasher::new(&other).digest(&commitment())
        );
    }

    #[test]
    fn words_are_left_padded() {
        assert_eq!(word_u64(1)[31], 1);
        assert!(word_u64(1)[..31].iter().all(|b| *b == 0));
        let a = AccountId::from_bytes([0xab; 20]);
        assert!(word_address(&a)[..12].iter().all(|b| *b == 0));
        assert_eq!(&word_address(&a)[12..], a.as_bytes());
    }
}
