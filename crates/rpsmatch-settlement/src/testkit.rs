//! Key generation and commitment signing for tests. **Never use in production.**

use ed25519_dalek::Signer as _;
use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use rpsmatch_types::{AccountId, MoveCommitment, SignedCommitment};

use crate::recovery::{ed25519_account, secp256k1_account};
use crate::typed_data::TypedDataHasher;

/// A test identity that can sign move commitments.
pub trait CommitmentSigner {
    fn account(&self) -> AccountId;

    fn sign(&self, hasher: &TypedDataHasher, commitment: MoveCommitment) -> SignedCommitment;
}

/// secp256k1 key producing `r ‖ s ‖ v` signatures.
pub struct Secp256k1TestSigner {
    key: SigningKey,
}

impl Secp256k1TestSigner {
    pub fn random() -> Self {
        Self {
            key: SigningKey::random(&mut OsRng),
        }
    }
}

impl CommitmentSigner for Secp256k1TestSigner {
    fn account(&self) -> AccountId {
        secp256k1_account(self.key.verifying_key())
    }

    fn sign(&self, hasher: &TypedDataHasher, commitment: MoveCommitment) -> SignedCommitment {
        let digest = hasher.digest(&commitment);
        let (sig, recovery_id) = self
            .key
            .sign_prehash_recoverable(&digest)
            .expect("signing a 32-byte prehash cannot fail");
        let mut bytes = sig.to_bytes().to_vec();
        bytes.push(recovery_id.to_byte());
        SignedCommitment::new(commitment, bytes)
    }
}

/// ed25519 key producing `pubkey ‖ signature` envelopes.
pub struct Ed25519TestSigner {
    key: ed25519_dalek::SigningKey,
}

impl Ed25519TestSigner {
    pub fn random() -> Self {
        Self {
            key: ed25519_dalek::SigningKey::generate(&mut OsRng),
        }
    }
}

impl CommitmentSigner for Ed25519TestSigner {
    fn account(&self) -> AccountId {
        ed25519_account(&self.key.verifying_key())
    }

    fn sign(&self, hasher: &TypedDataHasher, commitment: MoveCommitment) -> SignedCommitment {
        let digest = hasher.digest(&commitment);
        let mut bytes = self.key.verifying_key().to_bytes().to_vec();
        bytes.extend_from_slice(&self.key.sign(&digest).to_bytes());
        SignedCommitment::new(commitment, bytes)
    }
}
