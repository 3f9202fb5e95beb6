//! Signer recovery: digest + signature → account.
//!
//! Settlement logic only needs "who signed this digest"; the primitive
//! behind it is a [`SignerRecovery`] implementation.
//!
//! - [`Secp256k1Recovery`]: 65-byte `r ‖ s ‖ v` recoverable ECDSA. The
//!   account is the last 20 bytes of Keccak-256 of the uncompressed public
//!   key. High-S signatures are rejected (malleability).
//! - [`Ed25519Recovery`]: 96-byte `pubkey ‖ signature` envelope, verified
//!   strictly. The account is derived from the public key with SHA-256.

use ed25519_dalek::{Signature as EdSignature, VerifyingKey as EdVerifyingKey};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use rpsmatch_types::{AccountId, Result, RpsError, constants};
use sha2::{Digest, Sha256};

use crate::typed_data::keccak256;

/// Recovers the account that signed a 32-byte digest.
pub trait SignerRecovery: Send + Sync {
    /// Short scheme name for logs.
    fn scheme(&self) -> &'static str;

    /// # Errors
    /// Returns `InvalidSignature` if the signature is malformed, does not
    /// verify, or recovers to the null account.
    fn verify_and_recover(&self, digest: &[u8; 32], signature: &[u8]) -> Result<AccountId>;
}

fn invalid(reason: impl Into<String>) -> RpsError {
    RpsError::InvalidSignature {
        reason: reason.into(),
    }
}

fn non_null(account: AccountId) -> Result<AccountId> {
    if account.is_null() {
        Err(invalid("signature recovers to the null account"))
    } else {
        Ok(account)
    }
}

// ---------------------------------------------------------------------------
// secp256k1
// ---------------------------------------------------------------------------

/// Account for a secp256k1 public key.
#[must_use]
pub fn secp256k1_account(key: &VerifyingKey) -> AccountId {
    let point = key.to_encoded_point(false);
    // skip the 0x04 SEC1 tag
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    AccountId(bytes)
}

/// Recoverable ECDSA over secp256k1.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Recovery;

impl Secp256k1Recovery {
    fn parse_recovery_id(v: u8) -> Result<RecoveryId> {
        let normalized = match v {
            0 | 1 => v,
            27 | 28 => v - 27,
            other => return Err(invalid(format!("recovery id {other} out of range"))),
        };
        RecoveryId::from_byte(normalized)
            .ok_or_else(|| invalid(format!("recovery id {v} out of range")))
    }
}

impl SignerRecovery for Secp256k1Recovery {
    fn scheme(&self) -> &'static str {
        "secp256k1"
    }

    fn verify_and_recover(&self, digest: &[u8; 32], signature: &[u8]) -> Result<AccountId> {
        if signature.len() != constants::SECP256K1_SIGNATURE_LEN {
            return Err(invalid(format!(
                "expected {} bytes, got {}",
                constants::SECP256K1_SIGNATURE_LEN,
                signature.len()
            )));
        }
        let sig = Signature::from_slice(&signature[..64])
            .map_err(|_| invalid("r or s out of range"))?;
        if sig.normalize_s().is_some() {
            return Err(invalid("high-S signature"));
        }
        let recovery_id = Self::parse_recovery_id(signature[64])?;
        let key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
            .map_err(|_| invalid("public key recovery failed"))?;
        non_null(secp256k1_account(&key))
    }
}

// ---------------------------------------------------------------------------
// ed25519
// ---------------------------------------------------------------------------

/// Account for an ed25519 public key.
#[must_use]
pub fn ed25519_account(key: &EdVerifyingKey) -> AccountId {
    let mut hasher = Sha256::new();
    hasher.update(b"rpsmatch:account:ed25519:v1:");
    hasher.update(key.as_bytes());
    let hash = hasher.finalize();
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    AccountId(bytes)
}

/// Ed25519 with the public key carried alongside the signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Recovery;

impl SignerRecovery for Ed25519Recovery {
    fn scheme(&self) -> &'static str {
        "ed25519"
    }

    fn verify_and_recover(&self, digest: &[u8; 32], signature: &[u8]) -> Result<AccountId> {
        let envelope: &[u8; constants::ED25519_ENVELOPE_LEN] =
            signature.try_into().map_err(|_| {
                invalid(format!(
                    "expected {} bytes, got {}",
                    constants::ED25519_ENVELOPE_LEN,
                    signature.len()
                ))
            })?;
        let mut pk = [0u8; 32];
        pk.copy_from_slice(&envelope[..32]);
        let mut sig = [0u8; 64];
        sig.copy_from_slice(&envelope[32..]);

        let key = EdVerifyingKey::from_bytes(&pk).map_err(|_| invalid("bad ed25519 public key"))?;
        key.verify_strict(digest, &EdSignature::from_bytes(&sig))
            .map_err(|_| invalid("ed25519 verification failed"))?;
        non_null(ed25519_account(&key))
    }
}
