//! Identifiers used throughout RpsMatch.
//!
//! Accounts are 20-byte addresses derived from a signer's public key.
//! Events use UUIDv7 for time-ordered sorting.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, RpsError};

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// A player's account identifier: 20 bytes, rendered as `0x`-prefixed hex.
///
/// The all-zero identifier is the null account. Signer recovery never
/// yields it for a valid signature, so settlement treats it as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(pub [u8; 20]);

impl AccountId {
    /// The null account.
    pub const NULL: Self = Self([0u8; 20]);

    #[must_use]
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Parse from hex, with or without a `0x` prefix.
    ///
    /// # Errors
    /// Returns `InvalidAccount` if the string is not 40 hex digits.
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let raw = hex::decode(digits).map_err(|e| RpsError::InvalidAccount {
            reason: e.to_string(),
        })?;
        let bytes: [u8; 20] = raw.try_into().map_err(|v: Vec<u8>| RpsError::InvalidAccount {
            reason: format!("expected 20 bytes, got {}", v.len()),
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl TryFrom<String> for AccountId {
    type Error = RpsError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.to_string()
    }
}

// ---------------------------------------------------------------------------
// EventId
// ---------------------------------------------------------------------------

/// Unique identifier for a journal event. Uses UUIDv7 for time-ordered sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "evt:{}", self.0)
    }
}

/// Random account for unit tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl AccountId {
    pub fn random() -> Self {
        let mut bytes: [u8; 20] = rand::random();
        // keep clear of the null account
        bytes[0] |= 1;
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_account() {
        assert!(AccountId::NULL.is_null());
        assert!(!AccountId::random().is_null());
    }

    #[test]
    fn hex_roundtrip_with_and_without_prefix() {
        let id = AccountId::random();
        let rendered = id.to_string();
        assert!(rendered.starts_with("0x"));
        assert_eq!(rendered.len(), 42);
        assert_eq!(AccountId::from_hex(&rendered).unwrap(), id);
        assert_eq!(AccountId::from_hex(&rendered[2..]).unwrap(), id);
    }

    #[test]
    fn serializes_as_hex_string() {
        let id = AccountId::from_bytes([0xab; 20]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        assert_eq!(serde_json::from_str::<AccountId>(&json).unwrap(), id);
        assert!(serde_json::from_str::<AccountId>("\"0x12\"").is_err());
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        let err = AccountId::from_hex("0xdeadbeef").unwrap_err();
        assert!(matches!(err, RpsError::InvalidAccount { .. }));
        let err = AccountId::from_hex("not-hex").unwrap_err();
        assert!(matches!(err, RpsError::InvalidAccount { .. }));
    }

    #[test]
    fn event_id_ordering() {
        let a = EventId::new();
        let b = EventId::new();
        assert!(a < b);
    }
}
