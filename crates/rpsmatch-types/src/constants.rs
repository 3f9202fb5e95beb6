//! System-wide constants for the RpsMatch engine.

/// Default typed-data domain name.
pub const DEFAULT_DOMAIN_NAME: &str = "RpsMatch";

/// Default typed-data domain version.
pub const DEFAULT_DOMAIN_VERSION: &str = "1";

/// Default chain identifier bound into the domain separator.
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// Smallest bet accepted by default.
pub const DEFAULT_MIN_BET: u64 = 1;

/// Journal entries retained before the oldest is evicted.
pub const DEFAULT_EVENT_JOURNAL_CAPACITY: usize = 10_000;

/// Length of a recoverable secp256k1 signature: `r || s || v`.
pub const SECP256K1_SIGNATURE_LEN: usize = 65;

/// Length of an ed25519 signature envelope: `pubkey || signature`.
pub const ED25519_ENVELOPE_LEN: usize = 96;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "RpsMatch";
