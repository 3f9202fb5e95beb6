//! # rpsmatch-settlement
//!
//! **Settlement plane**: signature-authorized settlement, the serialized
//! match engine, and its audit journal.
//!
//! ## Architecture
//!
//! 1. **typed_data**: domain-separated digest of a [`MoveCommitment`](rpsmatch_types::MoveCommitment)
//! 2. **recovery**: [`SignerRecovery`] capability, secp256k1 and ed25519
//! 3. **signed**: [`SignedSettler`] verifies addressing, bets, surplus and
//!    nonces, then settles through the shared resolve step
//! 4. **journal**: bounded [`EventJournal`] of accepted transitions
//! 5. **engine**: [`MatchEngine`] owns ledger, sessions and journal;
//!    [`SharedEngine`] serializes access across threads
//!
//! ## Two Settlement Paths
//!
//! ```text
//! propose ─▶ SessionStore ─┐
//!                          ├─▶ resolve_and_settle ─▶ BalanceLedger
//! signed pair ─▶ SignedSettler ┘
//! ```

pub mod engine;
pub mod journal;
pub mod recovery;
pub mod signed;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testkit;
pub mod typed_data;

pub use engine::{MatchEngine, SharedEngine};
pub use journal::EventJournal;
pub use recovery::{Ed25519Recovery, Secp256k1Recovery, SignerRecovery};
pub use signed::SignedSettler;
pub use typed_data::TypedDataHasher;
