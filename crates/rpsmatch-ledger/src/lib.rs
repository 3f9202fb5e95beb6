//! # rpsmatch-ledger
//!
//! **Balance Ledger**: player registry, balance/escrow accounting, and the
//! relationship guard.
//!
//! ## Architecture
//!
//! 1. **BalanceLedger**: sole owner of every [`Player`](rpsmatch_types::Player)
//!    record; enrollment, activation, blacklist edits, credit/debit
//! 2. **LedgerBatch**: staged reserve/transfer/draw/nonce mutations,
//!    committed all at once or not at all
//! 3. **guard**: symmetric blacklist check and match eligibility
//! 4. **SupplyConservation**: `Σ balance == Σ credits - Σ debits`
//!
//! ## Escrow Flow
//!
//! ```text
//! reserve(mover) → … → reserve(responder) → release_and_transfer | release_draw
//! ```
//!
//! `escrowed <= balance` holds for every player after every commit.

pub mod balance_ledger;
pub mod batch;
pub mod guard;
pub mod supply_conservation;

pub use balance_ledger::BalanceLedger;
pub use batch::LedgerBatch;
pub use guard::{ensure_eligible, ensure_may_interact, may_interact};
pub use supply_conservation::SupplyConservation;
