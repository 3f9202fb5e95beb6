//! # rpsmatch-matchcore
//!
//! **Deterministic match resolution and the session store.**
//!
//! - **resolution**: pure `(Choice, Choice) -> Resolution`, zero side effects
//! - **settle**: resolve + release/transfer staged in one ledger batch,
//!   shared by the session path and the signed path
//! - **session_store**: propose → respond state machine over mirrored
//!   pending-move entries

pub mod resolution;
pub mod session_store;
pub mod settle;

pub use resolution::{Resolution, Side, outcome, resolve};
pub use session_store::{SessionStep, SessionStore};
pub use settle::resolve_and_settle;
