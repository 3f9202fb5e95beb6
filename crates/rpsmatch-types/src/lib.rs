//! # rpsmatch-types
//!
//! Shared types, errors, and configuration for the **RpsMatch** engine.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`EventId`]
//! - **Moves**: [`Choice`], [`PendingMove`], [`MatchOutcome`]
//! - **Players**: [`Player`]
//! - **Signed moves**: [`MoveCommitment`], [`SignedCommitment`]
//! - **Journal**: [`MatchEvent`], [`EventKind`], [`SettlementPath`]
//! - **Configuration**: [`EngineConfig`], [`SigningDomain`]
//! - **Errors**: [`RpsError`] with `RPS_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod choice;
pub mod commitment;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod outcome;
pub mod player;

pub use choice::*;
pub use commitment::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use outcome::*;
pub use player::*;

// Constants are accessed via `rpsmatch_types::constants::FOO`
// (not re-exported to avoid name collisions).
