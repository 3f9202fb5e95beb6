//! Resolve-and-settle: the one step both settlement paths share.
//!
//! Runs inside a caller's [`LedgerBatch`], so the escrow release and the
//! balance transfer land in the same commit. Nobody can observe escrow
//! released without the matching transfer, or a winner credited without
//! the loser debited.

use rpsmatch_ledger::LedgerBatch;
use rpsmatch_types::{AccountId, Choice, MatchOutcome, Result};

use crate::resolution::outcome;

/// Resolve two moves and stage the settlement of `bet`.
///
/// Both sides must already have `bet` reserved in `batch`.
pub fn resolve_and_settle(
    batch: &mut LedgerBatch<'_>,
    a: (AccountId, Choice),
    b: (AccountId, Choice),
    bet: u64,
) -> Result<MatchOutcome> {
    let result = outcome(a, b);
    if result.is_draw {
        batch.release_draw(a.0, b.0, bet)?;
    } else {
        batch.release_and_transfer(result.winner, result.loser, bet)?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use rpsmatch_ledger::BalanceLedger;
    use rpsmatch_types::RpsError;

    use super::*;

    fn setup() -> (BalanceLedger, AccountId, AccountId) {
        let mut ledger = BalanceLedger::new();
        let x = AccountId::random();
        let y = AccountId::random();
        ledger.enroll(x, "x", 100).unwrap();
        ledger.enroll(y, "y", 100).unwrap();
        (ledger, x, y)
    }

    #[test]
    fn decisive_moves_bet_to_winner() {
        let (mut ledger, x, y) = setup();
        let mut batch = ledger.batch();
        batch.reserve(x, 20).unwrap();
        batch.reserve(y, 20).unwrap();
        let o = resolve_and_settle(&mut batch, (x, Choice::Paper), (y, Choice::Scissors), 20)
            .unwrap();
        batch.commit();
        assert_eq!(o.winner, y);
        assert_eq!(ledger.require(y).unwrap().balance, 120);
        assert_eq!(ledger.require(x).unwrap().balance, 80);
        assert_eq!(ledger.total_escrowed(), 0);
    }

    #[test]
    fn every_draw_releases_escrow_only() {
        for c in Choice::ALL {
            let (mut ledger, x, y) = setup();
            let mut batch = ledger.batch();
            batch.reserve(x, 20).unwrap();
            batch.reserve(y, 20).unwrap();
            let o = resolve_and_settle(&mut batch, (x, c), (y, c), 20).unwrap();
            batch.commit();
            assert!(o.is_draw);
            assert_eq!(ledger.require(x).unwrap().balance, 100);
            assert_eq!(ledger.require(y).unwrap().balance, 100);
            assert_eq!(ledger.total_escrowed(), 0);
        }
    }

    #[test]
    fn unreserved_side_fails_without_effect() {
        let (mut ledger, x, y) = setup();
        let mut batch = ledger.batch();
        batch.reserve(x, 20).unwrap();
        let err =
            resolve_and_settle(&mut batch, (x, Choice::Rock), (y, Choice::Rock), 20).unwrap_err();
        assert!(matches!(err, RpsError::InvariantViolation { .. }));
        drop(batch);
        assert_eq!(ledger.total_escrowed(), 0);
    }
}
