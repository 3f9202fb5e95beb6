//! Relationship guard: who may play whom.
//!
//! The blacklist check is symmetric: if either side has blocked the other,
//! neither may open, complete, or settle a match against the other.

use rpsmatch_types::{Player, Result, RpsError};

/// `true` iff neither player has blacklisted the other.
#[must_use]
pub fn may_interact(a: &Player, b: &Player) -> bool {
    !a.has_blocked(&b.account) && !b.has_blocked(&a.account)
}

/// Like [`may_interact`], but surfaces `Blacklisted` on failure.
pub fn ensure_may_interact(a: &Player, b: &Player) -> Result<()> {
    if may_interact(a, b) {
        Ok(())
    } else {
        Err(RpsError::Blacklisted {
            a: a.account,
            b: b.account,
        })
    }
}

/// Full eligibility gate for a match between two enrolled players:
/// distinct accounts, both active, neither blocking the other.
pub fn ensure_eligible(a: &Player, b: &Player) -> Result<()> {
    if a.account == b.account {
        return Err(RpsError::SelfMatch(a.account));
    }
    for p in [a, b] {
        if !p.active {
            return Err(RpsError::PlayerInactive(p.account));
        }
    }
    ensure_may_interact(a, b)
}

#[cfg(test)]
mod tests {
    use rpsmatch_types::AccountId;

    use super::*;

    fn pair() -> (Player, Player) {
        (
            Player::enrolled(AccountId::random(), "a", 100),
            Player::enrolled(AccountId::random(), "b", 100),
        )
    }

    #[test]
    fn strangers_may_interact() {
        let (a, b) = pair();
        assert!(may_interact(&a, &b));
        assert!(ensure_eligible(&a, &b).is_ok());
    }

    #[test]
    fn block_is_symmetric() {
        let (mut a, b) = pair();
        a.blacklist.insert(b.account);
        assert!(!may_interact(&a, &b));
        assert!(!may_interact(&b, &a));
        assert!(matches!(
            ensure_may_interact(&b, &a),
            Err(RpsError::Blacklisted { .. })
        ));
    }

    #[test]
    fn inactive_player_is_ineligible() {
        let (a, mut b) = pair();
        b.active = false;
        assert_eq!(
            ensure_eligible(&a, &b).unwrap_err(),
            RpsError::PlayerInactive(b.account)
        );
    }

    #[test]
    fn self_match_is_ineligible() {
        let (a, _) = pair();
        assert_eq!(
            ensure_eligible(&a, &a).unwrap_err(),
            RpsError::SelfMatch(a.account)
        );
    }
}
