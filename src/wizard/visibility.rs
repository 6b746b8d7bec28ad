use serde::Serialize;

use crate::domain::{find_account, Account, Visibility};

/// Visibility defaults derived from the selected account and plan features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibilityDecision {
    pub is_joint: bool,
    pub default_visibility: Visibility,
    /// Whether the user may choose between shared and private.
    pub should_show_field: bool,
    /// Selectable values, likely choice first.
    pub options: [Visibility; 2],
}

/// Derives the visibility decision for `account_id`. An account that is not
/// in `accounts` is treated as joint.
pub fn compute_visibility(
    account_id: &str,
    accounts: &[Account],
    allow_private_transactions: bool,
) -> VisibilityDecision {
    let is_joint = match find_account(accounts, account_id) {
        Some(account) => account.is_joint,
        None => {
            if !account_id.trim().is_empty() {
                tracing::debug!(account_id, "unknown account, assuming joint");
            }
            true
        }
    };

    if is_joint {
        VisibilityDecision {
            is_joint,
            default_visibility: Visibility::Shared,
            should_show_field: false,
            options: [Visibility::Shared, Visibility::Private],
        }
    } else {
        VisibilityDecision {
            is_joint,
            default_visibility: Visibility::Private,
            should_show_field: allow_private_transactions,
            options: [Visibility::Private, Visibility::Shared],
        }
    }
}

/// Value written into the form's `visibility` field; free spending overrides
/// the account-derived default.
pub fn visibility_for(decision: &VisibilityDecision, is_free_spending: bool) -> Visibility {
    if is_free_spending {
        Visibility::FreeSpending
    } else {
        decision.default_visibility
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts() -> Vec<Account> {
        vec![
            Account::joint("joint", "House"),
            Account::personal("mine", "Pocket money"),
        ]
    }

    #[test]
    fn joint_account_is_always_shared() {
        for allow in [true, false] {
            let decision = compute_visibility("joint", &accounts(), allow);
            assert!(decision.is_joint);
            assert!(!decision.should_show_field);
            assert_eq!(decision.default_visibility, Visibility::Shared);
            assert_eq!(decision.options, [Visibility::Shared, Visibility::Private]);
        }
    }

    #[test]
    fn personal_account_respects_plan_flag() {
        let locked = compute_visibility("mine", &accounts(), false);
        assert!(!locked.should_show_field);
        assert_eq!(locked.default_visibility, Visibility::Private);

        let open = compute_visibility("mine", &accounts(), true);
        assert!(open.should_show_field);
        assert_eq!(open.options, [Visibility::Private, Visibility::Shared]);
    }

    #[test]
    fn unknown_account_degrades_to_joint() {
        let decision = compute_visibility("ghost", &accounts(), true);
        assert!(decision.is_joint);
        assert_eq!(decision.default_visibility, Visibility::Shared);
        assert!(compute_visibility("", &[], true).is_joint);
    }

    #[test]
    fn free_spending_overrides_default() {
        let decision = compute_visibility("joint", &accounts(), false);
        assert_eq!(visibility_for(&decision, true), Visibility::FreeSpending);
        assert_eq!(visibility_for(&decision, false), Visibility::Shared);
    }
}
