//! Action authorization between an acting user and a target user.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{policy::super_role_override, roles::Role};
use crate::models::User;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    View,
    Create,
    Edit,
    Delete,
    Manage,
}

impl Action {
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Manage => "manage",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const EVERYTHING: &[Action] = &[
    Action::View,
    Action::Create,
    Action::Edit,
    Action::Delete,
    Action::Manage,
];

/// Decides whether `actor` may perform `action` on `target`.
///
/// Rules are evaluated in order and the first one that applies wins:
/// super role, self action, precedence, admin, then sales/support read-only
/// access to end users.
pub fn can_perform_action(actor: Option<&User>, target: Option<&User>, action: Action) -> bool {
    let Some(actor) = actor else {
        return false;
    };
    let Some(actor_role) = actor.role else {
        return false;
    };

    if super_role_override(actor) {
        return true;
    }

    if target.is_some_and(|t| t.id == actor.id) {
        return matches!(action, Action::View | Action::Edit);
    }

    let target_role = target.and_then(|t| t.role);
    if let Some(target_role) = target_role {
        if actor_role.level() <= target_role.level() {
            return false;
        }
    }

    match actor_role {
        Role::Admin => target_role != Some(Role::SuperAdmin),
        Role::Sales | Role::Support => {
            action == Action::View && target_role.is_some_and(Role::is_end_user)
        }
        _ => false,
    }
}

/// The generic actions a user's role permits, independent of any target.
pub fn allowed_actions(user: Option<&User>) -> &'static [Action] {
    match user.and_then(|u| u.role) {
        Some(Role::SuperAdmin | Role::Admin) => EVERYTHING,
        Some(Role::Sales) => &[Action::View, Action::Create, Action::Edit],
        Some(Role::Support) => &[Action::View, Action::Edit],
        Some(Role::Dealer | Role::Architect | Role::General | Role::Customer) => &[Action::View],
        Some(Role::Unknown) | None => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;

    fn user(id: i64, role: Role) -> User {
        User {
            id: UserId::Number(id),
            email: format!("user{id}@decor.test"),
            name: format!("User {id}"),
            role: Some(role),
        }
    }

    #[test]
    fn no_actor_denies() {
        assert!(!can_perform_action(None, Some(&user(2, Role::Customer)), Action::View));
        let mut roleless = user(1, Role::Admin);
        roleless.role = None;
        assert!(!can_perform_action(Some(&roleless), Some(&user(2, Role::Customer)), Action::View));
    }

    #[test]
    fn super_admin_does_anything() {
        let actor = user(1, Role::SuperAdmin);
        assert!(can_perform_action(Some(&actor), Some(&user(2, Role::SuperAdmin)), Action::Delete));
        assert!(can_perform_action(Some(&actor), Some(&actor), Action::Manage));
        assert!(can_perform_action(Some(&actor), None, Action::Create));
    }

    #[test]
    fn self_actions_limited_to_view_and_edit() {
        let sales = user(1, Role::Sales);
        assert!(!can_perform_action(Some(&sales), Some(&sales), Action::Delete));
        assert!(can_perform_action(Some(&sales), Some(&sales), Action::Edit));
        let customer = user(5, Role::Customer);
        assert!(can_perform_action(Some(&customer), Some(&customer), Action::View));
    }

    #[test]
    fn admin_cannot_touch_super_admin_or_peers() {
        let admin = user(1, Role::Admin);
        assert!(!can_perform_action(Some(&admin), Some(&user(2, Role::SuperAdmin)), Action::Edit));
        assert!(!can_perform_action(Some(&admin), Some(&user(2, Role::Admin)), Action::View));
        assert!(can_perform_action(Some(&admin), Some(&user(2, Role::Sales)), Action::Delete));
        assert!(can_perform_action(Some(&admin), None, Action::Create));
    }

    #[test]
    fn support_and_sales_are_read_only_on_end_users() {
        let support = user(1, Role::Support);
        assert!(can_perform_action(Some(&support), Some(&user(2, Role::General)), Action::View));
        assert!(!can_perform_action(Some(&support), Some(&user(2, Role::General)), Action::Edit));

        let sales = user(3, Role::Sales);
        assert!(can_perform_action(Some(&sales), Some(&user(4, Role::Dealer)), Action::View));
        assert!(!can_perform_action(Some(&sales), Some(&user(4, Role::Support)), Action::View));
        assert!(!can_perform_action(Some(&sales), None, Action::View));
    }

    #[test]
    fn end_users_cannot_act_on_others() {
        let dealer = user(1, Role::Dealer);
        assert!(!can_perform_action(Some(&dealer), Some(&user(2, Role::Customer)), Action::View));
    }

    #[test]
    fn allowed_actions_by_role() {
        assert_eq!(allowed_actions(Some(&user(1, Role::Dealer))), &[Action::View]);
        assert_eq!(allowed_actions(None), &[] as &[Action]);
        assert_eq!(allowed_actions(Some(&user(1, Role::Admin))).len(), 5);
        assert_eq!(
            allowed_actions(Some(&user(1, Role::Support))),
            &[Action::View, Action::Edit]
        );
        assert_eq!(allowed_actions(Some(&user(1, Role::Unknown))), &[] as &[Action]);
    }

    #[test]
    fn action_defaults_to_view() {
        assert_eq!(Action::default(), Action::View);
        let action: Action = serde_json::from_str("\"manage\"").unwrap();
        assert_eq!(action, Action::Manage);
        assert!(serde_json::from_str::<Action>("\"approve\"").is_err());
    }
}
