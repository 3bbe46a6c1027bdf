//! Role-list checks shared by every module predicate and route decision.

use super::roles::Role;
use crate::models::User;

/// The global super-role override.
///
/// `SuperAdmin` is granted every module, route and action regardless of the
/// role list being checked. Every decision chain in this crate consults this
/// rule first; [`role_in`] deliberately does not.
pub fn super_role_override(user: &User) -> bool {
    user.role == Some(Role::SuperAdmin)
}

/// Plain membership: is the user's role one of `allowed`?
///
/// Users without a role are never members.
pub fn role_in(user: &User, allowed: &[Role]) -> bool {
    user.role.is_some_and(|role| allowed.contains(&role))
}

/// Grants access when the user is present, has a role, and either holds the
/// super role or a role listed in `allowed`.
pub fn has_role_access(user: Option<&User>, allowed: &[Role]) -> bool {
    let Some(user) = user.filter(|u| u.role.is_some()) else {
        return false;
    };
    if super_role_override(user) {
        return true;
    }
    role_in(user, allowed)
}
