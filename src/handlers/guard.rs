//! Module guards for data handlers.
//!
//! Handlers that fetch or mutate a module's data call [`require_module`]
//! before doing any work. It is the handler-side counterpart of the route
//! guard middleware, which only protects page navigation.

use crate::{access::ModuleAccess, error::AppError, models::User};

/// Checks a module predicate for the current user.
///
/// # Returns
///
/// * `Ok(())` - The user may use the module
/// * `Err(AppError::Unauthorized)` - No user; the caller should send the
///   browser back to the login page
/// * `Err(AppError::Forbidden)` - The user's role is not allowed
///
/// # Usage Pattern
///
/// ```rust,ignore
/// pub async fn list_orders(user: CurrentUser) -> Result<HttpResponse, AppError> {
///     require_module(user.user(), ModuleAccess::Orders)?;
///     // fetch orders...
/// }
/// ```
pub fn require_module(user: Option<&User>, module: ModuleAccess) -> Result<(), AppError> {
    let Some(user) = user else {
        return Err(AppError::Unauthorized);
    };
    if module.allows(Some(user)) {
        return Ok(());
    }
    tracing::warn!(
        user_id = %user.id,
        role = ?user.role,
        module = %module,
        "Module access denied"
    );
    Err(AppError::Forbidden(format!("{module} not granted")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{access::Role, models::UserId};
    use actix_web::{ResponseError, http::StatusCode};

    fn user(role: Role) -> User {
        User {
            id: UserId::Number(4),
            email: "u@decor.test".into(),
            name: "U".into(),
            role: Some(role),
        }
    }

    #[test]
    fn missing_user_is_unauthorized() {
        let err = require_module(None, ModuleAccess::Orders).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn wrong_role_is_forbidden() {
        let err = require_module(Some(&user(Role::Support)), ModuleAccess::Orders).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert!(require_module(Some(&user(Role::Sales)), ModuleAccess::Orders).is_ok());
    }
}
