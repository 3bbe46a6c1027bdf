//! Route descriptors and the route authorization decision.

use serde::{Deserialize, Serialize};

use super::{
    modules::ModuleAccess,
    policy::has_role_access,
    roles::{Role, UnknownRole},
};
use crate::models::User;

/// A single role or a list of roles, as written in route configuration.
///
/// Loading is strict: a role name outside [`Role::ALL`] is an error, unlike
/// user records where it becomes [`Role::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, try_from = "RawRequiredRole")]
pub enum RequiredRole {
    One(Role),
    Many(Vec<Role>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRequiredRole {
    One(String),
    Many(Vec<String>),
}

impl TryFrom<RawRequiredRole> for RequiredRole {
    type Error = UnknownRole;

    fn try_from(raw: RawRequiredRole) -> Result<Self, Self::Error> {
        match raw {
            RawRequiredRole::One(name) => Ok(RequiredRole::One(name.parse()?)),
            RawRequiredRole::Many(names) => names
                .iter()
                .map(|name| name.parse())
                .collect::<Result<_, _>>()
                .map(RequiredRole::Many),
        }
    }
}

impl RequiredRole {
    pub fn as_slice(&self) -> &[Role] {
        match self {
            RequiredRole::One(role) => std::slice::from_ref(role),
            RequiredRole::Many(roles) => roles,
        }
    }
}

/// Static access requirements of one navigable console page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDescriptor {
    pub path: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_role: Option<RequiredRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_access: Option<ModuleAccess>,
}

impl RouteDescriptor {
    /// A page any authenticated staff member may open.
    pub fn authenticated(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_public: false,
            required_role: None,
            required_access: None,
        }
    }

    pub fn public(path: impl Into<String>) -> Self {
        Self {
            is_public: true,
            ..Self::authenticated(path)
        }
    }

    pub fn with_access(path: impl Into<String>, access: ModuleAccess) -> Self {
        Self {
            required_access: Some(access),
            ..Self::authenticated(path)
        }
    }

    pub fn with_roles(path: impl Into<String>, roles: RequiredRole) -> Self {
        Self {
            required_role: Some(roles),
            ..Self::authenticated(path)
        }
    }
}

/// Decides whether `user` may navigate to `route`.
///
/// Public routes are open to everyone, including anonymous visitors. A route
/// with no role or module requirement needs a staff session. `required_role`
/// wins over `required_access` when both are set.
pub fn can_access_route(user: Option<&User>, route: Option<&RouteDescriptor>) -> bool {
    let Some(route) = route else {
        return false;
    };
    if route.is_public {
        return true;
    }
    if user.is_none() {
        return false;
    }

    match (&route.required_role, route.required_access) {
        (Some(roles), _) => has_role_access(user, roles.as_slice()),
        (None, Some(access)) => access.allows(user),
        (None, None) => ModuleAccess::Auth.allows(user),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;

    fn user(role: Role) -> User {
        User {
            id: UserId::Number(3),
            email: "x@decor.test".into(),
            name: "X".into(),
            role: Some(role),
        }
    }

    #[test]
    fn public_routes_ignore_the_user() {
        let route = RouteDescriptor::public("/login");
        assert!(can_access_route(None, Some(&route)));
        assert!(can_access_route(Some(&user(Role::Customer)), Some(&route)));
    }

    #[test]
    fn missing_route_or_user_denies() {
        assert!(!can_access_route(Some(&user(Role::SuperAdmin)), None));
        assert!(!can_access_route(None, Some(&RouteDescriptor::authenticated("/x"))));
    }

    #[test]
    fn default_routes_require_staff_role() {
        let route = RouteDescriptor::authenticated("/x");
        assert!(!can_access_route(Some(&user(Role::Customer)), Some(&route)));
        assert!(can_access_route(Some(&user(Role::Support)), Some(&route)));
    }

    #[test]
    fn module_access_delegates() {
        let route = RouteDescriptor::with_access("/staff", ModuleAccess::StaffManagement);
        assert!(can_access_route(Some(&user(Role::Admin)), Some(&route)));
        assert!(!can_access_route(Some(&user(Role::Sales)), Some(&route)));
    }

    #[test]
    fn required_role_takes_precedence() {
        let route = RouteDescriptor {
            required_access: Some(ModuleAccess::Orders),
            ..RouteDescriptor::with_roles("/pricing", RequiredRole::One(Role::Support))
        };
        assert!(can_access_route(Some(&user(Role::Support)), Some(&route)));
        assert!(!can_access_route(Some(&user(Role::Sales)), Some(&route)));
    }

    #[test]
    fn descriptor_deserializes_single_or_many_roles() {
        let one: RouteDescriptor =
            serde_json::from_str(r#"{"path":"/a","requiredRole":"Admin"}"#).unwrap();
        assert_eq!(one.required_role, Some(RequiredRole::One(Role::Admin)));

        let many: RouteDescriptor = serde_json::from_str(
            r#"{"path":"/b","requiredRole":["Admin","Sales"],"requiredAccess":"requireSeoAccess"}"#,
        )
        .unwrap();
        assert_eq!(many.required_role.unwrap().as_slice(), &[Role::Admin, Role::Sales]);
        assert_eq!(many.required_access, Some(ModuleAccess::Seo));
        assert!(!many.is_public);
    }

    #[test]
    fn unknown_role_name_is_rejected_at_load() {
        for raw in [
            r#"{"path":"/a","requiredRole":"Manager"}"#,
            r#"{"path":"/a","requiredRole":["Admin","Manager"]}"#,
            r#"{"path":"/a","requiredRole":"unknown"}"#,
        ] {
            assert!(serde_json::from_str::<RouteDescriptor>(raw).is_err(), "{raw}");
        }

        let customer: RouteDescriptor =
            serde_json::from_str(r#"{"path":"/a","requiredRole":"customer"}"#).unwrap();
        assert_eq!(customer.required_role, Some(RequiredRole::One(Role::Customer)));
    }

    #[test]
    fn unknown_access_name_is_rejected_at_load() {
        let parsed = serde_json::from_str::<RouteDescriptor>(
            r#"{"path":"/c","requiredAccess":"requireEverything"}"#,
        );
        assert!(parsed.is_err());
    }
}
