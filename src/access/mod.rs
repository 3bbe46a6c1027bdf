//! Pure authorization decisions for the admin console.
//!
//! Nothing in this module reads sessions, storage or the network. Callers
//! resolve the current user themselves and pass it in; every function is
//! total and answers `false` (or an empty list) for absent or malformed
//! input.

pub mod actions;
pub mod modules;
pub mod policy;
pub mod roles;
pub mod routes;

pub use actions::{Action, allowed_actions, can_perform_action};
pub use modules::{ModuleAccess, module_access_by_name};
pub use policy::{has_role_access, role_in, super_role_override};
pub use roles::{Role, UnknownRole, role_level};
pub use routes::{RequiredRole, RouteDescriptor, can_access_route};
