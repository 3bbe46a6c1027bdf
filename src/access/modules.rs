//! Module access policy: one predicate per administrative area.
//!
//! Predicates are a closed enum rather than a string-keyed map. Names coming
//! from configuration are parsed once with [`ModuleAccess::from_name`]; the
//! only place an unrecognized name can still reach a decision is
//! [`module_access_by_name`], which denies it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{policy::has_role_access, roles::Role};
use crate::models::User;

const STAFF: &[Role] = &[Role::SuperAdmin, Role::Admin, Role::Support, Role::Sales];
const SALES: &[Role] = &[Role::SuperAdmin, Role::Admin, Role::Sales];
const SUPPORT: &[Role] = &[Role::SuperAdmin, Role::Admin, Role::Support];
const ADMINS: &[Role] = &[Role::SuperAdmin, Role::Admin];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ModuleAccess {
    #[serde(rename = "requireDashboardAccess")]
    Dashboard,
    #[serde(rename = "requireOrdersAccess")]
    Orders,
    #[serde(rename = "requireEnquiriesAccess")]
    Enquiries,
    #[serde(rename = "requireCustomersAccess")]
    Customers,
    #[serde(rename = "requireProductsAccess")]
    Products,
    #[serde(rename = "requireStaffManagementAccess")]
    StaffManagement,
    #[serde(rename = "requireBusinessTypesAccess")]
    BusinessTypes,
    #[serde(rename = "requireCategoriesAccess")]
    Categories,
    #[serde(rename = "requireSlidersAccess")]
    Sliders,
    #[serde(rename = "requireSeoAccess")]
    Seo,
    #[serde(rename = "requireContactsAccess")]
    Contacts,
    #[serde(rename = "requireAdmin")]
    Admin,
    /// Same roles as [`ModuleAccess::Admin`]. The Manager role was retired
    /// and this name survives for route tables that still reference it.
    #[serde(rename = "requireManagerOrAdmin")]
    ManagerOrAdmin,
    #[serde(rename = "requireAuth")]
    Auth,
    #[serde(rename = "requireStaffAccess")]
    Staff,
    #[serde(rename = "requireSalesAccess")]
    Sales,
    #[serde(rename = "requireSupportAccess")]
    Support,
    #[serde(rename = "requireBusinessUser")]
    BusinessUser,
}

impl ModuleAccess {
    pub const ALL: [ModuleAccess; 18] = [
        ModuleAccess::Dashboard,
        ModuleAccess::Orders,
        ModuleAccess::Enquiries,
        ModuleAccess::Customers,
        ModuleAccess::Products,
        ModuleAccess::StaffManagement,
        ModuleAccess::BusinessTypes,
        ModuleAccess::Categories,
        ModuleAccess::Sliders,
        ModuleAccess::Seo,
        ModuleAccess::Contacts,
        ModuleAccess::Admin,
        ModuleAccess::ManagerOrAdmin,
        ModuleAccess::Auth,
        ModuleAccess::Staff,
        ModuleAccess::Sales,
        ModuleAccess::Support,
        ModuleAccess::BusinessUser,
    ];

    /// Roles listed for this predicate. `SuperAdmin` is always included,
    /// though the super-role override would grant it anyway.
    pub const fn allowed_roles(self) -> &'static [Role] {
        match self {
            ModuleAccess::Dashboard
            | ModuleAccess::Contacts
            | ModuleAccess::Auth
            | ModuleAccess::Staff => STAFF,
            ModuleAccess::Orders
            | ModuleAccess::Enquiries
            | ModuleAccess::Customers
            | ModuleAccess::Sales => SALES,
            ModuleAccess::Products
            | ModuleAccess::BusinessTypes
            | ModuleAccess::Categories
            | ModuleAccess::Sliders
            | ModuleAccess::Seo
            | ModuleAccess::Support
            | ModuleAccess::BusinessUser => SUPPORT,
            ModuleAccess::StaffManagement | ModuleAccess::Admin | ModuleAccess::ManagerOrAdmin => {
                ADMINS
            }
        }
    }

    /// Evaluates the predicate. Absent or role-less users are denied.
    pub fn allows(self, user: Option<&User>) -> bool {
        has_role_access(user, self.allowed_roles())
    }

    /// Name under which route tables and the browser refer to this predicate.
    pub const fn name(self) -> &'static str {
        match self {
            ModuleAccess::Dashboard => "requireDashboardAccess",
            ModuleAccess::Orders => "requireOrdersAccess",
            ModuleAccess::Enquiries => "requireEnquiriesAccess",
            ModuleAccess::Customers => "requireCustomersAccess",
            ModuleAccess::Products => "requireProductsAccess",
            ModuleAccess::StaffManagement => "requireStaffManagementAccess",
            ModuleAccess::BusinessTypes => "requireBusinessTypesAccess",
            ModuleAccess::Categories => "requireCategoriesAccess",
            ModuleAccess::Sliders => "requireSlidersAccess",
            ModuleAccess::Seo => "requireSeoAccess",
            ModuleAccess::Contacts => "requireContactsAccess",
            ModuleAccess::Admin => "requireAdmin",
            ModuleAccess::ManagerOrAdmin => "requireManagerOrAdmin",
            ModuleAccess::Auth => "requireAuth",
            ModuleAccess::Staff => "requireStaffAccess",
            ModuleAccess::Sales => "requireSalesAccess",
            ModuleAccess::Support => "requireSupportAccess",
            ModuleAccess::BusinessUser => "requireBusinessUser",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ModuleAccess::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl fmt::Display for ModuleAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Looks a predicate up by name and evaluates it; unknown names deny.
pub fn module_access_by_name(user: Option<&User>, name: &str) -> bool {
    match ModuleAccess::from_name(name) {
        Some(module) => module.allows(user),
        None => {
            tracing::debug!(predicate = %name, "Unknown module access predicate, denying");
            false
        }
    }
}
