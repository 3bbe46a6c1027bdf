//! Role table: the closed set of console roles and their precedence levels.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Role tag carried by every authenticated console user.
///
/// Serialized with the exact spelling the backend uses, including the
/// lowercase `customer`. Any other string deserializes to [`Role::Unknown`],
/// which has level 0 and is denied everywhere.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    SuperAdmin,
    Admin,
    Sales,
    Support,
    Dealer,
    Architect,
    General,
    #[serde(rename = "customer")]
    Customer,
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Every known role, highest precedence first.
    pub const ALL: [Role; 8] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Sales,
        Role::Support,
        Role::Dealer,
        Role::Architect,
        Role::General,
        Role::Customer,
    ];

    /// Numeric precedence used for relative comparisons only.
    pub const fn level(self) -> u32 {
        match self {
            Role::SuperAdmin => 100,
            Role::Admin => 90,
            Role::Sales => 60,
            Role::Support => 50,
            Role::Dealer | Role::Architect => 40,
            Role::General => 30,
            Role::Customer => 20,
            Role::Unknown => 0,
        }
    }

    /// Roles that can only be acted upon by staff, never act on others.
    pub const fn is_end_user(self) -> bool {
        matches!(
            self,
            Role::Customer | Role::General | Role::Dealer | Role::Architect
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "SuperAdmin",
            Role::Admin => "Admin",
            Role::Sales => "Sales",
            Role::Support => "Support",
            Role::Dealer => "Dealer",
            Role::Architect => "Architect",
            Role::General => "General",
            Role::Customer => "customer",
            Role::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Role {
    /// Lenient conversion: unrecognized names become [`Role::Unknown`].
    fn from(value: &str) -> Self {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .unwrap_or(Role::Unknown)
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    /// Strict conversion used when loading configuration.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Role::from(s) {
            Role::Unknown => Err(UnknownRole(s.to_string())),
            role => Ok(role),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role `{0}`")]
pub struct UnknownRole(pub String);

/// Precedence of an optional role; absent and unknown roles are 0.
pub fn role_level(role: Option<Role>) -> u32 {
    role.map_or(0, Role::level)
}
