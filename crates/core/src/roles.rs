//! Principal roles.
//!
//! Values must match the `CHECK` constraint on `users.role` in
//! `20260301000001_create_users_table.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_STUDENT: &str = "STUDENT";
pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_SUPERADMIN: &str = "SUPERADMIN";

/// The role a principal holds on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Admin,
    Superadmin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => ROLE_STUDENT,
            Role::Admin => ROLE_ADMIN,
            Role::Superadmin => ROLE_SUPERADMIN,
        }
    }

    /// Staff roles may enter the admin area and perform privileged mutations.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Superadmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_STUDENT => Ok(Role::Student),
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_SUPERADMIN => Ok(Role::Superadmin),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Must be one of: {ROLE_STUDENT}, {ROLE_ADMIN}, {ROLE_SUPERADMIN}"
            ))),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Parse the role for a staff account created through user management.
///
/// `None` defaults to [`Role::Admin`]. Students cannot be created this way;
/// they sign in through the federated flow.
pub fn parse_staff_role(role: Option<&str>) -> Result<Role, CoreError> {
    let role = match role.map(str::trim).filter(|r| !r.is_empty()) {
        None => return Ok(Role::Admin),
        Some(r) => r.parse::<Role>()?,
    };
    if !role.is_staff() {
        return Err(CoreError::Validation(format!(
            "Role must be {ROLE_ADMIN} or {ROLE_SUPERADMIN}"
        )));
    }
    Ok(role)
}
