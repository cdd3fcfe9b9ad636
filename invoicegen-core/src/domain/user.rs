//! User domain model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::result::Error;

/// Fixed identifier of the bootstrap admin record
pub const ADMIN_ID: &str = "admin-id";

/// Role a user logs in with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Team,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Team => "team",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "team" => Ok(Role::Team),
            other => Err(Error::validation(format!(
                "Unknown role: {}. Available: admin, team",
                other
            ))),
        }
    }
}

/// A stored user record
///
/// The same shape is used for the admin singleton and for registered team
/// members; `role` tells them apart. Passwords are kept in cleartext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            password: password.into(),
            role,
        }
    }

    /// Build the bootstrap admin record
    pub fn admin(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(ADMIN_ID, email, password, Role::Admin)
    }

    /// Whether `password` and `role` both match this record exactly
    pub fn accepts(&self, password: &str, role: Role) -> bool {
        self.role == role && self.password == password
    }
}
