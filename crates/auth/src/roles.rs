//! Organization roles and their ordering
//!
//! Roles arrive either as their numeric rank or as their label. Both forms
//! are funneled through [`UserRole::normalize`]; anything else is a bug in
//! the integrating application and is reported as [`InvalidUserRole`]
//! rather than being treated as an authorization decision.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A role as it appears on the wire: numeric rank or label.
///
/// Any other JSON shape lands in `Other` so a malformed role never fails
/// token decoding; it is rejected only when the role is normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleName {
    Ordinal(i64),
    Label(String),
    Other(Value),
}

/// A missing role decodes as `null`
impl Default for RoleName {
    fn default() -> Self {
        RoleName::Other(Value::Null)
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleName::Ordinal(rank) => write!(f, "{}", rank),
            RoleName::Label(label) => write!(f, "{}", label),
            RoleName::Other(value) => write!(f, "{}", value),
        }
    }
}

impl From<i64> for RoleName {
    fn from(rank: i64) -> Self {
        RoleName::Ordinal(rank)
    }
}

impl From<&str> for RoleName {
    fn from(label: &str) -> Self {
        RoleName::Label(label.to_string())
    }
}

impl From<String> for RoleName {
    fn from(label: String) -> Self {
        RoleName::Label(label)
    }
}

impl From<UserRole> for RoleName {
    fn from(role: UserRole) -> Self {
        RoleName::Label(role.as_str().to_string())
    }
}

/// Role value that is neither a known rank nor a known label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid user role: {0}")]
pub struct InvalidUserRole(pub RoleName);

/// Membership role within an organization, ordered `Member < Admin < Owner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum UserRole {
    Member,
    Admin,
    Owner,
}

impl UserRole {
    /// Convert either wire form into a role.
    pub fn normalize(role: impl Into<RoleName>) -> Result<Self, InvalidUserRole> {
        match role.into() {
            RoleName::Ordinal(rank) => Self::try_from(rank),
            RoleName::Label(label) => label.parse(),
            other @ RoleName::Other(_) => Err(InvalidUserRole(other)),
        }
    }

    pub fn ordinal(&self) -> i64 {
        match self {
            UserRole::Member => 0,
            UserRole::Admin => 1,
            UserRole::Owner => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Member => "Member",
            UserRole::Admin => "Admin",
            UserRole::Owner => "Owner",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i64> for UserRole {
    type Error = InvalidUserRole;

    fn try_from(rank: i64) -> Result<Self, Self::Error> {
        match rank {
            0 => Ok(UserRole::Member),
            1 => Ok(UserRole::Admin),
            2 => Ok(UserRole::Owner),
            other => Err(InvalidUserRole(RoleName::Ordinal(other))),
        }
    }
}

impl FromStr for UserRole {
    type Err = InvalidUserRole;

    // Labels are matched exactly; "owner" is not "Owner".
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "Member" => Ok(UserRole::Member),
            "Admin" => Ok(UserRole::Admin),
            "Owner" => Ok(UserRole::Owner),
            other => Err(InvalidUserRole(RoleName::Label(other.to_string()))),
        }
    }
}

impl TryFrom<RoleName> for UserRole {
    type Error = InvalidUserRole;

    fn try_from(role: RoleName) -> Result<Self, Self::Error> {
        UserRole::normalize(role)
    }
}
