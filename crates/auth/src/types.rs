//! Organization membership read from access token claims

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::roles::{InvalidUserRole, RoleName, UserRole};

/// A user's membership in one organization.
///
/// `user_role` is the only field the authorization checks read. It decodes
/// whatever its shape and is validated only when a role check runs. Every
/// other org-scoped claim (org name, permissions, ...) is kept verbatim in
/// `other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgMemberInfo {
    #[serde(default)]
    pub user_role: RoleName,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl OrgMemberInfo {
    /// The member's role, normalized.
    pub fn role(&self) -> Result<UserRole, InvalidUserRole> {
        UserRole::normalize(self.user_role.clone())
    }

    /// Look up a pass-through claim by name
    pub fn get(&self, claim: &str) -> Option<&Value> {
        self.other.get(claim)
    }

    pub fn org_id(&self) -> Option<&str> {
        self.get("org_id").and_then(Value::as_str)
    }

    pub fn org_name(&self) -> Option<&str> {
        self.get("org_name").and_then(Value::as_str)
    }
}
