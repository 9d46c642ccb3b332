//! Authenticated user context and organization checks

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::AuthError;
use crate::roles::UserRole;
use crate::types::OrgMemberInfo;

/// The user behind a validated access token.
///
/// Built fresh from the token on every request and never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub org_id_to_org_member_info: Option<HashMap<String, OrgMemberInfo>>,
}

impl User {
    pub fn new(
        user_id: impl Into<String>,
        org_id_to_org_member_info: Option<HashMap<String, OrgMemberInfo>>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            org_id_to_org_member_info,
        }
    }

    /// Membership info for an org, if the user belongs to it
    pub fn org_member_info(&self, org_id: &str) -> Option<&OrgMemberInfo> {
        self.org_id_to_org_member_info
            .as_ref()
            .and_then(|orgs| orgs.get(org_id))
    }

    /// Check that the user belongs to `org_id` with at least `minimum_role`.
    ///
    /// A missing org ID, a missing membership and an insufficient role are
    /// all `Forbidden`. A role value that cannot be normalized is reported
    /// as `InvalidRole`, never as `Forbidden`.
    pub fn org_member(
        &self,
        org_id: Option<&str>,
        minimum_role: Option<UserRole>,
    ) -> Result<&OrgMemberInfo, AuthError> {
        let Some(org_id) = org_id else {
            tracing::info!(user_id = %self.user_id, "Required org is unspecified");
            return Err(AuthError::Forbidden);
        };

        let Some(member_info) = self.org_member_info(org_id) else {
            tracing::info!(
                user_id = %self.user_id,
                org_id = %org_id,
                "User is not a member of required org"
            );
            return Err(AuthError::Forbidden);
        };

        if let Some(minimum_role) = minimum_role {
            let user_role = member_info.role()?;
            if user_role < minimum_role {
                tracing::info!(
                    user_id = %self.user_id,
                    org_id = %org_id,
                    user_role = %user_role,
                    minimum_role = %minimum_role,
                    "User's role in org doesn't meet minimum required role"
                );
                return Err(AuthError::Forbidden);
            }
        }

        Ok(member_info)
    }
}
