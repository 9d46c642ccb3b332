//! Authorization engine
//!
//! Wraps an `AuthConfig` and turns a raw `Authorization` header into a
//! validated user or org membership. Every check returns its result; nothing
//! is stashed on the request.

use propelauth_common::AuthConfig;

use crate::context::User;
use crate::error::AuthError;
use crate::jwt::{extract_bearer_token, validate_access_token};
use crate::roles::UserRole;
use crate::types::OrgMemberInfo;

/// Validates access tokens and evaluates org membership checks.
///
/// Application states expose this via `FromRef` so the extractors can reach it:
/// ```ignore
/// impl FromRef<AppState> for Authenticator {
///     fn from_ref(state: &AppState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Validate the request's access token.
    ///
    /// Fails with `Unauthorized` for a missing, malformed or invalid token and
    /// with `NotConfigured` when the issuer or key was never set.
    pub fn require_user(&self, authorization: Option<&str>) -> Result<User, AuthError> {
        let token = extract_bearer_token(authorization);
        validate_access_token(token, &self.config)
    }

    /// Like [`require_user`](Self::require_user), but an unauthenticated
    /// request yields `Ok(None)`. Configuration errors still propagate.
    pub fn optional_user(&self, authorization: Option<&str>) -> Result<Option<User>, AuthError> {
        match self.require_user(authorization) {
            Ok(user) => Ok(Some(user)),
            Err(AuthError::Unauthorized) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Validate the token, then require membership in `org_id` with at
    /// least `minimum_role`. Returns the matched membership unchanged.
    pub fn require_org_member(
        &self,
        authorization: Option<&str>,
        org_id: Option<&str>,
        minimum_role: Option<UserRole>,
    ) -> Result<OrgMemberInfo, AuthError> {
        let user = self.require_user(authorization)?;
        user.org_member(org_id, minimum_role).cloned()
    }
}
