//! Axum extractors for authentication
//!
//! Generic over any state `S` where `Authenticator: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use std::collections::HashMap;

use axum::{
    extract::{FromRef, FromRequestParts, Path},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::backend::Authenticator;
use crate::context::User;
use crate::error::AuthError;
use crate::types::OrgMemberInfo;

/// Path parameter read by [`OrgMember`]
pub const ORG_ID_PARAM: &str = "org_id";

// A header that is not valid visible ASCII is treated as absent
fn authorization_header(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

/// Authenticated user extractor; rejects with 401
#[derive(Debug)]
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    Authenticator: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let auth = Authenticator::from_ref(state);
        let user = auth.require_user(authorization_header(parts))?;

        Ok(AuthUser(user))
    }
}

/// Optionally authenticated user extractor.
///
/// Never rejects an unauthenticated request; only configuration errors
/// surface.
#[derive(Debug)]
pub struct OptionalUser(pub Option<User>);

impl<S> FromRequestParts<S> for OptionalUser
where
    Authenticator: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let auth = Authenticator::from_ref(state);
        let user = auth.optional_user(authorization_header(parts))?;

        Ok(OptionalUser(user))
    }
}

/// Org member extractor.
///
/// Authenticates the request (401), then requires membership in the org
/// named by the `{org_id}` path parameter (403). Routes without that
/// parameter always reject with 403. Handlers needing a minimum role call
/// [`User::org_member`] on `user` with the role they require.
#[derive(Debug)]
pub struct OrgMember {
    pub user: User,
    pub member_info: OrgMemberInfo,
}

impl<S> FromRequestParts<S> for OrgMember
where
    Authenticator: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        let org_id = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .ok()
            .and_then(|Path(mut params)| params.remove(ORG_ID_PARAM));

        let member_info = user.org_member(org_id.as_deref(), None)?.clone();

        Ok(OrgMember { user, member_info })
    }
}
