//! Shared router and request helpers for integration tests
//!
//! The router mirrors how an application embeds the extractors: an app
//! state holding an `Authenticator`, exposed through `FromRef`.

use axum::{
    body::Body,
    extract::{FromRef, Path},
    http::{header::AUTHORIZATION, Method, Request, Response, StatusCode},
    routing::get,
    Json, Router,
};
use propelauth_auth::{
    testing::{access_token_claims, sign_test_token, test_config},
    AuthConfig, AuthError, AuthUser, Authenticator, OptionalUser, OrgMember, UserRole,
};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Application state as a downstream service would define it
#[derive(Clone, FromRef)]
pub struct AppState {
    pub auth: Authenticator,
}

async fn me(AuthUser(user): AuthUser) -> Json<Value> {
    Json(json!({
        "user_id": user.user_id,
        "org_ids": user
            .org_id_to_org_member_info
            .as_ref()
            .map(|orgs| orgs.len())
            .unwrap_or(0),
    }))
}

async fn maybe_me(OptionalUser(user): OptionalUser) -> Json<Value> {
    Json(json!({ "user_id": user.map(|u| u.user_id) }))
}

async fn org_dashboard(member: OrgMember) -> Result<Json<Value>, AuthError> {
    let role = member.member_info.role()?;
    Ok(Json(json!({
        "user_id": member.user.user_id,
        "org_id": member.member_info.org_id(),
        "role": role.as_str(),
    })))
}

async fn org_settings(
    AuthUser(user): AuthUser,
    Path(org_id): Path<String>,
) -> Result<Json<Value>, AuthError> {
    let member_info = user.org_member(Some(&org_id), Some(UserRole::Admin))?;
    Ok(Json(json!({ "org_id": org_id, "role": member_info.user_role.to_string() })))
}

async fn org_unspecified(member: OrgMember) -> Json<Value> {
    Json(json!({ "user_id": member.user.user_id }))
}

/// Test application wrapping a router built over an `Authenticator`
pub struct TestApp {
    pub state: AppState,
}

impl TestApp {
    /// App trusting the shared test issuer and key
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AuthConfig) -> Self {
        Self {
            state: AppState {
                auth: Authenticator::new(config),
            },
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/me", get(me))
            .route("/maybe-me", get(maybe_me))
            .route("/orgs/{org_id}", get(org_dashboard))
            .route("/orgs/{org_id}/settings", get(org_settings))
            .route("/dashboard", get(org_unspecified))
            .with_state(self.state.clone())
    }

    /// Send one request through a fresh router and return status plus JSON body
    pub async fn send(&self, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
        let response = self.router().oneshot(request).await?;
        let status = response.status();
        let body = parse_body(response).await?;
        Ok((status, body))
    }
}

/// Build a request with an optional raw `Authorization` header value
pub fn request(method: Method, uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

/// Helper: parse response body as JSON Value (`Null` for empty bodies)
pub async fn parse_body(response: Response<Body>) -> anyhow::Result<Value> {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    if body.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&body)?)
}

/// `Bearer` header for a freshly signed token carrying the given orgs
pub fn bearer(user_id: &str, orgs: Value) -> String {
    format!(
        "Bearer {}",
        sign_test_token(&access_token_claims(user_id, orgs))
    )
}

/// Org membership claims for a single org
pub fn membership(org_id: &str, role: Value) -> Value {
    json!({
        org_id: {
            "org_id": org_id,
            "org_name": format!("{} Inc", org_id),
            "user_role": role,
        }
    })
}
