//! Management API request and response types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// User record returned by the user endpoints.
///
/// Fields not modeled here are kept in `other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_confirmed: Option<bool>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub locked: Option<bool>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub mfa_enabled: Option<bool>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub last_active_at: Option<i64>,
    /// Present only when the lookup asked for `include_orgs`
    #[serde(default)]
    pub org_id_to_org_info: Option<HashMap<String, UserOrgInfo>>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A user's membership as reported by the management API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserOrgInfo {
    pub org_id: String,
    pub org_name: String,
    pub user_role: String,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub org_id: String,
    pub name: String,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgQueryResponse {
    pub orgs: Vec<Organization>,
    pub total_orgs: u64,
    pub current_page: u32,
    pub page_size: u32,
    pub has_more_results: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPagedResponse {
    pub users: Vec<UserMetadata>,
    pub total_users: u64,
    pub current_page: u32,
    pub page_size: u32,
    pub has_more_results: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrgOrderBy {
    #[default]
    CreatedAtAsc,
    CreatedAtDesc,
    Name,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserOrderBy {
    #[default]
    CreatedAtAsc,
    CreatedAtDesc,
    LastActiveAtAsc,
    LastActiveAtDesc,
    Email,
    Username,
}

/// Body of `POST /api/backend/v1/org/query`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrgQuery {
    pub page_size: u32,
    pub page_number: u32,
    pub order_by: OrgOrderBy,
}

impl Default for OrgQuery {
    fn default() -> Self {
        Self {
            page_size: 10,
            page_number: 0,
            order_by: OrgOrderBy::default(),
        }
    }
}

/// Query string of `GET /api/backend/v1/user/query`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserQuery {
    pub page_size: u32,
    pub page_number: u32,
    pub order_by: UserOrderBy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_or_username: Option<String>,
    pub include_orgs: bool,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            page_size: 10,
            page_number: 0,
            order_by: UserOrderBy::default(),
            email_or_username: None,
            include_orgs: false,
        }
    }
}

/// Query string of `GET /api/backend/v1/user/org/{org_id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsersInOrgQuery {
    pub page_size: u32,
    pub page_number: u32,
    pub include_orgs: bool,
}

impl Default for UsersInOrgQuery {
    fn default() -> Self {
        Self {
            page_size: 10,
            page_number: 0,
            include_orgs: false,
        }
    }
}

/// Body of `POST /api/backend/v1/user/`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub email_confirmed: bool,
    pub send_email_to_confirm_email_address: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl CreateUserRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedUser {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedOrg {
    pub org_id: String,
    #[serde(default)]
    pub name: Option<String>,
}
