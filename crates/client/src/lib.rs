//! PropelAuth Management API Client
//!
//! Thin async client over the backend REST API:
//! - User lookups by ID, email or username, singly or in batches
//! - Paged user and org queries
//! - User and org creation
//!
//! Response status codes are mapped onto [`ClientError`]; nothing is retried.

pub mod client;
pub mod types;

use thiserror::Error;

pub use client::PropelAuthClient;
pub use types::{
    CreateUserRequest, CreatedOrg, CreatedUser, OrgOrderBy, OrgQuery, OrgQueryResponse,
    Organization, UserMetadata, UserOrderBy, UserOrgInfo, UserPagedResponse, UserQuery,
    UsersInOrgQuery,
};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Management client is not configured: an auth URL and API key are required")]
    NotConfigured,

    /// Field-level validation errors returned by the API
    #[error("Bad request: {0}")]
    BadRequest(serde_json::Value),

    #[error("Invalid API key")]
    InvalidApiKey,

    /// The project does not have the feature enabled (HTTP 426)
    #[error("Feature is not enabled for this project")]
    FeatureDisabled,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}
