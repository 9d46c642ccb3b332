//! Access token validation and org authorization
//!
//! Provides RS256 access token validation, org membership and role checks,
//! and axum extractors that work with any state implementing `FromRef<S>`
//! for `Authenticator`.

mod backend;
mod claims;
mod context;
mod error;
mod extractors;
mod jwt;
mod roles;
mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use backend::Authenticator;
pub use context::User;
pub use error::AuthError;
pub use extractors::{AuthUser, OptionalUser, OrgMember, ORG_ID_PARAM};
pub use jwt::{extract_bearer_token, validate_access_token};
pub use propelauth_common::{AuthConfig, ConfigError};
pub use roles::{InvalidUserRole, RoleName, UserRole};
pub use types::OrgMemberInfo;
