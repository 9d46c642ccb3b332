//! JWT claims types

use serde::Deserialize;
use std::collections::HashMap;

use crate::types::OrgMemberInfo;

/// Access token claims read during validation.
///
/// Only the claims listed here are deserialized; everything else in the
/// token body is ignored and never reaches the caller.
#[derive(Debug, Deserialize)]
pub(crate) struct AccessTokenClaims {
    /// User ID
    pub user_id: String,
    /// Memberships keyed by org ID
    #[serde(default)]
    pub org_id_to_org_member_info: Option<HashMap<String, OrgMemberInfo>>,
    /// Issued at, in seconds since the epoch. Checked separately because
    /// `jsonwebtoken` does not validate it.
    #[serde(default)]
    pub iat: Option<f64>,
}
