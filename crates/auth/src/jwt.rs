//! JWT validation and token extraction helpers

use jsonwebtoken::{decode, get_current_timestamp, Algorithm, Validation};
use propelauth_common::AuthConfig;

use crate::claims::AccessTokenClaims;
use crate::context::User;
use crate::error::AuthError;

/// Extract the bearer token from an `Authorization` header value.
///
/// The header must be exactly a scheme and a credential separated by
/// whitespace, with the scheme matching `bearer` in any case. Anything else
/// yields `None`.
pub fn extract_bearer_token(header: Option<&str>) -> Option<&str> {
    let mut parts = header?.trim_start().splitn(2, char::is_whitespace);

    let scheme = parts.next()?;
    let token = parts.next()?.trim_start();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

/// Validate an access token and decode the user it describes.
///
/// The token must be RS256-signed by the configured key, carry the
/// configured issuer, be unexpired and have a sane `iat`. All failures
/// collapse into `Unauthorized`; the cause is only logged.
pub fn validate_access_token(token: Option<&str>, config: &AuthConfig) -> Result<User, AuthError> {
    let (Some(public_key), Some(issuer)) = (config.public_key(), config.auth_url()) else {
        tracing::error!("Access token validation attempted without auth URL and public key");
        return Err(AuthError::NotConfigured);
    };

    let Some(token) = token else {
        tracing::debug!("No bearer token on request");
        return Err(AuthError::Unauthorized);
    };

    // RS256 only: tokens naming any other algorithm are rejected outright
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_issuer(&[issuer]);
    validation.set_required_spec_claims(&["exp", "iss"]);
    validation.validate_aud = false;

    let token_data = decode::<AccessTokenClaims>(token, public_key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        AuthError::Unauthorized
    })?;

    let claims = token_data.claims;
    validate_issued_at(claims.iat, validation.leeway)?;

    Ok(User::new(claims.user_id, claims.org_id_to_org_member_info))
}

fn validate_issued_at(iat: Option<f64>, leeway: u64) -> Result<(), AuthError> {
    let Some(iat) = iat else {
        tracing::debug!("JWT validation failed: missing iat claim");
        return Err(AuthError::Unauthorized);
    };

    let latest_allowed = (get_current_timestamp() + leeway) as f64;
    if !iat.is_finite() || iat > latest_allowed {
        tracing::debug!(iat, "JWT validation failed: iat is in the future");
        return Err(AuthError::Unauthorized);
    }

    Ok(())
}
