//! Authentication configuration
//!
//! Holds the trusted issuer origin, the RSA key used to verify access
//! tokens and the backend API key. Every value is validated when it is
//! assigned, so a bad deployment fails at startup rather than on the first
//! request.

use jsonwebtoken::DecodingKey;
use std::env;
use url::Url;

use crate::error::{ConfigError, Result};

const AUTH_URL_VAR: &str = "PROPELAUTH_AUTH_URL";
const VERIFIER_KEY_VAR: &str = "PROPELAUTH_VERIFIER_KEY";
const API_KEY_VAR: &str = "PROPELAUTH_API_KEY";

/// Authentication configuration
///
/// Built once at startup and handed to every component that needs it.
#[derive(Clone, Default)]
pub struct AuthConfig {
    api_key: Option<String>,
    auth_url: Option<String>,
    public_key: Option<DecodingKey>,
}

impl std::fmt::Debug for AuthConfig {
    #[mutants::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("auth_url", &self.auth_url)
            .field("public_key", &self.public_key.as_ref().map(|_| "<rsa>"))
            .finish()
    }
}

impl AuthConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    ///
    /// Each variable is optional; values that are present are validated
    /// exactly as the setters validate them.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let mut config = Self::new();

        if let Ok(auth_url) = env::var(AUTH_URL_VAR) {
            config.set_auth_url(&auth_url)?;
        }

        if let Ok(verifier_key) = env::var(VERIFIER_KEY_VAR) {
            // Single-line deployments often carry escaped newlines
            config.set_public_key(&verifier_key.replace("\\n", "\n"))?;
        }

        if let Ok(api_key) = env::var(API_KEY_VAR) {
            config.set_api_key(api_key);
        }

        tracing::debug!(config = ?config, "Auth configuration loaded from environment");

        Ok(config)
    }

    pub fn with_auth_url(mut self, auth_url: &str) -> Result<Self> {
        self.set_auth_url(auth_url)?;
        Ok(self)
    }

    pub fn with_public_key(mut self, public_key_pem: &str) -> Result<Self> {
        self.set_public_key(public_key_pem)?;
        Ok(self)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.set_api_key(api_key);
        self
    }

    /// Set the issuer origin.
    ///
    /// Only `https` URLs with a host are accepted. The stored value is the
    /// bare `scheme://host` origin; path, query and port are dropped.
    pub fn set_auth_url(&mut self, auth_url: &str) -> Result<()> {
        self.auth_url = Some(validate_auth_url(auth_url)?);
        Ok(())
    }

    /// Parse and store the PEM-encoded RSA key that signs access tokens.
    pub fn set_public_key(&mut self, public_key_pem: &str) -> Result<()> {
        let key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes()).map_err(|e| {
            tracing::error!(error = %e, "Failed to parse RSA public key");
            ConfigError::InvalidPublicKey(e.to_string())
        })?;
        self.public_key = Some(key);
        Ok(())
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = Some(api_key.into());
    }

    pub fn auth_url(&self) -> Option<&str> {
        self.auth_url.as_deref()
    }

    pub fn public_key(&self) -> Option<&DecodingKey> {
        self.public_key.as_ref()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

fn validate_auth_url(auth_url: &str) -> Result<String> {
    let invalid = || ConfigError::InvalidAuthUrl(auth_url.to_string());

    let url = Url::parse(auth_url).map_err(|_| invalid())?;

    if !url.scheme().eq_ignore_ascii_case("https") {
        return Err(invalid());
    }

    let host = url.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;

    Ok(format!("{}://{}", url.scheme().to_ascii_lowercase(), host))
}
