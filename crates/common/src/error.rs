//! Configuration error types

/// Configuration result type
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while building an `AuthConfig`.
///
/// These surface at startup, never while handling a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid auth URL: {0}")]
    InvalidAuthUrl(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
}
