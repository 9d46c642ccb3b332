//! Shared configuration and error handling for the PropelAuth crates
//!
//! This crate provides the pieces every other PropelAuth crate depends on:
//! - `AuthConfig`, the validated issuer origin, verifier key and API key
//! - Configuration error types raised at startup

pub mod config;
pub mod error;

pub use config::AuthConfig;
pub use error::{ConfigError, Result};
