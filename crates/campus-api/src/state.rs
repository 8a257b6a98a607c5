//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor.
//!
//! ## Architecture
//!
//! There is no in-process mutable state: `AppState` holds the connection
//! pool, the token issuer, and the configuration — all initialized once at
//! startup and read-only thereafter. Every mutable fact (students, courses,
//! enrollments, session tokens) lives in PostgreSQL.

use rand_core::{OsRng, RngCore};
use sqlx::PgPool;

use crate::auth::TokenIssuer;

/// Application configuration, built from the environment in `main` and
/// injected at construction — never read from ambient globals afterwards.
///
/// Custom `Debug` redacts the token secret to prevent credential leakage
/// in logs.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Secret used to sign and verify session tokens.
    pub token_secret: Vec<u8>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("token_secret", &"[REDACTED]")
            .finish()
    }
}

/// Error loading the token secret from the environment.
#[derive(Debug)]
pub enum TokenSecretError {
    /// `TOKEN_SECRET` was set but empty.
    Empty,
}

impl std::fmt::Display for TokenSecretError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "TOKEN_SECRET must not be empty when set"),
        }
    }
}

impl std::error::Error for TokenSecretError {}

/// Load the token signing secret from the environment, or generate one for
/// development.
///
/// In production, `TOKEN_SECRET` provides the secret. In development (when
/// the variable is absent), a fresh random secret is generated and a
/// warning is logged — tokens signed with it will not verify after a
/// restart.
///
/// Returns `Err` if the variable is set but empty, rather than silently
/// running with a guessable secret.
pub fn load_or_generate_token_secret() -> Result<Vec<u8>, TokenSecretError> {
    if let Ok(secret) = std::env::var("TOKEN_SECRET") {
        if secret.is_empty() {
            return Err(TokenSecretError::Empty);
        }
        Ok(secret.into_bytes())
    } else {
        tracing::warn!(
            "TOKEN_SECRET not set — generating ephemeral secret. \
             Session tokens will not survive a restart."
        );
        let mut secret = vec![0u8; 32];
        OsRng.fill_bytes(&mut secret);
        Ok(secret)
    }
}

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly: the pool and issuer are both cheap reference-counted
/// clones.
#[derive(Debug, Clone)]
pub struct AppState {
    /// PostgreSQL connection pool — the credential store and the
    /// enrollment ledger live behind it.
    pub pool: PgPool,
    /// Session token issuer, built from the configured secret.
    pub issuer: TokenIssuer,
    /// Application configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Create the application state from configuration and a connected pool.
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        let issuer = TokenIssuer::new(&config.token_secret);
        Self {
            pool,
            issuer,
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_debug_redacts_secret() {
        let config = AppConfig {
            port: 8080,
            token_secret: b"super-secret-value".to_vec(),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("8080"));
    }
}
