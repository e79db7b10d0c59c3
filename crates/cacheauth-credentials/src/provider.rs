//! The credential resolution capability.

use async_trait::async_trait;
use cacheauth_core::AuthResult;
use std::fmt;

/// Number of leading characters kept when a secret is logged.
const MASK_VISIBLE_CHARS: usize = 12;

/// Supplies the credentials for the next connection or re-authentication.
///
/// Called concurrently by every connection attempt of a client.
#[async_trait]
pub trait CredentialProvider: fmt::Debug + Send + Sync {
    /// Resolves the current username and password.
    async fn resolve_credentials(&self) -> AuthResult<CredentialPair>;
}

/// A username and the password (static secret or signed token) minted with it.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialPair {
    username: String,
    password: String,
}

impl CredentialPair {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the password reduced to a loggable prefix.
    #[must_use]
    pub fn masked_password(&self) -> String {
        mask_secret(&self.password)
    }

    /// Splits into `(username, password)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.username, self.password)
    }
}

impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("username", &self.username)
            .field("password", &self.masked_password())
            .finish()
    }
}

/// Keeps the first 12 characters of a secret followed by `...`.
///
/// Secrets no longer than that are hidden entirely.
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= MASK_VISIBLE_CHARS {
        return "***".to_string();
    }
    let prefix: String = secret.chars().take(MASK_VISIBLE_CHARS).collect();
    format!("{}...", prefix)
}
