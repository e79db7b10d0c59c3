//! Fixed username/password credentials.

use crate::{CredentialPair, CredentialProvider};
use async_trait::async_trait;
use cacheauth_core::AuthResult;
use tracing::debug;

/// Always returns the same pair. Never touches AWS.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    pair: CredentialPair,
}

impl StaticCredentialProvider {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            pair: CredentialPair::new(username, password),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn resolve_credentials(&self) -> AuthResult<CredentialPair> {
        debug!(username = %self.pair.username(), "Using static credentials");
        Ok(self.pair.clone())
    }
}
