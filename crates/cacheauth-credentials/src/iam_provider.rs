//! IAM token credentials with a time-bounded token cache.

use crate::aws::AwsCredentialSource;
use crate::{CachedToken, CredentialPair, CredentialProvider, TokenCache};
use async_trait::async_trait;
use cacheauth_core::{AuthError, AuthResult, Clock};
use cacheauth_signer::IamAuthTokenRequest;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Default token reuse window (10 minutes).
pub const DEFAULT_TOKEN_CACHE_TTL: Duration = Duration::from_secs(600);

/// Resolves `(user id, signed token)` pairs.
///
/// A token is reused while younger than the cache TTL. On a miss, fresh AWS
/// credentials are fetched and a new token is signed at the current time.
/// Concurrent misses may each sign; the cache keeps the newest.
pub struct IamCredentialProvider {
    request: IamAuthTokenRequest,
    source: Arc<dyn AwsCredentialSource>,
    clock: Arc<dyn Clock>,
    cache: TokenCache,
}

impl IamCredentialProvider {
    /// Creates a provider with the default 600 second cache TTL.
    ///
    /// # Errors
    ///
    /// See [`IamCredentialProvider::with_cache_ttl`].
    pub fn new(
        request: IamAuthTokenRequest,
        source: Arc<dyn AwsCredentialSource>,
        clock: Arc<dyn Clock>,
    ) -> AuthResult<Self> {
        Self::with_cache_ttl(request, source, clock, DEFAULT_TOKEN_CACHE_TTL)
    }

    /// Creates a provider that reuses tokens for `cache_ttl`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless `0 < cache_ttl < token expiry`.
    pub fn with_cache_ttl(
        request: IamAuthTokenRequest,
        source: Arc<dyn AwsCredentialSource>,
        clock: Arc<dyn Clock>,
        cache_ttl: Duration,
    ) -> AuthResult<Self> {
        if cache_ttl.is_zero() {
            return Err(AuthError::invalid_argument("token cache TTL must be positive"));
        }
        if cache_ttl >= request.expires_in() {
            return Err(AuthError::invalid_argument(format!(
                "token cache TTL ({}s) must be shorter than the token expiry ({}s)",
                cache_ttl.as_secs(),
                request.expires_in().as_secs()
            )));
        }

        Ok(Self {
            request,
            source,
            clock,
            cache: TokenCache::new(cache_ttl),
        })
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        self.request.spec().user_id()
    }

    #[must_use]
    pub const fn cache(&self) -> &TokenCache {
        &self.cache
    }

    fn pair(&self, entry: &CachedToken) -> CredentialPair {
        CredentialPair::new(self.user_id(), entry.token().as_str())
    }

    async fn mint(&self) -> AuthResult<CachedToken> {
        let credentials = self.source.credentials().await?;
        let now = self.clock.now();
        let token = self.request.to_signed_token(&credentials, now)?;

        info!(
            user_id = %self.user_id(),
            source = self.source.name(),
            minted_at = %now,
            "Minted IAM auth token"
        );

        let entry = CachedToken::new(token, now);
        if !self.cache.store(entry.clone()) {
            debug!("A newer token was cached concurrently");
        }
        Ok(entry)
    }
}

#[async_trait]
impl CredentialProvider for IamCredentialProvider {
    async fn resolve_credentials(&self) -> AuthResult<CredentialPair> {
        let entry = match self.cache.get(self.clock.now()) {
            Some(entry) => {
                debug!(minted_at = %entry.minted_at(), "IAM auth token cache hit");
                entry
            }
            None => {
                debug!("IAM auth token cache miss");
                self.mint().await?
            }
        };

        let pair = self.pair(&entry);
        info!(
            username = %pair.username(),
            password = %pair.masked_password(),
            "Using credentials"
        );
        Ok(pair)
    }
}

impl fmt::Debug for IamCredentialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IamCredentialProvider")
            .field("request", &self.request)
            .field("source", &self.source.name())
            .field("cache_ttl", &self.cache.ttl())
            .finish_non_exhaustive()
    }
}
