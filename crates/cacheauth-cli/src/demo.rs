//! Connection demo: repeatedly authenticate against the cache and read a key.
//!
//! Every iteration resolves credentials, so with IAM auth the log shows
//! tokens being reused within the cache TTL and re-signed after it.

use cacheauth_config::CacheEndpointConfig;
use cacheauth_core::{AuthError, AuthResult};
use cacheauth_credentials::CredentialProvider;
use redis::aio::MultiplexedConnection;
use redis::IntoConnectionInfo;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

fn connection_error(e: redis::RedisError) -> AuthError {
    AuthError::Connection(e.to_string())
}

/// Drives the connect loop.
#[derive(Debug)]
pub struct DemoApp {
    cache: CacheEndpointConfig,
    provider: Arc<dyn CredentialProvider>,
    connections: u64,
}

impl DemoApp {
    #[must_use]
    pub fn new(cache: CacheEndpointConfig, provider: Arc<dyn CredentialProvider>) -> Self {
        Self {
            cache,
            provider,
            connections: 0,
        }
    }

    /// Number of successful connections so far.
    #[must_use]
    pub const fn connections(&self) -> u64 {
        self.connections
    }

    fn limit_reached(&self) -> bool {
        self.cache
            .max_connections
            .is_some_and(|max| self.connections >= max)
    }

    /// Opens a fresh authenticated connection and reads a random key.
    async fn connect_once(&self) -> AuthResult<MultiplexedConnection> {
        let pair = self.provider.resolve_credentials().await?;
        let (username, password) = pair.into_parts();

        let mut info = self
            .cache
            .url()
            .into_connection_info()
            .map_err(connection_error)?;
        info.redis.username = Some(username);
        info.redis.password = Some(password);

        let client = redis::Client::open(info).map_err(connection_error)?;
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(connection_error)?;

        let key = Uuid::new_v4().to_string();
        let _: Option<String> = redis::cmd("GET")
            .arg(&key)
            .query_async(&mut conn)
            .await
            .map_err(connection_error)?;
        Ok(conn)
    }

    /// Runs until `shutdown` completes, the connection limit is reached, or
    /// a non-retriable error occurs. Returns the number of successful
    /// connections.
    ///
    /// # Errors
    ///
    /// The first error whose `is_retriable()` is false.
    pub async fn run<F>(&mut self, shutdown: F) -> AuthResult<u64>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        while !self.limit_reached() {
            let attempt = tokio::select! {
                biased;
                () = &mut shutdown => break,
                attempt = self.connect_once() => attempt,
            };

            let conn = match attempt {
                Ok(conn) => {
                    self.connections += 1;
                    info!(connections = self.connections, "=> Successful connections: {}", self.connections);
                    Some(conn)
                }
                Err(e) if e.is_retriable() => {
                    warn!(error = %e, code = e.error_code(), "Connection attempt failed");
                    None
                }
                Err(e) => return Err(e),
            };

            tokio::select! {
                biased;
                () = &mut shutdown => break,
                () = tokio::time::sleep(self.cache.connect_sleep()) => {}
            }
            drop(conn);
        }

        info!(connections = self.connections, "Demo loop finished");
        Ok(self.connections)
    }
}
