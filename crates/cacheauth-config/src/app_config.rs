//! Application configuration structures.

use cacheauth_core::{LogFormat, ResourceKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default AWS signing region.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Cache user and token configuration.
    #[serde(default)]
    pub auth: AuthConfig,

    /// AWS credential source configuration.
    #[serde(default)]
    pub aws: AwsConfig,

    /// Cache endpoint used by the demo client.
    #[serde(default)]
    pub cache: CacheEndpointConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "cacheauth".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Cache user and IAM token configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Cache username being authenticated.
    pub user_id: String,
    /// Static password. When set, IAM tokens are not used.
    pub password: Option<String>,
    /// Replication group or serverless cache name.
    #[serde(alias = "replication_group_id")]
    pub resource_id: Option<String>,
    /// AWS region used for the signing scope.
    pub region: String,
    /// Kind of cache resource.
    pub resource_kind: ResourceKind,
    /// How long a minted token is reused, in seconds.
    pub token_cache_ttl_secs: u64,
    /// Signed validity window of a token, in seconds.
    pub token_expiry_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            password: None,
            resource_id: None,
            region: DEFAULT_REGION.to_string(),
            resource_kind: ResourceKind::Standard,
            token_cache_ttl_secs: 600,  // 10 minutes
            token_expiry_secs: 900,     // 15 minutes
        }
    }
}

impl AuthConfig {
    /// Returns the static password if one is configured and non-empty.
    #[must_use]
    pub fn static_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }

    /// Returns the resource id if one is configured and non-empty.
    #[must_use]
    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref().filter(|r| !r.trim().is_empty())
    }

    /// Returns the token cache TTL as a Duration.
    #[must_use]
    pub const fn token_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.token_cache_ttl_secs)
    }

    /// Returns the token expiry as a Duration.
    #[must_use]
    pub const fn token_expiry(&self) -> Duration {
        Duration::from_secs(self.token_expiry_secs)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("user_id", &self.user_id)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("resource_id", &self.resource_id)
            .field("region", &self.region)
            .field("resource_kind", &self.resource_kind)
            .field("token_cache_ttl_secs", &self.token_cache_ttl_secs)
            .field("token_expiry_secs", &self.token_expiry_secs)
            .finish()
    }
}

/// AWS credential source configuration.
///
/// With no explicit keys, credentials come from the AWS SDK default chain,
/// which reads its own `AWS_*` environment variables and shared files.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    /// Explicit access key id. Bypasses the default chain when set.
    pub access_key_id: Option<String>,
    /// Explicit secret access key.
    pub secret_access_key: Option<String>,
    /// Explicit session token for temporary credentials.
    pub session_token: Option<String>,
    /// Shared config/credentials profile name (defaults to `AWS_PROFILE`).
    pub profile: Option<String>,
}

impl AwsConfig {
    /// Returns the configured profile name, ignoring blanks.
    #[must_use]
    pub fn profile_name(&self) -> Option<&str> {
        self.profile.as_deref().filter(|p| !p.trim().is_empty())
    }
}

impl fmt::Debug for AwsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsConfig")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &self.secret_access_key.as_ref().map(|_| "<redacted>"))
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .field("profile", &self.profile)
            .finish()
    }
}

/// Cache endpoint configuration for the demo client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheEndpointConfig {
    /// Cache host.
    pub host: String,
    /// Cache port.
    pub port: u16,
    /// Connect over TLS.
    pub tls: bool,
    /// Pause between connection attempts, in seconds.
    pub connect_sleep_secs: u64,
    /// Stop after this many successful connections (unlimited when unset).
    pub max_connections: Option<u64>,
}

impl Default for CacheEndpointConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            tls: true,
            connect_sleep_secs: 1,
            max_connections: None,
        }
    }
}

impl CacheEndpointConfig {
    /// Returns the connection URL without credentials.
    #[must_use]
    pub fn url(&self) -> String {
        let scheme = if self.tls { "rediss" } else { "redis" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }

    /// Returns the pause between attempts as a Duration.
    #[must_use]
    pub const fn connect_sleep(&self) -> Duration {
        Duration::from_secs(self.connect_sleep_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log format (pretty, json).
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Returns the parsed log format, if recognised.
    #[must_use]
    pub fn format(&self) -> Option<LogFormat> {
        match self.log_format.to_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}
