//! AWS credentials resolved through the AWS SDK credential providers.

use super::AwsCredentialSource;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::error::CredentialsError;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_credential_types::Credentials;
use aws_smithy_types::error::display::DisplayErrorContext;
use cacheauth_config::AwsConfig;
use cacheauth_core::{AuthError, AuthResult};
use cacheauth_signer::{AwsCredentials, DEFAULT_REGION};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Source name for keys taken from the `aws` config section.
pub const CONFIG_SOURCE: &str = "config";

/// Source name for the SDK default provider chain.
pub const DEFAULT_CHAIN_SOURCE: &str = "aws-default-chain";

/// Adapts any SDK [`ProvideCredentials`] implementation to
/// [`AwsCredentialSource`].
///
/// Provider errors become `CredentialsUnavailable` carrying the full SDK
/// error context. Caching and refresh of the underlying credentials are left
/// to the SDK provider.
#[derive(Debug, Clone)]
pub struct SdkCredentialSource {
    name: &'static str,
    provider: SharedCredentialsProvider,
}

impl SdkCredentialSource {
    #[must_use]
    pub fn new(name: &'static str, provider: impl ProvideCredentials + 'static) -> Self {
        Self {
            name,
            provider: SharedCredentialsProvider::new(provider),
        }
    }

    /// Serves a fixed set of keys.
    #[must_use]
    pub fn from_static(credentials: &AwsCredentials) -> Self {
        Self::new(
            CONFIG_SOURCE,
            Credentials::new(
                credentials.access_key_id(),
                credentials.secret_access_key(),
                credentials.session_token().map(str::to_string),
                None,
                CONFIG_SOURCE,
            ),
        )
    }

    /// Builds the source described by the `aws` config section.
    ///
    /// Explicit keys win. Otherwise the SDK default chain is loaded for
    /// `region` (falling back to `us-east-1`), honouring the configured
    /// profile: environment variables, shared config and credentials files
    /// (static keys, assume-role, SSO, `credential_process`), web identity,
    /// then container and instance metadata.
    ///
    /// # Errors
    ///
    /// `CredentialsUnavailable` if the SDK ends up with no credentials
    /// provider at all.
    pub async fn from_config(config: &AwsConfig, region: &str) -> AuthResult<Self> {
        if let (Some(key), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            info!(access_key_id = %key, "Using AWS keys from configuration");
            let credentials = AwsCredentials::new(key.clone(), secret.clone())
                .with_session_token(config.session_token.clone());
            return Ok(Self::from_static(&credentials));
        }

        let region = if region.is_empty() { DEFAULT_REGION } else { region };
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));
        if let Some(profile) = config.profile_name() {
            loader = loader.profile_name(profile);
        }
        let sdk_config = loader.load().await;

        let provider = sdk_config.credentials_provider().ok_or_else(|| {
            AuthError::credentials_unavailable(
                DEFAULT_CHAIN_SOURCE,
                "AWS SDK configuration has no credentials provider",
            )
        })?;

        info!(
            region = %region,
            profile = config.profile_name().unwrap_or("default"),
            "Using AWS SDK default credential chain"
        );
        Ok(Self {
            name: DEFAULT_CHAIN_SOURCE,
            provider,
        })
    }
}

fn unavailable(source: &'static str, e: &CredentialsError) -> AuthError {
    AuthError::credentials_unavailable(source, DisplayErrorContext(e).to_string())
}

fn snapshot(credentials: &Credentials) -> AwsCredentials {
    AwsCredentials::new(credentials.access_key_id(), credentials.secret_access_key())
        .with_session_token(credentials.session_token().map(str::to_string))
        .with_expiry(credentials.expiry().map(DateTime::<Utc>::from))
}

#[async_trait]
impl AwsCredentialSource for SdkCredentialSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn credentials(&self) -> AuthResult<AwsCredentials> {
        let credentials = self
            .provider
            .provide_credentials()
            .await
            .map_err(|e| unavailable(self.name, &e))?;

        debug!(
            source = self.name,
            access_key_id = %credentials.access_key_id(),
            temporary = credentials.session_token().is_some(),
            "Resolved AWS credentials"
        );
        Ok(snapshot(&credentials))
    }
}
