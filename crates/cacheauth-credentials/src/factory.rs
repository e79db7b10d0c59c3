//! Builds the credential provider described by configuration.

use crate::aws::AwsCredentialSource;
use crate::{CredentialProvider, IamCredentialProvider, StaticCredentialProvider};
use cacheauth_config::AuthConfig;
use cacheauth_core::{AuthError, AuthResult, Clock};
use cacheauth_signer::{IamAuthTokenRequest, TokenRequestSpec};
use std::sync::Arc;
use tracing::info;

/// Selects the provider variant for `auth`.
///
/// A non-empty password yields the static provider and `source` is never
/// consulted. Otherwise an IAM provider signs tokens for `resource_id`.
///
/// # Errors
///
/// `InvalidArgument` when the IAM settings are incomplete or malformed.
pub fn build_credential_provider(
    auth: &AuthConfig,
    source: Arc<dyn AwsCredentialSource>,
    clock: Arc<dyn Clock>,
) -> AuthResult<Arc<dyn CredentialProvider>> {
    if let Some(password) = auth.static_password() {
        info!(user_id = %auth.user_id, "Using static password authentication");
        return Ok(Arc::new(StaticCredentialProvider::new(auth.user_id.clone(), password)));
    }

    let resource_id = auth.resource_id().ok_or_else(|| {
        AuthError::invalid_argument("resource id is required for IAM authentication")
    })?;
    let spec = TokenRequestSpec::new(
        auth.user_id.clone(),
        resource_id,
        auth.region.clone(),
        auth.resource_kind,
    )?;
    let request = IamAuthTokenRequest::new(spec).with_expiry(auth.token_expiry())?;

    info!(
        user_id = %auth.user_id,
        resource_id = %resource_id,
        region = %auth.region,
        resource_kind = %auth.resource_kind,
        "Using IAM authentication"
    );
    let provider =
        IamCredentialProvider::with_cache_ttl(request, source, clock, auth.token_cache_ttl())?;
    Ok(Arc::new(provider))
}
