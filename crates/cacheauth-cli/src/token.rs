//! One-shot token generation.

use cacheauth_config::AuthConfig;
use cacheauth_core::{AuthError, AuthResult};
use cacheauth_credentials::aws::AwsCredentialSource;
use cacheauth_signer::{IamAuthTokenRequest, SignedToken, TokenRequestSpec};
use chrono::{DateTime, Utc};
use tracing::info;

/// Fetches AWS credentials from `source` and signs one token at `now`.
///
/// Ignores any static password in `auth`.
///
/// # Errors
///
/// `InvalidArgument` for incomplete settings, `CredentialsUnavailable` when
/// the source fails, `SigningFailure` when signing does.
pub async fn generate_token(
    auth: &AuthConfig,
    source: &dyn AwsCredentialSource,
    now: DateTime<Utc>,
) -> AuthResult<SignedToken> {
    let resource_id = auth
        .resource_id()
        .ok_or_else(|| AuthError::invalid_argument("resource id cannot be empty"))?;
    let spec = TokenRequestSpec::new(
        auth.user_id.clone(),
        resource_id,
        auth.region.clone(),
        auth.resource_kind,
    )?;
    let request = IamAuthTokenRequest::new(spec).with_expiry(auth.token_expiry())?;

    let credentials = source.credentials().await?;
    let token = request.to_signed_token(&credentials, now)?;
    info!(
        user_id = %auth.user_id,
        resource_id = %resource_id,
        source = source.name(),
        "Generated IAM auth token"
    );
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cacheauth_credentials::aws::SdkCredentialSource;
    use cacheauth_signer::AwsCredentials;
    use chrono::TimeZone;

    fn auth() -> AuthConfig {
        AuthConfig {
            user_id: "my-user-id".to_string(),
            resource_id: Some("my-replication-group-id".to_string()),
            region: "eu-west-1".to_string(),
            ..AuthConfig::default()
        }
    }

    #[tokio::test]
    async fn test_generate_token_matches_fixture() {
        let source =
            SdkCredentialSource::from_static(&AwsCredentials::new("fakeAccessKeyId", "fakeSecretKey"));
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        let token = generate_token(&auth(), &source, now).await.unwrap();
        assert!(token.as_str().starts_with("my-replication-group-id/?Action=connect&User=my-user-id"));
        assert_eq!(
            token.query_param("X-Amz-Signature").as_deref(),
            Some("9e361603d85874bce06114c6644725ed113e3b11ae6fa92efdf10c6bcf5de8d7")
        );
    }

    #[tokio::test]
    async fn test_generate_token_requires_resource_id() {
        let source = SdkCredentialSource::from_static(&AwsCredentials::new("AKID", "SECRET"));
        let mut auth = auth();
        auth.resource_id = None;

        let err = generate_token(&auth, &source, Utc::now()).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidArgument(_)));
    }
}
