//! The AWS credential source seam.

use async_trait::async_trait;
use cacheauth_core::AuthResult;
use cacheauth_signer::AwsCredentials;

/// Produces a snapshot of AWS credentials.
///
/// Implementations may block on file or network I/O. Failures surface as
/// `AuthError::CredentialsUnavailable`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AwsCredentialSource: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Fetches the current credentials.
    async fn credentials(&self) -> AuthResult<AwsCredentials>;
}
