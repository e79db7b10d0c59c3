//! Unified error types for token signing and credential resolution.

use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for CacheAuth.
///
/// The first three variants are the failure kinds of token minting and
/// credential resolution. The remaining ones belong to the ambient layers
/// (configuration loading and the demo cache client).
#[derive(Error, Debug)]
pub enum AuthError {
    // ============ Resolution Errors ============
    /// Empty or malformed input (user id, resource id, region, expiry).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The AWS credential source could not produce a snapshot.
    #[error("AWS credentials unavailable from {provider}: {message}")]
    CredentialsUnavailable { provider: String, message: String },

    /// Internal request state could not be signed.
    #[error("Signing failure: {0}")]
    SigningFailure(String),

    // ============ Infrastructure Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Cache client connection or command error
    #[error("Connection error: {0}")]
    Connection(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::CredentialsUnavailable { .. } => "CREDENTIALS_UNAVAILABLE",
            Self::SigningFailure(_) => "SIGNING_FAILURE",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Connection(_) => "CONNECTION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument<T: Into<String>>(message: T) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a credentials unavailable error for the named source.
    #[must_use]
    pub fn credentials_unavailable<P: Into<String>, M: Into<String>>(provider: P, message: M) -> Self {
        Self::CredentialsUnavailable {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Creates a signing failure.
    #[must_use]
    pub fn signing<T: Into<String>>(message: T) -> Self {
        Self::SigningFailure(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if a caller's reconnect loop may retry after this error.
    ///
    /// Nothing in this workspace retries on its own; the flag is advice for
    /// the cache client.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::CredentialsUnavailable { .. } | Self::Connection(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AuthError::invalid_argument("x").error_code(), "INVALID_ARGUMENT");
        assert_eq!(
            AuthError::credentials_unavailable("environment", "missing").error_code(),
            "CREDENTIALS_UNAVAILABLE"
        );
        assert_eq!(AuthError::signing("bad key").error_code(), "SIGNING_FAILURE");
        assert_eq!(AuthError::configuration("bad").error_code(), "CONFIGURATION_ERROR");
        assert_eq!(AuthError::Connection("refused".to_string()).error_code(), "CONNECTION_ERROR");
        assert_eq!(AuthError::internal("oops").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_retriable_errors() {
        assert!(AuthError::credentials_unavailable("imds", "timeout").is_retriable());
        assert!(AuthError::Connection("reset".to_string()).is_retriable());
    }

    #[test]
    fn test_non_retriable_errors() {
        assert!(!AuthError::invalid_argument("empty user id").is_retriable());
        assert!(!AuthError::signing("bad key").is_retriable());
        assert!(!AuthError::configuration("missing").is_retriable());
        assert!(!AuthError::internal("bug").is_retriable());
    }

    #[test]
    fn test_error_display() {
        let err = AuthError::credentials_unavailable("environment", "AWS_ACCESS_KEY_ID not set");
        assert_eq!(
            err.to_string(),
            "AWS credentials unavailable from environment: AWS_ACCESS_KEY_ID not set"
        );

        let err = AuthError::invalid_argument("user id cannot be empty");
        assert!(err.to_string().contains("user id cannot be empty"));
    }
}
