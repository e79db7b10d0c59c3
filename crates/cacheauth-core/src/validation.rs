//! Validation utilities.

use crate::AuthError;
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns an `AuthError::InvalidArgument` on failure.
    fn validate_arguments(&self) -> Result<(), AuthError> {
        self.validate().map_err(validation_errors_to_auth_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `AuthError`.
#[must_use]
pub fn validation_errors_to_auth_error(errors: ValidationErrors) -> AuthError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                format!("{field}: {message}")
            })
        })
        .collect();
    messages.sort();

    AuthError::InvalidArgument(messages.join("; "))
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Maximum accepted length of an AWS region name.
    const MAX_REGION_LENGTH: usize = 32;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates that a value can stand as the authority of a URI.
    pub fn uri_host(value: &str) -> Result<(), ValidationError> {
        not_blank(value)?;
        if value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '@' | ':'))
        {
            return Err(ValidationError::new("uri_host"));
        }
        Ok(())
    }

    /// Validates an AWS region name such as `us-east-1` or `us-gov-west-1`.
    ///
    /// Lowercase ASCII letters and digits in hyphen-separated segments, with
    /// at least two segments.
    pub fn aws_region(value: &str) -> Result<(), ValidationError> {
        if value.is_empty() || value.len() > MAX_REGION_LENGTH {
            return Err(ValidationError::new("aws_region"));
        }

        let mut segments = 0;
        for segment in value.split('-') {
            if segment.is_empty()
                || !segment
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            {
                return Err(ValidationError::new("aws_region"));
            }
            segments += 1;
        }

        if segments < 2 {
            return Err(ValidationError::new("aws_region"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::rules::*;
    use super::*;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "cannot be empty"))]
        name: String,
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("user").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
    }

    #[test]
    fn test_uri_host() {
        assert!(uri_host("my-replication-group-id").is_ok());
        assert!(uri_host("my-cache.serverless.use1.cache.amazonaws.com").is_ok());
        assert!(uri_host("bad/host").is_err());
        assert!(uri_host("host:6379").is_err());
        assert!(uri_host("user@host").is_err());
        assert!(uri_host("with space").is_err());
        assert!(uri_host("").is_err());
    }

    #[test]
    fn test_aws_region() {
        for region in ["us-east-1", "eu-west-1", "us-gov-west-1", "cn-north-1", "ap-southeast-2"] {
            assert!(aws_region(region).is_ok(), "{region} should be valid");
        }
        for region in ["", "useast1", "US-EAST-1", "us--east-1", "-us-east-1", "us-east-1-", "us_east_1"] {
            assert!(aws_region(region).is_err(), "{region} should be invalid");
        }
        assert!(aws_region(&"a-".repeat(20)).is_err());
    }

    #[test]
    fn test_validation_errors_become_invalid_argument() {
        let probe = Probe { name: String::new() };
        let err = probe.validate_arguments().unwrap_err();
        assert!(matches!(err, AuthError::InvalidArgument(_)));
        assert!(err.to_string().contains("name: cannot be empty"));

        let probe = Probe { name: "ok".to_string() };
        assert!(probe.validate_arguments().is_ok());
    }
}
