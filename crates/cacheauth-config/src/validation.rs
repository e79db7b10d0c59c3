//! Configuration validation module.
//!
//! Collects every problem in a loaded configuration before failing, so a
//! misconfigured deployment reports all of them at once.

use crate::{AppConfig, AuthConfig, AwsConfig, CacheEndpointConfig, ObservabilityConfig};
use cacheauth_core::validation::rules;
use std::fmt;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// A required value is missing or blank.
    MissingField { name: String },
    /// Neither a static password nor a resource id is configured.
    MissingResourceId,
    /// Resource id cannot be used as a URI host.
    InvalidResourceId { value: String },
    /// Region name is malformed.
    InvalidRegion { value: String },
    /// Timeout value must be positive.
    NonPositiveTimeout { name: String, value: u64 },
    /// Token expiry outside the range SigV4 presigning accepts.
    InvalidTokenExpiry { value: u64, maximum: u64 },
    /// Cache TTL must be strictly below the signed token expiry.
    CacheTtlNotBelowExpiry { ttl: u64, expiry: u64 },
    /// Port number is invalid.
    InvalidPort { name: String, value: u16 },
    /// Only one half of the static AWS key pair is set.
    IncompleteStaticKeys,
    /// Log level is invalid.
    InvalidLogLevel { value: String },
    /// Log format is invalid.
    InvalidLogFormat { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { name } => write!(f, "'{}' is required", name),
            Self::MissingResourceId => {
                write!(f, "auth.resource_id is required when no static password is configured")
            }
            Self::InvalidResourceId { value } => {
                write!(f, "Invalid resource id '{}': must be a bare host name", value)
            }
            Self::InvalidRegion { value } => {
                write!(f, "Invalid AWS region '{}' (expected e.g. us-east-1)", value)
            }
            Self::NonPositiveTimeout { name, value } => {
                write!(f, "Timeout '{}' must be positive, got {}", name, value)
            }
            Self::InvalidTokenExpiry { value, maximum } => {
                write!(
                    f,
                    "Invalid token expiry: {}s (must be between 1 and {})",
                    value, maximum
                )
            }
            Self::CacheTtlNotBelowExpiry { ttl, expiry } => {
                write!(
                    f,
                    "Token cache TTL ({}s) must be shorter than token expiry ({}s)",
                    ttl, expiry
                )
            }
            Self::InvalidPort { name, value } => {
                write!(f, "Invalid port for {}: {} (must be 1-65535)", name, value)
            }
            Self::IncompleteStaticKeys => {
                write!(
                    f,
                    "aws.access_key_id and aws.secret_access_key must be set together, \
                     and aws.session_token needs both"
                )
            }
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                    value
                )
            }
            Self::InvalidLogFormat { value } => {
                write!(f, "Invalid log format: '{}' (valid: pretty, json)", value)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Result of configuration validation containing all errors found.
#[derive(Debug)]
pub struct ValidationResult {
    errors: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Creates a new validation result.
    fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Adds an error to the result.
    fn add_error(&mut self, error: ConfigValidationError) {
        self.errors.push(error);
    }

    /// Converts to Result, returning Err with all errors if any exist.
    pub fn into_result(self) -> Result<(), Vec<ConfigValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Longest presigned URL validity SigV4 accepts (7 days).
    pub const MAX_TOKEN_EXPIRY_SECS: u64 = 604_800;
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut result = ValidationResult::new();

        Self::validate_auth(&config.auth, &mut result);
        Self::validate_aws(&config.aws, &mut result);
        Self::validate_cache(&config.cache, &mut result);
        Self::validate_observability(&config.observability, &mut result);

        result.into_result()
    }

    /// Validates auth configuration.
    fn validate_auth(config: &AuthConfig, result: &mut ValidationResult) {
        if rules::not_blank(&config.user_id).is_err() {
            result.add_error(ConfigValidationError::MissingField {
                name: "auth.user_id".to_string(),
            });
        }

        match config.resource_id() {
            Some(resource_id) => {
                if rules::uri_host(resource_id).is_err() {
                    result.add_error(ConfigValidationError::InvalidResourceId {
                        value: resource_id.to_string(),
                    });
                }
            }
            None if config.static_password().is_none() => {
                result.add_error(ConfigValidationError::MissingResourceId);
            }
            None => {}
        }

        // An empty region falls back to the default at signing time
        if !config.region.is_empty() && rules::aws_region(&config.region).is_err() {
            result.add_error(ConfigValidationError::InvalidRegion {
                value: config.region.clone(),
            });
        }

        if config.token_cache_ttl_secs == 0 {
            result.add_error(ConfigValidationError::NonPositiveTimeout {
                name: "auth.token_cache_ttl_secs".to_string(),
                value: 0,
            });
        }

        if config.token_expiry_secs == 0 || config.token_expiry_secs > Self::MAX_TOKEN_EXPIRY_SECS {
            result.add_error(ConfigValidationError::InvalidTokenExpiry {
                value: config.token_expiry_secs,
                maximum: Self::MAX_TOKEN_EXPIRY_SECS,
            });
        }

        if config.token_cache_ttl_secs >= config.token_expiry_secs {
            result.add_error(ConfigValidationError::CacheTtlNotBelowExpiry {
                ttl: config.token_cache_ttl_secs,
                expiry: config.token_expiry_secs,
            });
        }
    }

    /// Validates AWS credential source configuration.
    fn validate_aws(config: &AwsConfig, result: &mut ValidationResult) {
        let has_key = config.access_key_id.is_some();
        let has_secret = config.secret_access_key.is_some();
        let orphan_token = config.session_token.is_some() && !has_key;
        if has_key != has_secret || orphan_token {
            result.add_error(ConfigValidationError::IncompleteStaticKeys);
        }
    }

    /// Validates the cache endpoint configuration.
    fn validate_cache(config: &CacheEndpointConfig, result: &mut ValidationResult) {
        if rules::not_blank(&config.host).is_err() {
            result.add_error(ConfigValidationError::MissingField {
                name: "cache.host".to_string(),
            });
        }

        if config.port == 0 {
            result.add_error(ConfigValidationError::InvalidPort {
                name: "cache.port".to_string(),
                value: config.port,
            });
        }
    }

    /// Validates observability configuration.
    fn validate_observability(config: &ObservabilityConfig, result: &mut ValidationResult) {
        let level = config.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            result.add_error(ConfigValidationError::InvalidLogLevel {
                value: config.log_level.clone(),
            });
        }

        if config.format().is_none() {
            result.add_error(ConfigValidationError::InvalidLogFormat {
                value: config.log_format.clone(),
            });
        }
    }
}

/// Formats validation errors for display.
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}
