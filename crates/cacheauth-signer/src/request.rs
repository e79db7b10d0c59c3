//! Shape of the IAM "connect" request that gets presigned.

use cacheauth_core::validation::rules;
use cacheauth_core::{AuthError, AuthResult, ResourceKind, ValidateExt};
use validator::Validate;

/// Region used when none is given.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Scheme placeholder; stripped from the emitted token.
pub(crate) const REQUEST_PROTOCOL: &str = "http://";

const REQUEST_METHOD: &str = "GET";
const REQUEST_PATH: &str = "/";
const PARAM_ACTION: &str = "Action";
const PARAM_USER: &str = "User";
const PARAM_RESOURCE_TYPE: &str = "ResourceType";
const ACTION_NAME: &str = "connect";

/// Immutable description of who connects to which cache.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct TokenRequestSpec {
    #[validate(length(min = 1, message = "user id cannot be empty"))]
    user_id: String,
    #[validate(length(min = 1, message = "resource id cannot be empty"))]
    resource_id: String,
    region: String,
    resource_kind: ResourceKind,
}

impl TokenRequestSpec {
    /// Creates a validated request spec.
    ///
    /// An empty `region` falls back to [`DEFAULT_REGION`].
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a blank user id, a blank or non-host resource
    /// id, or a malformed region.
    pub fn new(
        user_id: impl Into<String>,
        resource_id: impl Into<String>,
        region: impl Into<String>,
        resource_kind: ResourceKind,
    ) -> AuthResult<Self> {
        let mut region = region.into();
        if region.is_empty() {
            region = DEFAULT_REGION.to_string();
        }

        let spec = Self {
            user_id: user_id.into(),
            resource_id: resource_id.into(),
            region,
            resource_kind,
        };
        spec.validate_arguments()?;

        if rules::not_blank(&spec.user_id).is_err() {
            return Err(AuthError::invalid_argument("user id cannot be blank"));
        }
        if rules::uri_host(&spec.resource_id).is_err() {
            return Err(AuthError::invalid_argument(format!(
                "resource id '{}' is not a valid host name",
                spec.resource_id
            )));
        }
        if rules::aws_region(&spec.region).is_err() {
            return Err(AuthError::invalid_argument(format!(
                "invalid AWS region '{}'",
                spec.region
            )));
        }

        Ok(spec)
    }

    /// Returns the cache user id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the replication group or serverless cache name.
    #[must_use]
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    /// Returns the signing region.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Returns the resource kind.
    #[must_use]
    pub const fn resource_kind(&self) -> ResourceKind {
        self.resource_kind
    }

    /// Builds the unsigned request for this spec.
    #[must_use]
    pub fn to_signable_request(&self) -> SignableRequest {
        let mut request = SignableRequest::new(&self.resource_id);
        request.add_param(PARAM_ACTION, ACTION_NAME);
        request.add_param(PARAM_USER, &self.user_id);
        if let Some(resource_type) = self.resource_kind.resource_type_param() {
            request.add_param(PARAM_RESOURCE_TYPE, resource_type);
        }
        request
    }
}

/// A body-less GET request against `http://{host}/`.
///
/// Lives only for the duration of one signing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignableRequest {
    host: String,
    params: Vec<(String, String)>,
}

impl SignableRequest {
    fn new(host: &str) -> Self {
        Self {
            host: host.to_string(),
            params: Vec::new(),
        }
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> &'static str {
        REQUEST_METHOD
    }

    /// Returns the host (the resource id).
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the request path.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        REQUEST_PATH
    }

    /// Returns the endpoint URI including the placeholder scheme.
    #[must_use]
    pub fn uri(&self) -> String {
        format!("{}{}{}", REQUEST_PROTOCOL, self.host, REQUEST_PATH)
    }

    /// Returns query parameters in insertion order, unencoded.
    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    fn add_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.push((name.into(), value.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(kind: ResourceKind) -> TokenRequestSpec {
        TokenRequestSpec::new("my-user-id", "my-replication-group-id", "eu-west-1", kind).unwrap()
    }

    #[test]
    fn test_signable_request_shape() {
        let request = spec(ResourceKind::Standard).to_signable_request();
        assert_eq!(request.method(), "GET");
        assert_eq!(request.host(), "my-replication-group-id");
        assert_eq!(request.path(), "/");
        assert_eq!(request.uri(), "http://my-replication-group-id/");
        assert_eq!(
            request.params(),
            &[
                ("Action".to_string(), "connect".to_string()),
                ("User".to_string(), "my-user-id".to_string()),
            ]
        );
    }

    #[test]
    fn test_serverless_adds_resource_type() {
        let request = spec(ResourceKind::Serverless).to_signable_request();
        assert_eq!(
            request.params(),
            &[
                ("Action".to_string(), "connect".to_string()),
                ("User".to_string(), "my-user-id".to_string()),
                ("ResourceType".to_string(), "ServerlessCache".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_user_id_rejected() {
        let err = TokenRequestSpec::new("", "group", "us-east-1", ResourceKind::Standard).unwrap_err();
        assert!(matches!(err, AuthError::InvalidArgument(_)));
        assert!(err.to_string().contains("user id cannot be empty"));

        let err = TokenRequestSpec::new("  ", "group", "us-east-1", ResourceKind::Standard).unwrap_err();
        assert!(matches!(err, AuthError::InvalidArgument(_)));
    }

    #[test]
    fn test_empty_resource_id_rejected() {
        let err = TokenRequestSpec::new("user", "", "us-east-1", ResourceKind::Standard).unwrap_err();
        assert!(matches!(err, AuthError::InvalidArgument(_)));
        assert!(err.to_string().contains("resource id cannot be empty"));
    }

    #[test]
    fn test_both_empty_reports_both() {
        let err = TokenRequestSpec::new("", "", "us-east-1", ResourceKind::Standard).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("user_id"));
        assert!(message.contains("resource_id"));
    }

    #[test]
    fn test_resource_id_must_be_host() {
        let err =
            TokenRequestSpec::new("user", "group/../x", "us-east-1", ResourceKind::Standard).unwrap_err();
        assert!(matches!(err, AuthError::InvalidArgument(_)));
    }

    #[test]
    fn test_invalid_region_rejected() {
        let err = TokenRequestSpec::new("user", "group", "EU WEST", ResourceKind::Standard).unwrap_err();
        assert!(matches!(err, AuthError::InvalidArgument(_)));
        assert!(err.to_string().contains("EU WEST"));
    }

    #[test]
    fn test_empty_region_defaults() {
        let spec = TokenRequestSpec::new("user", "group", "", ResourceKind::Standard).unwrap();
        assert_eq!(spec.region(), DEFAULT_REGION);
    }

    #[test]
    fn test_accessors() {
        let spec = spec(ResourceKind::Serverless);
        assert_eq!(spec.user_id(), "my-user-id");
        assert_eq!(spec.resource_id(), "my-replication-group-id");
        assert_eq!(spec.region(), "eu-west-1");
        assert_eq!(spec.resource_kind(), ResourceKind::Serverless);
    }
}
