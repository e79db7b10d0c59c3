//! AWS Signature Version 4 presigning for query-string authentication.
//!
//! Canonicalization and the HMAC key chain come from `aws-sigv4`. This module
//! adapts the token's body-less GET to it and renders the signing parameters
//! in the order tokens list them.

use crate::{AwsCredentials, SignableRequest};
use aws_credential_types::Credentials;
use aws_sigv4::http_request::{
    sign, SignableBody, SignableRequest as HttpSignableRequest, SignatureLocation,
    SigningParams as HttpSigningParams, SigningSettings,
};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use cacheauth_core::{AuthError, AuthResult};
use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::time::{Duration, SystemTime};

/// Signing algorithm identifier.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

pub const PARAM_SECURITY_TOKEN: &str = "X-Amz-Security-Token";
pub const PARAM_ALGORITHM: &str = "X-Amz-Algorithm";
pub const PARAM_DATE: &str = "X-Amz-Date";
pub const PARAM_SIGNED_HEADERS: &str = "X-Amz-SignedHeaders";
pub const PARAM_EXPIRES: &str = "X-Amz-Expires";
pub const PARAM_CREDENTIAL: &str = "X-Amz-Credential";
pub const PARAM_SIGNATURE: &str = "X-Amz-Signature";

/// Order of the signing parameters after the request's own parameters.
const SIGNING_PARAM_ORDER: [&str; 7] = [
    PARAM_SECURITY_TOKEN,
    PARAM_ALGORITHM,
    PARAM_DATE,
    PARAM_SIGNED_HEADERS,
    PARAM_EXPIRES,
    PARAM_CREDENTIAL,
    PARAM_SIGNATURE,
];

/// Provider name attached to the credentials handed to the signer.
const CREDENTIALS_SOURCE: &str = "cacheauth";

/// Everything except RFC 3986 unreserved characters gets encoded.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Inputs to a presign operation other than the request itself.
#[derive(Debug, Clone, Copy)]
pub struct SigningParams<'a> {
    pub credentials: &'a AwsCredentials,
    pub region: &'a str,
    pub service: &'a str,
    pub time: DateTime<Utc>,
    pub expires_in_secs: u64,
}

fn signing_error(context: &str, e: impl std::fmt::Display) -> AuthError {
    AuthError::signing(format!("{}: {}", context, e))
}

/// Presigns `request` and returns the signing query parameters, unencoded.
///
/// The result holds the session token (for temporary credentials), algorithm,
/// date, signed headers, expiry, credential and signature, in that order.
/// The payload hash is that of an empty body.
///
/// # Errors
///
/// `SigningFailure` if the credentials are empty or `aws-sigv4` rejects the
/// request.
pub fn presign(
    request: &SignableRequest,
    params: &SigningParams<'_>,
) -> AuthResult<Vec<(String, String)>> {
    let credentials = params.credentials;
    if credentials.access_key_id().is_empty() || credentials.secret_access_key().is_empty() {
        return Err(AuthError::signing("access key id and secret access key must be non-empty"));
    }

    let identity: Identity = Credentials::new(
        credentials.access_key_id(),
        credentials.secret_access_key(),
        credentials.session_token().map(str::to_string),
        None,
        CREDENTIALS_SOURCE,
    )
    .into();

    let mut settings = SigningSettings::default();
    settings.signature_location = SignatureLocation::QueryParams;
    settings.expires_in = Some(Duration::from_secs(params.expires_in_secs));

    let signing_params: HttpSigningParams<'_> = v4::SigningParams::builder()
        .identity(&identity)
        .region(params.region)
        .name(params.service)
        .time(SystemTime::from(params.time))
        .settings(settings)
        .build()
        .map_err(|e| signing_error("Invalid signing parameters", e))?
        .into();

    let url = format!("{}?{}", request.uri(), encode_query(request.params()));
    let signable = HttpSignableRequest::new(
        request.method(),
        url.as_str(),
        std::iter::empty(),
        SignableBody::Bytes(&[]),
    )
    .map_err(|e| signing_error("Unsignable request", e))?;

    let (instructions, _signature) = sign(signable, &signing_params)
        .map_err(|e| signing_error("Signing failed", e))?
        .into_parts();
    let (_headers, mut signed) = instructions.into_parts();

    signed.sort_by_key(|(name, _)| {
        SIGNING_PARAM_ORDER
            .iter()
            .position(|known| known == name)
            .unwrap_or(SIGNING_PARAM_ORDER.len())
    });
    Ok(signed
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.into_owned()))
        .collect())
}

/// Encodes a query key or value per SigV4 (uppercase hex, unreserved kept).
#[must_use]
pub fn uri_encode(value: &str) -> String {
    utf8_percent_encode(value, URI_ENCODE_SET).to_string()
}

/// Renders parameters as an encoded query string in the given order.
#[must_use]
pub fn encode_query(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", uri_encode(k), uri_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenRequestSpec;
    use cacheauth_core::ResourceKind;
    use chrono::TimeZone;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn signing_params(credentials: &AwsCredentials) -> SigningParams<'_> {
        SigningParams {
            credentials,
            region: "eu-west-1",
            service: "elasticache",
            time: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            expires_in_secs: 900,
        }
    }

    fn connect_request() -> SignableRequest {
        TokenRequestSpec::new("my-user-id", "my-replication-group-id", "eu-west-1", ResourceKind::Standard)
            .unwrap()
            .to_signable_request()
    }

    fn names(signed: &[(String, String)]) -> Vec<&str> {
        signed.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn test_uri_encode() {
        assert_eq!(uri_encode("my-user_id.v1~"), "my-user_id.v1~");
        assert_eq!(uri_encode("a/b"), "a%2Fb");
        assert_eq!(uri_encode("a b+c=d&e"), "a%20b%2Bc%3Dd%26e");
        assert_eq!(uri_encode("ü"), "%C3%BC");
    }

    #[test]
    fn test_encode_query_keeps_order() {
        let query = encode_query(&params(&[("User", "a/b"), ("Action", "connect")]));
        assert_eq!(query, "User=a%2Fb&Action=connect");
    }

    #[test]
    fn test_presign_permanent_credentials() {
        let creds = AwsCredentials::new("fakeAccessKeyId", "fakeSecretKey");
        let signed = presign(&connect_request(), &signing_params(&creds)).unwrap();

        assert_eq!(
            signed,
            params(&[
                ("X-Amz-Algorithm", "AWS4-HMAC-SHA256"),
                ("X-Amz-Date", "20250101T000000Z"),
                ("X-Amz-SignedHeaders", "host"),
                ("X-Amz-Expires", "900"),
                ("X-Amz-Credential", "fakeAccessKeyId/20250101/eu-west-1/elasticache/aws4_request"),
                (
                    "X-Amz-Signature",
                    "9e361603d85874bce06114c6644725ed113e3b11ae6fa92efdf10c6bcf5de8d7"
                ),
            ])
        );
    }

    #[test]
    fn test_presign_session_token_comes_first() {
        let creds = AwsCredentials::temporary("fakeAccessKeyId", "fakeSecretKey", "fakeSessionToken");
        let signed = presign(&connect_request(), &signing_params(&creds)).unwrap();

        assert_eq!(
            names(&signed),
            vec![
                "X-Amz-Security-Token",
                "X-Amz-Algorithm",
                "X-Amz-Date",
                "X-Amz-SignedHeaders",
                "X-Amz-Expires",
                "X-Amz-Credential",
                "X-Amz-Signature",
            ]
        );
        assert_eq!(signed[0].1, "fakeSessionToken");
        assert_eq!(
            signed[6].1,
            "bbce2bd61bd78461297ecb92e7001ddbeab2d85906c3cbedad6c9b81fb3466dc"
        );
    }

    #[test]
    fn test_presign_does_not_touch_request() {
        let request = connect_request();
        let creds = AwsCredentials::new("fakeAccessKeyId", "fakeSecretKey");
        presign(&request, &signing_params(&creds)).unwrap();
        assert_eq!(request, connect_request());
    }

    #[test]
    fn test_presign_rejects_empty_keys() {
        let creds = AwsCredentials::new("fakeAccessKeyId", "");
        let err = presign(&connect_request(), &signing_params(&creds)).unwrap_err();
        assert!(matches!(err, AuthError::SigningFailure(_)));
    }
}
