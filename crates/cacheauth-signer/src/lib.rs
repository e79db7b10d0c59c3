//! # CacheAuth Signer
//!
//! Builds the IAM "connect" request for an ElastiCache replication group or
//! serverless cache and presigns it with AWS Signature Version 4. The result
//! is a short-lived bearer token the cache accepts as a password.

mod credentials;
mod request;
pub mod sigv4;
mod token;

pub use credentials::*;
pub use request::{SignableRequest, TokenRequestSpec, DEFAULT_REGION};
pub use token::*;
