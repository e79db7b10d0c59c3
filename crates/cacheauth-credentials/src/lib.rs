//! # CacheAuth Credentials
//!
//! Supplies the `(username, password)` pair a cache client authenticates
//! with. The static provider returns a fixed password; the IAM provider mints
//! presigned tokens from AWS credentials and reuses each one for a bounded
//! time.

pub mod aws;
mod cache;
mod factory;
mod iam_provider;
mod provider;
mod static_provider;

pub use cache::*;
pub use factory::*;
pub use iam_provider::*;
pub use provider::*;
pub use static_provider::*;
