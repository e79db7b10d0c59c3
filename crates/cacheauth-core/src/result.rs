//! Result type aliases for CacheAuth.

use crate::AuthError;

/// A specialized `Result` type for CacheAuth operations.
pub type AuthResult<T> = Result<T, AuthError>;
