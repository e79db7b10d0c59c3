//! # CacheAuth CLI
//!
//! Library side of the `cacheauth-token` and `cacheauth-demo` binaries:
//! one-shot token generation, the connection demo loop, and startup helpers.

pub mod demo;
pub mod shutdown;
pub mod startup;
pub mod token;
