//! # CacheAuth Core
//!
//! Core types shared by every CacheAuth crate: the error enum, the result
//! alias, the resource kind, the injectable clock, input validation rules and
//! logging initialisation.

pub mod clock;
pub mod error;
pub mod resource;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use clock::*;
pub use error::*;
pub use resource::*;
pub use result::*;
pub use telemetry::*;
pub use validation::*;
