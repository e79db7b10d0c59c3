//! Sources of long-lived AWS credentials used to sign tokens.

mod sdk;
mod source;

pub use sdk::*;
pub use source::*;
