//! Cache resource kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of cache resource an IAM token authenticates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Replication group (node-based cache).
    #[default]
    Standard,
    /// Serverless cache.
    Serverless,
}

impl ResourceKind {
    /// Returns the `ResourceType` query value this kind adds, if any.
    #[must_use]
    pub const fn resource_type_param(&self) -> Option<&'static str> {
        match self {
            Self::Standard => None,
            Self::Serverless => Some("ServerlessCache"),
        }
    }

    /// Returns true for serverless caches.
    #[must_use]
    pub const fn is_serverless(&self) -> bool {
        matches!(self, Self::Serverless)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Serverless => write!(f, "serverless"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_type_param() {
        assert_eq!(ResourceKind::Standard.resource_type_param(), None);
        assert_eq!(ResourceKind::Serverless.resource_type_param(), Some("ServerlessCache"));
    }

    #[test]
    fn test_default_is_standard() {
        assert_eq!(ResourceKind::default(), ResourceKind::Standard);
        assert!(!ResourceKind::default().is_serverless());
    }

    #[test]
    fn test_display() {
        assert_eq!(ResourceKind::Serverless.to_string(), "serverless");
    }
}
