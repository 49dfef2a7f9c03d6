//! Opaque identifiers used across the platform.
//!
//! Ids are minted by the transport layer (clients generate request ids,
//! projects own editing context ids). The core only compares and hashes
//! them, so they stay thin wrappers around strings.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! opaque_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

opaque_id!(
    /// Identifies one server-held editing context (one project session).
    EditingContextId
);

opaque_id!(
    /// Identifies one live representation instance within an editing context.
    RepresentationId
);

opaque_id!(
    /// Correlates one submitted input with its single reply.
    RequestId
);
