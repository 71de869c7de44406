//! Identifier types for the EAV object store
//!
//! Every node in the schema and data graphs is addressed by a stable
//! UUID-backed identifier:
//! - EntityId: a schema definition
//! - AttributeId: one typed field definition within an Entity
//! - ObjectId: one data instance conforming to an Entity schema
//! - ValueId: the concrete data held by one Attribute on one object
//! - FileId: one owned file record attached to a Value
//!
//! Identifiers are the only way graph edges are stored; objects never hold
//! owning references to each other.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random identifier using UUID v4
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an identifier from raw bytes
            pub fn from_bytes(bytes: [u8; 16]) -> Self {
                Self(Uuid::from_bytes(bytes))
            }

            /// Parse an identifier from a string representation
            ///
            /// Accepts standard UUID format (with or without hyphens).
            /// Returns None if the string is not a valid UUID.
            pub fn from_string(s: &str) -> Option<Self> {
                Uuid::parse_str(s).ok().map(Self)
            }

            /// Get the raw bytes of this identifier
            pub fn as_bytes(&self) -> &[u8; 16] {
                self.0.as_bytes()
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id! {
    /// Unique identifier for an Entity (a schema definition)
    EntityId
}

define_id! {
    /// Unique identifier for an Attribute (one field of an Entity schema)
    AttributeId
}

define_id! {
    /// Unique identifier for an ObjectEntity (one stored data instance)
    ObjectId
}

define_id! {
    /// Unique identifier for a Value (one attribute slot on an object)
    ValueId
}

define_id! {
    /// Unique identifier for a File record owned by a Value
    FileId
}

/// Check whether a string is UUID-shaped
///
/// Used by the lifecycle hooks to decide whether a string slot holds a
/// reference to another object or plain text.
pub fn is_uuid_shaped(s: &str) -> bool {
    Uuid::parse_str(s).is_ok()
}
