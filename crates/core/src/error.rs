//! Error types for the EAV object store
//!
//! One error enum is shared across the workspace, via `thiserror` for the
//! `Display` and `Error` implementations.
//!
//! Propagation policy: the value engine never catches and swallows errors.
//! The two documented no-op cases (null input on a `file` attribute, integer
//! overflow) are not errors at all; everything else propagates to the
//! caller untouched.

use std::io;
use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, EavError>;

/// Error taxonomy for the EAV object store
#[derive(Debug, Error)]
pub enum EavError {
    /// The schema cannot support the requested operation: a Value without a
    /// usable Attribute, an unknown attribute name, an unrecognized type, or
    /// a payload slot that no longer matches its attribute's declared type.
    /// Always fatal to the current operation; never retried.
    #[error("schema error: {0}")]
    Schema(String),

    /// Raw input cannot be coerced to the attribute's declared type.
    /// Fatal to the current field's assignment; callers that support partial
    /// validation collect these per field.
    #[error("cannot convert value for attribute '{attribute}': expected {expected}, got {found}")]
    TypeConversion {
        /// Name of the attribute being assigned
        attribute: String,
        /// The declared type that was expected
        expected: String,
        /// Type name of the rejected input
        found: String,
    },

    /// An object identifier could not be resolved during reference
    /// resolution. Fatal to the current write; silently skipping it would
    /// corrupt referential integrity.
    #[error("no object found for identifier: {0}")]
    ReferenceNotFound(String),

    /// Input data failed schema validation; the message carries the
    /// per-field report.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced entity, object or attribute does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Store configuration is invalid or unreadable
    #[error("config error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error (config file loading)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
