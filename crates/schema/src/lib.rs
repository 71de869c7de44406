//! Schema layer for the EAV object store
//!
//! Entities describe object kinds as ordered sets of Attributes; the
//! registry resolves cross-entity references (object targets, inverse
//! attributes) and the validator turns an attribute's declared type, format
//! and validation rules into one per-field validation pass.
//!
//! The schema is data, not code: entities and attributes serialize, so a
//! registry can be loaded from configuration as well as built in process.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attribute;
pub mod entity;
pub mod registry;
pub mod validation;

pub use attribute::{Attribute, AttributeType, Format};
pub use entity::Entity;
pub use registry::SchemaRegistry;
pub use validation::{FieldError, ValidationReport, Validator};
