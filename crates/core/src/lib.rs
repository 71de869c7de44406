//! Core types for the EAV object store
//!
//! This crate defines the foundational vocabulary shared by every layer:
//!
//! - Identifier newtypes for entities, attributes, objects, values and files
//! - `RawValue`: the unified raw value crossing the store boundary
//! - Datetime parsing and the three canonical temporal formats
//! - The shared error taxonomy and `Result` alias
//!
//! Nothing in this crate knows about schemas or storage; it is the contract
//! layer the engine, schema and projector crates build on.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod ids;
pub mod timestamp;
pub mod value;

pub use error::{EavError, Result};
pub use ids::{is_uuid_shaped, AttributeId, EntityId, FileId, ObjectId, ValueId};
pub use value::RawValue;
