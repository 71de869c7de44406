//! eavdb: a schema-driven EAV object store
//!
//! Administrators define [`Entity`] schemas composed of [`Attribute`]
//! definitions; arbitrary object instances are stored as graphs of typed
//! [`Value`] records rather than fixed relational columns. The value engine
//! maps each attribute's declared type and multiplicity onto one typed
//! storage slot, maintains bidirectional relations (inverse attributes,
//! subresource bookkeeping) and derives a canonical string projection of
//! every scalar for uniform text filtering.
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use eavdb::{
//!     body, Attribute, AttributeType, Entity, ObjectService, RawValue,
//!     SchemaFormat, SchemaRegistry, StoreConfig,
//! };
//!
//! # fn main() -> eavdb::Result<()> {
//! let mut registry = SchemaRegistry::new();
//! let mut person = Entity::new("person");
//! person.add_attribute(
//!     Attribute::new("name", AttributeType::String).with_required(true),
//! )?;
//! registry.register(person)?;
//!
//! let service = ObjectService::new(Arc::new(registry), StoreConfig::default());
//! let id = service.create("person", &body(&[("name", RawValue::from("Ada"))]))?;
//! let rendered = service.render(id, SchemaFormat::Json)?;
//! assert_eq!(rendered["name"], serde_json::json!("Ada"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Layering
//!
//! - [`eav_core`]: ids, the raw value model, errors, datetime handling
//! - [`eav_schema`]: Entity/Attribute definitions and validation
//! - [`eav_engine`]: the value engine, object arena and lifecycle hooks
//! - [`eav_projector`]: schema documents, format envelopes, object
//!   rendering
//! - [`eav_api`]: the service facade everything external consumes

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use eav_api::{body, ObjectService};
pub use eav_core::{
    is_uuid_shaped, AttributeId, EavError, EntityId, FileId, ObjectId, RawValue, Result, ValueId,
};
pub use eav_engine::{
    File, ObjectEntity, ObjectLinks, ObjectLookup, ObjectStore, Payload, StoreConfig,
    SubresourceRef, Value, ValueView, CONFIG_FILE_NAME,
};
pub use eav_projector::{envelope_schema, ObjectRenderer, SchemaFormat, SchemaProjector};
pub use eav_schema::{
    Attribute, AttributeType, Entity, FieldError, Format, SchemaRegistry, ValidationReport,
    Validator,
};
