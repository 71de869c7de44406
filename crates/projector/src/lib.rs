//! Schema and serialization projector
//!
//! Consumes an Entity's ordered attributes (type, multiplicity,
//! object-reference and cascade metadata) and produces:
//! - structural schema documents with generated example data
//!   ([`SchemaProjector`])
//! - format envelopes around those documents: plain JSON, JSON-LD, HAL
//!   ([`envelope_schema`])
//! - wire payloads for stored objects, consuming the value engine's typed
//!   output ([`ObjectRenderer`])
//!
//! There is no algorithmic depth here: every projection is a mechanical
//! tree walk over schema and object graphs.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod envelope;
pub mod example;
pub mod render;
pub mod schema;

pub use envelope::{envelope_schema, SchemaFormat};
pub use example::{example_for_attribute, example_for_format, example_for_type};
pub use render::ObjectRenderer;
pub use schema::SchemaProjector;
