//! Typed storage payload for Values
//!
//! Instead of one nullable slot per representable type with the live one
//! picked at runtime, the payload is a tagged union selected once, at Value
//! construction, from the owning Attribute's declared type and
//! multiplicity. After that no slot ambiguity exists.
//!
//! The searchable string projection is a derived property computed from the
//! typed slot on demand, never a second stored field that could drift.

use crate::file::File;
use chrono::{DateTime, Utc};
use eav_core::timestamp::format_projection;
use eav_core::{ObjectId, RawValue};
use eav_schema::{Attribute, AttributeType};
use serde::{Deserialize, Serialize};

/// Relation edges held by an `object`-typed Value
///
/// `links` are live edges to other objects in the arena. `pending` holds
/// identifier strings staged by a write and not yet resolved; the lifecycle
/// hooks turn them into links before the object is committed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectLinks {
    /// Resolved relation edges, in link order
    pub links: Vec<ObjectId>,
    /// Staged identifier strings awaiting resolution
    pub pending: Vec<String>,
}

/// The typed storage slot of one Value
///
/// Exactly one case per attribute type/multiplicity combination; selected
/// once by [`Payload::for_attribute`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    /// Scalar string slot
    SingleString(Option<String>),
    /// Scalar integer slot
    SingleInt(Option<i64>),
    /// Scalar float slot
    SingleFloat(Option<f64>),
    /// Scalar boolean slot
    SingleBool(Option<bool>),
    /// Scalar datetime slot (`date` and `datetime` attributes)
    SingleDateTime(Option<DateTime<Utc>>),
    /// Dedicated multi-value slot for `date`/`datetime` attributes
    DateTimeArray(Option<Vec<DateTime<Utc>>>),
    /// Generic array slot: `array` attributes and every `multiple` scalar
    Array(Option<Vec<RawValue>>),
    /// Owned file records
    Files(Vec<File>),
    /// Relation edges to other objects
    Objects(ObjectLinks),
}

impl Payload {
    /// Select the storage slot for an attribute's declared type
    pub fn for_attribute(attribute: &Attribute) -> Self {
        match attribute.attr_type {
            AttributeType::Object => Payload::Objects(ObjectLinks::default()),
            AttributeType::File => Payload::Files(Vec::new()),
            AttributeType::Date | AttributeType::DateTime => {
                if attribute.multiple {
                    Payload::DateTimeArray(None)
                } else {
                    Payload::SingleDateTime(None)
                }
            }
            AttributeType::Array => Payload::Array(None),
            _ if attribute.multiple => Payload::Array(None),
            AttributeType::String => Payload::SingleString(None),
            AttributeType::Integer => Payload::SingleInt(None),
            AttributeType::Number => Payload::SingleFloat(None),
            AttributeType::Boolean => Payload::SingleBool(None),
        }
    }

    /// The canonical text form of a populated scalar slot
    ///
    /// integer → decimal string, float → shortest decimal string,
    /// boolean → `"true"`/`"false"`, datetime → `YYYY-MM-DD HH:MM:SS`,
    /// string → itself. Non-scalar and empty slots have no projection.
    ///
    /// This is what uniform text-based filtering searches across
    /// heterogeneous attribute types.
    pub fn string_projection(&self) -> Option<String> {
        match self {
            Payload::SingleString(slot) => slot.clone(),
            Payload::SingleInt(slot) => slot.map(|i| i.to_string()),
            Payload::SingleFloat(slot) => slot.map(|f| f.to_string()),
            Payload::SingleBool(slot) => slot.map(|b| if b { "true" } else { "false" }.to_string()),
            Payload::SingleDateTime(slot) => slot.as_ref().map(format_projection),
            _ => None,
        }
    }

    /// Name of the slot, for diagnostics
    pub fn slot_name(&self) -> &'static str {
        match self {
            Payload::SingleString(_) => "string",
            Payload::SingleInt(_) => "integer",
            Payload::SingleFloat(_) => "number",
            Payload::SingleBool(_) => "boolean",
            Payload::SingleDateTime(_) => "datetime",
            Payload::DateTimeArray(_) => "datetime-array",
            Payload::Array(_) => "array",
            Payload::Files(_) => "files",
            Payload::Objects(_) => "objects",
        }
    }
}
