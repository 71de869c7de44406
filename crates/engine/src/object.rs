//! ObjectEntity: one stored instance of an Entity schema
//!
//! An object owns its Values (one per attribute, created lazily on first
//! write) and participates in the relation graph both as owner, through
//! its object-typed Values, and as target, through `subresource_of`
//! entries naming the Values that reference it. Edges are identifier pairs,
//! never owning references; the graph may be cyclic.

use crate::payload::Payload;
use crate::value::Value;
use chrono::{DateTime, Utc};
use eav_core::{AttributeId, EntityId, ObjectId};
use eav_schema::Attribute;
use serde::{Deserialize, Serialize};

/// Back-reference naming the Value that links to an object
///
/// `(object, attribute)` uniquely identifies one Value in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubresourceRef {
    /// The object owning the referencing Value
    pub object: ObjectId,
    /// The attribute of the referencing Value
    pub attribute: AttributeId,
}

/// One data instance conforming to an Entity schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectEntity {
    /// Unique identifier
    pub id: ObjectId,
    /// The schema this object conforms to
    pub entity: EntityId,
    /// Resource URI, also usable as an alternate identifier
    pub uri: Option<String>,
    /// External system identifier, usable as an alternate identifier
    pub external_id: Option<String>,
    /// The moment this object was created
    pub date_created: DateTime<Utc>,
    /// The moment this object last changed
    pub date_modified: DateTime<Utc>,
    values: Vec<Value>,
    subresource_of: Vec<SubresourceRef>,
}

impl ObjectEntity {
    /// Create an empty object for an entity schema
    pub fn new(entity: EntityId) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            entity,
            uri: None,
            external_id: None,
            date_created: now,
            date_modified: now,
            values: Vec::new(),
            subresource_of: Vec::new(),
        }
    }

    /// The values populated so far, in first-write order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// The value for an attribute, if it was ever written
    pub fn value_for(&self, attribute: AttributeId) -> Option<&Value> {
        self.values.iter().find(|v| v.attribute() == attribute)
    }

    pub(crate) fn value_for_mut(&mut self, attribute: AttributeId) -> Option<&mut Value> {
        self.values.iter_mut().find(|v| v.attribute() == attribute)
    }

    /// The value for an attribute, created on first access
    pub(crate) fn value_for_or_create(&mut self, attribute: &Attribute) -> &mut Value {
        if let Some(index) = self
            .values
            .iter()
            .position(|v| v.attribute() == attribute.id)
        {
            &mut self.values[index]
        } else {
            self.values.push(Value::new(attribute));
            let last = self.values.len() - 1;
            &mut self.values[last]
        }
    }

    /// The Values (as object/attribute pairs) that reference this object
    pub fn subresource_of(&self) -> &[SubresourceRef] {
        &self.subresource_of
    }

    /// Register a referencing Value; a no-op when already present
    pub(crate) fn add_subresource(&mut self, reference: SubresourceRef) {
        if !self.subresource_of.contains(&reference) {
            self.subresource_of.push(reference);
        }
    }

    /// Drop the back-reference for one referencing Value
    pub(crate) fn remove_subresource(&mut self, object: ObjectId, attribute: AttributeId) {
        self.subresource_of
            .retain(|r| !(r.object == object && r.attribute == attribute));
    }

    /// Whether any object-typed value still holds staged identifiers
    pub fn has_pending_references(&self) -> bool {
        self.values.iter().any(|v| {
            matches!(v.payload(), Payload::Objects(links) if !links.pending.is_empty())
        })
    }

    pub(crate) fn touch(&mut self) {
        self.date_modified = Utc::now();
    }
}
