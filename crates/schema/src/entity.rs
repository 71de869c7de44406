//! Entity definitions
//!
//! An Entity is an ordered set of Attributes describing one object kind.
//! Insertion order is preserved because schema rendering walks attributes in
//! the order they were declared.

use crate::attribute::{Attribute, AttributeType};
use eav_core::{AttributeId, EavError, EntityId, Result};
use serde::{Deserialize, Serialize};

/// A named schema: one object kind and its ordered attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier
    pub id: EntityId,
    /// Name, used for routing and documentation tags
    pub name: String,
    /// Human-readable description
    pub description: Option<String>,
    /// Documentation groupings this entity belongs to
    #[serde(default)]
    pub collections: Vec<String>,
    attributes: Vec<Attribute>,
}

impl Entity {
    /// Create an empty entity with the given name
    pub fn new(name: &str) -> Self {
        Self {
            id: EntityId::new(),
            name: name.to_string(),
            description: None,
            collections: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Append an attribute, preserving declaration order
    ///
    /// Rejects duplicate names and object/type mismatches (an `object`-typed
    /// attribute must carry a target entity, and only object-typed
    /// attributes may).
    pub fn add_attribute(&mut self, attribute: Attribute) -> Result<AttributeId> {
        if self.attributes.iter().any(|a| a.name == attribute.name) {
            return Err(EavError::Schema(format!(
                "entity '{}' already has an attribute named '{}'",
                self.name, attribute.name
            )));
        }
        match (attribute.attr_type, attribute.object) {
            (AttributeType::Object, None) => {
                return Err(EavError::Schema(format!(
                    "object attribute '{}' has no target entity",
                    attribute.name
                )));
            }
            (ty, Some(_)) if ty != AttributeType::Object => {
                return Err(EavError::Schema(format!(
                    "attribute '{}' of type {} cannot reference an entity",
                    attribute.name, ty
                )));
            }
            _ => {}
        }
        let id = attribute.id;
        self.attributes.push(attribute);
        Ok(id)
    }

    /// The attributes in declaration order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Look up an attribute by id
    pub fn attribute_by_id(&self, id: AttributeId) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.id == id)
    }
}
