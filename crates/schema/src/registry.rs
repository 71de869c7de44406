//! Schema registry
//!
//! The registry owns every Entity definition and resolves the cross-entity
//! references the engine needs: object attribute targets and inverse
//! attribute names. It is immutable once handed to a store; schema changes
//! mean building a new registry.

use crate::attribute::{Attribute, AttributeType};
use crate::entity::Entity;
use eav_core::{AttributeId, EavError, EntityId, Result};
use serde::{Deserialize, Serialize};

/// Ordered set of Entity definitions with cross-reference resolution
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaRegistry {
    entities: Vec<Entity>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity definition
    ///
    /// Entity names are unique across the registry.
    pub fn register(&mut self, entity: Entity) -> Result<EntityId> {
        if self.entities.iter().any(|e| e.name == entity.name) {
            return Err(EavError::Schema(format!(
                "an entity named '{}' is already registered",
                entity.name
            )));
        }
        let id = entity.id;
        self.entities.push(entity);
        Ok(id)
    }

    /// All entities in registration order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Look up an entity by id
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Look up an entity by name
    pub fn entity_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Resolve an attribute by owning entity and name
    pub fn attribute(&self, entity: EntityId, name: &str) -> Option<&Attribute> {
        self.entity(entity).and_then(|e| e.attribute(name))
    }

    /// Resolve an attribute by owning entity and attribute id
    pub fn attribute_by_id(&self, entity: EntityId, attribute: AttributeId) -> Option<&Attribute> {
        self.entity(entity).and_then(|e| e.attribute_by_id(attribute))
    }

    /// Check every cross-entity reference in the registry
    ///
    /// - object attribute targets must be registered entities
    /// - `inversed_by` must name an object-typed attribute on the target
    ///   entity
    pub fn validate(&self) -> Result<()> {
        for entity in &self.entities {
            for attribute in entity.attributes() {
                let target = match attribute.object {
                    Some(target) => target,
                    None => continue,
                };
                let target_entity = self.entity(target).ok_or_else(|| {
                    EavError::Schema(format!(
                        "attribute '{}.{}' references an unregistered entity",
                        entity.name, attribute.name
                    ))
                })?;
                if let Some(inverse) = &attribute.inversed_by {
                    let inverse_attr = target_entity.attribute(inverse).ok_or_else(|| {
                        EavError::Schema(format!(
                            "attribute '{}.{}' is inversed by '{}.{}', which does not exist",
                            entity.name, attribute.name, target_entity.name, inverse
                        ))
                    })?;
                    if inverse_attr.attr_type != AttributeType::Object {
                        return Err(EavError::Schema(format!(
                            "inverse attribute '{}.{}' is not object-typed",
                            target_entity.name, inverse
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}
