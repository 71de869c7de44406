//! Object service: the thin layer external callers talk to
//!
//! Maps parsed request bodies onto the object graph attribute-by-attribute:
//! validate against the entity schema (rejecting with the per-field
//! report), hydrate scalars through the value engine, create and link
//! nested objects for relation attributes, then run the commit hooks that
//! resolve staged identifier references. Reading goes back out through the
//! projector.

use eav_core::{EavError, EntityId, ObjectId, RawValue, Result};
use eav_engine::{ObjectStore, StoreConfig, ValueView};
use eav_projector::{envelope_schema, ObjectRenderer, SchemaFormat, SchemaProjector};
use eav_schema::{Attribute, AttributeType, SchemaRegistry, Validator};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Service facade over one object store
pub struct ObjectService {
    store: Arc<ObjectStore>,
}

impl ObjectService {
    /// Create a service with its own store over a registry
    pub fn new(registry: Arc<SchemaRegistry>, config: StoreConfig) -> Self {
        Self {
            store: Arc::new(ObjectStore::new(registry, config)),
        }
    }

    /// Create a service over an existing store
    pub fn from_store(store: Arc<ObjectStore>) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    fn entity_id(&self, entity: &str) -> Result<EntityId> {
        self.store
            .registry()
            .entity_by_name(entity)
            .map(|e| e.id)
            .ok_or_else(|| EavError::NotFound(format!("entity '{entity}'")))
    }

    fn validate(&self, entity: EntityId, body: &RawValue) -> Result<()> {
        let registry = self.store.registry();
        let definition = registry
            .entity(entity)
            .ok_or_else(|| EavError::NotFound(format!("entity {entity}")))?;
        let report = Validator::new(registry).validate(definition, body);
        if report.is_ok() {
            return Ok(());
        }
        let messages = serde_json::to_string(&report.to_messages())
            .map_err(|e| EavError::Serialization(e.to_string()))?;
        Err(EavError::Validation(messages))
    }

    /// Create an object of an entity from a request body
    ///
    /// Validates, hydrates (applying attribute defaults for absent fields),
    /// then commits, which resolves every staged reference. Any failure
    /// rolls the created object back out of the store.
    pub fn create(&self, entity: &str, body: &RawValue) -> Result<ObjectId> {
        let entity_id = self.entity_id(entity)?;
        self.validate(entity_id, body)?;
        let object = self.store.create_object(entity_id)?;
        let result = self
            .hydrate(object, entity_id, body, true)
            .and_then(|_| self.store.commit_object(object));
        if let Err(error) = result {
            let _ = self.store.delete_object(object);
            return Err(error);
        }
        info!(object = %object, entity = %entity, "created object");
        Ok(object)
    }

    /// Update an object from a request body
    ///
    /// Same pipeline as create, without default application and without
    /// rollback (the object survives a failed update).
    pub fn update(&self, object: ObjectId, body: &RawValue) -> Result<()> {
        let entity_id = self.store.get_object(object)?.entity;
        self.validate(entity_id, body)?;
        self.hydrate(object, entity_id, body, false)?;
        self.store.commit_object(object)
    }

    /// Render an object in a wire format
    pub fn render(&self, object: ObjectId, format: SchemaFormat) -> Result<serde_json::Value> {
        ObjectRenderer::new(&self.store).render(object, format)
    }

    /// The documentation schema of an entity in a wire format
    pub fn schema(&self, entity: &str, format: SchemaFormat) -> Result<serde_json::Value> {
        let registry = self.store.registry();
        let definition = registry
            .entity_by_name(entity)
            .ok_or_else(|| EavError::NotFound(format!("entity '{entity}'")))?;
        let base = SchemaProjector::new(registry).base_schema(definition);
        Ok(envelope_schema(registry, definition, base, format))
    }

    /// Delete an object, cascading to values, files and relation cleanup
    pub fn delete(&self, object: ObjectId) -> Result<()> {
        self.store.delete_object(object)
    }

    /// Text search over an entity's searchable attributes
    pub fn search(&self, entity: &str, needle: &str) -> Result<Vec<ObjectId>> {
        let entity_id = self.entity_id(entity)?;
        Ok(self.store.filter_by_text(entity_id, needle))
    }

    // ========================================================================
    // Hydration
    // ========================================================================

    fn hydrate(
        &self,
        object: ObjectId,
        entity: EntityId,
        body: &RawValue,
        apply_defaults: bool,
    ) -> Result<()> {
        let map = match body.as_object() {
            Some(map) => map,
            None => {
                return Err(EavError::Validation(
                    "request body must be an object".to_string(),
                ))
            }
        };
        let attributes: Vec<Attribute> = self
            .store
            .registry()
            .entity(entity)
            .map(|e| e.attributes().to_vec())
            .unwrap_or_default();

        for attribute in &attributes {
            let raw = match map.get(&attribute.name) {
                Some(value) => value.clone(),
                None => match (&attribute.default_value, apply_defaults) {
                    (Some(default), true) => default.clone(),
                    _ => continue,
                },
            };
            if attribute.attr_type == AttributeType::Object {
                self.hydrate_relation(object, attribute, raw)?;
            } else {
                self.store.set_value(object, &attribute.name, raw)?;
            }
        }
        Ok(())
    }

    /// Apply one relation attribute: identifier strings stage for the
    /// commit hooks, nested bodies become sub-objects linked immediately
    fn hydrate_relation(
        &self,
        object: ObjectId,
        attribute: &Attribute,
        raw: RawValue,
    ) -> Result<()> {
        let target_entity = attribute.object.ok_or_else(|| {
            EavError::Schema(format!(
                "object attribute '{}' has no target entity",
                attribute.name
            ))
        })?;
        let target_name = self
            .store
            .registry()
            .entity(target_entity)
            .map(|e| e.name.clone())
            .ok_or_else(|| EavError::NotFound(format!("entity {target_entity}")))?;

        match raw {
            // null input is a no-op on relations
            RawValue::Null => Ok(()),
            RawValue::String(s) => self
                .store
                .set_value(object, &attribute.name, RawValue::String(s)),
            RawValue::Object(map) => {
                let sub = self.create(&target_name, &RawValue::Object(map))?;
                self.clear_links(object, attribute)?;
                self.store.add_object(object, &attribute.name, sub)
            }
            RawValue::Array(items) if attribute.multiple => {
                let mut identifiers = Vec::new();
                let mut bodies = Vec::new();
                for item in items {
                    match item {
                        RawValue::String(s) => identifiers.push(RawValue::String(s)),
                        RawValue::Object(map) => bodies.push(RawValue::Object(map)),
                        other => {
                            return Err(EavError::TypeConversion {
                                attribute: attribute.name.clone(),
                                expected: "object".to_string(),
                                found: other.type_name().to_string(),
                            })
                        }
                    }
                }
                // staging the identifier subset also clears existing links
                self.store
                    .set_value(object, &attribute.name, RawValue::Array(identifiers))?;
                for body in bodies {
                    let sub = self.create(&target_name, &body)?;
                    self.store.add_object(object, &attribute.name, sub)?;
                }
                Ok(())
            }
            other => Err(EavError::TypeConversion {
                attribute: attribute.name.clone(),
                expected: attribute.attr_type.as_str().to_string(),
                found: other.type_name().to_string(),
            }),
        }
    }

    /// Symmetrically unlink every current target of a relation value
    fn clear_links(&self, object: ObjectId, attribute: &Attribute) -> Result<()> {
        match self.store.get_value(object, &attribute.name)? {
            Some(ValueView::Object(target)) => {
                self.store.remove_object(object, &attribute.name, target)
            }
            Some(ValueView::Objects(targets)) => {
                for target in targets {
                    self.store.remove_object(object, &attribute.name, target)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// Build a raw body map from key/value pairs (test and demo helper)
pub fn body(pairs: &[(&str, RawValue)]) -> RawValue {
    let map: HashMap<String, RawValue> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    RawValue::Object(map)
}
