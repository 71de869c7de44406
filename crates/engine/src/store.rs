//! The object store: an arena of ObjectEntity nodes
//!
//! Objects are addressed by stable identifiers; relation edges are
//! adjacency lists of identifiers on object-typed Values, with a
//! `subresource_of` back-reference list on the target side. Mutating one
//! edge triggers a bounded, single-hop symmetric update guarded by
//! idempotent containment checks, so cyclic graphs never recurse
//! unboundedly.
//!
//! One `RwLock` serializes writers: each write operation on the graph runs
//! synchronously to completion while holding the lock, which is the
//! at-most-one-committed-writer guarantee the engine promises.

use crate::config::StoreConfig;
use crate::object::{ObjectEntity, SubresourceRef};
use crate::value::ValueView;
use eav_core::{AttributeId, EavError, EntityId, ObjectId, RawValue, Result};
use eav_schema::{Attribute, AttributeType, SchemaRegistry};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Mutable interior of the store, guarded by the store lock
pub(crate) struct StoreState {
    pub(crate) objects: HashMap<ObjectId, ObjectEntity>,
    pub(crate) alternate_ids: HashMap<String, ObjectId>,
}

impl StoreState {
    /// Resolve an identifier string: primary id first, then any alternate
    /// (external id or uri)
    pub(crate) fn resolve_identifier(&self, identifier: &str) -> Option<ObjectId> {
        if let Some(id) = ObjectId::from_string(identifier) {
            if self.objects.contains_key(&id) {
                return Some(id);
            }
        }
        self.alternate_ids.get(identifier).copied()
    }
}

/// Arena of stored objects over one schema registry
pub struct ObjectStore {
    pub(crate) registry: Arc<SchemaRegistry>,
    pub(crate) config: StoreConfig,
    pub(crate) state: RwLock<StoreState>,
}

impl ObjectStore {
    /// Create a store over a registry with the given configuration
    pub fn new(registry: Arc<SchemaRegistry>, config: StoreConfig) -> Self {
        Self {
            registry,
            config,
            state: RwLock::new(StoreState {
                objects: HashMap::new(),
                alternate_ids: HashMap::new(),
            }),
        }
    }

    /// Create a store with the default configuration
    pub fn with_defaults(registry: Arc<SchemaRegistry>) -> Self {
        Self::new(registry, StoreConfig::default())
    }

    /// The schema registry this store conforms to
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// The active configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn no_object(object: ObjectId) -> EavError {
        EavError::NotFound(format!("object {object}"))
    }

    /// Resolve an attribute by name for the entity of a stored object
    fn attribute_of(
        &self,
        state: &StoreState,
        object: ObjectId,
        name: &str,
    ) -> Result<Attribute> {
        let entity = state
            .objects
            .get(&object)
            .ok_or_else(|| Self::no_object(object))?
            .entity;
        self.registry.attribute(entity, name).cloned().ok_or_else(|| {
            let entity_name = self
                .registry
                .entity(entity)
                .map(|e| e.name.clone())
                .unwrap_or_else(|| entity.to_string());
            EavError::Schema(format!(
                "entity '{entity_name}' has no attribute '{name}'"
            ))
        })
    }

    // ========================================================================
    // Object lifecycle
    // ========================================================================

    /// Create an empty object conforming to an entity schema
    pub fn create_object(&self, entity: EntityId) -> Result<ObjectId> {
        let definition = self
            .registry
            .entity(entity)
            .ok_or_else(|| EavError::NotFound(format!("entity {entity}")))?;
        let object = ObjectEntity::new(entity);
        let id = object.id;
        self.state.write().objects.insert(id, object);
        debug!(object = %id, entity = %definition.name, "created object");
        Ok(id)
    }

    /// Create an empty object by entity name
    pub fn create_object_by_name(&self, entity: &str) -> Result<ObjectId> {
        let id = self
            .registry
            .entity_by_name(entity)
            .ok_or_else(|| EavError::NotFound(format!("entity '{entity}'")))?
            .id;
        self.create_object(id)
    }

    /// Whether an object exists
    pub fn contains(&self, object: ObjectId) -> bool {
        self.state.read().objects.contains_key(&object)
    }

    /// Number of stored objects
    pub fn object_count(&self) -> usize {
        self.state.read().objects.len()
    }

    /// Snapshot one object
    pub fn get_object(&self, object: ObjectId) -> Result<ObjectEntity> {
        self.state
            .read()
            .objects
            .get(&object)
            .cloned()
            .ok_or_else(|| Self::no_object(object))
    }

    /// All objects of one entity
    pub fn objects_of_entity(&self, entity: EntityId) -> Vec<ObjectId> {
        let state = self.state.read();
        let mut ids: Vec<ObjectId> = state
            .objects
            .values()
            .filter(|o| o.entity == entity)
            .map(|o| o.id)
            .collect();
        // hash iteration order is not stable
        ids.sort();
        ids
    }

    /// Set the external identifier, registering it as an alternate id
    pub fn set_external_id(&self, object: ObjectId, external_id: &str) -> Result<()> {
        let mut state = self.state.write();
        let previous = {
            let entry = state
                .objects
                .get_mut(&object)
                .ok_or_else(|| Self::no_object(object))?;
            entry.external_id.replace(external_id.to_string())
        };
        if let Some(previous) = previous {
            state.alternate_ids.remove(&previous);
        }
        state.alternate_ids.insert(external_id.to_string(), object);
        Ok(())
    }

    /// Set the resource uri, registering it as an alternate id
    pub fn set_uri(&self, object: ObjectId, uri: &str) -> Result<()> {
        let mut state = self.state.write();
        let previous = {
            let entry = state
                .objects
                .get_mut(&object)
                .ok_or_else(|| Self::no_object(object))?;
            entry.uri.replace(uri.to_string())
        };
        if let Some(previous) = previous {
            state.alternate_ids.remove(&previous);
        }
        state.alternate_ids.insert(uri.to_string(), object);
        Ok(())
    }

    /// Delete an object, cascading to owned values and relation cleanup
    ///
    /// Every edge is severed in both directions: links from this object
    /// release their subresource back-references, and Values on other
    /// objects pointing here drop their links. Owned values, and the files
    /// they own, are destroyed with the object.
    pub fn delete_object(&self, object: ObjectId) -> Result<()> {
        let mut state = self.state.write();
        let entity = state
            .objects
            .get(&object)
            .ok_or_else(|| Self::no_object(object))?
            .entity;

        let outgoing: Vec<(AttributeId, ObjectId)> = state
            .objects
            .get(&object)
            .map(|entry| {
                entry
                    .values()
                    .iter()
                    .filter_map(|v| v.object_links().map(|l| (v.attribute(), l.links.clone())))
                    .flat_map(|(a, links)| links.into_iter().map(move |t| (a, t)))
                    .collect()
            })
            .unwrap_or_default();
        for (attribute, target) in outgoing {
            if let Some(attr) = self.registry.attribute_by_id(entity, attribute).cloned() {
                self.unlink_objects(&mut state, object, &attr, target)?;
            }
        }

        let incoming: Vec<SubresourceRef> = state
            .objects
            .get(&object)
            .map(|entry| entry.subresource_of().to_vec())
            .unwrap_or_default();
        for reference in incoming {
            let owner_entity = match state.objects.get(&reference.object) {
                Some(owner) => owner.entity,
                None => continue,
            };
            if let Some(attr) = self
                .registry
                .attribute_by_id(owner_entity, reference.attribute)
                .cloned()
            {
                self.unlink_objects(&mut state, reference.object, &attr, object)?;
            }
        }

        state.objects.remove(&object);
        state.alternate_ids.retain(|_, id| *id != object);
        info!(object = %object, "deleted object");
        Ok(())
    }

    // ========================================================================
    // Value engine entry points
    // ========================================================================

    /// Assign a raw value to an attribute of an object
    ///
    /// Non-object attributes dispatch through the Value's typed setters.
    /// Object attributes follow the reference-staging path: identifier
    /// strings are parked on the value and resolved into live links when
    /// the object is committed.
    pub fn set_value(&self, object: ObjectId, attribute: &str, raw: RawValue) -> Result<()> {
        let mut state = self.state.write();
        let attr = self.attribute_of(&state, object, attribute)?;
        if attr.attr_type == AttributeType::Object {
            return self.stage_references(&mut state, object, &attr, raw);
        }
        let entry = state
            .objects
            .get_mut(&object)
            .ok_or_else(|| Self::no_object(object))?;
        entry.value_for_or_create(&attr).set_raw(&attr, raw)?;
        entry.touch();
        Ok(())
    }

    /// Read an attribute of an object, multiplicity-aware
    pub fn get_value(&self, object: ObjectId, attribute: &str) -> Result<Option<ValueView>> {
        let state = self.state.read();
        let attr = self.attribute_of(&state, object, attribute)?;
        let entry = state
            .objects
            .get(&object)
            .ok_or_else(|| Self::no_object(object))?;
        Ok(entry.value_for(attr.id).and_then(|v| v.get(&attr)))
    }

    fn stage_references(
        &self,
        state: &mut StoreState,
        object: ObjectId,
        attr: &Attribute,
        raw: RawValue,
    ) -> Result<()> {
        // null input is a no-op, like the file slot
        if raw.is_null() {
            return Ok(());
        }
        let conversion = |found: &RawValue| EavError::TypeConversion {
            attribute: attr.name.clone(),
            expected: attr.attr_type.as_str().to_string(),
            found: found.type_name().to_string(),
        };
        let staged: Vec<String> = if attr.multiple {
            match raw {
                RawValue::Array(items) => {
                    let mut staged = Vec::with_capacity(items.len());
                    for item in items {
                        match item {
                            RawValue::String(s) => staged.push(s),
                            other => return Err(conversion(&other)),
                        }
                    }
                    staged
                }
                other => return Err(conversion(&other)),
            }
        } else {
            match raw {
                RawValue::String(s) => vec![s],
                other => return Err(conversion(&other)),
            }
        };

        // replace semantics: existing links are cleared first, and the
        // symmetric removal keeps back-references consistent
        let existing: Vec<ObjectId> = state
            .objects
            .get(&object)
            .and_then(|o| o.value_for(attr.id))
            .and_then(|v| v.object_links())
            .map(|l| l.links.clone())
            .unwrap_or_default();
        for target in existing {
            self.unlink_objects(state, object, attr, target)?;
        }

        let entry = state
            .objects
            .get_mut(&object)
            .ok_or_else(|| Self::no_object(object))?;
        let links = entry
            .value_for_or_create(attr)
            .object_links_mut()
            .ok_or_else(|| {
                EavError::Schema(format!(
                    "attribute '{}' does not hold object links",
                    attr.name
                ))
            })?;
        links.pending = staged;
        entry.touch();
        debug!(object = %object, attribute = %attr.name, "staged object references");
        Ok(())
    }

    // ========================================================================
    // Relationship maintenance
    // ========================================================================

    /// Link `target` into the object-typed attribute of `owner`
    ///
    /// Idempotent. Registers the subresource back-reference on `target`
    /// and, when the attribute declares an inverse, symmetrically links
    /// `owner` into the target's inverse Value.
    pub fn add_object(&self, owner: ObjectId, attribute: &str, target: ObjectId) -> Result<()> {
        let mut state = self.state.write();
        let attr = self.attribute_of(&state, owner, attribute)?;
        if attr.attr_type != AttributeType::Object {
            return Err(EavError::Schema(format!(
                "attribute '{}' is not object-typed",
                attr.name
            )));
        }
        if !state.objects.contains_key(&target) {
            return Err(Self::no_object(target));
        }
        self.link_objects(&mut state, owner, &attr, target)
    }

    /// Remove `target` from the object-typed attribute of `owner`
    ///
    /// Exact reverse of [`ObjectStore::add_object`], including the inverse
    /// side and the subresource back-reference.
    pub fn remove_object(&self, owner: ObjectId, attribute: &str, target: ObjectId) -> Result<()> {
        let mut state = self.state.write();
        let attr = self.attribute_of(&state, owner, attribute)?;
        if attr.attr_type != AttributeType::Object {
            return Err(EavError::Schema(format!(
                "attribute '{}' is not object-typed",
                attr.name
            )));
        }
        self.unlink_objects(&mut state, owner, &attr, target)
    }

    pub(crate) fn link_objects(
        &self,
        state: &mut StoreState,
        owner: ObjectId,
        attr: &Attribute,
        target: ObjectId,
    ) -> Result<()> {
        // add the forward edge first; the containment check below depends
        // on it to terminate the symmetric walk
        {
            let entry = state
                .objects
                .get_mut(&owner)
                .ok_or_else(|| Self::no_object(owner))?;
            let links = entry
                .value_for_or_create(attr)
                .object_links_mut()
                .ok_or_else(|| {
                    EavError::Schema(format!(
                        "attribute '{}' does not hold object links",
                        attr.name
                    ))
                })?;
            if !links.links.contains(&target) {
                links.links.push(target);
            }
            entry.touch();
        }

        // subresource back-reference on the target (idempotent)
        let target_entity = {
            let entry = state
                .objects
                .get_mut(&target)
                .ok_or_else(|| Self::no_object(target))?;
            entry.add_subresource(SubresourceRef {
                object: owner,
                attribute: attr.id,
            });
            entry.entity
        };

        // symmetric update on the declared inverse attribute
        if let Some(inverse_name) = attr.inversed_by.clone() {
            let inverse = self
                .registry
                .attribute(target_entity, &inverse_name)
                .cloned()
                .ok_or_else(|| {
                    EavError::Schema(format!(
                        "inverse attribute '{inverse_name}' does not exist on the related entity"
                    ))
                })?;
            let (inverse_value_exists, already_linked) = {
                let entry = state
                    .objects
                    .get(&target)
                    .ok_or_else(|| Self::no_object(target))?;
                match entry.value_for(inverse.id) {
                    Some(value) => (
                        true,
                        value
                            .object_links()
                            .map(|l| l.links.contains(&owner))
                            .unwrap_or(false),
                    ),
                    None => (false, false),
                }
            };
            if !already_linked {
                if !inverse_value_exists && !self.config.auto_create_inverse {
                    return Err(EavError::Schema(format!(
                        "object {target} has no value for inverse attribute '{inverse_name}' \
                         and auto-creation is disabled"
                    )));
                }
                self.link_objects(state, target, &inverse, owner)?;
            }
        }

        debug!(owner = %owner, attribute = %attr.name, target = %target, "linked objects");
        Ok(())
    }

    pub(crate) fn unlink_objects(
        &self,
        state: &mut StoreState,
        owner: ObjectId,
        attr: &Attribute,
        target: ObjectId,
    ) -> Result<()> {
        // drop the subresource back-reference
        let target_entity = {
            let entry = state
                .objects
                .get_mut(&target)
                .ok_or_else(|| Self::no_object(target))?;
            entry.remove_subresource(owner, attr.id);
            entry.entity
        };

        // drop the forward edge; the inverse walk below checks containment
        // against the already-updated state, so it terminates
        {
            let entry = state
                .objects
                .get_mut(&owner)
                .ok_or_else(|| Self::no_object(owner))?;
            if let Some(value) = entry.value_for_mut(attr.id) {
                if let Some(links) = value.object_links_mut() {
                    links.links.retain(|t| *t != target);
                }
            }
            entry.touch();
        }

        // symmetric removal on the inverse side
        if let Some(inverse_name) = attr.inversed_by.clone() {
            if let Some(inverse) = self
                .registry
                .attribute(target_entity, &inverse_name)
                .cloned()
            {
                let still_linked = state
                    .objects
                    .get(&target)
                    .and_then(|o| o.value_for(inverse.id))
                    .and_then(|v| v.object_links())
                    .map(|l| l.links.contains(&owner))
                    .unwrap_or(false);
                if still_linked {
                    self.unlink_objects(state, target, &inverse, owner)?;
                }
            }
        }

        debug!(owner = %owner, attribute = %attr.name, target = %target, "unlinked objects");
        Ok(())
    }

    // ========================================================================
    // Text filtering
    // ========================================================================

    /// Case-insensitive substring scan over the string projections of
    /// searchable attributes
    ///
    /// This is the consumer of the projection invariant: every scalar type
    /// filters through the same derived text, regardless of its slot.
    pub fn filter_by_text(&self, entity: EntityId, needle: &str) -> Vec<ObjectId> {
        let needle = needle.to_lowercase();
        let state = self.state.read();
        let mut hits: Vec<ObjectId> = state
            .objects
            .values()
            .filter(|object| object.entity == entity)
            .filter(|object| {
                object.values().iter().any(|value| {
                    let searchable = self
                        .registry
                        .attribute_by_id(entity, value.attribute())
                        .map(|a| a.searchable)
                        .unwrap_or(false);
                    searchable
                        && value
                            .payload()
                            .string_projection()
                            .map(|p| p.to_lowercase().contains(&needle))
                            .unwrap_or(false)
                })
            })
            .map(|object| object.id)
            .collect();
        // hash iteration order is not stable
        hits.sort();
        hits
    }
}
