//! Lifecycle hooks: reference resolution before commit
//!
//! Before any object-typed Value is committed, identifier strings staged on
//! it are normalized into live links. Resolution tries the primary id
//! first, then any alternate identifier (external id, uri). An identifier
//! that resolves to nothing fails the whole commit with a
//! reference-not-found error: a dangling reference is never persisted, and
//! neither is a raw identifier string once resolved.
//!
//! Removal needs no hook; cascading delete is handled by the store.

use crate::store::ObjectStore;
use eav_core::{is_uuid_shaped, AttributeId, EavError, ObjectId, Result};
use tracing::{debug, warn};

/// External lookup capability required for reference resolution
///
/// Both lookups must report not-found as a distinct, handleable outcome;
/// resolution treats `None` as a hard failure, not as "skip".
pub trait ObjectLookup {
    /// Find an object by its primary identifier
    fn find_by_id(&self, identifier: &str) -> Option<ObjectId>;

    /// Find an object by any alternate identifier (external id, uri)
    fn find_by_any_id(&self, identifier: &str) -> Option<ObjectId>;
}

impl ObjectLookup for ObjectStore {
    fn find_by_id(&self, identifier: &str) -> Option<ObjectId> {
        let state = self.state.read();
        let id = ObjectId::from_string(identifier)?;
        state.objects.contains_key(&id).then_some(id)
    }

    fn find_by_any_id(&self, identifier: &str) -> Option<ObjectId> {
        let state = self.state.read();
        state.alternate_ids.get(identifier).copied()
    }
}

impl ObjectStore {
    /// Resolve every staged reference on an object and link the results
    ///
    /// For each object-typed Value holding pending identifiers:
    /// - a multiple attribute resolves every staged element
    /// - a non-multiple attribute resolves its single staged string only
    ///   when it is UUID-shaped; other strings stay staged untouched
    ///
    /// All identifiers of a value resolve before any of them is linked, so
    /// a failing identifier leaves no half-linked value behind. Pendings
    /// are cleared only after linking.
    pub fn commit_object(&self, object: ObjectId) -> Result<()> {
        let mut state = self.state.write();
        let entry = state
            .objects
            .get(&object)
            .ok_or_else(|| EavError::NotFound(format!("object {object}")))?;
        let entity = entry.entity;

        let staged: Vec<(AttributeId, Vec<String>)> = entry
            .values()
            .iter()
            .filter_map(|value| {
                value
                    .object_links()
                    .filter(|links| !links.pending.is_empty())
                    .map(|links| (value.attribute(), links.pending.clone()))
            })
            .collect();

        for (attribute, pending) in staged {
            let attr = self
                .registry
                .attribute_by_id(entity, attribute)
                .cloned()
                .ok_or_else(|| {
                    EavError::Schema(format!(
                        "object {object} holds a value for an attribute missing from its entity"
                    ))
                })?;

            // a single non-UUID string is not a reference; leave it staged
            if !attr.multiple && pending.len() == 1 && !is_uuid_shaped(&pending[0]) {
                debug!(object = %object, attribute = %attr.name,
                    "staged string is not UUID-shaped, skipping resolution");
                continue;
            }

            let mut resolved = Vec::with_capacity(pending.len());
            for identifier in &pending {
                let target = state.resolve_identifier(identifier).ok_or_else(|| {
                    warn!(object = %object, attribute = %attr.name, identifier = %identifier,
                        "reference resolution failed");
                    EavError::ReferenceNotFound(identifier.clone())
                })?;
                resolved.push(target);
            }
            for target in resolved {
                self.link_objects(&mut state, object, &attr, target)?;
            }

            let links = state
                .objects
                .get_mut(&object)
                .and_then(|o| o.value_for_mut(attribute))
                .and_then(|v| v.object_links_mut())
                .ok_or_else(|| {
                    EavError::Schema(format!(
                        "attribute '{}' does not hold object links",
                        attr.name
                    ))
                })?;
            links.pending.clear();
            debug!(object = %object, attribute = %attr.name, "resolved staged references");
        }
        Ok(())
    }
}
