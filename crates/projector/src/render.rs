//! Object rendering
//!
//! Renders one stored object into a wire payload by walking its entity's
//! attributes in order and reading each value through the engine's
//! multiplicity-aware `get`. Linked objects embed when their attribute
//! cascades, otherwise they render as UUID strings; a visited set keeps
//! cyclic graphs from recursing forever.

use crate::envelope::SchemaFormat;
use eav_core::{EavError, ObjectId, Result};
use eav_engine::{ObjectStore, ValueView};
use eav_schema::Attribute;
use serde_json::{json, Value};

/// Renders stored objects into wire payloads
pub struct ObjectRenderer<'a> {
    store: &'a ObjectStore,
}

impl<'a> ObjectRenderer<'a> {
    /// Create a renderer over a store
    pub fn new(store: &'a ObjectStore) -> Self {
        Self { store }
    }

    /// Render an object in the requested format
    pub fn render(&self, object: ObjectId, format: SchemaFormat) -> Result<Value> {
        let mut visited = Vec::new();
        self.render_walk(object, format, &mut visited)
    }

    fn render_walk(
        &self,
        object: ObjectId,
        format: SchemaFormat,
        visited: &mut Vec<ObjectId>,
    ) -> Result<Value> {
        let entry = self.store.get_object(object)?;
        let entity = self
            .store
            .registry()
            .entity(entry.entity)
            .ok_or_else(|| {
                EavError::Schema(format!(
                    "object {object} conforms to an unregistered entity"
                ))
            })?;
        visited.push(object);

        let self_uri = entry
            .uri
            .clone()
            .unwrap_or_else(|| format!("/objects/{object}"));
        let mut body = serde_json::Map::new();
        match format {
            SchemaFormat::Json => {
                body.insert("id".to_string(), json!(object.to_string()));
            }
            SchemaFormat::JsonLd => {
                body.insert("@id".to_string(), json!(self_uri));
                body.insert("@type".to_string(), json!(entity.name));
                body.insert(
                    "@context".to_string(),
                    json!(format!("/contexts/{}", entity.name)),
                );
                body.insert(
                    "@dateCreated".to_string(),
                    json!(entry.date_created.to_rfc3339()),
                );
                body.insert(
                    "@dateModified".to_string(),
                    json!(entry.date_modified.to_rfc3339()),
                );
            }
            SchemaFormat::Hal => {
                body.insert("id".to_string(), json!(object.to_string()));
                body.insert("_links".to_string(), json!({"self": {"href": self_uri}}));
                body.insert(
                    "__metadata".to_string(),
                    json!({
                        "__type": entity.name,
                        "__context": format!("/contexts/{}", entity.name),
                        "__dateCreated": entry.date_created.to_rfc3339(),
                        "__dateModified": entry.date_modified.to_rfc3339(),
                    }),
                );
            }
        }

        for attribute in entity.attributes() {
            let view = entry.value_for(attribute.id).and_then(|v| v.get(attribute));
            let rendered = match view {
                None => Value::Null,
                Some(ValueView::Raw(raw)) => raw.into(),
                Some(ValueView::File(file)) => serde_json::to_value(file)
                    .map_err(|e| EavError::Serialization(e.to_string()))?,
                Some(ValueView::Files(files)) => serde_json::to_value(files)
                    .map_err(|e| EavError::Serialization(e.to_string()))?,
                Some(ValueView::Object(target)) => {
                    self.render_linked(target, attribute, format, visited)?
                }
                Some(ValueView::Objects(targets)) => {
                    let mut rendered = Vec::with_capacity(targets.len());
                    for target in targets {
                        rendered.push(self.render_linked(target, attribute, format, visited)?);
                    }
                    Value::Array(rendered)
                }
            };
            body.insert(attribute.name.clone(), rendered);
        }

        visited.pop();
        Ok(Value::Object(body))
    }

    fn render_linked(
        &self,
        target: ObjectId,
        attribute: &Attribute,
        format: SchemaFormat,
        visited: &mut Vec<ObjectId>,
    ) -> Result<Value> {
        if attribute.cascade && !visited.contains(&target) {
            self.render_walk(target, format, visited)
        } else {
            Ok(json!(target.to_string()))
        }
    }
}
