//! Structural schema documents
//!
//! A mechanical walk over an Entity's ordered attributes producing a
//! generic OpenAPI-style schema: name, required list, per-property
//! type/title/description/example. Cascaded object attributes embed the
//! target entity's schema; plain object attributes expose only a UUID
//! reference. Validation keys are copied through onto the property.

use crate::example::example_for_attribute;
use eav_core::EntityId;
use eav_schema::{Entity, SchemaRegistry};
use serde_json::{json, Value};

fn upper_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Projects Entity definitions into schema documents
pub struct SchemaProjector<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> SchemaProjector<'a> {
    /// Create a projector over a registry
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// The base structural schema of an entity
    pub fn base_schema(&self, entity: &Entity) -> Value {
        let mut visited = vec![entity.id];
        self.schema_walk(entity, &mut visited)
    }

    fn schema_walk(&self, entity: &Entity, visited: &mut Vec<EntityId>) -> Value {
        let mut required: Vec<Value> = Vec::new();
        let mut properties = serde_json::Map::new();

        properties.insert(
            "id".to_string(),
            json!({
                "type": "string",
                "format": "uuid",
                "title": format!("The id of {}", entity.name),
                "description": format!("The uuid of the {}", entity.name),
            }),
        );

        for attribute in entity.attributes() {
            if attribute.required {
                required.push(Value::String(attribute.name.clone()));
            }

            if let Some(target) = attribute.object {
                let target_name = self
                    .registry
                    .entity(target)
                    .map(|e| e.name.clone())
                    .unwrap_or_else(|| target.to_string());
                if attribute.cascade {
                    // embed the sub-schema; on a cycle fall back to a
                    // component reference
                    let embedded = if visited.contains(&target) {
                        json!({"$ref": format!("#/components/schemas/{}", upper_first(&target_name))})
                    } else if let Some(target_entity) = self.registry.entity(target) {
                        visited.push(target);
                        let schema = self.schema_walk(target_entity, visited);
                        visited.pop();
                        schema
                    } else {
                        json!({"$ref": format!("#/components/schemas/{}", upper_first(&target_name))})
                    };
                    properties.insert(attribute.name.clone(), embedded);
                } else {
                    let description = format!(
                        "{}The uuid of the [{}]() object that you want to link, \
                         you can unlink objects by setting this field to null",
                        attribute
                            .description
                            .as_deref()
                            .map(|d| format!("{d} "))
                            .unwrap_or_default(),
                        target_name
                    );
                    properties.insert(
                        attribute.name.clone(),
                        json!({
                            "type": "string",
                            "format": "uuid",
                            "description": description,
                        }),
                    );
                }
                // sub-schemas and uuid references take no validators
                continue;
            }

            let mut property = json!({
                "type": attribute.attr_type.as_str(),
                "title": attribute.name,
                "description": attribute.description.clone().unwrap_or_default(),
            });
            for (key, parameter) in &attribute.validations {
                property[key.as_str()] = parameter.clone().into();
            }
            property["example"] = example_for_attribute(attribute).into();
            properties.insert(attribute.name.clone(), property);
        }

        json!({
            "type": "object",
            "required": required,
            "properties": properties,
        })
    }
}
