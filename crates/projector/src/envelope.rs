//! Format envelopes around the base schema
//!
//! The base structural schema can be served as-is (plain JSON) or wrapped
//! with a metadata/links envelope: JSON-LD prefixes its metadata properties
//! with `@`, HAL carries `__links`/`__metadata`/`__embedded` blocks. Either
//! extension block is omitted when the entity gives it no content.

use chrono::Utc;
use eav_schema::{Entity, SchemaRegistry};
use serde_json::{json, Value};

/// Wire format of a schema or object rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// Plain `application/json`
    Json,
    /// `application/json+ld`
    JsonLd,
    /// `application/json+hal`
    Hal,
}

impl SchemaFormat {
    /// The content type this format serves
    pub fn content_type(&self) -> &'static str {
        match self {
            SchemaFormat::Json => "application/json",
            SchemaFormat::JsonLd => "application/json+ld",
            SchemaFormat::Hal => "application/json+hal",
        }
    }

    /// Select a format from a content type
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "application/json" => Some(SchemaFormat::Json),
            "application/json+ld" => Some(SchemaFormat::JsonLd),
            "application/json+hal" => Some(SchemaFormat::Hal),
            _ => None,
        }
    }
}

/// Metadata items every envelope documents, as `(key, example)` pairs
fn metadata_items() -> Vec<(&'static str, Value)> {
    let stamp = Utc::now().format("%d-%m-%Y %H:%S").to_string();
    vec![
        ("id", json!("uuid")),
        ("type", json!("string")),
        ("context", json!("string")),
        ("dateCreated", json!(stamp.clone())),
        ("dateModified", json!(stamp)),
        ("owner", json!("string")),
        ("organization", json!("string")),
        ("application", json!("string")),
        ("uri", json!("string")),
        ("gateway/id", json!("string")),
    ]
}

/// The extend map: object attribute name → true, for every relation
fn extend_properties(entity: &Entity) -> Value {
    let mut extend = serde_json::Map::new();
    for attribute in entity.attributes() {
        if attribute.object.is_some() {
            extend.insert(attribute.name.clone(), json!(true));
        }
    }
    Value::Object(extend)
}

/// Wrap a base schema in the requested format envelope
pub fn envelope_schema(
    registry: &SchemaRegistry,
    entity: &Entity,
    base: Value,
    format: SchemaFormat,
) -> Value {
    match format {
        SchemaFormat::Json => base,
        SchemaFormat::JsonLd => json_ld_schema(entity, base),
        SchemaFormat::Hal => hal_schema(registry, entity, base),
    }
}

fn json_ld_schema(entity: &Entity, base: Value) -> Value {
    let mut schema = base;
    let original = schema["properties"].take();
    let mut properties = serde_json::Map::new();

    for (key, example) in metadata_items() {
        properties.insert(
            format!("@{key}"),
            json!({
                "type": "string",
                "title": "The id of ",
                "example": example,
            }),
        );
    }

    let extend = extend_properties(entity);
    if !extend.as_object().map(|m| m.is_empty()).unwrap_or(true) {
        properties.insert(
            "@extend".to_string(),
            json!({
                "type": "object",
                "title": "The parameter extend",
                "example": extend,
            }),
        );
    }

    if let Some(original) = original.as_object() {
        for (key, value) in original {
            properties.insert(key.clone(), value.clone());
        }
    }
    schema["properties"] = Value::Object(properties);
    schema
}

fn hal_schema(registry: &SchemaRegistry, entity: &Entity, base: Value) -> Value {
    let mut schema = base;
    let original = schema["properties"].take();
    let mut properties = serde_json::Map::new();

    properties.insert(
        "__links".to_string(),
        json!({
            "type": "object",
            "properties": {
                "self": {
                    "type": "string",
                    "format": "uuid",
                    "title": format!("The id of {}", entity.name),
                },
            },
        }),
    );

    let mut metadata = serde_json::Map::new();
    for (key, example) in metadata_items() {
        if key == "id" {
            continue;
        }
        metadata.insert(
            format!("__{key}"),
            json!({
                "type": "string",
                "title": "The id of ",
                "example": example,
            }),
        );
    }
    let extend = extend_properties(entity);
    if !extend.as_object().map(|m| m.is_empty()).unwrap_or(true) {
        metadata.insert(
            "__extend".to_string(),
            json!({
                "type": "object",
                "title": "The parameter extend",
                "example": extend,
            }),
        );
    }
    properties.insert(
        "__metadata".to_string(),
        json!({
            "type": "object",
            "properties": Value::Object(metadata),
        }),
    );

    if let Some(original) = original.as_object() {
        for (key, value) in original {
            // relation references flatten to plain uuid properties in HAL
            if value.get("$ref").is_some() {
                properties.insert(
                    key.clone(),
                    json!({
                        "type": "string",
                        "format": "uuid",
                        "title": format!("The uuid of the {key}"),
                        "example": "uuid",
                    }),
                );
            } else {
                properties.insert(key.clone(), value.clone());
            }
        }
    }

    let embedded = embedded_example(registry, entity);
    if !embedded.as_array().map(|a| a.is_empty()).unwrap_or(true) {
        properties.insert(
            "__embedded".to_string(),
            json!({
                "type": "object",
                "title": "The parameter extend",
                "example": embedded,
            }),
        );
    }

    schema["properties"] = Value::Object(properties);
    schema
}

/// Example `__embedded` body: one entry per relation, keyed by the target
/// entity name and carrying its attribute names/types plus a links/metadata
/// stub
fn embedded_example(registry: &SchemaRegistry, entity: &Entity) -> Value {
    let mut examples = Vec::new();
    for attribute in entity.attributes() {
        let target = match attribute.object.and_then(|id| registry.entity(id)) {
            Some(target) => target,
            None => continue,
        };
        let mut body = serde_json::Map::new();
        body.insert("__links".to_string(), json!({"self": "uuid"}));
        let mut metadata = serde_json::Map::new();
        for (key, _) in metadata_items() {
            if key != "id" {
                metadata.insert(format!("__{key}"), json!("string"));
            }
        }
        body.insert("__metadata".to_string(), Value::Object(metadata));
        for target_attribute in target.attributes() {
            body.insert(
                target_attribute.name.clone(),
                json!(target_attribute.attr_type.as_str()),
            );
        }
        let mut entry = serde_json::Map::new();
        entry.insert(target.name.clone(), Value::Object(body));
        examples.push(Value::Object(entry));
    }
    Value::Array(examples)
}
