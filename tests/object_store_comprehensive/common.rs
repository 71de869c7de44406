//! Shared fixtures for the integration suite

use eavdb::{
    Attribute, AttributeType, Entity, EntityId, ObjectStore, SchemaRegistry, StoreConfig,
};
use std::sync::Arc;

/// Install the test tracing subscriber once per process
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// One entity carrying every attribute type the engine dispatches on
pub fn record_registry() -> (Arc<SchemaRegistry>, EntityId) {
    let mut registry = SchemaRegistry::new();
    let mut record = Entity::new("record");
    let record_id = record.id;
    record
        .add_attribute(Attribute::new("title", AttributeType::String).with_searchable(true))
        .unwrap();
    record
        .add_attribute(Attribute::new("count", AttributeType::Integer).with_searchable(true))
        .unwrap();
    record
        .add_attribute(Attribute::new("score", AttributeType::Number))
        .unwrap();
    record
        .add_attribute(Attribute::new("active", AttributeType::Boolean))
        .unwrap();
    record
        .add_attribute(Attribute::new("day", AttributeType::Date))
        .unwrap();
    record
        .add_attribute(Attribute::new("moment", AttributeType::DateTime))
        .unwrap();
    record
        .add_attribute(Attribute::new("days", AttributeType::Date).with_multiple(true))
        .unwrap();
    record
        .add_attribute(Attribute::new("tags", AttributeType::String).with_multiple(true))
        .unwrap();
    record
        .add_attribute(Attribute::new("extra", AttributeType::Array))
        .unwrap();
    record
        .add_attribute(Attribute::new("scan", AttributeType::File))
        .unwrap();
    record
        .add_attribute(Attribute::new("scans", AttributeType::File).with_multiple(true))
        .unwrap();
    registry.register(record).unwrap();
    (Arc::new(registry), record_id)
}

/// A store over the record entity
pub fn record_store() -> (ObjectStore, EntityId) {
    let (registry, record) = record_registry();
    (ObjectStore::with_defaults(registry), record)
}

/// person ⇄ address with a bidirectional relation:
/// `person.address` (single, inversed by `residents`, cascade) and
/// `address.residents` (multiple, inversed by `address`)
pub fn people_registry() -> (Arc<SchemaRegistry>, EntityId, EntityId) {
    let mut registry = SchemaRegistry::new();
    let mut address = Entity::new("address");
    let address_id = address.id;
    let mut person = Entity::new("person");
    let person_id = person.id;
    address
        .add_attribute(Attribute::new("street", AttributeType::String).with_searchable(true))
        .unwrap();
    address
        .add_attribute(
            Attribute::object_ref("residents", person_id)
                .with_multiple(true)
                .with_inversed_by("address"),
        )
        .unwrap();
    person
        .add_attribute(Attribute::new("name", AttributeType::String).with_searchable(true))
        .unwrap();
    person
        .add_attribute(
            Attribute::object_ref("address", address_id)
                .with_cascade(true)
                .with_inversed_by("residents"),
        )
        .unwrap();
    registry.register(address).unwrap();
    registry.register(person).unwrap();
    registry.validate().unwrap();
    (Arc::new(registry), person_id, address_id)
}

/// A store over the people schema
pub fn people_store() -> (ObjectStore, EntityId, EntityId) {
    let (registry, person, address) = people_registry();
    (ObjectStore::with_defaults(registry), person, address)
}

/// A store over the people schema with inverse auto-creation disabled
pub fn strict_people_store() -> (ObjectStore, EntityId, EntityId) {
    let (registry, person, address) = people_registry();
    (
        ObjectStore::new(
            registry,
            StoreConfig {
                auto_create_inverse: false,
            },
        ),
        person,
        address,
    )
}
