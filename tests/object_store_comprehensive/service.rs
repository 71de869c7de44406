//! The validate → hydrate → commit → render pipeline end to end

use crate::common::people_registry;
use eavdb::{body, EavError, ObjectService, RawValue, SchemaFormat, StoreConfig, ValueView};
use serde_json::json;

fn service() -> ObjectService {
    let (registry, _, _) = people_registry();
    ObjectService::new(registry, StoreConfig::default())
}

#[test]
fn create_hydrate_render_roundtrip() {
    let service = service();
    let id = service
        .create(
            "person",
            &body(&[
                ("name", RawValue::from("Ada")),
                (
                    "address",
                    body(&[("street", RawValue::from("Main Street 1"))]),
                ),
            ]),
        )
        .unwrap();

    let rendered = service.render(id, SchemaFormat::Json).unwrap();
    assert_eq!(rendered["name"], json!("Ada"));
    assert_eq!(rendered["address"]["street"], json!("Main Street 1"));

    // the nested object is a real, linked sub-object with its inverse set
    let sub = match service.store().get_value(id, "address").unwrap() {
        Some(ValueView::Object(sub)) => sub,
        other => panic!("expected a linked object, got {other:?}"),
    };
    assert_eq!(
        service.store().get_value(sub, "residents").unwrap(),
        Some(ValueView::Objects(vec![id]))
    );
}

#[test]
fn invalid_body_reports_every_field() {
    let service = service();
    let err = service
        .create(
            "person",
            &body(&[
                ("name", RawValue::Int(1)),
                ("unknown", RawValue::from("x")),
            ]),
        )
        .unwrap_err();
    match err {
        EavError::Validation(messages) => {
            assert!(messages.contains("name"));
            assert!(messages.contains("unknown"));
        }
        other => panic!("expected a validation error, got {other}"),
    }
    assert_eq!(service.store().object_count(), 0);
}

#[test]
fn uuid_reference_bodies_resolve_through_the_hooks() {
    let service = service();
    let home = service
        .create(
            "address",
            &body(&[("street", RawValue::from("Main Street 1"))]),
        )
        .unwrap();
    let id = service
        .create(
            "person",
            &body(&[
                ("name", RawValue::from("Ada")),
                ("address", RawValue::String(home.to_string())),
            ]),
        )
        .unwrap();
    assert_eq!(
        service.store().get_value(id, "address").unwrap(),
        Some(ValueView::Object(home))
    );
}

#[test]
fn dangling_reference_rolls_the_create_back() {
    let service = service();
    let err = service
        .create(
            "person",
            &body(&[
                ("name", RawValue::from("Ada")),
                (
                    "address",
                    RawValue::from("94e8bb2c-e66b-11ec-8fea-0242ac120002"),
                ),
            ]),
        )
        .unwrap_err();
    assert!(matches!(err, EavError::ReferenceNotFound(_)));
    assert_eq!(service.store().object_count(), 0);
}

#[test]
fn update_restages_relations() {
    let service = service();
    let first = service
        .create("address", &body(&[("street", RawValue::from("Old Road 1"))]))
        .unwrap();
    let second = service
        .create("address", &body(&[("street", RawValue::from("New Lane 2"))]))
        .unwrap();
    let id = service
        .create(
            "person",
            &body(&[
                ("name", RawValue::from("Ada")),
                ("address", RawValue::String(first.to_string())),
            ]),
        )
        .unwrap();

    service
        .update(
            id,
            &body(&[
                ("name", RawValue::from("Ada")),
                ("address", RawValue::String(second.to_string())),
            ]),
        )
        .unwrap();

    assert_eq!(
        service.store().get_value(id, "address").unwrap(),
        Some(ValueView::Object(second))
    );
    assert_eq!(service.store().get_value(first, "residents").unwrap(), None);
}

#[test]
fn delete_removes_the_object_and_its_edges() {
    let service = service();
    let home = service
        .create(
            "address",
            &body(&[("street", RawValue::from("Main Street 1"))]),
        )
        .unwrap();
    let id = service
        .create(
            "person",
            &body(&[
                ("name", RawValue::from("Ada")),
                ("address", RawValue::String(home.to_string())),
            ]),
        )
        .unwrap();

    service.delete(id).unwrap();
    assert!(!service.store().contains(id));
    assert_eq!(service.store().get_value(home, "residents").unwrap(), None);
}

#[test]
fn search_matches_searchable_projections() {
    let service = service();
    let a = service
        .create("person", &body(&[("name", RawValue::from("Ada Lovelace"))]))
        .unwrap();
    service
        .create("person", &body(&[("name", RawValue::from("Charles Babbage"))]))
        .unwrap();
    assert_eq!(service.search("person", "lovelace").unwrap(), vec![a]);
}

#[test]
fn schema_documents_are_served_per_format() {
    let service = service();
    let plain = service.schema("person", SchemaFormat::Json).unwrap();
    assert!(plain["properties"].get("name").is_some());
    let hal = service.schema("person", SchemaFormat::Hal).unwrap();
    assert!(hal["properties"].get("__metadata").is_some());
}
