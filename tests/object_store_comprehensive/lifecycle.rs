//! Reference resolution on the commit path

use crate::common::{init_tracing, people_store};
use eavdb::{EavError, ObjectLookup, RawValue, ValueView};

#[test]
fn staged_uuid_resolves_to_a_live_link() {
    init_tracing();
    let (store, person, address) = people_store();
    let x = store.create_object(person).unwrap();
    let y = store.create_object(address).unwrap();

    store
        .set_value(x, "address", RawValue::String(y.to_string()))
        .unwrap();
    // staged, not yet linked
    assert_eq!(store.get_value(x, "address").unwrap(), None);
    assert!(store.get_object(x).unwrap().has_pending_references());

    store.commit_object(x).unwrap();
    assert_eq!(
        store.get_value(x, "address").unwrap(),
        Some(ValueView::Object(y))
    );
    assert!(!store.get_object(x).unwrap().has_pending_references());
    // the inverse side followed along
    assert_eq!(
        store.get_value(y, "residents").unwrap(),
        Some(ValueView::Objects(vec![x]))
    );
}

#[test]
fn staged_array_resolves_every_identifier() {
    let (store, person, address) = people_store();
    let y = store.create_object(address).unwrap();
    let a = store.create_object(person).unwrap();
    let b = store.create_object(person).unwrap();

    store
        .set_value(
            y,
            "residents",
            RawValue::Array(vec![
                RawValue::String(a.to_string()),
                RawValue::String(b.to_string()),
            ]),
        )
        .unwrap();
    store.commit_object(y).unwrap();

    assert_eq!(
        store.get_value(y, "residents").unwrap(),
        Some(ValueView::Objects(vec![a, b]))
    );
}

#[test]
fn alternate_identifiers_resolve_after_primary_misses() {
    let (store, person, address) = people_store();
    let x = store.create_object(person).unwrap();
    let y = store.create_object(address).unwrap();
    store.set_external_id(y, "cadastre-42").unwrap();

    // not UUID-shaped, so it only resolves through the alternate index;
    // single-string staging requires a UUID shape, the array path does not
    store
        .set_value(
            y,
            "residents",
            RawValue::Array(vec![RawValue::String(x.to_string())]),
        )
        .unwrap();
    store.commit_object(y).unwrap();

    let via_any = store.find_by_any_id("cadastre-42");
    assert_eq!(via_any, Some(y));
    assert_eq!(store.find_by_id(&y.to_string()), Some(y));
}

#[test]
fn array_identifiers_may_be_alternate_ids() {
    let (store, person, address) = people_store();
    let x = store.create_object(person).unwrap();
    let y = store.create_object(address).unwrap();
    store.set_external_id(x, "employee-7").unwrap();

    store
        .set_value(
            y,
            "residents",
            RawValue::Array(vec![RawValue::from("employee-7")]),
        )
        .unwrap();
    store.commit_object(y).unwrap();
    assert_eq!(
        store.get_value(y, "residents").unwrap(),
        Some(ValueView::Objects(vec![x]))
    );
}

#[test]
fn unresolvable_identifier_fails_the_commit() {
    let (store, person, _) = people_store();
    let x = store.create_object(person).unwrap();
    store
        .set_value(
            x,
            "address",
            RawValue::from("94e8bb2c-e66b-11ec-8fea-0242ac120002"),
        )
        .unwrap();

    let err = store.commit_object(x).unwrap_err();
    match err {
        EavError::ReferenceNotFound(identifier) => {
            assert!(identifier.contains("94e8bb2c"));
        }
        other => panic!("expected reference-not-found, got {other}"),
    }
    // no dangling link was persisted
    assert_eq!(store.get_value(x, "address").unwrap(), None);
}

#[test]
fn non_uuid_single_string_is_not_treated_as_a_reference() {
    let (store, person, _) = people_store();
    let x = store.create_object(person).unwrap();
    store
        .set_value(x, "address", RawValue::from("somewhere else"))
        .unwrap();
    // no resolution attempt, no error
    store.commit_object(x).unwrap();
    assert_eq!(store.get_value(x, "address").unwrap(), None);
}

#[test]
fn commit_is_idempotent_once_resolved() {
    let (store, person, address) = people_store();
    let x = store.create_object(person).unwrap();
    let y = store.create_object(address).unwrap();
    store
        .set_value(x, "address", RawValue::String(y.to_string()))
        .unwrap();
    store.commit_object(x).unwrap();
    store.commit_object(x).unwrap();
    assert_eq!(
        store.get_value(x, "address").unwrap(),
        Some(ValueView::Object(y))
    );
    assert_eq!(store.get_object(y).unwrap().subresource_of().len(), 1);
}
