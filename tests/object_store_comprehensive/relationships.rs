//! Inverse symmetry and subresource bookkeeping across the object graph

use crate::common::{init_tracing, people_store, strict_people_store};
use eavdb::{EavError, RawValue, ValueView};

#[test]
fn linking_updates_both_sides() {
    init_tracing();
    let (store, person, address) = people_store();
    let x = store.create_object(person).unwrap();
    let y = store.create_object(address).unwrap();

    store.add_object(x, "address", y).unwrap();

    assert_eq!(
        store.get_value(x, "address").unwrap(),
        Some(ValueView::Object(y))
    );
    assert_eq!(
        store.get_value(y, "residents").unwrap(),
        Some(ValueView::Objects(vec![x]))
    );
}

#[test]
fn unlinking_removes_both_sides() {
    let (store, person, address) = people_store();
    let x = store.create_object(person).unwrap();
    let y = store.create_object(address).unwrap();
    store.add_object(x, "address", y).unwrap();

    store.remove_object(x, "address", y).unwrap();

    assert_eq!(store.get_value(x, "address").unwrap(), None);
    assert_eq!(store.get_value(y, "residents").unwrap(), None);
    assert!(store.get_object(x).unwrap().subresource_of().is_empty());
    assert!(store.get_object(y).unwrap().subresource_of().is_empty());
}

#[test]
fn subresource_entry_names_the_referencing_value() {
    let (store, person, address) = people_store();
    let x = store.create_object(person).unwrap();
    let y = store.create_object(address).unwrap();
    store.add_object(x, "address", y).unwrap();

    let address_attr = store.registry().attribute(person, "address").unwrap().id;
    let target = store.get_object(y).unwrap();
    assert!(target
        .subresource_of()
        .iter()
        .any(|r| r.object == x && r.attribute == address_attr));
}

#[test]
fn repeated_links_stay_idempotent() {
    let (store, person, address) = people_store();
    let x = store.create_object(person).unwrap();
    let y = store.create_object(address).unwrap();
    store.add_object(x, "address", y).unwrap();
    store.add_object(x, "address", y).unwrap();
    store.add_object(y, "residents", x).unwrap();

    assert_eq!(
        store.get_value(y, "residents").unwrap(),
        Some(ValueView::Objects(vec![x]))
    );
    assert_eq!(store.get_object(y).unwrap().subresource_of().len(), 1);
}

#[test]
fn linking_from_the_inverse_side_is_symmetric_too() {
    let (store, person, address) = people_store();
    let x = store.create_object(person).unwrap();
    let y = store.create_object(address).unwrap();

    store.add_object(y, "residents", x).unwrap();

    assert_eq!(
        store.get_value(x, "address").unwrap(),
        Some(ValueView::Object(y))
    );
}

#[test]
fn many_side_accumulates_links() {
    let (store, person, address) = people_store();
    let y = store.create_object(address).unwrap();
    let a = store.create_object(person).unwrap();
    let b = store.create_object(person).unwrap();

    store.add_object(a, "address", y).unwrap();
    store.add_object(b, "address", y).unwrap();

    assert_eq!(
        store.get_value(y, "residents").unwrap(),
        Some(ValueView::Objects(vec![a, b]))
    );
}

#[test]
fn missing_inverse_value_errors_when_auto_creation_is_off() {
    let (store, person, address) = strict_people_store();
    let x = store.create_object(person).unwrap();
    let y = store.create_object(address).unwrap();

    let err = store.add_object(x, "address", y).unwrap_err();
    assert!(matches!(err, EavError::Schema(_)));

    // materializing the inverse value first makes the same link legal
    store
        .set_value(y, "residents", RawValue::Array(vec![]))
        .unwrap();
    store.add_object(x, "address", y).unwrap();
    assert_eq!(
        store.get_value(y, "residents").unwrap(),
        Some(ValueView::Objects(vec![x]))
    );
}

#[test]
fn delete_cascades_through_the_graph() {
    let (store, person, address) = people_store();
    let x = store.create_object(person).unwrap();
    let y = store.create_object(address).unwrap();
    store.set_value(x, "name", RawValue::from("Ada")).unwrap();
    store.add_object(x, "address", y).unwrap();

    store.delete_object(y).unwrap();

    assert!(!store.contains(y));
    assert_eq!(store.get_value(x, "address").unwrap(), None);
    assert!(store.get_object(x).unwrap().subresource_of().is_empty());

    // deleting the referencing side cleans the target's bookkeeping
    let y2 = store.create_object(address).unwrap();
    store.add_object(x, "address", y2).unwrap();
    store.delete_object(x).unwrap();
    assert!(store.get_object(y2).unwrap().subresource_of().is_empty());
    assert_eq!(store.get_value(y2, "residents").unwrap(), None);
}

#[test]
fn replacing_a_reference_unlinks_the_old_target() {
    let (store, person, address) = people_store();
    let x = store.create_object(person).unwrap();
    let y = store.create_object(address).unwrap();
    let z = store.create_object(address).unwrap();
    store.add_object(x, "address", y).unwrap();

    // staging a new identifier clears the previous link symmetrically
    store
        .set_value(x, "address", RawValue::String(z.to_string()))
        .unwrap();
    store.commit_object(x).unwrap();

    assert_eq!(
        store.get_value(x, "address").unwrap(),
        Some(ValueView::Object(z))
    );
    assert_eq!(store.get_value(y, "residents").unwrap(), None);
    assert!(store.get_object(y).unwrap().subresource_of().is_empty());
}
