//! Typed set/get dispatch, exercised through the public store surface

use crate::common::{init_tracing, record_store};
use eavdb::{RawValue, ValueView};
use std::collections::HashMap;

fn raw_view(view: Option<ValueView>) -> Option<RawValue> {
    match view {
        Some(ValueView::Raw(raw)) => Some(raw),
        None => None,
        other => panic!("expected raw view, got {other:?}"),
    }
}

#[test]
fn scalar_set_get_roundtrip_is_idempotent() {
    init_tracing();
    let (store, record) = record_store();
    let id = store.create_object(record).unwrap();

    let cases = vec![
        ("title", RawValue::from("hello")),
        ("count", RawValue::Int(42)),
        ("score", RawValue::Float(2.5)),
        ("active", RawValue::Bool(true)),
        ("moment", RawValue::from("2023-06-01T08:30:00+00:00")),
        ("day", RawValue::from("2023-06-01")),
    ];
    for (attribute, raw) in cases {
        store.set_value(id, attribute, raw).unwrap();
        let first = raw_view(store.get_value(id, attribute).unwrap()).unwrap();
        store.set_value(id, attribute, first.clone()).unwrap();
        let second = raw_view(store.get_value(id, attribute).unwrap()).unwrap();
        assert_eq!(first, second, "attribute {attribute}");
    }
}

#[test]
fn string_projection_matches_canonical_forms() {
    let (store, record) = record_store();
    let id = store.create_object(record).unwrap();
    store.set_value(id, "count", RawValue::Int(42)).unwrap();
    store.set_value(id, "score", RawValue::Float(1.5)).unwrap();
    store.set_value(id, "active", RawValue::Bool(false)).unwrap();
    store
        .set_value(id, "moment", RawValue::from("2023-06-01 08:30:00"))
        .unwrap();

    let object = store.get_object(id).unwrap();
    let projection = |name: &str| {
        let attr = store.registry().entity(record).unwrap().attribute(name).unwrap().id;
        object.value_for(attr).unwrap().payload().string_projection()
    };
    assert_eq!(projection("count"), Some("42".to_string()));
    assert_eq!(projection("score"), Some("1.5".to_string()));
    assert_eq!(projection("active"), Some("false".to_string()));
    assert_eq!(projection("moment"), Some("2023-06-01 08:30:00".to_string()));
}

#[test]
fn boolean_string_quirk_only_literal_true() {
    let (store, record) = record_store();
    let id = store.create_object(record).unwrap();

    store.set_value(id, "active", RawValue::from("true")).unwrap();
    assert_eq!(
        raw_view(store.get_value(id, "active").unwrap()),
        Some(RawValue::Bool(true))
    );

    // "false" is false only because every non-"true" string is false
    for input in ["false", "yes", "1", "TRUE", "anything-not-true"] {
        store.set_value(id, "active", RawValue::from(input)).unwrap();
        assert_eq!(
            raw_view(store.get_value(id, "active").unwrap()),
            Some(RawValue::Bool(false)),
            "input {input:?}"
        );
    }
}

#[test]
fn multiple_string_stores_and_returns_array_unchanged() {
    let (store, record) = record_store();
    let id = store.create_object(record).unwrap();
    let tags = RawValue::Array(vec![RawValue::from("a"), RawValue::from("b")]);
    store.set_value(id, "tags", tags.clone()).unwrap();
    assert_eq!(raw_view(store.get_value(id, "tags").unwrap()), Some(tags));
}

#[test]
fn integer_overflow_is_a_silent_noop() {
    let (store, record) = record_store();
    let id = store.create_object(record).unwrap();
    store.set_value(id, "count", RawValue::Int(7)).unwrap();

    // no error, and the prior state survives
    store.set_value(id, "count", RawValue::Int(i64::MAX)).unwrap();
    assert_eq!(
        raw_view(store.get_value(id, "count").unwrap()),
        Some(RawValue::Int(7))
    );
    store
        .set_value(id, "count", RawValue::Float(1e300))
        .unwrap();
    assert_eq!(
        raw_view(store.get_value(id, "count").unwrap()),
        Some(RawValue::Int(7))
    );
}

#[test]
fn null_file_leaves_owned_files_untouched() {
    let (store, record) = record_store();
    let id = store.create_object(record).unwrap();
    let mut map = HashMap::new();
    map.insert("name".to_string(), RawValue::from("scan.pdf"));
    store.set_value(id, "scan", RawValue::Object(map)).unwrap();

    store.set_value(id, "scan", RawValue::Null).unwrap();
    match store.get_value(id, "scan").unwrap() {
        Some(ValueView::File(file)) => assert_eq!(file.name, "scan.pdf"),
        other => panic!("expected the file to survive, got {other:?}"),
    }
}

#[test]
fn null_on_multiple_date_clears_the_array_slot() {
    let (store, record) = record_store();
    let id = store.create_object(record).unwrap();
    store
        .set_value(
            id,
            "days",
            RawValue::Array(vec![RawValue::from("2023-01-01"), RawValue::from("2023-12-25")]),
        )
        .unwrap();
    assert!(store.get_value(id, "days").unwrap().is_some());

    store.set_value(id, "days", RawValue::Null).unwrap();
    assert_eq!(store.get_value(id, "days").unwrap(), None);
    // the scalar datetime slot was never involved
    assert_eq!(store.get_value(id, "day").unwrap(), None);
}

#[test]
fn date_and_datetime_wire_formats() {
    let (store, record) = record_store();
    let id = store.create_object(record).unwrap();
    store.set_value(id, "day", RawValue::from("2023-06-01")).unwrap();
    store
        .set_value(id, "moment", RawValue::from("2023-06-01 08:30:00"))
        .unwrap();
    assert_eq!(
        raw_view(store.get_value(id, "day").unwrap()),
        Some(RawValue::from("2023-06-01"))
    );
    assert_eq!(
        raw_view(store.get_value(id, "moment").unwrap()),
        Some(RawValue::from("2023-06-01T08:30:00+00:00"))
    );
}

#[test]
fn unconvertible_input_is_a_type_conversion_error() {
    let (store, record) = record_store();
    let id = store.create_object(record).unwrap();
    let err = store
        .set_value(id, "day", RawValue::from("not-a-date"))
        .unwrap_err();
    assert!(matches!(err, eavdb::EavError::TypeConversion { .. }));
    let err = store
        .set_value(id, "count", RawValue::Bool(true))
        .unwrap_err();
    assert!(matches!(err, eavdb::EavError::TypeConversion { .. }));
}

#[test]
fn multiple_files_attach_and_replace() {
    let (store, record) = record_store();
    let id = store.create_object(record).unwrap();
    let file = |name: &str| {
        let mut map = HashMap::new();
        map.insert("name".to_string(), RawValue::from(name));
        RawValue::Object(map)
    };
    store
        .set_value(id, "scans", RawValue::Array(vec![file("a.pdf"), file("b.pdf")]))
        .unwrap();
    match store.get_value(id, "scans").unwrap() {
        Some(ValueView::Files(files)) => {
            let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names, vec!["a.pdf", "b.pdf"]);
        }
        other => panic!("expected files, got {other:?}"),
    }

    // reassignment clears before attaching
    store
        .set_value(id, "scans", RawValue::Array(vec![file("c.pdf")]))
        .unwrap();
    match store.get_value(id, "scans").unwrap() {
        Some(ValueView::Files(files)) => assert_eq!(files.len(), 1),
        other => panic!("expected files, got {other:?}"),
    }
}

#[test]
fn text_filter_spans_heterogeneous_types() {
    let (store, record) = record_store();
    let a = store.create_object(record).unwrap();
    store.set_value(a, "title", RawValue::from("alpha")).unwrap();
    store.set_value(a, "count", RawValue::Int(123)).unwrap();
    let b = store.create_object(record).unwrap();
    store.set_value(b, "title", RawValue::from("beta")).unwrap();
    store.set_value(b, "count", RawValue::Int(456)).unwrap();

    assert_eq!(store.filter_by_text(record, "alpha"), vec![a]);
    assert_eq!(store.filter_by_text(record, "456"), vec![b]);
    assert!(store.filter_by_text(record, "gamma").is_empty());
}
