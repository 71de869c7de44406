//! Schema documents, format envelopes and object rendering

use crate::common::{people_registry, people_store};
use eavdb::{ObjectRenderer, RawValue, SchemaFormat, SchemaProjector};
use serde_json::json;

#[test]
fn base_schema_walks_attributes_in_order() {
    let (registry, _, _) = people_registry();
    let person = registry.entity_by_name("person").unwrap();
    let schema = SchemaProjector::new(&registry).base_schema(person);

    assert_eq!(schema["type"], json!("object"));
    let keys: Vec<&String> = schema["properties"].as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["id", "name", "address"]);
}

#[test]
fn cascaded_relation_embeds_target_schema() {
    let (registry, _, _) = people_registry();
    let person = registry.entity_by_name("person").unwrap();
    let schema = SchemaProjector::new(&registry).base_schema(person);

    // person.address cascades, so the address schema embeds inline; its own
    // residents relation does not cascade and renders as a uuid reference
    assert_eq!(schema["properties"]["address"]["type"], json!("object"));
    assert_eq!(
        schema["properties"]["address"]["properties"]["residents"]["format"],
        json!("uuid")
    );
}

#[test]
fn hal_envelope_decorates_the_schema() {
    let (registry, _, _) = people_registry();
    let person = registry.entity_by_name("person").unwrap();
    let base = SchemaProjector::new(&registry).base_schema(person);
    let wrapped = eavdb::envelope_schema(&registry, person, base, SchemaFormat::Hal);

    let properties = wrapped["properties"].as_object().unwrap();
    assert!(properties.contains_key("__links"));
    assert!(properties.contains_key("__metadata"));
    assert!(properties.contains_key("__embedded"));
}

#[test]
fn json_ld_envelope_decorates_the_schema() {
    let (registry, _, _) = people_registry();
    let person = registry.entity_by_name("person").unwrap();
    let base = SchemaProjector::new(&registry).base_schema(person);
    let wrapped = eavdb::envelope_schema(&registry, person, base, SchemaFormat::JsonLd);

    let properties = wrapped["properties"].as_object().unwrap();
    assert!(properties.contains_key("@id"));
    assert_eq!(
        wrapped["properties"]["@extend"]["example"]["address"],
        json!(true)
    );
}

#[test]
fn rendered_object_embeds_cascaded_links() {
    let (store, person, address) = people_store();
    let x = store.create_object(person).unwrap();
    let y = store.create_object(address).unwrap();
    store.set_value(x, "name", RawValue::from("Ada")).unwrap();
    store
        .set_value(y, "street", RawValue::from("Main Street 1"))
        .unwrap();
    store.add_object(x, "address", y).unwrap();

    let rendered = ObjectRenderer::new(&store)
        .render(x, SchemaFormat::Json)
        .unwrap();
    assert_eq!(rendered["name"], json!("Ada"));
    assert_eq!(rendered["address"]["street"], json!("Main Street 1"));
    // the cycle back through residents renders as a uuid, not recursion
    assert_eq!(
        rendered["address"]["residents"][0],
        json!(x.to_string())
    );
}

#[test]
fn rendered_formats_carry_their_metadata() {
    let (store, person, _) = people_store();
    let x = store.create_object(person).unwrap();
    store.set_value(x, "name", RawValue::from("Ada")).unwrap();
    let renderer = ObjectRenderer::new(&store);

    let ld = renderer.render(x, SchemaFormat::JsonLd).unwrap();
    assert_eq!(ld["@type"], json!("person"));
    assert!(ld["@dateCreated"].is_string());

    let hal = renderer.render(x, SchemaFormat::Hal).unwrap();
    assert_eq!(hal["__metadata"]["__type"], json!("person"));
    assert!(hal["_links"]["self"]["href"].is_string());

    let plain = renderer.render(x, SchemaFormat::Json).unwrap();
    assert_eq!(plain["id"], json!(x.to_string()));
}
