//! Record model tests: growth, positions, names and the wire round trip.

use std::collections::HashMap;
use std::sync::Arc;

use crate::common::{books_metadata, complex_registry};
use tupleproxy::{CoreError, ConverterRegistry, Field, Object, Tuple, WireValue};

// =============================================================================
// Wire round trip
// =============================================================================

#[test]
fn test_nested_structures_survive_round_trip() {
    let registry = complex_registry();
    let source = Tuple::from_objects(
        vec![
            Object::from("Apple"),
            Object::from(123456),
            Object::List(vec![Object::from("lol"), Object::map([("key", "value")])]),
        ],
        Arc::clone(&registry),
    )
    .unwrap();

    let parsed = Tuple::from_wire(&source.to_wire_value(), registry).unwrap();

    assert_eq!(parsed.get_string(0).unwrap(), Some("Apple".to_string()));
    assert_eq!(parsed.get_integer(1).unwrap(), Some(123456));
    assert_eq!(parsed.get_long(1).unwrap(), Some(123456));

    let list = parsed.get_object(2).unwrap().unwrap();
    let items = list.as_list().unwrap();
    assert_eq!(items[0], Object::from("lol"));
    assert_eq!(items[1], Object::map([("key", "value")]));
    assert_eq!(
        items[1].get(&Object::from("key")),
        Some(&Object::from("value"))
    );
}

#[test]
fn test_plain_collections_round_trip() {
    let registry = complex_registry();
    let mut tuple = Tuple::new(Arc::clone(&registry));
    tuple.put_object(0, "Apple".to_string()).unwrap();
    tuple.put_object(7, vec!["Apple", "Ananas"]).unwrap();

    let mut tags = HashMap::new();
    tags.insert("color".to_string(), "green".to_string());
    tags.insert("origin".to_string(), "Spain".to_string());
    tuple.put_object(1, tags.clone()).unwrap();

    let parsed = Tuple::from_wire(&tuple.to_wire_value(), registry).unwrap();
    assert_eq!(parsed.size(), 8);
    assert_eq!(
        parsed.get_list::<String>(7).unwrap(),
        Some(vec!["Apple".to_string(), "Ananas".to_string()])
    );
    assert_eq!(
        parsed.get_object(7).unwrap(),
        Some(Object::from(vec!["Apple", "Ananas"]))
    );
    assert_eq!(parsed.get_map::<String, String>(1).unwrap(), Some(tags.clone()));
    assert_eq!(parsed.get::<HashMap<String, String>>(1).unwrap(), Some(tags));
}

#[test]
fn test_wire_layout_is_positional_array() {
    let mut tuple = Tuple::new(complex_registry());
    tuple.put_object(2, true).unwrap();
    assert_eq!(
        tuple.to_wire_value(),
        WireValue::Array(vec![WireValue::Nil, WireValue::Nil, WireValue::from(true)])
    );
}

// =============================================================================
// Positions
// =============================================================================

#[test]
fn test_growth_fills_nil() {
    let mut tuple = Tuple::new(complex_registry());
    tuple.put_object(0, "first".to_string()).unwrap();
    tuple.set_field(3, Field::new(WireValue::from(9))).unwrap();

    assert_eq!(tuple.size(), 4);
    assert!(tuple.get_field(1).unwrap().unwrap().is_nil());
    assert!(tuple.get_field(2).unwrap().unwrap().is_nil());
    assert_eq!(tuple.get_string(1).unwrap(), None);
    assert_eq!(tuple.get_integer(3).unwrap(), Some(9));
}

#[test]
fn test_negative_positions_are_symmetric() {
    let mut tuple = Tuple::new(complex_registry());
    tuple.put_object(0, 1i64).unwrap();

    for result in [
        tuple.clone().set_field(-1, Field::nil()),
        tuple.clone().put_object(-1, 2i64),
    ] {
        assert!(matches!(
            result,
            Err(CoreError::IndexOutOfBounds { position: -1, .. })
        ));
    }
    assert!(matches!(
        tuple.get_field(-5),
        Err(CoreError::IndexOutOfBounds { .. })
    ));
    assert_eq!(tuple.size(), 1);
}

#[test]
fn test_put_object_rejects_unregistered_type() {
    let mut tuple = Tuple::new(complex_registry());
    let result = tuple.put_object(0, ConverterRegistry::new());
    assert!(matches!(result, Err(CoreError::NoConverterFound { .. })));
}

// =============================================================================
// Names
// =============================================================================

#[test]
fn test_names_require_metadata_even_when_position_exists() {
    let mut tuple = Tuple::new(complex_registry());
    tuple.put_object(0, 1i64).unwrap();
    let result = tuple.set_field_by_name("id", Field::new(WireValue::from(2)));
    assert!(matches!(result, Err(CoreError::FieldNotFound { .. })));
}

#[test]
fn test_name_write_equals_position_write() {
    let metadata = Arc::new(books_metadata());
    let field = Field::new(WireValue::from("Dune"));

    let mut by_name = Tuple::with_metadata(complex_registry(), Arc::clone(&metadata));
    by_name.set_field_by_name("book_name", field.clone()).unwrap();
    let mut by_position = Tuple::with_metadata(complex_registry(), metadata);
    by_position.set_field(2, field).unwrap();

    assert_eq!(by_name, by_position);
    assert_eq!(by_name.to_wire_value(), by_position.to_wire_value());
}

#[test]
fn test_format_bounds_positional_writes() {
    let mut tuple = Tuple::with_metadata(complex_registry(), Arc::new(books_metadata()));
    tuple.put_object(3, "Herbert".to_string()).unwrap();
    assert!(matches!(
        tuple.put_object(4, 1i64),
        Err(CoreError::IndexOutOfBounds { limit: Some(4), .. })
    ));
    assert!(tuple.put_object(10, 1i64).is_err());
}

#[test]
fn test_copies_are_independent() {
    let mut original = Tuple::new(complex_registry());
    original.put_object(0, "a".to_string()).unwrap();

    let mut copy = original.clone();
    copy.put_object(0, "b".to_string()).unwrap();
    copy.put_object(5, "c".to_string()).unwrap();

    assert_eq!(original.size(), 1);
    assert_eq!(original.get_string(0).unwrap(), Some("a".to_string()));
    assert_eq!(copy.size(), 6);
}
