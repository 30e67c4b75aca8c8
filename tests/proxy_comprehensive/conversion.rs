//! Conversion tests: default registries, custom converters, extensions.

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use tupleproxy::{
    CoreError, Converter, ConverterRegistry, DefaultConverterFactory, Object, SerdeConverter,
    Tuple, WireKind, WireValue,
};
use uuid::Uuid;

/// Stores a Celsius reading as an integer count of tenths.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Celsius(f64);

struct CelsiusConverter;

impl Converter<Celsius> for CelsiusConverter {
    fn to_native(
        &self,
        value: &WireValue,
        _: &ConverterRegistry,
    ) -> Result<Celsius, CoreError> {
        let tenths = value
            .as_i64()
            .ok_or_else(|| CoreError::conversion("expected an integer"))?;
        Ok(Celsius(tenths as f64 / 10.0))
    }

    fn to_wire(
        &self,
        object: &Celsius,
        _: &ConverterRegistry,
    ) -> Result<WireValue, CoreError> {
        Ok(WireValue::from((object.0 * 10.0).round() as i64))
    }
}

#[test]
fn test_custom_converter_on_derived_registry() {
    let shared = Arc::new(DefaultConverterFactory::complex());
    let mut custom = shared.derive();
    custom.register_converter::<Celsius, _>(WireKind::Integer, CelsiusConverter);
    let custom = Arc::new(custom);

    let mut tuple = Tuple::new(Arc::clone(&custom));
    tuple.put_object(0, Celsius(21.5)).unwrap();
    assert_eq!(tuple.to_wire_value(), WireValue::Array(vec![WireValue::from(215)]));
    assert_eq!(tuple.get::<Celsius>(0).unwrap(), Some(Celsius(21.5)));

    // the shared registry never sees the custom converter
    assert!(shared.to_wire(&Celsius(1.0)).is_err());
    assert!(DefaultConverterFactory::complex()
        .to_native::<Celsius>(&WireValue::from(10))
        .is_err());
}

#[test]
fn test_extension_types_in_tuples() {
    let id = Uuid::from_str("6ba7b810-9dad-11d1-80b4-00c04fd430c8").unwrap();
    let price = Decimal::from_str("-1234.5600").unwrap();

    let mut tuple = Tuple::new(DefaultConverterFactory::simple());
    tuple.put_object(0, id).unwrap();
    tuple.put_object(1, price).unwrap();

    let reparsed = Tuple::from_wire(&tuple.to_wire_value(), DefaultConverterFactory::simple())
        .unwrap();
    assert_eq!(reparsed.get_uuid(0).unwrap(), Some(id));
    assert_eq!(reparsed.get_decimal(1).unwrap(), Some(price));
    assert_eq!(reparsed.get_object(0).unwrap(), Some(Object::Uuid(id)));
}

#[test]
fn test_simple_registry_rejects_containers() {
    let mut tuple = Tuple::new(DefaultConverterFactory::simple());
    let result = tuple.put_object(0, vec![Object::from(1)]);
    assert!(matches!(result, Err(CoreError::NoConverterFound { .. })));

    let parsed = Tuple::from_wire(
        &WireValue::Array(vec![WireValue::Array(vec![WireValue::from(1)])]),
        DefaultConverterFactory::simple(),
    )
    .unwrap();
    assert!(parsed.get_object(0).is_err());
    assert!(parsed.get_list::<i32>(0).is_err());
}

#[test]
fn test_no_implicit_widening() {
    let tuple = Tuple::from_wire(
        &WireValue::Array(vec![WireValue::from(5), WireValue::from("5")]),
        DefaultConverterFactory::complex(),
    )
    .unwrap();
    assert!(tuple.get_double(0).is_err());
    assert!(tuple.get_string(0).is_err());
    assert!(tuple.get_integer(1).is_err());
}

#[test]
fn test_serde_type_registered_for_arrays() {
    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Point(i32, i32);

    let mut registry = DefaultConverterFactory::complex();
    registry.register_converter::<Point, _>(WireKind::Array, SerdeConverter::<Point>::new());

    let mut tuple = Tuple::new(registry);
    tuple.put_object(0, Point(1, 2)).unwrap();
    assert_eq!(tuple.get::<Point>(0).unwrap(), Some(Point(1, 2)));
    assert_eq!(tuple.get_list::<i32>(0).unwrap(), Some(vec![1, 2]));
}
