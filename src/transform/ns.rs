//! Conversions between JSON values and the namespace projection.
//!
//! `to_namespace` turns objects into [`Namespace`]s recursively; arrays
//! convert element by element and scalars carry over unchanged. `to_value`
//! is the exact inverse, so `to_value(to_namespace(v)) == v` for every
//! JSON value `v`. Both consume their input and build an independent
//! output.

use serde_json::{Map, Value};

use crate::models::{Namespace, NsValue};

/// Convert a JSON value into its namespace projection.
pub fn to_namespace(value: Value) -> NsValue {
    match value {
        Value::Object(map) => {
            let mut ns = Namespace::new();
            for (name, nested) in map {
                ns.set(name, to_namespace(nested));
            }
            NsValue::Ns(ns)
        }
        Value::Array(items) => NsValue::Seq(items.into_iter().map(to_namespace).collect()),
        Value::Null => NsValue::Null,
        Value::Bool(b) => NsValue::Bool(b),
        Value::Number(n) => NsValue::Number(n),
        Value::String(s) => NsValue::String(s),
    }
}

/// Convert a namespace projection back into a JSON value.
pub fn to_value(ns: NsValue) -> Value {
    match ns {
        NsValue::Ns(ns) => {
            let mut map = Map::new();
            for (name, nested) in ns.into_fields() {
                map.insert(name, to_value(nested));
            }
            Value::Object(map)
        }
        NsValue::Seq(items) => Value::Array(items.into_iter().map(to_value).collect()),
        NsValue::Null => Value::Null,
        NsValue::Bool(b) => Value::Bool(b),
        NsValue::Number(n) => Value::Number(n),
        NsValue::String(s) => Value::String(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_object() {
        let ns = to_namespace(json!({"a": 1, "b": 2}));
        let ns = ns.as_ns().unwrap();
        assert_eq!(ns.get("a").and_then(|v| v.as_i64()), Some(1));
        assert_eq!(ns.get("b").and_then(|v| v.as_i64()), Some(2));
    }

    #[test]
    fn test_nested_object() {
        let converted = to_namespace(json!({
            "name": "Product",
            "details": {
                "price": 100,
                "tags": ["electronics", "gadget"],
                "availability": {"in_stock": true, "quantity": 50}
            }
        }));

        let root = converted.as_ns().unwrap();
        let details = root.get("details").and_then(|v| v.as_ns()).unwrap();
        assert_eq!(details.get("price").and_then(|v| v.as_i64()), Some(100));

        let availability = details.get("availability").and_then(|v| v.as_ns()).unwrap();
        assert_eq!(
            availability.get("in_stock").and_then(|v| v.as_bool()),
            Some(true)
        );

        let tags = details.get("tags").and_then(|v| v.as_seq()).unwrap();
        assert_eq!(tags[0].as_str(), Some("electronics"));
    }

    #[test]
    fn test_list_of_objects() {
        let converted = to_namespace(json!([{"a": 1}, {"b": 2}]));
        let items = converted.as_seq().unwrap();
        assert_eq!(items[0].as_ns().unwrap().get("a").and_then(|v| v.as_i64()), Some(1));
        assert_eq!(items[1].as_ns().unwrap().get("b").and_then(|v| v.as_i64()), Some(2));
    }

    #[test]
    fn test_mixed_list_passes_scalars_through() {
        let converted = to_namespace(json!([1, {"a": 2}, "three"]));
        let items = converted.as_seq().unwrap();
        assert_eq!(items[0].as_i64(), Some(1));
        assert!(items[1].as_ns().is_some());
        assert_eq!(items[2].as_str(), Some("three"));
    }

    #[test]
    fn test_scalar_unchanged() {
        assert_eq!(to_namespace(json!(42)).as_i64(), Some(42));
        assert!(to_namespace(json!(null)).is_null());
    }

    #[test]
    fn test_empty_object() {
        let converted = to_namespace(json!({}));
        assert!(converted.as_ns().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let original = json!({
            "name": "Alice",
            "age": 30,
            "active": true,
            "score": 1.5,
            "note": null,
            "hobbies": ["reading", "hiking"],
            "address": {"city": "New York", "country": "USA"},
            "contacts": [{"kind": "email", "value": "a@example.com"}]
        });

        assert_eq!(to_value(to_namespace(original.clone())), original);
    }

    #[test]
    fn test_round_trip_preserves_key_order() {
        let original = json!({"zebra": 1, "apple": 2, "mango": 3});
        let restored = to_value(to_namespace(original));

        let keys: Vec<&String> = restored.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }
}
