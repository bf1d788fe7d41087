//! `serde_json` documents as dynamic values
//!
//! A `serde_json::Value` is a dynamic box: `Null` is the null box, every
//! other variant holds a value of the matching Rust type.

use super::{Mapping, Reflect, Value};
use deepeq_core_types::Addr;
use serde_json::{Map, Number};

impl Reflect for serde_json::Value {
    fn reflect(&self) -> Value<'_> {
        let inner: &dyn Reflect = match self {
            serde_json::Value::Null => return Value::Interface(None),
            serde_json::Value::Bool(b) => b,
            serde_json::Value::Number(n) => n,
            serde_json::Value::String(s) => s,
            serde_json::Value::Array(items) => items,
            serde_json::Value::Object(map) => map,
        };
        Value::Interface(Some(inner))
    }

    fn null_form() -> Option<Value<'static>> {
        Some(Value::Interface(None))
    }
}

impl Reflect for Number {
    // Integers that fit i64 are signed regardless of how they were parsed,
    // so 3 and -3 share a kind.
    fn reflect(&self) -> Value<'_> {
        if let Some(i) = self.as_i64() {
            Value::Int(i)
        } else if let Some(u) = self.as_u64() {
            Value::Uint(u)
        } else {
            Value::Float(self.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl Mapping for Map<String, serde_json::Value> {
    fn len(&self) -> usize {
        Map::len(self)
    }

    fn entries(&self) -> Vec<(&dyn Reflect, &dyn Reflect)> {
        self.iter()
            .map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect))
            .collect()
    }

    fn addr(&self) -> Addr {
        Addr::of(self)
    }
}

impl Reflect for Map<String, serde_json::Value> {
    fn reflect(&self) -> Value<'_> {
        Value::Map(Some(self))
    }

    fn null_form() -> Option<Value<'static>> {
        Some(Value::Map(None))
    }
}
