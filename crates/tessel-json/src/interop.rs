//! Conversions between [`Json`] and the `serde` ecosystem.
//!
//! `Json` implements [`Serialize`], so `serde_json::to_string(&json)` gives a
//! compact standard rendering next to the tab-indented [`Json::dump`]. Whole
//! trees also convert to and from `serde_json::Value`; object keys come back
//! in ascending order either way.

use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::error::{JsonError, Result};
use crate::json::Json;
use crate::value::{Object, Value};

/// Integral numbers inside the exactly representable range of an `f64`
/// convert to integers so `serde_json` renders `1` rather than `1.0`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn as_integer(n: f64) -> Option<i64> {
    (n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER).then_some(n as i64)
}

impl Serialize for Json {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let value = self.value().map_err(S::Error::custom)?;
        match value {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => match as_integer(*n) {
                Some(i) => serializer.serialize_i64(i),
                None if n.is_finite() => serializer.serialize_f64(*n),
                None => serializer.serialize_unit(),
            },
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, item) in map {
                    out.serialize_entry(key, item)?;
                }
                out.end()
            }
        }
    }
}

impl From<serde_json::Value> for Json {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Json::null(),
            serde_json::Value::Bool(b) => Json::from(b),
            serde_json::Value::Number(n) => Json::from(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Json::from(s),
            serde_json::Value::Array(items) => items.into_iter().map(Json::from).collect(),
            serde_json::Value::Object(map) => Json::from(
                map.into_iter()
                    .map(|(k, v)| (k, Json::from(v)))
                    .collect::<Object>(),
            ),
        }
    }
}

/// Fails with `NullHandle` if any handle in the tree is empty. Non-finite
/// numbers become `null` and integral numbers become integers.
impl TryFrom<&Json> for serde_json::Value {
    type Error = JsonError;

    fn try_from(json: &Json) -> Result<Self> {
        Ok(match json.value()? {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => match as_integer(*n) {
                Some(i) => serde_json::Value::from(i),
                None => serde_json::Number::from_f64(*n)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            },
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(serde_json::Value::try_from)
                    .collect::<Result<_>>()?,
            ),
            Value::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| -> Result<(String, serde_json::Value)> {
                        Ok((k.clone(), serde_json::Value::try_from(v)?))
                    })
                    .collect::<Result<_>>()?,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_compactly() {
        let doc = crate::parse(r#"{"b": [1, 2.5, "x"], "a": null}"#).unwrap();
        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            r#"{"a":null,"b":[1,2.5,"x"]}"#
        );
    }

    #[test]
    fn empty_handle_fails_to_serialize() {
        let mut doc = Json::from(1);
        let _moved = doc.take();
        assert!(serde_json::to_string(&doc).is_err());
    }

    #[test]
    fn converts_from_serde_json() {
        let doc = Json::from(json!({"k": [true, null, 3]}));
        let list = doc.member("k").unwrap();
        assert!(list.at(0).unwrap().get_bool().unwrap());
        assert!(list.at(1).unwrap().is_null().unwrap());
        assert_eq!(list.at(2).unwrap().get_number().unwrap(), 3.0);
    }

    #[test]
    fn converts_to_serde_json() {
        let doc = crate::parse(r#"{"k": [true, "s", 0.5]}"#).unwrap();
        let value = serde_json::Value::try_from(&doc).unwrap();
        assert_eq!(value, json!({"k": [true, "s", 0.5]}));
    }
}
