//! The value core: one JSON value of a fixed kind.
//!
//! [`Value`] is the payload owned by a [`Json`] handle. Every typed operation
//! is defined here once for all kinds; a kind that has no meaning for an
//! operation answers with an `InvalidType` error naming the operation and the
//! kind, so callers never need to check the kind before asking.

use std::cmp::Ordering;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::slice;

use crate::error::{JsonError, Result};
use crate::json::Json;

/// Ordered sequence of child handles.
pub type Array = Vec<Json>;

/// Mapping from key to child handle, iterated in ascending key order.
pub type Object = BTreeMap<String, Json>;

/// The six JSON value kinds.
///
/// The declaration order is the cross-kind ordering used when comparing
/// values of different kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Null,
    Number,
    Bool,
    String,
    Array,
    Object,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Number => "number",
            Kind::Bool => "bool",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single JSON value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Number(f64),
    Bool(bool),
    String(String),
    Array(Array),
    Object(Object),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Number(_) => Kind::Number,
            Value::Bool(_) => Kind::Bool,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Error for calling `operation` on a value of this kind.
    pub fn invalid_type(&self, operation: &str) -> JsonError {
        JsonError::invalid_type(operation, self.kind())
    }

    /// Structural equality. Values of different kinds are never equal.
    pub fn equals(&self, other: &Value) -> bool {
        self.kind() == other.kind() && self.compare(other) == Some(Ordering::Equal)
    }

    /// Same-kind ordering. Values of different kinds are never less.
    pub fn less_than(&self, other: &Value) -> bool {
        self.kind() == other.kind() && self.compare(other) == Some(Ordering::Less)
    }

    /// Total comparison used by the handle: kind order first, then the
    /// kind's own ordering. `None` only when a NaN or an empty handle is
    /// involved.
    pub(crate) fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Array(a), Value::Array(b)) => compare_arrays(a, b),
            (Value::Object(a), Value::Object(b)) => compare_objects(a, b),
            _ => Some(self.kind().cmp(&other.kind())),
        }
    }

    pub fn get_number(&self) -> Result<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            _ => Err(self.invalid_type("get_number")),
        }
    }

    pub fn get_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.invalid_type("get_bool")),
        }
    }

    pub fn get_string(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.invalid_type("get_string")),
        }
    }

    pub fn get_array(&self) -> Result<&Array> {
        match self {
            Value::Array(items) => Ok(items),
            _ => Err(self.invalid_type("get_array")),
        }
    }

    pub fn get_object(&self) -> Result<&Object> {
        match self {
            Value::Object(map) => Ok(map),
            _ => Err(self.invalid_type("get_object")),
        }
    }

    pub fn set_number(&mut self, value: f64) -> Result<()> {
        match self {
            Value::Number(n) => {
                *n = value;
                Ok(())
            }
            _ => Err(self.invalid_type("set_number")),
        }
    }

    pub fn set_bool(&mut self, value: bool) -> Result<()> {
        match self {
            Value::Bool(b) => {
                *b = value;
                Ok(())
            }
            _ => Err(self.invalid_type("set_bool")),
        }
    }

    pub fn set_string(&mut self, value: String) -> Result<()> {
        match self {
            Value::String(s) => {
                *s = value;
                Ok(())
            }
            _ => Err(self.invalid_type("set_string")),
        }
    }

    pub fn set_array(&mut self, value: Array) -> Result<()> {
        match self {
            Value::Array(items) => {
                *items = value;
                Ok(())
            }
            _ => Err(self.invalid_type("set_array")),
        }
    }

    pub fn set_object(&mut self, value: Object) -> Result<()> {
        match self {
            Value::Object(map) => {
                *map = value;
                Ok(())
            }
            _ => Err(self.invalid_type("set_object")),
        }
    }

    pub fn add_to_array(&mut self, value: Json) -> Result<()> {
        match self {
            Value::Array(items) => {
                items.push(value);
                Ok(())
            }
            _ => Err(self.invalid_type("add_to_array")),
        }
    }

    /// Insert `value` under `key`, replacing any previous entry.
    pub fn add_to_object(&mut self, key: String, value: Json) -> Result<()> {
        match self {
            Value::Object(map) => {
                map.insert(key, value);
                Ok(())
            }
            _ => Err(self.invalid_type("add_to_object")),
        }
    }

    /// Remove and return the element at `index`, shifting later elements.
    pub fn remove_from_array(&mut self, index: usize) -> Result<Json> {
        match self {
            Value::Array(items) if index < items.len() => Ok(items.remove(index)),
            Value::Array(items) => Err(JsonError::index_out_of_range(
                "remove_from_array",
                index,
                items.len(),
            )),
            _ => Err(self.invalid_type("remove_from_array")),
        }
    }

    pub fn remove_from_object(&mut self, key: &str) -> Result<Json> {
        match self {
            Value::Object(map) => map
                .remove(key)
                .ok_or_else(|| JsonError::key_not_found("remove_from_object", key)),
            _ => Err(self.invalid_type("remove_from_object")),
        }
    }

    pub fn at(&self, index: usize) -> Result<&Json> {
        match self {
            Value::Array(items) => items
                .get(index)
                .ok_or_else(|| JsonError::index_out_of_range("at", index, items.len())),
            _ => Err(self.invalid_type("at")),
        }
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut Json> {
        match self {
            Value::Array(items) => {
                let len = items.len();
                items
                    .get_mut(index)
                    .ok_or_else(|| JsonError::index_out_of_range("at_mut", index, len))
            }
            _ => Err(self.invalid_type("at_mut")),
        }
    }

    /// Non-mutating key lookup.
    pub fn get(&self, key: &str) -> Result<Option<&Json>> {
        match self {
            Value::Object(map) => Ok(map.get(key)),
            _ => Err(self.invalid_type("get")),
        }
    }

    pub fn member(&self, key: &str) -> Result<&Json> {
        match self {
            Value::Object(map) => map
                .get(key)
                .ok_or_else(|| JsonError::key_not_found("member", key)),
            _ => Err(self.invalid_type("member")),
        }
    }

    pub fn member_mut(&mut self, key: &str) -> Result<&mut Json> {
        match self {
            Value::Object(map) => map
                .get_mut(key)
                .ok_or_else(|| JsonError::key_not_found("member_mut", key)),
            _ => Err(self.invalid_type("member_mut")),
        }
    }

    /// Get-or-create: inserts a null entry when `key` is absent.
    pub fn entry_or_null(&mut self, key: String) -> Result<&mut Json> {
        match self {
            Value::Object(map) => Ok(map.entry(key).or_default()),
            _ => Err(self.invalid_type("entry_or_null")),
        }
    }

    /// Element count for arrays, entry count for objects.
    pub fn len(&self) -> Result<usize> {
        match self {
            Value::Array(items) => Ok(items.len()),
            Value::Object(map) => Ok(map.len()),
            _ => Err(self.invalid_type("len")),
        }
    }

    pub fn array_iter(&self) -> Result<slice::Iter<'_, Json>> {
        match self {
            Value::Array(items) => Ok(items.iter()),
            _ => Err(self.invalid_type("array_iter")),
        }
    }

    pub fn array_iter_mut(&mut self) -> Result<slice::IterMut<'_, Json>> {
        match self {
            Value::Array(items) => Ok(items.iter_mut()),
            _ => Err(self.invalid_type("array_iter_mut")),
        }
    }

    pub fn object_iter(&self) -> Result<btree_map::Iter<'_, String, Json>> {
        match self {
            Value::Object(map) => Ok(map.iter()),
            _ => Err(self.invalid_type("object_iter")),
        }
    }

    pub fn object_iter_mut(&mut self) -> Result<btree_map::IterMut<'_, String, Json>> {
        match self {
            Value::Object(map) => Ok(map.iter_mut()),
            _ => Err(self.invalid_type("object_iter_mut")),
        }
    }
}

/// Lexicographic by element; a strict prefix orders first.
fn compare_arrays(a: &[Json], b: &[Json]) -> Option<Ordering> {
    for (x, y) in a.iter().zip(b) {
        match x.partial_cmp(y)? {
            Ordering::Equal => continue,
            unequal => return Some(unequal),
        }
    }
    Some(a.len().cmp(&b.len()))
}

/// Lexicographic over (key, value) pairs in ascending key order.
fn compare_objects(a: &Object, b: &Object) -> Option<Ordering> {
    for ((ka, va), (kb, vb)) in a.iter().zip(b) {
        match ka.cmp(kb) {
            Ordering::Equal => {}
            unequal => return Some(unequal),
        }
        match va.partial_cmp(vb)? {
            Ordering::Equal => continue,
            unequal => return Some(unequal),
        }
    }
    Some(a.len().cmp(&b.len()))
}
