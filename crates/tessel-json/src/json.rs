//! The owning value handle.
//!
//! A [`Json`] owns at most one [`Value`]. It has value semantics: `clone`
//! deep-copies the whole subtree and mutation through one handle never shows
//! through another. [`Json::take`] moves the value out and leaves the handle
//! empty; every typed operation on an empty handle fails with
//! [`ErrorKind::NullHandle`](crate::ErrorKind::NullHandle) until a new value is
//! assigned.
//!
//! ```
//! use tessel_json::Json;
//!
//! let mut list = Json::array();
//! list.add_to_array(Json::from(1)).unwrap();
//! list.add_to_array(Json::from("two")).unwrap();
//! assert_eq!(list.dump().unwrap(), r#"[1, "two"]"#);
//!
//! let moved = list.take();
//! assert!(list.kind().is_err());
//! assert_eq!(moved.len().unwrap(), 2);
//! ```

use std::cmp::Ordering;
use std::collections::btree_map;
use std::fmt;
use std::slice;

use crate::error::{JsonError, Result};
use crate::value::{Array, Kind, Object, Value};

pub struct Json {
    core: Option<Value>,
}

impl Json {
    pub fn null() -> Self {
        Self::from_value(Value::Null)
    }

    /// An empty array.
    pub fn array() -> Self {
        Self::from_value(Value::Array(Array::new()))
    }

    /// An empty object.
    pub fn object() -> Self {
        Self::from_value(Value::Object(Object::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self { core: Some(value) }
    }

    fn core(&self) -> Result<&Value> {
        self.core.as_ref().ok_or_else(JsonError::null_handle)
    }

    fn core_mut(&mut self) -> Result<&mut Value> {
        self.core.as_mut().ok_or_else(JsonError::null_handle)
    }

    /// Borrow the held value.
    pub fn value(&self) -> Result<&Value> {
        self.core()
    }

    /// Unwrap the handle into its value.
    pub fn into_value(self) -> Result<Value> {
        self.core.ok_or_else(JsonError::null_handle)
    }

    /// Move the value out, leaving this handle empty.
    pub fn take(&mut self) -> Json {
        Json {
            core: self.core.take(),
        }
    }

    /// False once the value has been taken and nothing was assigned since.
    pub fn is_present(&self) -> bool {
        self.core.is_some()
    }

    pub fn kind(&self) -> Result<Kind> {
        Ok(self.core()?.kind())
    }

    pub fn is_null(&self) -> Result<bool> {
        Ok(self.kind()? == Kind::Null)
    }

    pub fn is_number(&self) -> Result<bool> {
        Ok(self.kind()? == Kind::Number)
    }

    pub fn is_bool(&self) -> Result<bool> {
        Ok(self.kind()? == Kind::Bool)
    }

    pub fn is_string(&self) -> Result<bool> {
        Ok(self.kind()? == Kind::String)
    }

    pub fn is_array(&self) -> Result<bool> {
        Ok(self.kind()? == Kind::Array)
    }

    pub fn is_object(&self) -> Result<bool> {
        Ok(self.kind()? == Kind::Object)
    }

    pub fn get_number(&self) -> Result<f64> {
        self.core()?.get_number()
    }

    pub fn get_bool(&self) -> Result<bool> {
        self.core()?.get_bool()
    }

    pub fn get_string(&self) -> Result<&str> {
        self.core()?.get_string()
    }

    pub fn get_array(&self) -> Result<&Array> {
        self.core()?.get_array()
    }

    pub fn get_object(&self) -> Result<&Object> {
        self.core()?.get_object()
    }

    pub fn set_number(&mut self, value: f64) -> Result<()> {
        self.core_mut()?.set_number(value)
    }

    pub fn set_bool(&mut self, value: bool) -> Result<()> {
        self.core_mut()?.set_bool(value)
    }

    pub fn set_string(&mut self, value: impl Into<String>) -> Result<()> {
        self.core_mut()?.set_string(value.into())
    }

    pub fn set_array(&mut self, value: Array) -> Result<()> {
        self.core_mut()?.set_array(value)
    }

    pub fn set_object(&mut self, value: Object) -> Result<()> {
        self.core_mut()?.set_object(value)
    }

    pub fn add_to_array(&mut self, value: impl Into<Json>) -> Result<()> {
        self.core_mut()?.add_to_array(value.into())
    }

    /// Insert or overwrite the entry for `key`.
    pub fn add_to_object(&mut self, key: impl Into<String>, value: impl Into<Json>) -> Result<()> {
        self.core_mut()?.add_to_object(key.into(), value.into())
    }

    /// Remove the element at `index`. The array is left untouched on error.
    pub fn remove_from_array(&mut self, index: usize) -> Result<Json> {
        self.core_mut()?.remove_from_array(index)
    }

    /// Remove the entry for `key`. The object is left untouched on error.
    pub fn remove_from_object(&mut self, key: &str) -> Result<Json> {
        self.core_mut()?.remove_from_object(key)
    }

    pub fn at(&self, index: usize) -> Result<&Json> {
        self.core()?.at(index)
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut Json> {
        self.core_mut()?.at_mut(index)
    }

    /// Look up `key` without inserting anything.
    pub fn get(&self, key: &str) -> Result<Option<&Json>> {
        self.core()?.get(key)
    }

    /// Look up `key`, failing with `KeyNotFound` when it is absent.
    pub fn member(&self, key: &str) -> Result<&Json> {
        self.core()?.member(key)
    }

    pub fn member_mut(&mut self, key: &str) -> Result<&mut Json> {
        self.core_mut()?.member_mut(key)
    }

    /// Return the entry for `key`, inserting `null` first when it is absent.
    pub fn entry_or_null(&mut self, key: impl Into<String>) -> Result<&mut Json> {
        self.core_mut()?.entry_or_null(key.into())
    }

    pub fn len(&self) -> Result<usize> {
        self.core()?.len()
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn array_iter(&self) -> Result<slice::Iter<'_, Json>> {
        self.core()?.array_iter()
    }

    pub fn array_iter_mut(&mut self) -> Result<slice::IterMut<'_, Json>> {
        self.core_mut()?.array_iter_mut()
    }

    pub fn object_iter(&self) -> Result<btree_map::Iter<'_, String, Json>> {
        self.core()?.object_iter()
    }

    pub fn object_iter_mut(&mut self) -> Result<btree_map::IterMut<'_, String, Json>> {
        self.core_mut()?.object_iter_mut()
    }

    /// Structural equality; fails if either handle is empty.
    pub fn equals(&self, other: &Json) -> Result<bool> {
        if std::ptr::eq(self, other) {
            self.core()?;
            return Ok(true);
        }
        Ok(self.core()?.equals(other.core()?))
    }

    /// Kind order first, then the kind's own ordering; fails if either
    /// handle is empty.
    pub fn less_than(&self, other: &Json) -> Result<bool> {
        let (a, b) = (self.core()?, other.core()?);
        Ok(a.compare(b) == Some(Ordering::Less))
    }

    /// Render the value as text.
    pub fn dump(&self) -> Result<String> {
        let mut out = String::new();
        self.dump_into(&mut out, 0)?;
        Ok(out)
    }

    /// Append the rendered value to `out`, indenting objects as if nested
    /// `depth` levels deep.
    pub fn dump_into(&self, out: &mut String, depth: usize) -> Result<()> {
        self.core()?.render(out, depth)
    }
}

impl Default for Json {
    fn default() -> Self {
        Self::null()
    }
}

/// Deep copy. Copying an empty handle yields `null`.
impl Clone for Json {
    fn clone(&self) -> Self {
        Self::from_value(self.core.clone().unwrap_or_default())
    }
}

impl fmt::Debug for Json {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.core {
            Some(value) => fmt::Debug::fmt(value, f),
            None => f.write_str("<empty>"),
        }
    }
}

/// Writes [`Json::dump`]; an empty handle is reported as a formatting error.
impl fmt::Display for Json {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.dump().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Empty handles equal only each other.
impl PartialEq for Json {
    fn eq(&self, other: &Self) -> bool {
        match (&self.core, &other.core) {
            (Some(a), Some(b)) => a.equals(b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Empty handles are unordered against present ones.
impl PartialOrd for Json {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (&self.core, &other.core) {
            (Some(a), Some(b)) => a.compare(b),
            (None, None) => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl From<Value> for Json {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl From<()> for Json {
    fn from(_: ()) -> Self {
        Self::null()
    }
}

impl From<f64> for Json {
    fn from(value: f64) -> Self {
        Self::from_value(Value::Number(value))
    }
}

impl From<f32> for Json {
    fn from(value: f32) -> Self {
        Self::from_value(Value::Number(f64::from(value)))
    }
}

impl From<i32> for Json {
    fn from(value: i32) -> Self {
        Self::from_value(Value::Number(f64::from(value)))
    }
}

impl From<u32> for Json {
    fn from(value: u32) -> Self {
        Self::from_value(Value::Number(f64::from(value)))
    }
}

/// Values beyond ±2^53 lose precision.
impl From<i64> for Json {
    fn from(value: i64) -> Self {
        Self::from_value(Value::Number(value as f64))
    }
}

impl From<bool> for Json {
    fn from(value: bool) -> Self {
        Self::from_value(Value::Bool(value))
    }
}

impl From<&str> for Json {
    fn from(value: &str) -> Self {
        Self::from_value(Value::String(value.to_string()))
    }
}

impl From<String> for Json {
    fn from(value: String) -> Self {
        Self::from_value(Value::String(value))
    }
}

impl From<Array> for Json {
    fn from(value: Array) -> Self {
        Self::from_value(Value::Array(value))
    }
}

impl From<Object> for Json {
    fn from(value: Object) -> Self {
        Self::from_value(Value::Object(value))
    }
}

impl FromIterator<Json> for Json {
    fn from_iter<I: IntoIterator<Item = Json>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Array>())
    }
}

impl<K: Into<String>> FromIterator<(K, Json)> for Json {
    fn from_iter<I: IntoIterator<Item = (K, Json)>>(iter: I) -> Self {
        Self::from(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect::<Object>(),
        )
    }
}
