// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw attribute values as handed over by the parsing engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;

/// Numeric coordinate tuple (2 or 3 components for valid points)
pub type Coordinates = SmallVec<[f64; 3]>;

/// Engine-level entity identifier (`#123` in a STEP file)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        EntityId(id)
    }
}

/// A nested raw value: point structures, coordinate tuples and references
#[derive(Clone, Debug, PartialEq, Default)]
pub enum RawValue {
    /// Null / undefined
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// Reference to another engine entity (typically a cartesian point)
    EntityRef(EntityId),
    /// List of values
    List(Vec<RawValue>),
}

impl RawValue {
    /// Get as entity reference
    #[inline]
    pub fn as_entity_ref(&self) -> Option<EntityId> {
        match self {
            RawValue::EntityRef(id) => Some(*id),
            _ => None,
        }
    }

    /// Get as string
    #[inline]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            RawValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as float
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            RawValue::Float(f) => Some(*f),
            RawValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get as list
    #[inline]
    pub fn as_list(&self) -> Option<&[RawValue]> {
        match self {
            RawValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Check if this is an integer or float
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, RawValue::Integer(_) | RawValue::Float(_))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Convert a JSON value
    ///
    /// Objects of the form `{"ref": N}` become entity references; any other
    /// object has no raw equivalent and maps to `Null`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => RawValue::Integer(i),
                None => n.as_f64().map(RawValue::Float).unwrap_or(RawValue::Null),
            },
            Value::String(s) => RawValue::String(s.clone()),
            Value::Array(items) => RawValue::List(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => map
                .get("ref")
                .and_then(Value::as_u64)
                .and_then(|id| u32::try_from(id).ok())
                .map(|id| RawValue::EntityRef(EntityId(id)))
                .unwrap_or(RawValue::Null),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<EntityId> for RawValue {
    fn from(id: EntityId) -> Self {
        RawValue::EntityRef(id)
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(items: Vec<T>) -> Self {
        RawValue::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(RawValue::from_json(&json!(3)), RawValue::Integer(3));
        assert_eq!(RawValue::from_json(&json!(2.5)), RawValue::Float(2.5));
        assert_eq!(RawValue::from_json(&json!(3)).as_float(), Some(3.0));
    }

    #[test]
    fn test_from_json_nested() {
        let value = RawValue::from_json(&json!([[0.0, 1.0], {"ref": 7}, "x", null]));
        let items = value.as_list().unwrap();
        assert_eq!(items.len(), 4);
        assert!(items[0].as_list().unwrap().iter().all(RawValue::is_numeric));
        assert_eq!(items[1].as_entity_ref(), Some(EntityId(7)));
        assert_eq!(items[2].as_string(), Some("x"));
        assert!(items[3].is_null());
    }

    #[test]
    fn test_unknown_object_is_null() {
        assert!(RawValue::from_json(&json!({"name": "point"})).is_null());
    }

    #[test]
    fn test_from_vec() {
        let value: RawValue = vec![vec![1.0, 2.0], vec![3.0, 4.0]].into();
        assert_eq!(value.as_list().unwrap().len(), 2);
    }

    #[test]
    fn test_entity_id_display() {
        assert_eq!(EntityId(42).to_string(), "#42");
    }
}
