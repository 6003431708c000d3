// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON engine adapter
//!
//! Reads an exported raw-model document of the form
//!
//! ```json
//! {
//!   "points": { "12": [0.0, 0.0], "13": [5000.0, 0.0] },
//!   "elements": [
//!     {
//!       "type": "IfcWallStandardCase",
//!       "global_id": "2O2Fr$t4X7Zf8NOew3FLOH",
//!       "representations": [
//!         { "identifier": "Axis", "kind": "Curve2D",
//!           "items": [{ "type": "IfcPolyline", "points": [{"ref": 12}, {"ref": 13}] }] }
//!       ],
//!       "materials": [
//!         { "layer_set": { "name": "Wall 265", "layers": [{ "name": "core", "thickness": 200.0 }] } }
//!       ],
//!       "info": { "Name": "Basic Wall" }
//!     }
//!   ]
//! }
//! ```
//!
//! Elements are kept as raw JSON and decoded lazily, so one malformed element
//! never prevents the others from being read.

use crate::element::{
    MaterialAssociation, RawElement, RawInfo, RawModel, Representation, RepresentationItem,
};
use crate::error::{Error, Result};
use crate::value::{Coordinates, EntityId, RawValue};
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Point reference table: entity id to coordinate tuple
pub type PointTable = FxHashMap<u32, Coordinates>;

/// A raw element backed by its JSON object
#[derive(Debug, Clone)]
pub struct JsonElement {
    value: Value,
    points: Arc<PointTable>,
}

impl JsonElement {
    /// Wrap a JSON value, sharing a point table with its siblings
    pub fn new(value: Value, points: Arc<PointTable>) -> Self {
        Self { value, points }
    }

    fn object(&self) -> Result<&Map<String, Value>> {
        self.value
            .as_object()
            .ok_or_else(|| Error::unreadable("element is not a JSON object"))
    }

    fn required_str(&self, key: &str) -> Result<&str> {
        self.object()?
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::unreadable(format!("missing string field '{}'", key)))
    }

    fn optional_array(&self, key: &str) -> Result<Option<&Vec<Value>>> {
        match self.object()?.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(_) => Err(Error::malformed(key, "expected an array")),
        }
    }
}

fn parse_representation(value: &Value) -> Result<Representation> {
    let obj = value
        .as_object()
        .ok_or_else(|| Error::malformed("representations", "entry is not an object"))?;

    let kind = obj
        .get("kind")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::malformed("representations", "entry has no 'kind'"))?;

    let items = match obj.get("items") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(parse_item).collect::<Result<_>>()?,
        Some(_) => return Err(Error::malformed("items", "expected an array")),
    };

    Ok(Representation {
        identifier: obj.get("identifier").and_then(Value::as_str).map(String::from),
        kind: kind.to_string(),
        items,
    })
}

fn parse_item(value: &Value) -> Result<RepresentationItem> {
    let obj = value
        .as_object()
        .ok_or_else(|| Error::malformed("items", "entry is not an object"))?;

    Ok(RepresentationItem {
        item_type: obj
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        depth: obj.get("depth").and_then(Value::as_f64),
        points: obj.get("points").map(RawValue::from_json).unwrap_or_default(),
    })
}

impl RawElement for JsonElement {
    fn type_name(&self) -> Result<&str> {
        self.required_str("type")
    }

    fn global_id(&self) -> Result<&str> {
        self.required_str("global_id")
    }

    fn representations(&self) -> Result<Vec<Representation>> {
        match self.optional_array("representations")? {
            Some(items) => items.iter().map(parse_representation).collect(),
            None => Ok(Vec::new()),
        }
    }

    fn material_associations(&self) -> Result<Vec<MaterialAssociation>> {
        match self.optional_array("materials")? {
            Some(items) => items
                .iter()
                .map(|item| {
                    serde_json::from_value(item.clone())
                        .map_err(|e| Error::malformed("materials", e.to_string()))
                })
                .collect(),
            None => Ok(Vec::new()),
        }
    }

    fn info(&self) -> Result<RawInfo> {
        let obj = self.object()?;
        if let Some(Value::Object(info)) = obj.get("info") {
            return Ok(info.clone());
        }

        Ok(obj
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "representations" | "materials"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }

    fn resolve_point(&self, reference: EntityId) -> Option<Coordinates> {
        self.points.get(&reference.0).cloned()
    }
}

/// A raw model read from a JSON document
#[derive(Debug, Clone, Default)]
pub struct JsonModel {
    elements: Vec<JsonElement>,
}

impl JsonModel {
    /// Parse a document from text
    pub fn from_str(content: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(content)?;
        Self::from_value(root)
    }

    /// Parse a document from bytes
    pub fn from_slice(content: &[u8]) -> Result<Self> {
        let root: Value = serde_json::from_slice(content)?;
        Self::from_value(root)
    }

    /// Build a model from an already parsed document
    pub fn from_value(root: Value) -> Result<Self> {
        let Value::Object(mut root) = root else {
            return Err(Error::InvalidInput("document is not a JSON object".into()));
        };

        let points = Arc::new(parse_point_table(root.get("points"))?);

        let elements = match root.remove("elements") {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(Error::InvalidInput("'elements' is not an array".into())),
            None => return Err(Error::InvalidInput("document has no 'elements'".into())),
        };

        Ok(Self {
            elements: elements
                .into_iter()
                .map(|value| JsonElement::new(value, Arc::clone(&points)))
                .collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

fn parse_point_table(value: Option<&Value>) -> Result<PointTable> {
    let mut table = PointTable::default();
    let entries = match value {
        None | Some(Value::Null) => return Ok(table),
        Some(Value::Object(entries)) => entries,
        Some(_) => return Err(Error::InvalidInput("'points' is not an object".into())),
    };

    for (key, coords) in entries {
        let Ok(id) = key.trim_start_matches('#').parse::<u32>() else {
            tracing::warn!(key = %key, "Skipping point with invalid id");
            continue;
        };

        let Some(coords) = coords
            .as_array()
            .and_then(|values| values.iter().map(Value::as_f64).collect::<Option<Coordinates>>())
        else {
            tracing::warn!(key = %key, "Skipping point that is not a numeric list");
            continue;
        };

        table.insert(id, coords);
    }

    Ok(table)
}

impl RawModel for JsonModel {
    type Element = JsonElement;

    fn elements(&self) -> Result<&[JsonElement]> {
        Ok(&self.elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wall_document() -> Value {
        json!({
            "points": { "12": [0.0, 0.0], "#13": [5000.0, 0.0] },
            "elements": [{
                "type": "IfcWallStandardCase",
                "global_id": "wall-1",
                "representations": [{
                    "identifier": "Axis",
                    "kind": "Curve2D",
                    "items": [{ "type": "IfcPolyline", "points": [{"ref": 12}, {"ref": 13}] }]
                }],
                "materials": [{
                    "layer_set": { "name": "Wall 265", "layers": [{ "name": "core", "thickness": 200.0 }] }
                }],
                "Name": "Basic Wall"
            }]
        })
    }

    #[test]
    fn test_read_element_fields() {
        let model = JsonModel::from_value(wall_document()).unwrap();
        let element = &model.elements().unwrap()[0];

        assert_eq!(element.type_name().unwrap(), "IfcWallStandardCase");
        assert_eq!(element.global_id().unwrap(), "wall-1");

        let reps = element.representations().unwrap();
        assert_eq!(reps.len(), 1);
        assert!(reps[0].is_kind("curve2d"));
        assert_eq!(reps[0].identifier.as_deref(), Some("Axis"));
        assert_eq!(reps[0].items[0].item_type, "IfcPolyline");

        let materials = element.material_associations().unwrap();
        let layer_set = materials[0].layer_set.as_ref().unwrap();
        assert_eq!(layer_set.name.as_deref(), Some("Wall 265"));
        assert_eq!(layer_set.layers[0].thickness, 200.0);
    }

    #[test]
    fn test_resolve_point() {
        let model = JsonModel::from_value(wall_document()).unwrap();
        let element = &model.elements().unwrap()[0];

        let p = element.resolve_point(EntityId(13)).unwrap();
        assert_eq!(p.as_slice(), &[5000.0, 0.0]);
        assert!(element.resolve_point(EntityId(99)).is_none());
    }

    #[test]
    fn test_info_excludes_geometry() {
        let model = JsonModel::from_value(wall_document()).unwrap();
        let info = model.elements().unwrap()[0].info().unwrap();

        assert_eq!(info.get("Name"), Some(&json!("Basic Wall")));
        assert!(!info.contains_key("representations"));
        assert!(!info.contains_key("materials"));
    }

    #[test]
    fn test_explicit_info_object() {
        let model = JsonModel::from_value(json!({
            "elements": [{ "type": "IfcBeam", "global_id": "b", "info": { "id": 7 } }]
        }))
        .unwrap();
        let info = model.elements().unwrap()[0].info().unwrap();
        assert_eq!(info.len(), 1);
        assert_eq!(info.get("id"), Some(&json!(7)));
    }

    #[test]
    fn test_unreadable_element() {
        let model = JsonModel::from_value(json!({ "elements": [42, { "global_id": "x" }] })).unwrap();
        let elements = model.elements().unwrap();

        assert!(matches!(
            elements[0].type_name(),
            Err(Error::UnreadableElement { .. })
        ));
        assert!(matches!(
            elements[1].type_name(),
            Err(Error::UnreadableElement { .. })
        ));
    }

    #[test]
    fn test_malformed_representations() {
        let model = JsonModel::from_value(json!({
            "elements": [{ "type": "IfcSlab", "global_id": "s", "representations": 5 }]
        }))
        .unwrap();
        assert!(matches!(
            model.elements().unwrap()[0].representations(),
            Err(Error::MalformedAttribute { .. })
        ));
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(
            JsonModel::from_value(json!([])),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            JsonModel::from_value(json!({ "elements": null })),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            JsonModel::from_value(json!({ "points": [[0.0, 0.0]], "elements": [] })),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(JsonModel::from_str("{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_bad_point_entries_skipped() {
        let model = JsonModel::from_value(json!({
            "points": { "1": [0, 0], "2": [10, 0], "99": [1, "x"], "abc": [5, 5] },
            "elements": [
                { "type": "IfcColumn", "global_id": "c" },
                { "type": "IfcSlab", "global_id": "s" }
            ]
        }))
        .unwrap();
        assert_eq!(model.len(), 2);

        let element = &model.elements().unwrap()[1];
        assert_eq!(element.resolve_point(EntityId(2)).unwrap().as_slice(), &[10.0, 0.0]);
        assert!(element.resolve_point(EntityId(99)).is_none());
    }

    #[test]
    fn test_missing_optional_sections() {
        let model = JsonModel::from_str(r#"{ "elements": [{ "type": "IfcDoor", "global_id": "d" }] }"#)
            .unwrap();
        let element = &model.elements().unwrap()[0];
        assert!(element.representations().unwrap().is_empty());
        assert!(element.material_associations().unwrap().is_empty());
        assert_eq!(model.len(), 1);
    }
}
