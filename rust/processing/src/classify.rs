// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element classification into a category map

use crate::element::DomainElement;
use crate::error::{ExtractionFailure, Result};
use crate::extract::extract_profile_with_depth;
use crate::flatten::DEFAULT_MAX_DEPTH;
use ifc_slicer_core::{ElementType, RawElement, RawInfo, RawModel};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Batch size at which [`classify_with_options`] switches to rayon
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 512;

/// Tuning for a classification pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Batches with at least this many elements are classified in parallel
    pub parallel_threshold: usize,
    /// Nesting limit for point structures
    pub max_flatten_depth: usize,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            max_flatten_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// One processed element: its raw record plus the typed object, if any
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementRecord {
    pub id: String,
    pub info: RawInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<DomainElement>,
}

/// An element left out of the map because its fields could not be read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedElement {
    /// Position in the source collection
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Category {
    type_name: String,
    records: Vec<ElementRecord>,
}

/// Elements grouped by declared type name
///
/// Categories keep first-encounter order and records keep source order.
/// Serializes as a JSON object keyed by type name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryMap {
    categories: Vec<Category>,
    index: FxHashMap<String, usize>,
    failures: Vec<ExtractionFailure>,
    skipped: Vec<SkippedElement>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record under `type_name`, creating the category on first use
    pub fn push(&mut self, type_name: &str, record: ElementRecord) {
        let slot = match self.index.get(type_name) {
            Some(&slot) => slot,
            None => {
                self.categories.push(Category {
                    type_name: type_name.to_string(),
                    records: Vec::new(),
                });
                let slot = self.categories.len() - 1;
                self.index.insert(type_name.to_string(), slot);
                slot
            }
        };
        self.categories[slot].records.push(record);
    }

    pub fn get(&self, type_name: &str) -> Option<&[ElementRecord]> {
        self.index
            .get(type_name)
            .map(|&slot| self.categories[slot].records.as_slice())
    }

    /// Type names in first-encounter order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.categories.iter().map(|c| c.type_name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ElementRecord])> + '_ {
        self.categories
            .iter()
            .map(|c| (c.type_name.as_str(), c.records.as_slice()))
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of records across all categories
    pub fn element_count(&self) -> usize {
        self.categories.iter().map(|c| c.records.len()).sum()
    }

    /// Typed objects across all categories, in map order
    pub fn domain_elements(&self) -> impl Iterator<Item = &DomainElement> + '_ {
        self.categories
            .iter()
            .flat_map(|c| c.records.iter())
            .filter_map(|r| r.element.as_ref())
    }

    pub fn failures(&self) -> &[ExtractionFailure] {
        &self.failures
    }

    pub fn skipped(&self) -> &[SkippedElement] {
        &self.skipped
    }

    /// Pretty-printed JSON of the category layout
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for CategoryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.type_name, &category.records)?;
        }
        map.end()
    }
}

enum Outcome {
    Classified {
        type_name: String,
        record: ElementRecord,
        failure: Option<ExtractionFailure>,
    },
    Skipped(SkippedElement),
}

fn classify_element<E: RawElement>(index: usize, element: &E, max_depth: usize) -> Outcome {
    let fields = element
        .type_name()
        .and_then(|type_name| Ok((type_name, element.global_id()?, element.info()?)));
    let (type_name, id, info) = match fields {
        Ok(fields) => fields,
        Err(e) => {
            return Outcome::Skipped(SkippedElement {
                index,
                reason: e.to_string(),
            })
        }
    };

    let eligible = ElementType::parse(type_name).is_some_and(|t| t.has_extractor());
    let (domain, failure) = if eligible {
        match extract_profile_with_depth(element, max_depth) {
            Ok(domain) => (Some(domain), None),
            Err(failure) => (None, Some(failure)),
        }
    } else {
        (None, None)
    };

    Outcome::Classified {
        type_name: type_name.to_string(),
        record: ElementRecord {
            id: id.to_string(),
            info,
            element: domain,
        },
        failure,
    }
}

fn merge(outcomes: Vec<Outcome>) -> CategoryMap {
    let mut map = CategoryMap::new();
    for outcome in outcomes {
        match outcome {
            Outcome::Classified {
                type_name,
                record,
                failure,
            } => {
                if let Some(failure) = failure {
                    tracing::debug!(
                        id = %record.id,
                        type_name = %type_name,
                        kind = %failure.kind,
                        "Profile extraction failed: {}",
                        failure.message
                    );
                    map.failures.push(failure);
                }
                map.push(&type_name, record);
            }
            Outcome::Skipped(skipped) => {
                tracing::error!(
                    index = skipped.index,
                    reason = %skipped.reason,
                    "Skipping unreadable element"
                );
                map.skipped.push(skipped);
            }
        }
    }
    map
}

fn run<M: RawModel>(model: &M, options: &ClassifyOptions, parallel: bool) -> Result<CategoryMap> {
    let start = Instant::now();
    let elements = model.elements()?;
    let max_depth = options.max_flatten_depth;

    // rayon's indexed collect keeps source order, so the merge below sees the
    // same sequence either way
    let outcomes: Vec<Outcome> = if parallel {
        elements
            .par_iter()
            .enumerate()
            .map(|(i, element)| classify_element(i, element, max_depth))
            .collect()
    } else {
        elements
            .iter()
            .enumerate()
            .map(|(i, element)| classify_element(i, element, max_depth))
            .collect()
    };

    let map = merge(outcomes);

    tracing::info!(
        elements = elements.len(),
        categories = map.len(),
        typed = map.domain_elements().count(),
        failures = map.failures.len(),
        skipped = map.skipped.len(),
        parallel,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Classification complete"
    );

    Ok(map)
}

/// Classify every element of a model
///
/// Per-element problems are recorded in the map; only an unreadable element
/// collection is an error.
pub fn classify<M: RawModel>(model: &M) -> Result<CategoryMap> {
    classify_with_options(model, &ClassifyOptions::default())
}

/// Classify with explicit options, going parallel above the threshold
pub fn classify_with_options<M: RawModel>(
    model: &M,
    options: &ClassifyOptions,
) -> Result<CategoryMap> {
    let parallel = model.elements()?.len() >= options.parallel_threshold;
    run(model, options, parallel)
}

/// Classify on the rayon pool regardless of batch size
pub fn classify_parallel<M: RawModel>(model: &M) -> Result<CategoryMap> {
    run(model, &ClassifyOptions::default(), true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_slicer_core::JsonModel;

    #[test]
    fn test_push_keeps_order() {
        let mut map = CategoryMap::new();
        for (type_name, id) in [("B", "1"), ("A", "2"), ("B", "3")] {
            map.push(
                type_name,
                ElementRecord {
                    id: id.into(),
                    info: RawInfo::new(),
                    element: None,
                },
            );
        }
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["B", "A"]);
        let ids: Vec<_> = map.get("B").unwrap().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(map.element_count(), 3);
        assert!(map.get("C").is_none());
    }

    #[test]
    fn test_unreadable_elements_are_skipped() {
        let model = JsonModel::from_str(
            r#"{"elements":[
                {"type":"IfcColumn","global_id":"c1"},
                {"global_id":"no-type"},
                42,
                {"type":"IfcColumn","global_id":"c2"}
            ]}"#,
        )
        .unwrap();
        let map = classify(&model).unwrap();

        assert_eq!(map.element_count(), 2);
        let skipped: Vec<_> = map.skipped().iter().map(|s| s.index).collect();
        assert_eq!(skipped, vec![1, 2]);
        assert!(map.failures().is_empty());
    }

    #[test]
    fn test_threshold_selects_parallel() {
        let model = JsonModel::from_str(
            r#"{"elements":[{"type":"IfcBeam","global_id":"b1"},{"type":"IfcBeam","global_id":"b2"}]}"#,
        )
        .unwrap();
        let options = ClassifyOptions {
            parallel_threshold: 1,
            ..ClassifyOptions::default()
        };
        let parallel = classify_with_options(&model, &options).unwrap();
        assert_eq!(parallel, classify(&model).unwrap());
    }

    #[test]
    fn test_to_json_is_keyed_by_type() {
        let model = JsonModel::from_str(
            r#"{"elements":[{"type":"IfcDoor","global_id":"d1","info":{"Name":"Door"}}]}"#,
        )
        .unwrap();
        let map = classify(&model).unwrap();
        let json: serde_json::Value = serde_json::from_str(&map.to_json().unwrap()).unwrap();
        assert_eq!(json["IfcDoor"][0]["id"], "d1");
        assert_eq!(json["IfcDoor"][0]["info"]["Name"], "Door");
        assert!(json["IfcDoor"][0].get("element").is_none());
    }
}
