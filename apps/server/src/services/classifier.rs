// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Uploaded document classification.

use crate::error::ApiError;
use crate::types::ProcessingStats;
use ifc_slicer_core::JsonModel;
use ifc_slicer_processing::{classify_with_options, CategoryMap, ClassifyOptions};
use std::time::Instant;

/// Classification result with timing.
#[derive(Debug)]
pub struct ClassifiedUpload {
    pub categories: CategoryMap,
    pub stats: ProcessingStats,
}

/// Read a raw-model document and classify its elements.
///
/// CPU-bound; call from a blocking task.
pub fn classify_upload(
    data: &[u8],
    options: &ClassifyOptions,
) -> Result<ClassifiedUpload, ApiError> {
    let total_start = Instant::now();

    let model = JsonModel::from_slice(data)?;
    let parse_time_ms = total_start.elapsed().as_millis() as u64;
    tracing::debug!(elements = model.len(), parse_time_ms, "Read raw model");

    let classify_start = Instant::now();
    let categories = classify_with_options(&model, options)?;
    let classify_time_ms = classify_start.elapsed().as_millis() as u64;

    let stats = ProcessingStats {
        element_count: model.len(),
        category_count: categories.len(),
        typed_count: categories.domain_elements().count(),
        parse_time_ms,
        classify_time_ms,
        total_time_ms: total_start.elapsed().as_millis() as u64,
    };

    tracing::info!(
        elements = stats.element_count,
        categories = stats.category_count,
        typed = stats.typed_count,
        failures = categories.failures().len(),
        skipped = categories.skipped().len(),
        total_time_ms = stats.total_time_ms,
        "Upload classified"
    );

    Ok(ClassifiedUpload { categories, stats })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_upload_stats() {
        let data = br#"{"elements":[
            {"type":"IfcSlab","global_id":"s1","representations":[{"kind":"SweptSolid","items":[
                {"depth":250,"points":[[0,0],[1,0],[1,1],[0,0]]}]}]},
            {"type":"IfcDoor","global_id":"d1"}
        ]}"#;
        let result = classify_upload(data, &ClassifyOptions::default()).unwrap();
        assert_eq!(result.stats.element_count, 2);
        assert_eq!(result.stats.category_count, 2);
        assert_eq!(result.stats.typed_count, 1);
    }

    #[test]
    fn test_invalid_document() {
        let err = classify_upload(b"[1, 2, 3]", &ClassifyOptions::default()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidModel(_)));

        let err = classify_upload(b"{ not json", &ClassifyOptions::default()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidModel(_)));
    }
}
