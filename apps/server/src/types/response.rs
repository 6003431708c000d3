// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use ifc_slicer_processing::{CategoryMap, ExtractionFailure, SkippedElement};
use serde::Serialize;

/// Result of classifying one uploaded model.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Client-supplied file name.
    pub filename: String,
    /// Uploaded size in bytes.
    pub content_size: usize,
    /// Elements keyed by type name, in first-encounter order.
    pub categories: CategoryMap,
    /// Elements whose typed extraction failed (still present in `categories`).
    pub failures: Vec<ExtractionFailure>,
    /// Elements that could not be read and were left out.
    pub skipped: Vec<SkippedElement>,
    /// Processing statistics.
    pub stats: ProcessingStats,
}

/// Processing statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingStats {
    /// Elements in the uploaded document.
    pub element_count: usize,
    /// Distinct type names.
    pub category_count: usize,
    /// Elements with a typed profile.
    pub typed_count: usize,
    /// Time spent reading the document (ms).
    pub parse_time_ms: u64,
    /// Time spent classifying (ms).
    pub classify_time_ms: u64,
    /// Total processing time (ms).
    pub total_time_ms: u64,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
}
