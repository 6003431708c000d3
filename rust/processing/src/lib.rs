// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Classification and profile reconstruction pipeline.
//!
//! Raw elements come in through the [`ifc_slicer_core::RawModel`] seam, are
//! grouped by declared type into a [`CategoryMap`], and slabs and standard-case
//! walls are rebuilt into typed [`DomainElement`]s along the way. A single bad
//! element never aborts a pass: it is recorded as an [`ExtractionFailure`] or
//! a [`SkippedElement`] next to the map.

pub mod classify;
pub mod element;
pub mod error;
pub mod extract;
pub mod flatten;
pub mod graph;

pub use classify::{
    classify, classify_parallel, classify_with_options, CategoryMap, ClassifyOptions,
    ElementRecord, SkippedElement, DEFAULT_PARALLEL_THRESHOLD,
};
pub use element::{
    DomainElement, ElementGeometry, Slab, SlabProfile, WallLayer, WallLayerSet, WallStandard,
    WallStandardProfile,
};
pub use error::{Error, ExtractionFailure, FailureKind, Result};
pub use extract::{extract_profile, extract_profile_with_depth};
pub use flatten::{flatten_points, DEFAULT_MAX_DEPTH};
pub use graph::RelationshipGraph;
