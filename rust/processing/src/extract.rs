// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Profile extraction: raw representations to typed domain elements

use crate::element::{
    DomainElement, Slab, SlabProfile, WallLayerSet, WallStandard, WallStandardProfile,
};
use crate::error::{Error, ExtractionFailure, FailureKind, Result};
use crate::flatten::{flatten_points, DEFAULT_MAX_DEPTH};
use ifc_slicer_core::{
    ElementType, RawElement, Representation, RepresentationItem, CURVE_2D, SWEPT_SOLID,
};
use ifc_slicer_geometry::{Line, Point3d, Polyline};

/// Reconstruct the domain element for one raw element
pub fn extract_profile(
    element: &dyn RawElement,
) -> std::result::Result<DomainElement, ExtractionFailure> {
    extract_profile_with_depth(element, DEFAULT_MAX_DEPTH)
}

/// [`extract_profile`] with an explicit point nesting limit
pub fn extract_profile_with_depth(
    element: &dyn RawElement,
    max_depth: usize,
) -> std::result::Result<DomainElement, ExtractionFailure> {
    let type_name = element
        .type_name()
        .map_err(|e| ExtractionFailure::from_error(None, None, &Error::from(e)))?;
    let global_id = element
        .global_id()
        .map_err(|e| ExtractionFailure::from_error(None, Some(type_name), &Error::from(e)))?;

    let result = match ElementType::parse(type_name) {
        Some(ElementType::IfcSlab) => extract_slab(element, global_id, max_depth),
        Some(ElementType::IfcWallStandardCase) => extract_wall(element, global_id, max_depth),
        _ => {
            return Err(ExtractionFailure::new(
                Some(global_id),
                Some(type_name),
                FailureKind::Unsupported,
                format!("no profile extractor for '{}'", type_name),
            ))
        }
    };

    result.map_err(|e| ExtractionFailure::from_error(Some(global_id), Some(type_name), &e))
}

fn first_item<'a>(
    representations: &'a [Representation],
    kind: &str,
) -> Result<&'a RepresentationItem> {
    let representation = representations
        .iter()
        .find(|rep| rep.is_kind(kind))
        .ok_or_else(|| Error::missing(format!("no {} representation", kind)))?;

    representation
        .items
        .first()
        .ok_or_else(|| Error::missing(format!("{} representation has no items", kind)))
}

fn item_points(
    element: &dyn RawElement,
    item: &RepresentationItem,
    max_depth: usize,
) -> Result<Vec<Point3d>> {
    flatten_points(&item.points, |id| element.resolve_point(id), max_depth)
}

fn extract_slab(
    element: &dyn RawElement,
    global_id: &str,
    max_depth: usize,
) -> Result<DomainElement> {
    let representations = element.representations()?;
    let item = first_item(&representations, SWEPT_SOLID)?;

    let depth = item
        .depth
        .ok_or_else(|| Error::missing("extrusion has no depth"))?;
    if !depth.is_finite() || depth <= 0.0 {
        return Err(ifc_slicer_geometry::Error::degenerate(format!(
            "extrusion depth must be positive, got {}",
            depth
        ))
        .into());
    }

    let points = item_points(element, item, max_depth)?;
    if points.is_empty() {
        return Err(Error::missing("swept area has no boundary points"));
    }

    Ok(DomainElement::Slab(Slab {
        global_id: global_id.to_string(),
        profile: SlabProfile {
            boundary: Polyline::new(points),
            depth,
        },
    }))
}

fn extract_wall(
    element: &dyn RawElement,
    global_id: &str,
    max_depth: usize,
) -> Result<DomainElement> {
    let representations = element.representations()?;
    let item = first_item(&representations, CURVE_2D)?;

    let points = item_points(element, item, max_depth)?;
    let [start, end, ..] = points[..] else {
        return Err(Error::missing(format!(
            "axis curve needs two points, found {}",
            points.len()
        )));
    };
    // Axis curves are planar; drop any elevation
    let center_line = Line::new(
        Point3d::new(start.x, start.y, 0.0),
        Point3d::new(end.x, end.y, 0.0),
    );
    if center_line.start == center_line.end {
        return Err(ifc_slicer_geometry::Error::degenerate("wall axis has zero length").into());
    }

    let record = element
        .material_associations()?
        .into_iter()
        .find_map(|association| association.layer_set)
        .ok_or_else(|| Error::missing("no material layer set"))?;
    if record.layers.is_empty() {
        return Err(Error::missing("material layer set has no layers"));
    }
    if let Some(layer) = record
        .layers
        .iter()
        .find(|layer| !layer.thickness.is_finite() || layer.thickness < 0.0)
    {
        return Err(ifc_slicer_geometry::Error::degenerate(format!(
            "layer thickness must be non-negative, got {}",
            layer.thickness
        ))
        .into());
    }

    let layer_set = WallLayerSet::from(record);
    let thickness = layer_set.total_thickness();

    Ok(DomainElement::WallStandard(WallStandard {
        global_id: global_id.to_string(),
        layer_set,
        profile: WallStandardProfile {
            center_line,
            thickness,
        },
    }))
}
