// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Depth-bounded flattening of nested point structures

use crate::error::{Error, Result};
use ifc_slicer_core::{Coordinates, EntityId, RawValue};
use ifc_slicer_geometry::Point3d;

/// Default nesting limit for point structures
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Flatten a nested point structure into points, in traversal order
///
/// A node is either a leaf or a container:
/// - a non-empty list of numbers is a coordinate tuple; 2 components place the
///   point at z = 0, other arities are ignored
/// - an entity reference is resolved through `resolve` and treated as a tuple
/// - any other list is descended into
///
/// Scalars outside a coordinate tuple are ignored. Nesting deeper than
/// `max_depth` and unresolvable references are [`Error::MissingGeometry`].
pub fn flatten_points<F>(value: &RawValue, resolve: F, max_depth: usize) -> Result<Vec<Point3d>>
where
    F: Fn(EntityId) -> Option<Coordinates>,
{
    let mut points = Vec::new();
    descend(value, &resolve, 0, max_depth, &mut points)?;
    Ok(points)
}

fn descend<F>(
    value: &RawValue,
    resolve: &F,
    depth: usize,
    max_depth: usize,
    out: &mut Vec<Point3d>,
) -> Result<()>
where
    F: Fn(EntityId) -> Option<Coordinates>,
{
    if depth > max_depth {
        return Err(Error::missing(format!(
            "point nesting exceeds {} levels",
            max_depth
        )));
    }

    match value {
        RawValue::EntityRef(id) => {
            let coords = resolve(*id)
                .ok_or_else(|| Error::missing(format!("unresolved point reference {}", id)))?;
            out.extend(Point3d::from_slice(&coords));
        }
        RawValue::List(items) => match numeric_tuple(items) {
            Some(coords) => out.extend(Point3d::from_slice(&coords)),
            None => {
                for item in items {
                    descend(item, resolve, depth + 1, max_depth, out)?;
                }
            }
        },
        _ => {}
    }
    Ok(())
}

fn numeric_tuple(items: &[RawValue]) -> Option<Coordinates> {
    if items.is_empty() {
        return None;
    }
    items.iter().map(RawValue::as_float).collect()
}
