// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw element accessor traits
//!
//! These traits are the only seam between the classification pipeline and the
//! external parsing engine. Implementations wrap whatever object model the
//! engine exposes and hand out plain records.

use crate::error::Result;
use crate::value::{Coordinates, EntityId, RawValue};
use serde::{Deserialize, Serialize};

/// Representation kind for swept-solid (extrusion) geometry
pub const SWEPT_SOLID: &str = "SweptSolid";

/// Representation kind for a 2D axis curve
pub const CURVE_2D: &str = "Curve2D";

/// Raw info record kept for every classified element
pub type RawInfo = serde_json::Map<String, serde_json::Value>;

/// A geometric encoding attached to a raw element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Representation {
    /// Representation identifier (`Body`, `Axis`, ...)
    pub identifier: Option<String>,
    /// Representation kind (`SweptSolid`, `Curve2D`, ...)
    pub kind: String,
    /// Geometric items in declaration order
    pub items: Vec<RepresentationItem>,
}

impl Representation {
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind.eq_ignore_ascii_case(kind)
    }
}

/// One item of a representation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepresentationItem {
    /// Item entity type (`IfcExtrudedAreaSolid`, `IfcPolyline`, ...)
    pub item_type: String,
    /// Extrusion depth for swept solids
    pub depth: Option<f64>,
    /// Point structure: the swept area's outer curve points, or the curve points
    pub points: RawValue,
}

/// A single named material layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLayerRecord {
    pub name: Option<String>,
    pub thickness: f64,
}

/// An ordered material layer set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialLayerSetRecord {
    pub name: Option<String>,
    pub layers: Vec<MaterialLayerRecord>,
}

/// A material association of an element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialAssociation {
    /// Layer set reached through the association, if it is layer-based
    pub layer_set: Option<MaterialLayerSetRecord>,
}

/// Read access to one raw building element
///
/// Every accessor may fail with [`crate::Error::UnreadableElement`] when the
/// engine cannot provide the field at all.
pub trait RawElement: Send + Sync {
    /// Declared type name (`IfcSlab`, `IfcWallStandardCase`, ...)
    fn type_name(&self) -> Result<&str>;

    /// Unique element identifier
    fn global_id(&self) -> Result<&str>;

    /// Geometric representations, in declaration order
    fn representations(&self) -> Result<Vec<Representation>>;

    /// Material associations, in declaration order
    fn material_associations(&self) -> Result<Vec<MaterialAssociation>>;

    /// Serializable fallback record of the element's attributes
    fn info(&self) -> Result<RawInfo>;

    /// Resolve a point reference into its coordinate tuple
    fn resolve_point(&self, _reference: EntityId) -> Option<Coordinates> {
        None
    }
}

/// A parsed building model: an ordered element collection
pub trait RawModel: Send + Sync {
    type Element: RawElement;

    /// All product elements in source order
    ///
    /// This is the only place where a structurally invalid input is reported.
    fn elements(&self) -> Result<&[Self::Element]>;
}

impl<E: RawElement> RawModel for Vec<E> {
    type Element = E;

    fn elements(&self) -> Result<&[E]> {
        Ok(self.as_slice())
    }
}
