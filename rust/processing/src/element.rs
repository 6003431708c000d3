// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed domain elements and their geometric profiles

use ifc_slicer_core::{ElementType, MaterialLayerSetRecord};
use ifc_slicer_geometry::{Line, Polyline};
use serde::{Deserialize, Serialize};

/// Boundary polyline extruded by a depth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabProfile {
    pub boundary: Polyline,
    pub depth: f64,
}

/// Wall center-line with the layer stack's total thickness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallStandardProfile {
    pub center_line: Line,
    pub thickness: f64,
}

/// One named material layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallLayer {
    pub name: String,
    pub thickness: f64,
}

impl WallLayer {
    pub fn new(name: impl Into<String>, thickness: f64) -> Self {
        Self {
            name: name.into(),
            thickness,
        }
    }
}

#[derive(Deserialize)]
struct WallLayerSetRepr {
    name: Option<String>,
    layers: Vec<WallLayer>,
}

impl From<WallLayerSetRepr> for WallLayerSet {
    fn from(repr: WallLayerSetRepr) -> Self {
        WallLayerSet::new(repr.name, repr.layers)
    }
}

/// Ordered layer stack of a wall
///
/// `total_thickness` always equals the sum of the layer thicknesses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WallLayerSetRepr")]
pub struct WallLayerSet {
    name: Option<String>,
    layers: Vec<WallLayer>,
    total_thickness: f64,
}

impl WallLayerSet {
    pub fn new(name: Option<String>, layers: Vec<WallLayer>) -> Self {
        let total_thickness = layers.iter().map(|layer| layer.thickness).sum();
        Self {
            name,
            layers,
            total_thickness,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn layers(&self) -> &[WallLayer] {
        &self.layers
    }

    pub fn total_thickness(&self) -> f64 {
        self.total_thickness
    }
}

impl From<MaterialLayerSetRecord> for WallLayerSet {
    fn from(record: MaterialLayerSetRecord) -> Self {
        let layers = record
            .layers
            .into_iter()
            .map(|layer| WallLayer::new(layer.name.unwrap_or_default(), layer.thickness))
            .collect();
        WallLayerSet::new(record.name, layers)
    }
}

/// A slab with its extruded boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slab {
    pub global_id: String,
    pub profile: SlabProfile,
}

/// A standard-case wall with its axis and layer stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallStandard {
    pub global_id: String,
    pub layer_set: WallLayerSet,
    pub profile: WallStandardProfile,
}

/// Borrowed view of a domain element's profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementGeometry<'a> {
    Slab(&'a SlabProfile),
    WallStandard(&'a WallStandardProfile),
}

/// A building element reconstructed into a typed profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "element_type")]
pub enum DomainElement {
    #[serde(rename = "IfcSlab")]
    Slab(Slab),
    #[serde(rename = "IfcWallStandardCase")]
    WallStandard(WallStandard),
}

impl DomainElement {
    pub fn element_type(&self) -> ElementType {
        match self {
            DomainElement::Slab(_) => ElementType::IfcSlab,
            DomainElement::WallStandard(_) => ElementType::IfcWallStandardCase,
        }
    }

    pub fn global_id(&self) -> &str {
        match self {
            DomainElement::Slab(slab) => &slab.global_id,
            DomainElement::WallStandard(wall) => &wall.global_id,
        }
    }

    pub fn geometry(&self) -> ElementGeometry<'_> {
        match self {
            DomainElement::Slab(slab) => ElementGeometry::Slab(&slab.profile),
            DomainElement::WallStandard(wall) => ElementGeometry::WallStandard(&wall.profile),
        }
    }

    pub fn as_slab(&self) -> Option<&Slab> {
        match self {
            DomainElement::Slab(slab) => Some(slab),
            _ => None,
        }
    }

    pub fn as_wall(&self) -> Option<&WallStandard> {
        match self {
            DomainElement::WallStandard(wall) => Some(wall),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ifc_slicer_core::MaterialLayerRecord;
    use ifc_slicer_geometry::Point3d;

    fn layers() -> Vec<WallLayer> {
        vec![
            WallLayer::new("core", 200.0),
            WallLayer::new("insulation", 50.0),
            WallLayer::new("finish", 15.0),
        ]
    }

    #[test]
    fn test_layer_set_total_thickness() {
        let set = WallLayerSet::new(Some("Wall 265".into()), layers());
        assert_relative_eq!(set.total_thickness(), 265.0);
        assert_eq!(set.layers().len(), 3);
        assert_eq!(set.layers()[1].name, "insulation");
        assert_eq!(set.name(), Some("Wall 265"));
    }

    #[test]
    fn test_layer_set_from_record() {
        let record = MaterialLayerSetRecord {
            name: None,
            layers: vec![
                MaterialLayerRecord {
                    name: Some("brick".into()),
                    thickness: 102.5,
                },
                MaterialLayerRecord {
                    name: None,
                    thickness: 100.0,
                },
            ],
        };
        let set = WallLayerSet::from(record);
        assert_relative_eq!(set.total_thickness(), 202.5);
        assert_eq!(set.layers()[1].name, "");
    }

    #[test]
    fn test_layer_set_deserialize_recomputes_total() {
        let json = r#"{"name":null,"layers":[{"name":"a","thickness":10},{"name":"b","thickness":5}],"total_thickness":1}"#;
        let set: WallLayerSet = serde_json::from_str(json).unwrap();
        assert_relative_eq!(set.total_thickness(), 15.0);
    }

    #[test]
    fn test_domain_element_dispatch() {
        let wall = DomainElement::WallStandard(WallStandard {
            global_id: "wall-1".into(),
            layer_set: WallLayerSet::new(None, layers()),
            profile: WallStandardProfile {
                center_line: Line::new(Point3d::ORIGIN, Point3d::new(5000.0, 0.0, 0.0)),
                thickness: 265.0,
            },
        });
        assert_eq!(wall.element_type(), ElementType::IfcWallStandardCase);
        assert_eq!(wall.global_id(), "wall-1");
        assert!(wall.as_slab().is_none());
        match wall.geometry() {
            ElementGeometry::WallStandard(profile) => {
                assert_relative_eq!(profile.center_line.length(), 5000.0)
            }
            other => panic!("unexpected geometry {:?}", other),
        }

        let json = serde_json::to_value(&wall).unwrap();
        assert_eq!(json["element_type"], "IfcWallStandardCase");
        assert_eq!(json["layer_set"]["total_thickness"], 265.0);
    }

    #[test]
    fn test_slab_serializes_profile() {
        let slab = DomainElement::Slab(Slab {
            global_id: "slab-1".into(),
            profile: SlabProfile {
                boundary: Polyline::new(vec![
                    Point3d::new(0.0, 0.0, 0.0),
                    Point3d::new(1.0, 0.0, 0.0),
                    Point3d::new(1.0, 1.0, 0.0),
                    Point3d::new(0.0, 0.0, 0.0),
                ]),
                depth: 200.0,
            },
        });
        assert_eq!(slab.element_type(), ElementType::IfcSlab);

        let json = serde_json::to_value(&slab).unwrap();
        assert_eq!(json["element_type"], "IfcSlab");
        assert_eq!(json["profile"]["depth"], 200.0);
        assert_eq!(json["profile"]["boundary"]["is_closed"], true);
        assert_eq!(json["profile"]["boundary"]["points"][1]["x"], 1.0);

        let back: DomainElement = serde_json::from_value(json).unwrap();
        assert_eq!(back, slab);
    }
}
