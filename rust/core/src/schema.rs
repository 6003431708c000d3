// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building element categories
//!
//! Fast type checking using an enum instead of string comparison.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Recognized building element categories
///
/// Each variant is keyed by its canonical type name (`"IfcSlab"`, ...), which is
/// what category maps and serialized domain elements use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    // Structural Elements
    IfcWall,
    IfcWallStandardCase,
    IfcSlab,
    IfcColumn,
    IfcBeam,
    IfcFooting,
    IfcRoof,
    IfcStair,
    IfcStairFlight,
    IfcRamp,
    IfcRampFlight,
    IfcPile,
    IfcMember,
    IfcPlate,
    IfcCurtainWall,

    // Openings and envelope
    IfcDoor,
    IfcWindow,
    IfcCovering,
    IfcRailing,
    IfcShadingDevice,

    // Other products
    IfcBuildingElementProxy,
    IfcFurnishingElement,
    IfcTransportElement,

    // MEP
    IfcEnergyConversionDevice,
    IfcFlowFitting,
    IfcFlowSegment,
    IfcFlowController,
    IfcFlowTerminal,
    IfcFlowStorageDevice,
    IfcFlowMovingDevice,
}

impl ElementType {
    /// Every recognized category, in declaration order
    pub const ALL: [ElementType; 30] = [
        Self::IfcWall,
        Self::IfcWallStandardCase,
        Self::IfcSlab,
        Self::IfcColumn,
        Self::IfcBeam,
        Self::IfcFooting,
        Self::IfcRoof,
        Self::IfcStair,
        Self::IfcStairFlight,
        Self::IfcRamp,
        Self::IfcRampFlight,
        Self::IfcPile,
        Self::IfcMember,
        Self::IfcPlate,
        Self::IfcCurtainWall,
        Self::IfcDoor,
        Self::IfcWindow,
        Self::IfcCovering,
        Self::IfcRailing,
        Self::IfcShadingDevice,
        Self::IfcBuildingElementProxy,
        Self::IfcFurnishingElement,
        Self::IfcTransportElement,
        Self::IfcEnergyConversionDevice,
        Self::IfcFlowFitting,
        Self::IfcFlowSegment,
        Self::IfcFlowController,
        Self::IfcFlowTerminal,
        Self::IfcFlowStorageDevice,
        Self::IfcFlowMovingDevice,
    ];

    /// Parse a declared type name
    ///
    /// Accepts the canonical spelling (`IfcSlab`), the upper-case STEP spelling
    /// (`IFCSLAB`) and the bare category (`Slab`). Returns `None` for names that
    /// are not a recognized category.
    pub fn parse(type_name: &str) -> Option<Self> {
        let trimmed = type_name.trim();
        let upper = trimmed.to_ascii_uppercase();
        let bare = upper.strip_prefix("IFC").unwrap_or(&upper);

        Self::ALL.iter().copied().find(|ty| {
            let canonical = ty.name().to_ascii_uppercase();
            canonical == upper || canonical[3..] == *bare
        })
    }

    /// Canonical type name
    pub fn name(&self) -> &'static str {
        match self {
            Self::IfcWall => "IfcWall",
            Self::IfcWallStandardCase => "IfcWallStandardCase",
            Self::IfcSlab => "IfcSlab",
            Self::IfcColumn => "IfcColumn",
            Self::IfcBeam => "IfcBeam",
            Self::IfcFooting => "IfcFooting",
            Self::IfcRoof => "IfcRoof",
            Self::IfcStair => "IfcStair",
            Self::IfcStairFlight => "IfcStairFlight",
            Self::IfcRamp => "IfcRamp",
            Self::IfcRampFlight => "IfcRampFlight",
            Self::IfcPile => "IfcPile",
            Self::IfcMember => "IfcMember",
            Self::IfcPlate => "IfcPlate",
            Self::IfcCurtainWall => "IfcCurtainWall",

            Self::IfcDoor => "IfcDoor",
            Self::IfcWindow => "IfcWindow",
            Self::IfcCovering => "IfcCovering",
            Self::IfcRailing => "IfcRailing",
            Self::IfcShadingDevice => "IfcShadingDevice",

            Self::IfcBuildingElementProxy => "IfcBuildingElementProxy",
            Self::IfcFurnishingElement => "IfcFurnishingElement",
            Self::IfcTransportElement => "IfcTransportElement",

            Self::IfcEnergyConversionDevice => "IfcEnergyConversionDevice",
            Self::IfcFlowFitting => "IfcFlowFitting",
            Self::IfcFlowSegment => "IfcFlowSegment",
            Self::IfcFlowController => "IfcFlowController",
            Self::IfcFlowTerminal => "IfcFlowTerminal",
            Self::IfcFlowStorageDevice => "IfcFlowStorageDevice",
            Self::IfcFlowMovingDevice => "IfcFlowMovingDevice",
        }
    }

    /// Check if a dedicated profile extractor exists for this category
    pub fn has_extractor(&self) -> bool {
        matches!(self, Self::IfcSlab | Self::IfcWallStandardCase)
    }

    /// Check if this is a load-bearing or enclosing structural element
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::IfcWall
                | Self::IfcWallStandardCase
                | Self::IfcSlab
                | Self::IfcColumn
                | Self::IfcBeam
                | Self::IfcFooting
                | Self::IfcRoof
                | Self::IfcPile
                | Self::IfcMember
                | Self::IfcPlate
                | Self::IfcCurtainWall
        )
    }

    /// Check if this is a distribution (MEP) element
    pub fn is_distribution(&self) -> bool {
        matches!(
            self,
            Self::IfcEnergyConversionDevice
                | Self::IfcFlowFitting
                | Self::IfcFlowSegment
                | Self::IfcFlowController
                | Self::IfcFlowTerminal
                | Self::IfcFlowStorageDevice
                | Self::IfcFlowMovingDevice
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
