// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solids: axis-aligned boxes and spheres

use crate::curve::check_positive;
use crate::error::Result;
use crate::point::{Point3d, TOLERANCE};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3d,
    pub max: Point3d,
}

impl BoundingBox {
    /// Box spanning two corners, in any order
    pub fn new(a: Point3d, b: Point3d) -> Self {
        Self {
            min: Point3d::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3d::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Smallest box containing every point, `None` for an empty input
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3d>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self { min: first, max: first }, |bbox, p| bbox.expanded(p)))
    }

    /// Copy of this box grown to include a point
    pub fn expanded(&self, p: &Point3d) -> Self {
        Self {
            min: Point3d::new(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z)),
            max: Point3d::new(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z)),
        }
    }

    pub fn volume(&self) -> f64 {
        (self.max.x - self.min.x) * (self.max.y - self.min.y) * (self.max.z - self.min.z)
    }

    /// Inclusive containment, with tolerance at the faces
    pub fn contains(&self, p: &Point3d) -> bool {
        p.x >= self.min.x - TOLERANCE
            && p.x <= self.max.x + TOLERANCE
            && p.y >= self.min.y - TOLERANCE
            && p.y <= self.max.y + TOLERANCE
            && p.z >= self.min.z - TOLERANCE
            && p.z <= self.max.z + TOLERANCE
    }

    pub fn center(&self) -> Point3d {
        self.min.midpoint(&self.max)
    }
}

/// Sphere
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Point3d,
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: Point3d, radius: f64) -> Result<Self> {
        check_positive("sphere radius", radius)?;
        Ok(Self { center, radius })
    }

    pub fn volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.radius.powi(3)
    }

    pub fn surface_area(&self) -> f64 {
        4.0 * PI * self.radius * self.radius
    }

    /// Inclusive containment (surface points count as inside)
    pub fn contains(&self, p: &Point3d) -> bool {
        self.center.distance_to(p) <= self.radius + TOLERANCE
    }
}
