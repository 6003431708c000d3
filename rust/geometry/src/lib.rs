// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Slicer Geometry
//!
//! Small value-type geometry used by extracted building elements: points and
//! vectors with an absolute comparison tolerance, curves, planar shapes and
//! simple solids. nalgebra types convert to and from the primitives here.

pub mod curve;
pub mod error;
pub mod point;
pub mod shape;
pub mod solid;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use curve::{Arc, Circle, Ellipse, Line, Polyline};
pub use error::{Error, Result};
pub use point::{approx_eq, Point3d, Vector3d, TOLERANCE};
pub use shape::{Plane, Polygon, Rectangle, Triangle};
pub use solid::{BoundingBox, Sphere};
