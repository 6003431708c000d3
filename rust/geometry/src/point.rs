// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Points and vectors with tolerance-based equality

use crate::error::{Error, Result};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Absolute tolerance used for every coordinate comparison
pub const TOLERANCE: f64 = 1.0e-3;

/// Compare two scalars with the absolute [`TOLERANCE`]
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE
}

/// A point in 3D space
///
/// Equality is tolerance-based: two points are equal when every axis differs
/// by at most [`TOLERANCE`]. This relation is not transitive, so `Point3d` is
/// deliberately not `Eq` or `Hash`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3d {
    pub const ORIGIN: Point3d = Point3d::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Origin of global coordinates
    pub const fn origin() -> Self {
        Self::ORIGIN
    }

    /// Build a point from a 2- or 3-component coordinate tuple
    ///
    /// Two components place the point at z = 0. Any other arity yields `None`.
    pub fn from_slice(coords: &[f64]) -> Option<Self> {
        match *coords {
            [x, y] => Some(Self::new(x, y, 0.0)),
            [x, y, z] => Some(Self::new(x, y, z)),
            _ => None,
        }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point3d) -> f64 {
        (*self - *other).magnitude()
    }

    /// Point halfway between `self` and `other`
    pub fn midpoint(&self, other: &Point3d) -> Point3d {
        Point3d::new(
            (self.x + other.x) / 2.0,
            (self.y + other.y) / 2.0,
            (self.z + other.z) / 2.0,
        )
    }

    /// Position vector with the same coordinates
    pub fn to_vector(&self) -> Vector3d {
        Vector3d::new(self.x, self.y, self.z)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl PartialEq for Point3d {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y) && approx_eq(self.z, other.z)
    }
}

impl Add<Vector3d> for Point3d {
    type Output = Point3d;

    fn add(self, v: Vector3d) -> Point3d {
        Point3d::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl Sub<Vector3d> for Point3d {
    type Output = Point3d;

    fn sub(self, v: Vector3d) -> Point3d {
        Point3d::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl Sub for Point3d {
    type Output = Vector3d;

    fn sub(self, other: Point3d) -> Vector3d {
        Vector3d::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl fmt::Display for Point3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X : {}, Y : {}, Z : {}", self.x, self.y, self.z)
    }
}

impl From<Point3d> for Point3<f64> {
    fn from(p: Point3d) -> Self {
        Point3::new(p.x, p.y, p.z)
    }
}

impl From<Point3<f64>> for Point3d {
    fn from(p: Point3<f64>) -> Self {
        Point3d::new(p.x, p.y, p.z)
    }
}

/// A direction or displacement in 3D space
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3d {
    pub const X_AXIS: Vector3d = Vector3d::new(1.0, 0.0, 0.0);
    pub const Y_AXIS: Vector3d = Vector3d::new(0.0, 1.0, 0.0);
    pub const Z_AXIS: Vector3d = Vector3d::new(0.0, 0.0, 1.0);
    pub const ZERO: Vector3d = Vector3d::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Length of the vector
    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector with the same direction
    ///
    /// A zero (or non-finite) vector has no direction and is rejected with
    /// [`Error::DegenerateGeometry`] instead of producing NaN components.
    pub fn normalize(&self) -> Result<Vector3d> {
        let mag = self.magnitude();
        if !mag.is_finite() || mag <= f64::EPSILON {
            return Err(Error::degenerate(format!(
                "cannot normalize vector ({}, {}, {}) with magnitude {}",
                self.x, self.y, self.z, mag
            )));
        }
        Ok(*self * (1.0 / mag))
    }

    pub fn dot(&self, other: &Vector3d) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector3d) -> Vector3d {
        Vector3d::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// True when the magnitude is within tolerance of zero
    pub fn is_zero(&self) -> bool {
        self.magnitude() <= TOLERANCE
    }

    /// Point with the same coordinates
    pub fn to_point(&self) -> Point3d {
        Point3d::new(self.x, self.y, self.z)
    }
}

impl PartialEq for Vector3d {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y) && approx_eq(self.z, other.z)
    }
}

impl Add for Vector3d {
    type Output = Vector3d;

    fn add(self, other: Vector3d) -> Vector3d {
        Vector3d::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vector3d {
    type Output = Vector3d;

    fn sub(self, other: Vector3d) -> Vector3d {
        Vector3d::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Vector3d {
    type Output = Vector3d;

    fn mul(self, scalar: f64) -> Vector3d {
        Vector3d::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Neg for Vector3d {
    type Output = Vector3d;

    fn neg(self) -> Vector3d {
        Vector3d::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vector3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X : {}, Y : {}, Z : {}", self.x, self.y, self.z)
    }
}

impl From<Vector3d> for Vector3<f64> {
    fn from(v: Vector3d) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector3<f64>> for Vector3d {
    fn from(v: Vector3<f64>) -> Self {
        Vector3d::new(v.x, v.y, v.z)
    }
}
