// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Curves: lines, polylines, circles, arcs and ellipses

use crate::error::{Error, Result};
use crate::point::{Point3d, Vector3d, TOLERANCE};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Reject non-finite or non-positive radii and axis lengths
pub(crate) fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::degenerate(format!("{} must be positive, got {}", name, value)))
    }
}

/// Straight segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point3d,
    pub end: Point3d,
}

impl Line {
    pub fn new(start: Point3d, end: Point3d) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Unnormalized direction (end - start)
    pub fn direction(&self) -> Vector3d {
        self.end - self.start
    }

    pub fn midpoint(&self) -> Point3d {
        self.start.midpoint(&self.end)
    }

    /// Check whether an endpoint of `self` coincides with an endpoint of `other`
    pub fn shares_endpoint(&self, other: &Line) -> bool {
        [self.start, self.end]
            .iter()
            .any(|p| *p == other.start || *p == other.end)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Start : {}", self.start)?;
        write!(f, "End : {}", self.end)
    }
}

#[derive(Deserialize)]
struct PolylineRepr {
    points: Vec<Point3d>,
}

impl From<PolylineRepr> for Polyline {
    fn from(repr: PolylineRepr) -> Self {
        Polyline::new(repr.points)
    }
}

/// Ordered sequence of points
///
/// A polyline is closed when it has more than two points and its first point
/// equals its last one under point tolerance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PolylineRepr")]
pub struct Polyline {
    points: Vec<Point3d>,
    count: usize,
    is_closed: bool,
}

impl Polyline {
    pub fn new(points: Vec<Point3d>) -> Self {
        let mut polyline = Self {
            count: points.len(),
            points,
            is_closed: false,
        };
        polyline.is_closed = polyline.compute_closed();
        polyline
    }

    fn compute_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() > 2 => first == last,
            _ => false,
        }
    }

    pub fn points(&self) -> &[Point3d] {
        &self.points
    }

    pub fn point_count(&self) -> usize {
        self.count
    }

    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of consecutive segment lengths
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }

    /// Consecutive segments as lines
    pub fn segments(&self) -> impl Iterator<Item = Line> + '_ {
        self.points.windows(2).map(|pair| Line::new(pair[0], pair[1]))
    }

    /// Append a point, updating count and closure
    pub fn add_point(&mut self, point: Point3d) {
        self.points.push(point);
        self.count += 1;
        self.is_closed = self.compute_closed();
    }
}

impl fmt::Display for Polyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "Point{} : {}", i, point)?;
        }
        Ok(())
    }
}

/// Circle in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point3d,
    pub radius: f64,
    /// Unit normal of the circle's plane
    pub normal: Vector3d,
}

impl Circle {
    pub fn new(center: Point3d, radius: f64, normal: Vector3d) -> Result<Self> {
        check_positive("circle radius", radius)?;
        Ok(Self {
            center,
            radius,
            normal: normal.normalize()?,
        })
    }

    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius
    }

    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// Check whether a point lies at radius distance from the center
    pub fn contains_point(&self, point: &Point3d) -> bool {
        (self.center.distance_to(point) - self.radius).abs() <= TOLERANCE
    }
}

/// Circular arc
///
/// Angles are in radians, measured in the XY plane through the center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point3d,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub normal: Vector3d,
}

impl Arc {
    pub fn new(
        center: Point3d,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        normal: Vector3d,
    ) -> Result<Self> {
        check_positive("arc radius", radius)?;
        Ok(Self {
            center,
            radius,
            start_angle,
            end_angle,
            normal: normal.normalize()?,
        })
    }

    pub fn length(&self) -> f64 {
        (self.end_angle - self.start_angle).abs() * self.radius
    }

    pub fn start_point(&self) -> Point3d {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Point3d {
        self.point_at(self.end_angle)
    }

    fn point_at(&self, angle: f64) -> Point3d {
        Point3d::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
            self.center.z,
        )
    }
}

/// Ellipse given by its full axis lengths
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub center: Point3d,
    /// Full length of the major axis (twice the semi-major axis)
    pub major_axis: f64,
    /// Full length of the minor axis
    pub minor_axis: f64,
    pub normal: Vector3d,
}

impl Ellipse {
    pub fn new(center: Point3d, major_axis: f64, minor_axis: f64, normal: Vector3d) -> Result<Self> {
        check_positive("ellipse major axis", major_axis)?;
        check_positive("ellipse minor axis", minor_axis)?;
        Ok(Self {
            center,
            major_axis,
            minor_axis,
            normal: normal.normalize()?,
        })
    }

    pub fn area(&self) -> f64 {
        PI * self.major_axis * self.minor_axis / 4.0
    }

    /// Circumference by Ramanujan's second approximation
    pub fn circumference(&self) -> f64 {
        let a = self.major_axis / 2.0;
        let b = self.minor_axis / 2.0;
        let h = (a - b).powi(2) / (a + b).powi(2);
        PI * (a + b) * (1.0 + (3.0 * h) / (10.0 + (4.0 - 3.0 * h).sqrt()))
    }

    /// Point on the ellipse at a parametric angle (XY plane through the center)
    pub fn point_at_angle(&self, angle: f64) -> Point3d {
        Point3d::new(
            self.center.x + (self.major_axis / 2.0) * angle.cos(),
            self.center.y + (self.minor_axis / 2.0) * angle.sin(),
            self.center.z,
        )
    }
}
