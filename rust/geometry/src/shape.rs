// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar shapes and planes

use crate::error::{Error, Result};
use crate::point::{Point3d, Vector3d};
use serde::{Deserialize, Serialize};

/// Rectangle centered on a point, oriented by its plane normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub center: Point3d,
    pub width: f64,
    pub height: f64,
    pub normal: Vector3d,
}

impl Rectangle {
    pub fn new(center: Point3d, width: f64, height: f64, normal: Vector3d) -> Result<Self> {
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(Error::degenerate(format!(
                "rectangle size must be non-negative, got {} x {}",
                width, height
            )));
        }
        Ok(Self {
            center,
            width,
            height,
            normal: normal.normalize()?,
        })
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn perimeter(&self) -> f64 {
        2.0 * (self.width + self.height)
    }

    /// In-plane unit directions along width and height
    ///
    /// The width direction is `normal x Z`. When the normal is parallel to Z
    /// that product vanishes and the global X axis is used instead.
    pub fn axes(&self) -> (Vector3d, Vector3d) {
        let width_dir = self
            .normal
            .cross(&Vector3d::Z_AXIS)
            .normalize()
            .unwrap_or(Vector3d::X_AXIS);
        let height_dir = self.normal.cross(&width_dir);
        (width_dir, height_dir)
    }

    /// Corner points, counter-clockwise around the normal
    pub fn vertices(&self) -> [Point3d; 4] {
        let (width_dir, height_dir) = self.axes();
        let half_w = width_dir * (self.width / 2.0);
        let half_h = height_dir * (self.height / 2.0);
        [
            self.center - half_w - half_h,
            self.center + half_w - half_h,
            self.center + half_w + half_h,
            self.center - half_w + half_h,
        ]
    }
}

/// Triangle from three points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Point3d,
    pub b: Point3d,
    pub c: Point3d,
}

impl Triangle {
    pub fn new(a: Point3d, b: Point3d, c: Point3d) -> Self {
        Self { a, b, c }
    }

    pub fn area(&self) -> f64 {
        0.5 * (self.b - self.a).cross(&(self.c - self.a)).magnitude()
    }

    pub fn perimeter(&self) -> f64 {
        self.a.distance_to(&self.b) + self.b.distance_to(&self.c) + self.c.distance_to(&self.a)
    }

    /// Unit normal following the a -> b -> c winding
    pub fn normal(&self) -> Result<Vector3d> {
        (self.b - self.a).cross(&(self.c - self.a)).normalize()
    }
}

/// Polygon from an ordered point list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point3d>,
}

impl Polygon {
    pub fn new(points: Vec<Point3d>) -> Self {
        Self { points }
    }

    /// Shoelace area of the XY projection
    ///
    /// Fewer than three points enclose nothing and give 0.
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice_area: f64 = (0..n)
            .map(|i| {
                let p = &self.points[i];
                let q = &self.points[(i + 1) % n];
                p.x * q.y - q.x * p.y
            })
            .sum();
        twice_area.abs() / 2.0
    }

    /// Edge length sum including the closing edge
    pub fn perimeter(&self) -> f64 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| self.points[i].distance_to(&self.points[(i + 1) % n]))
            .sum()
    }
}

/// Infinite plane through a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub point: Point3d,
    /// Unit normal
    pub normal: Vector3d,
}

impl Plane {
    pub fn new(point: Point3d, normal: Vector3d) -> Result<Self> {
        Ok(Self {
            point,
            normal: normal.normalize()?,
        })
    }

    /// Signed distance, positive on the side the normal points to
    pub fn signed_distance(&self, point: &Point3d) -> f64 {
        (*point - self.point).dot(&self.normal)
    }

    pub fn distance_to(&self, point: &Point3d) -> f64 {
        self.signed_distance(point).abs()
    }

    /// Orthogonal projection of a point onto the plane
    pub fn project_point(&self, point: &Point3d) -> Point3d {
        *point - self.normal * self.signed_distance(point)
    }

    pub fn contains(&self, point: &Point3d) -> bool {
        crate::point::approx_eq(self.signed_distance(point), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3d {
        Point3d::new(x, y, z)
    }

    #[test]
    fn test_rectangle_metrics() {
        let rect = Rectangle::new(p(0.0, 0.0, 0.0), 4.0, 2.5, Vector3d::Z_AXIS).unwrap();
        assert_relative_eq!(rect.area(), 10.0);
        assert_relative_eq!(rect.perimeter(), 13.0);
        assert!(Rectangle::new(p(0.0, 0.0, 0.0), -1.0, 2.0, Vector3d::Z_AXIS).is_err());
        assert!(Rectangle::new(p(0.0, 0.0, 0.0), 1.0, 2.0, Vector3d::ZERO).is_err());
    }

    #[test]
    fn test_rectangle_vertices_horizontal() {
        // Normal parallel to Z falls back to the X axis for width
        let rect = Rectangle::new(p(1.0, 1.0, 3.0), 2.0, 1.0, Vector3d::Z_AXIS).unwrap();
        let v = rect.vertices();
        assert_eq!(v[0], p(0.0, 0.5, 3.0));
        assert_eq!(v[1], p(2.0, 0.5, 3.0));
        assert_eq!(v[2], p(2.0, 1.5, 3.0));
        assert_eq!(v[3], p(0.0, 1.5, 3.0));
    }

    #[test]
    fn test_rectangle_vertices_vertical() {
        let rect = Rectangle::new(p(0.0, 0.0, 0.0), 2.0, 4.0, Vector3d::X_AXIS).unwrap();
        let plane = Plane::new(rect.center, rect.normal).unwrap();
        let v = rect.vertices();
        for corner in &v {
            assert!(plane.contains(corner));
        }
        assert_relative_eq!(v[0].distance_to(&v[1]), 2.0, epsilon = 1e-12);
        assert_relative_eq!(v[1].distance_to(&v[2]), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_triangle() {
        let tri = Triangle::new(p(0.0, 0.0, 0.0), p(3.0, 0.0, 0.0), p(0.0, 4.0, 0.0));
        assert_relative_eq!(tri.area(), 6.0);
        assert_relative_eq!(tri.perimeter(), 12.0);
        assert_eq!(tri.normal().unwrap(), Vector3d::Z_AXIS);

        let collinear = Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0));
        assert_relative_eq!(collinear.area(), 0.0);
        assert!(collinear.normal().is_err());
    }

    #[test]
    fn test_polygon_unit_square() {
        let square = Polygon::new(vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ]);
        assert_relative_eq!(square.area(), 1.0);
        assert_relative_eq!(square.perimeter(), 4.0);

        // Clockwise order gives the same area
        let mut reversed = square.points.clone();
        reversed.reverse();
        assert_relative_eq!(Polygon::new(reversed).area(), 1.0);
    }

    #[test]
    fn test_polygon_degenerate() {
        assert_relative_eq!(Polygon::default().area(), 0.0);
        assert_relative_eq!(
            Polygon::new(vec![p(0.0, 0.0, 0.0), p(5.0, 5.0, 0.0)]).area(),
            0.0
        );
        assert_relative_eq!(Polygon::default().perimeter(), 0.0);
    }

    #[test]
    fn test_plane_projection() {
        let plane = Plane::new(p(0.0, 0.0, 2.0), Vector3d::new(0.0, 0.0, 3.0)).unwrap();
        let q = p(4.0, -1.0, 7.0);
        assert_relative_eq!(plane.distance_to(&q), 5.0);
        assert_relative_eq!(plane.signed_distance(&p(0.0, 0.0, -1.0)), -3.0);

        let projected = plane.project_point(&q);
        assert_eq!(projected, p(4.0, -1.0, 2.0));
        assert!(plane.contains(&projected));
        assert!(Plane::new(p(0.0, 0.0, 0.0), Vector3d::ZERO).is_err());
    }
}
