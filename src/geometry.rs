// src/geometry.rs

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GasketError, Result};

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point2) -> Point2 {
        Point2::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(&self, other: &Point2) -> Point2 {
        Point2::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(&self, factor: f32) -> Point2 {
        Point2::new(self.x * factor, self.y * factor)
    }

    /// Component-wise mean of two points.
    ///
    /// Halves before adding so coordinates near `f32::MAX` stay finite.
    pub fn midpoint(&self, other: &Point2) -> Point2 {
        self.scale(0.5).add(&other.scale(0.5))
    }

    fn cross(&self, other: &Point2) -> f32 {
        self.x * other.y - self.y * other.x
    }
}

impl From<Vec2> for Point2 {
    fn from(v: Vec2) -> Self {
        Point2::new(v.x, v.y)
    }
}

impl From<Point2> for Vec2 {
    fn from(p: Point2) -> Self {
        Vec2::new(p.x, p.y)
    }
}

impl From<[f32; 2]> for Point2 {
    fn from(a: [f32; 2]) -> Self {
        Point2::new(a[0], a[1])
    }
}

/// Axis-aligned box, inclusive on every side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Point2,
    pub max: Point2,
}

impl Bounds {
    pub fn from_points(points: &[Point2]) -> Option<Bounds> {
        let first = *points.first()?;
        let mut bounds = Bounds { min: first, max: first };
        for p in &points[1..] {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }

    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// The three fixed reference vertices the walk is attracted to.
///
/// Collinear vertices are accepted; the resulting walk is degenerate
/// but still well defined.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    vertices: [Point2; 3],
}

impl Triangle {
    pub const fn new(a: Point2, b: Point2, c: Point2) -> Self {
        Self { vertices: [a, b, c] }
    }

    pub fn from_points(points: &[Point2]) -> Result<Self> {
        match points {
            [a, b, c] => Ok(Triangle::new(*a, *b, *c)),
            _ => Err(GasketError::invalid(format!(
                "vertices must contain exactly 3 points, got {}",
                points.len()
            ))),
        }
    }

    pub fn vertices(&self) -> &[Point2; 3] {
        &self.vertices
    }

    pub fn vertex(&self, index: usize) -> Option<Point2> {
        self.vertices.get(index).copied()
    }

    pub fn bounds(&self) -> Bounds {
        let [a, b, c] = self.vertices;
        Bounds {
            min: Point2::new(a.x.min(b.x).min(c.x), a.y.min(b.y).min(c.y)),
            max: Point2::new(a.x.max(b.x).max(c.x), a.y.max(b.y).max(c.y)),
        }
    }

    /// Midpoint of the midpoints of edges v0-v1 and v0-v2.
    pub fn edge_midpoint_seed(&self) -> Point2 {
        let [a, b, c] = self.vertices;
        a.midpoint(&b).midpoint(&a.midpoint(&c))
    }

    /// Uniform sample over the triangle's area.
    pub fn random_interior_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point2 {
        let [a, b, c] = self.vertices;
        let mut u: f32 = rng.gen();
        let mut v: f32 = rng.gen();
        // fold samples from the far half of the parallelogram back in
        if u + v > 1.0 {
            u = 1.0 - u;
            v = 1.0 - v;
        }
        a.add(&b.sub(&a).scale(u)).add(&c.sub(&a).scale(v))
    }

    /// Barycentric containment, edges included within `eps`.
    pub fn contains(&self, p: &Point2, eps: f32) -> bool {
        let [a, b, c] = self.vertices;
        let d1 = b.sub(&a).cross(&p.sub(&a));
        let d2 = c.sub(&b).cross(&p.sub(&b));
        let d3 = a.sub(&c).cross(&p.sub(&c));

        let has_neg = d1 < -eps || d2 < -eps || d3 < -eps;
        let has_pos = d1 > eps || d2 > eps || d3 > eps;
        !(has_neg && has_pos)
    }
}
