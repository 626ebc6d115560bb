//! Planar polygons with construction-time invariants.
//!
//! A [`Polygon`] is a closed ring of [`Vector2`] vertices. Construction
//! collapses collinear vertices, rejects zero-degree vertices and fixes
//! orientation and convexity; every operation afterwards returns a new
//! polygon instead of mutating the receiver.
//!
//! Side convention: `sides[i] = points[i] − points[i − 1 mod n]`, so the
//! closing side (last vertex back to the first) is `sides[0]`.

mod build;
mod contains;
mod hull;
mod metrics;
mod project;
mod split;


use std::fmt;

use crate::geometry::Plane;
use crate::math::{GeomCfg, Vector2};

/// An immutable, closed planar polygon.
#[derive(Debug, Clone)]
pub struct Polygon {
    points: Vec<Vector2>,
    sides: Vec<Vector2>,
    centroid: Vector2,
    ccw: bool,
    convex: bool,
    plane: Option<Plane>,
    cfg: GeomCfg,
}

impl Polygon {
    /// Returns the vertices in ring order.
    #[must_use]
    pub fn points(&self) -> &[Vector2] {
        &self.points
    }

    /// Returns the side vectors; `sides[i]` ends at `points[i]`.
    #[must_use]
    pub fn sides(&self) -> &[Vector2] {
        &self.sides
    }

    /// Arithmetic mean of the vertices.
    #[must_use]
    pub fn centroid(&self) -> Vector2 {
        self.centroid
    }

    /// `true` if the net turning of the ring is counter-clockwise.
    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.ccw
    }

    /// `true` if every vertex turns the same way.
    #[must_use]
    pub fn is_convex(&self) -> bool {
        self.convex
    }

    /// Number of vertices (always at least 3).
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The plane whose local frame the vertices are expressed in, if any.
    #[must_use]
    pub fn plane(&self) -> Option<&Plane> {
        self.plane.as_ref()
    }

    /// Returns the tolerance configuration, inherited by every derived polygon.
    #[must_use]
    pub fn cfg(&self) -> GeomCfg {
        self.cfg
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{point}")?;
        }
        write!(f, "}}")
    }
}
