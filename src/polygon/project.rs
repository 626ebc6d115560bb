use tracing::debug;

use super::Polygon;
use crate::error::{PolygonError, Result};
use crate::geometry::Plane;
use crate::math::{Vector2, Vector3};

impl Polygon {
    /// Re-expresses the polygon, whose vertices are local coordinates of
    /// `from`, in the local frame of `to`.
    ///
    /// Each vertex is lifted into 3D through `from`, moved along `to`'s normal
    /// onto `to`, then flattened into `to`'s coordinates. The result is
    /// attached to `to`.
    ///
    /// Projecting there and back is the identity only when the two planes are
    /// parallel; otherwise the shape is foreshortened.
    ///
    /// # Errors
    ///
    /// Any construction error for the projected ring, e.g.
    /// `PolygonError::Degenerate` when `from` is perpendicular to `to` and the
    /// ring collapses onto a line.
    pub fn project(&self, to: &Plane, from: &Plane) -> Result<Polygon> {
        let points = self
            .points
            .iter()
            .map(|p| project_out_of(to, project_into(from, p)));
        debug!(vertices = self.points.len(), "projecting polygon between planes");
        Polygon::build(points, self.cfg, Some(*to))
    }

    /// Projects onto `to` from the plane this polygon is attached to.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::NoPlane` for a polygon built without a plane,
    /// otherwise see [`Polygon::project`].
    pub fn project_to(&self, to: &Plane) -> Result<Polygon> {
        let from = self.plane.ok_or(PolygonError::NoPlane)?;
        self.project(to, &from)
    }
}

/// Lifts local coordinates of `plane` into 3D.
fn project_into(plane: &Plane, point: &Vector2) -> Vector3 {
    plane.lift(point)
}

/// Drops a 3D point onto `plane` and returns its local coordinates.
fn project_out_of(plane: &Plane, point: Vector3) -> Vector2 {
    plane.flatten(&plane.project_point(&point))
}
