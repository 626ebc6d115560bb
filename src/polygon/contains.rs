use super::Polygon;
use crate::math::{lerp, Vector2};

impl Polygon {
    /// Point-in-polygon test by counting crossings of a ray towards `+x`.
    ///
    /// The result is unspecified for a point lying exactly on an edge or a
    /// vertex: such points may be reported either inside or outside.
    #[must_use]
    pub fn is_inside(&self, point: impl Into<Vector2>) -> bool {
        let point = point.into();
        let (px, py) = (point.x(), point.y());
        let n = self.points.len();
        let mut crossings = 0usize;

        for i in 0..n {
            let start = self.points[(i + n - 1) % n];
            let end = self.points[i];

            if px < start.x() && px < end.x() {
                if strictly_between(py, start.y(), end.y()) {
                    crossings += 1;
                }
            } else if strictly_between(px, start.x(), end.x()) {
                // the edge straddles the query column; only its part right of
                // the query can meet the ray
                let t = (px - start.x()) / (end.x() - start.x());
                let close_y = lerp(start.y(), end.y(), t);
                let far_y = if start.x() < px { end.y() } else { start.y() };
                if strictly_between(py, far_y, close_y) {
                    crossings += 1;
                }
            }
        }

        crossings % 2 == 1
    }
}

#[inline]
fn strictly_between(v: f64, a: f64, b: f64) -> bool {
    (a < v && v < b) || (b < v && v < a)
}
