use tracing::{debug, trace};

use super::Polygon;
use crate::error::{PolygonError, Result};
use crate::math::{Vector2, Vector3};

impl Polygon {
    /// Convex hull by gift wrapping.
    ///
    /// The wrap runs clockwise, so a counter-clockwise polygon is reversed
    /// first. Starting from the leftmost (then lowest) vertex, each step picks
    /// the candidate with the smallest counter-clockwise angle onto the
    /// previous hull edge; collinear candidates resolve to the farthest one.
    /// The returned hull is clockwise and convex.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::Degenerate` if the wrap does not close or
    /// yields fewer than 3 vertices.
    pub fn convex_hull(&self) -> Result<Polygon> {
        if self.ccw {
            return self.reverse().convex_hull();
        }

        let points = &self.points;
        let n = points.len();
        let eps = self.cfg.eps;
        let up = Vector3::z_axis();
        let seed = leftmost_bottom(points, eps);

        let mut available = vec![true; n];
        let mut hull = vec![seed];
        let mut major = Vector2::new(-1.0, 0.0);
        let mut closed = false;

        for _ in 0..n {
            let current = hull[hull.len() - 1];
            let mut best: Option<(usize, f64, f64)> = None;

            for j in (0..n).filter(|&j| available[j] && j != current) {
                let minor = points[j] - points[current];
                if minor.is_zero(eps) {
                    continue;
                }
                let angle = minor.ccw_angle_between(&major, &up, eps)?;
                let dist = minor.norm_squared();
                let better = match best {
                    None => true,
                    Some((_, best_angle, best_dist)) => {
                        angle < best_angle - eps
                            || ((angle - best_angle).abs() <= eps && dist > best_dist)
                    }
                };
                if better {
                    best = Some((j, angle, dist));
                }
            }

            let Some((next, angle, _)) = best else {
                break;
            };
            trace!(from = current, to = next, angle, "gift-wrap step");
            available[next] = false;
            major = points[next] - points[current];
            if next == seed || points[next] == points[seed] {
                closed = true;
                break;
            }
            hull.push(next);
        }

        if !closed || hull.len() < 3 {
            return Err(PolygonError::Degenerate(format!(
                "gift wrap produced {} hull vertices without closing",
                hull.len()
            ))
            .into());
        }

        debug!(input = n, hull = hull.len(), "computed convex hull");
        self.derive(hull.into_iter().map(|i| points[i]).collect())
    }
}

/// Index of the leftmost vertex, breaking ties by smallest y.
fn leftmost_bottom(points: &[Vector2], eps: f64) -> usize {
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = points[best];
        if pt.x() < b.x() - eps || ((pt.x() - b.x()).abs() < eps && pt.y() < b.y()) {
            best = i;
        }
    }
    best
}
