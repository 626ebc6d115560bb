use tracing::debug;

use super::Polygon;
use crate::error::{PolygonError, Result};

impl Polygon {
    /// Splits the ring along the chord between vertices `i` and `j`.
    ///
    /// With `lo = min(i, j)` and `hi = max(i, j)`, the first polygon keeps
    /// `points[..=lo]` followed by `points[hi..]` and the second holds
    /// `points[lo..=hi]`. Both share the two cut vertices.
    ///
    /// # Errors
    ///
    /// - `PolygonError::IndexOutOfRange` if either index is `>= len()`.
    /// - `PolygonError::InvalidArgument` if the indices are equal, or if a half
    ///   would have fewer than 3 points (adjacent cut vertices).
    /// - Any construction error raised while building a half.
    pub fn split_between(&self, i: usize, j: usize) -> Result<(Polygon, Polygon)> {
        let len = self.points.len();
        for index in [i, j] {
            if index >= len {
                return Err(PolygonError::IndexOutOfRange { index, len }.into());
            }
        }
        if i == j {
            return Err(PolygonError::InvalidArgument(format!(
                "cannot split between vertex {i} and itself"
            ))
            .into());
        }

        let (lo, hi) = (i.min(j), i.max(j));
        let outer = self.points[..=lo]
            .iter()
            .chain(&self.points[hi..])
            .copied()
            .collect();
        let inner = self.points[lo..=hi].to_vec();
        debug!(lo, hi, len, "splitting polygon");

        Ok((self.derive(outer)?, self.derive(inner)?))
    }

    /// Returns the same ring traversed the other way round.
    ///
    /// The first vertex stays first; the remaining vertices are reversed and
    /// the orientation flag flips.
    #[must_use]
    pub fn reverse(&self) -> Polygon {
        let points: Vec<_> = self.points[..1]
            .iter()
            .chain(self.points[1..].iter().rev())
            .copied()
            .collect();
        let n = points.len();
        let sides = (0..n).map(|i| points[i] - points[(i + n - 1) % n]).collect();
        Polygon {
            points,
            sides,
            centroid: self.centroid,
            ccw: !self.ccw,
            convex: self.convex,
            plane: self.plane,
            cfg: self.cfg,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::math::Vector2;

    fn hexagon() -> Polygon {
        Polygon::new([
            (2.0, 0.0),
            (1.0, 2.0),
            (-1.0, 2.0),
            (-2.0, 0.0),
            (-1.0, -2.0),
            (1.0, -2.0),
        ])
        .unwrap()
    }

    #[test]
    fn split_shares_cut_vertices() {
        let hex = hexagon();
        let (a, b) = hex.split_between(4, 1).unwrap();
        assert_eq!(
            a.points(),
            &[
                Vector2::new(2.0, 0.0),
                Vector2::new(1.0, 2.0),
                Vector2::new(-1.0, -2.0),
                Vector2::new(1.0, -2.0),
            ]
        );
        assert_eq!(
            b.points(),
            &[
                Vector2::new(1.0, 2.0),
                Vector2::new(-1.0, 2.0),
                Vector2::new(-2.0, 0.0),
                Vector2::new(-1.0, -2.0),
            ]
        );
        assert!(a.is_ccw() && b.is_ccw());
        assert!(a.is_convex() && b.is_convex());
    }

    #[test]
    fn split_index_errors() {
        let hex = hexagon();
        assert_eq!(
            hex.split_between(0, 6).unwrap_err().kind(),
            ErrorKind::IndexOutOfRange
        );
        assert_eq!(
            hex.split_between(9, 1).unwrap_err().kind(),
            ErrorKind::IndexOutOfRange
        );
        assert_eq!(
            hex.split_between(3, 3).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        // adjacent vertices leave a two-point half
        assert_eq!(
            hex.split_between(2, 3).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            hex.split_between(0, 5).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn reverse_flips_orientation_only() {
        let hex = hexagon();
        let rev = hex.reverse();
        assert!(hex.is_ccw());
        assert!(!rev.is_ccw());
        assert_eq!(rev.points()[0], hex.points()[0]);
        assert_eq!(rev.points()[1], hex.points()[5]);
        assert_eq!(rev.centroid(), hex.centroid());
        assert_eq!(rev.sides()[1], rev.points()[1] - rev.points()[0]);

        let rebuilt = Polygon::new(rev.points().to_vec()).unwrap();
        assert!(!rebuilt.is_ccw());
        assert_eq!(rebuilt.points(), rev.points());
    }
}
