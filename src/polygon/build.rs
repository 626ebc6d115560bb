use tracing::debug;

use super::Polygon;
use crate::error::{PolygonError, Result};
use crate::geometry::Plane;
use crate::math::{GeomCfg, Vector2};

impl Polygon {
    /// Builds a polygon with the default tolerance.
    ///
    /// # Errors
    ///
    /// - `PolygonError::InvalidArgument` for fewer than 3 input points or a
    ///   non-finite coordinate.
    /// - `PolygonError::Degenerate` for repeated consecutive points or when
    ///   fewer than 3 vertices survive collinear collapsing.
    /// - `PolygonError::DegenerateVertex` for a vertex where the ring doubles
    ///   back on itself.
    /// - `PolygonError::AmbiguousOrientation` when the net turning is zero.
    pub fn new<I, P>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<Vector2>,
    {
        Self::with_cfg(points, GeomCfg::default())
    }

    /// Builds a polygon whose checks use `cfg`.
    ///
    /// # Errors
    ///
    /// See [`Polygon::new`].
    pub fn with_cfg<I, P>(points: I, cfg: GeomCfg) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<Vector2>,
    {
        Self::build(points.into_iter().map(Into::into), cfg, None)
    }

    /// Builds a polygon whose vertices are local coordinates of `plane`.
    ///
    /// # Errors
    ///
    /// See [`Polygon::new`].
    pub fn in_plane<I, P>(points: I, plane: Plane) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<Vector2>,
    {
        Self::build(points.into_iter().map(Into::into), plane.cfg(), Some(plane))
    }

    /// Builds a polygon from raw coordinate slices, each of which must hold
    /// exactly two numbers.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error for a slice of the wrong length,
    /// otherwise see [`Polygon::new`].
    pub fn from_slices<'a, I>(coords: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a [f64]>,
    {
        let points = coords
            .into_iter()
            .map(Vector2::try_from)
            .collect::<Result<Vec<_>>>()?;
        Self::new(points)
    }

    /// Same ring, same plane and tolerance, new vertex list.
    pub(crate) fn derive(&self, points: Vec<Vector2>) -> Result<Self> {
        Self::build(points.into_iter(), self.cfg, self.plane)
    }

    pub(crate) fn build(
        points: impl Iterator<Item = Vector2>,
        cfg: GeomCfg,
        plane: Option<Plane>,
    ) -> Result<Self> {
        let mut ring = RingBuilder::new(cfg.eps);
        for point in points {
            ring.push(point)?;
        }
        ring.close(cfg, plane)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    Straight,
    Bent,
}

/// Incremental ring construction.
///
/// While the ring is open `edges[k] = points[k + 1] − points[k]`; the turn at
/// each interior vertex is inspected as soon as both of its edges exist.
/// `inputs[k]` is the caller's index of `points[k]`.
struct RingBuilder {
    points: Vec<Vector2>,
    inputs: Vec<usize>,
    edges: Vec<Vector2>,
    sum: Vector2,
    turning: f64,
    last_sign: f64,
    convex: bool,
    received: usize,
    eps: f64,
}

impl RingBuilder {
    fn new(eps: f64) -> Self {
        Self {
            points: Vec::new(),
            inputs: Vec::new(),
            edges: Vec::new(),
            sum: Vector2::zeros(),
            turning: 0.0,
            last_sign: 0.0,
            convex: true,
            received: 0,
            eps,
        }
    }

    fn push(&mut self, point: Vector2) -> Result<()> {
        if !(point.x().is_finite() && point.y().is_finite()) {
            return Err(PolygonError::InvalidArgument(format!(
                "point {} has a non-finite coordinate",
                self.received
            ))
            .into());
        }
        let input = self.received;
        self.received += 1;
        if let Some(&prev) = self.points.last() {
            let edge = point - prev;
            if edge.is_zero(self.eps) {
                return Err(PolygonError::Degenerate(format!(
                    "point {input} repeats its predecessor {prev}"
                ))
                .into());
            }
            self.edges.push(edge);
        }
        self.points.push(point);
        self.inputs.push(input);
        self.sum += point;
        if self.edges.len() > 1 {
            self.inspect_tail(self.points.len() - 2)?;
        }
        Ok(())
    }

    /// Inspects the turn between the last two edges, which meet at `vertex`.
    /// A straight vertex is dropped and its two edges merged.
    fn inspect_tail(&mut self, vertex: usize) -> Result<()> {
        let n = self.edges.len();
        if self.turn(self.edges[n - 2], self.edges[n - 1], vertex)? == Turn::Straight {
            let removed = self.points.remove(vertex);
            let input = self.inputs.remove(vertex);
            self.sum -= removed;
            self.edges.truncate(n - 2);
            let end = self.points[vertex % self.points.len()];
            self.edges.push(end - self.points[vertex - 1]);
            debug!(input, %removed, "collapsed collinear vertex");
        }
        Ok(())
    }

    fn turn(&mut self, incoming: Vector2, outgoing: Vector2, vertex: usize) -> Result<Turn> {
        let angle = incoming.angle_between(&outgoing)?;
        if angle.abs() < self.eps {
            return Ok(Turn::Straight);
        }
        let cross = incoming.cross_z(&outgoing);
        if cross.abs() < self.eps {
            let index = self.inputs[vertex];
            return Err(PolygonError::DegenerateVertex { index }.into());
        }
        let sign = cross.signum();
        self.turning += angle * sign;
        if sign * self.last_sign < 0.0 {
            self.convex = false;
        }
        self.last_sign = sign;
        Ok(Turn::Bent)
    }

    fn ensure_triangle(&self) -> Result<()> {
        if self.points.len() < 3 {
            return Err(PolygonError::Degenerate(format!(
                "only {} vertices remain after collapsing collinear points",
                self.points.len()
            ))
            .into());
        }
        Ok(())
    }

    fn close(mut self, cfg: GeomCfg, plane: Option<Plane>) -> Result<Polygon> {
        if self.received < 3 {
            return Err(PolygonError::InvalidArgument(format!(
                "a polygon needs at least 3 points, {} given",
                self.received
            ))
            .into());
        }
        self.ensure_triangle()?;

        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        let closing = first - last;
        if closing.is_zero(self.eps) {
            return Err(PolygonError::Degenerate(
                "last point repeats the first; the ring closes implicitly".into(),
            )
            .into());
        }
        self.edges.push(closing);
        self.inspect_tail(self.points.len() - 1)?;
        self.ensure_triangle()?;

        // wrap-around turn at vertex 0: closing edge into the first edge
        let closing = self.edges[self.edges.len() - 1];
        if self.turn(closing, self.edges[0], 0)? == Turn::Straight {
            let removed = self.points.remove(0);
            let input = self.inputs.remove(0);
            self.sum -= removed;
            self.edges.remove(0);
            self.edges.pop();
            let last = self.points[self.points.len() - 1];
            self.edges.push(self.points[0] - last);
            debug!(input, %removed, "collapsed collinear vertex");
            self.ensure_triangle()?;
        }

        if self.turning.abs() < self.eps {
            return Err(PolygonError::AmbiguousOrientation.into());
        }

        let n = self.points.len();
        let sides = (0..n)
            .map(|i| self.points[i] - self.points[(i + n - 1) % n])
            .collect();
        #[allow(clippy::cast_precision_loss)]
        let centroid = self.sum.scale(1.0 / n as f64);

        Ok(Polygon {
            points: self.points,
            sides,
            centroid,
            ccw: self.turning > 0.0,
            convex: self.convex,
            plane,
            cfg,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::ErrorKind;

    fn square() -> Vec<(f64, f64)> {
        vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
    }

    #[test]
    fn ccw_square() {
        let poly = Polygon::new(square()).unwrap();
        assert_eq!(poly.len(), 4);
        assert!(poly.is_ccw());
        assert!(poly.is_convex());
        assert_eq!(poly.centroid(), Vector2::new(0.5, 0.5));
        assert_eq!(poly.sides()[0], Vector2::new(0.0, -1.0));
        assert_eq!(poly.sides()[1], Vector2::new(1.0, 0.0));
    }

    #[test]
    fn cw_square() {
        let mut pts = square();
        pts.reverse();
        let poly = Polygon::new(pts).unwrap();
        assert!(!poly.is_ccw());
        assert!(poly.is_convex());
    }

    #[test]
    fn notched_ring_is_concave() {
        let poly = Polygon::new([(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (2.0, 1.0), (0.0, 3.0)]).unwrap();
        assert!(poly.is_ccw());
        assert!(!poly.is_convex());
        assert_eq!(poly.len(), 5);
    }

    #[test]
    fn collinear_middle_vertex_collapses() {
        let poly = Polygon::new([(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (1.0, 2.0)]).unwrap();
        assert_eq!(poly.len(), 3);
        assert_eq!(
            poly.points(),
            &[Vector2::new(0.0, 0.0), Vector2::new(2.0, 0.0), Vector2::new(1.0, 2.0)]
        );
        assert_eq!(poly.centroid(), Vector2::new(1.0, 2.0 / 3.0));
        assert!(poly.is_ccw());
    }

    #[test]
    fn collinear_run_collapses_repeatedly() {
        let poly = Polygon::new([
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (3.0, 0.0),
            (3.0, 3.0),
        ])
        .unwrap();
        assert_eq!(poly.len(), 3);
    }

    #[test]
    fn collinear_closing_vertices_collapse() {
        // (4,0) sits on the closing edge from (8,0) back to (0,0)
        let poly = Polygon::new([(0.0, 0.0), (0.0, 4.0), (8.0, 0.0), (4.0, 0.0)]).unwrap();
        assert_eq!(poly.len(), 3);
        // (0,0) lies on the edge from (0,-4) up to (0,4)
        let poly = Polygon::new([(0.0, 0.0), (0.0, 4.0), (4.0, 4.0), (0.0, -4.0)]).unwrap();
        assert_eq!(poly.len(), 3);
        assert_eq!(poly.points()[0], Vector2::new(0.0, 4.0));
        assert_eq!(poly.centroid(), Vector2::new(4.0 / 3.0, 4.0 / 3.0));
    }

    #[test]
    fn doubling_back_is_a_degenerate_vertex() {
        let err = Polygon::new([(0.0, 0.0), (2.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegenerateInput);
        assert!(matches!(
            err,
            crate::PolyplaneError::Polygon(PolygonError::DegenerateVertex { index: 1 })
        ));
    }

    #[test]
    fn degenerate_vertex_reports_input_index() {
        // (1,0) is dropped as collinear before the ring doubles back at (2,0)
        let err = Polygon::new([(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (1.0, 0.0), (1.0, 1.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            crate::PolyplaneError::Polygon(PolygonError::DegenerateVertex { index: 2 })
        ));
    }

    #[test]
    fn figure_eight_has_no_orientation() {
        let err = Polygon::new([(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AmbiguousOrientation);
    }

    #[test]
    fn too_few_points() {
        let err = Polygon::new([(0.0, 0.0), (1.0, 0.0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = Polygon::new(Vec::<Vector2>::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn all_collinear_is_degenerate() {
        let err = Polygon::new([(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegenerateInput);
    }

    #[test]
    fn repeated_points_are_rejected() {
        let err = Polygon::new([(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (0.0, 1.0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegenerateInput);
        let err = Polygon::new([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegenerateInput);
    }

    #[test]
    fn non_finite_and_wrong_arity_inputs() {
        let err = Polygon::new([(0.0, 0.0), (f64::NAN, 0.0), (0.0, 1.0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let good: [&[f64]; 3] = [&[0.0, 0.0], &[1.0, 0.0], &[0.0, 1.0]];
        assert_eq!(Polygon::from_slices(good).unwrap().len(), 3);
        let bad: [&[f64]; 3] = [&[0.0, 0.0], &[1.0, 0.0, 5.0], &[0.0, 1.0]];
        assert_eq!(
            Polygon::from_slices(bad).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn loose_tolerance_collapses_near_collinear_vertex() {
        let pts = [(0.0, 0.0), (1.0, 1e-7), (2.0, 0.0), (1.0, 2.0)];
        assert_eq!(Polygon::new(pts).unwrap().len(), 4);
        let loose = Polygon::with_cfg(pts, GeomCfg::with_eps(1e-6)).unwrap();
        assert_eq!(loose.len(), 3);
        assert_abs_diff_eq!(loose.cfg().eps, 1e-6);
    }

    #[test]
    fn display_lists_vertices() {
        let poly = Polygon::new([(0.0, 0.0), (2.0, 0.0), (0.0, 1.5)]).unwrap();
        assert_eq!(poly.to_string(), "{<0, 0>, <2, 0>, <0, 1.5>}");
    }
}
