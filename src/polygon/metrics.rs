use std::f64::consts::FRAC_PI_2;

use super::Polygon;

impl Polygon {
    /// Fraction of vertices whose interior angle is a multiple of a right
    /// angle, within the polygon's tolerance.
    ///
    /// A rectangle scores `1.0`; a triangle without a right angle scores `0.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn orthogonality(&self) -> f64 {
        let eps = self.cfg.eps;
        let n = self.sides.len();
        let orthogonal = (0..n)
            .filter(|&i| {
                let incoming = self.sides[(i + n - 1) % n];
                let outgoing = self.sides[i];
                let angle = incoming.cross_z(&outgoing).abs().atan2(incoming.dot(&outgoing));
                let rem = angle % FRAC_PI_2;
                rem < eps || FRAC_PI_2 - rem < eps
            })
            .count();
        orthogonal as f64 / n as f64
    }

    /// Shoelace area, positive for counter-clockwise rings.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        let twice: f64 = (0..n)
            .map(|i| self.points[(i + n - 1) % n].cross_z(&self.points[i]))
            .sum();
        twice * 0.5
    }

    /// Unsigned enclosed area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }
}
