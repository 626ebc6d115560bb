use crate::error::{GeometryError, Result};
use crate::math::{GeomCfg, Vector2, Vector3};

/// An infinite plane in 3D space.
///
/// Defined by an origin point and two non-parallel basis vectors
/// (`v1`, `v2`). The normal is `v1 × v2` and is kept unnormalized, so the
/// basis need not be orthonormal.
///
/// Local coordinates: `P(x, y) = origin + x * v1 + y * v2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    v1: Vector3,
    v2: Vector3,
    normal: Vector3,
    origin: Vector3,
    cfg: GeomCfg,
}

impl Plane {
    /// Creates a plane with the default tolerance.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegeneratePlane` if `v1` and `v2` are real
    /// multiples of each other (including either being zero).
    pub fn new(v1: Vector3, v2: Vector3, origin: Vector3) -> Result<Self> {
        Self::with_cfg(v1, v2, origin, GeomCfg::default())
    }

    /// Creates a plane whose checks use `cfg`.
    ///
    /// # Errors
    ///
    /// See [`Plane::new`].
    pub fn with_cfg(v1: Vector3, v2: Vector3, origin: Vector3, cfg: GeomCfg) -> Result<Self> {
        if v1.is_multiple(&v2, cfg.eps) {
            return Err(GeometryError::DegeneratePlane.into());
        }
        let normal = v1.cross(&v2);
        if normal.is_zero(cfg.eps) {
            return Err(GeometryError::DegeneratePlane.into());
        }
        Ok(Self {
            v1,
            v2,
            normal,
            origin,
            cfg,
        })
    }

    /// The XY plane through the world origin.
    #[must_use]
    pub fn xy() -> Self {
        Self {
            v1: Vector3::x_axis(),
            v2: Vector3::y_axis(),
            normal: Vector3::z_axis(),
            origin: Vector3::zeros(),
            cfg: GeomCfg::default(),
        }
    }

    /// Returns the first basis vector.
    #[must_use]
    pub fn v1(&self) -> &Vector3 {
        &self.v1
    }

    /// Returns the second basis vector.
    #[must_use]
    pub fn v2(&self) -> &Vector3 {
        &self.v2
    }

    /// Returns the (unnormalized) normal `v1 × v2`.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Vector3 {
        &self.origin
    }

    /// Returns the tolerance configuration the plane was built with.
    #[must_use]
    pub fn cfg(&self) -> GeomCfg {
        self.cfg
    }

    /// Returns `true` if `point` lies on the plane, i.e.
    /// `|(point − origin) · normal| < eps`.
    #[must_use]
    pub fn contains(&self, point: &Vector3) -> bool {
        (*point - self.origin).dot(&self.normal).abs() < self.cfg.eps
    }

    /// Maps local plane coordinates into 3D.
    #[must_use]
    pub fn lift(&self, point: &Vector2) -> Vector3 {
        self.v1 * point.x() + self.v2 * point.y() + self.origin
    }

    /// Recovers local coordinates of a point on the plane; inverse of
    /// [`Plane::lift`].
    ///
    /// With `n = v1 × v2`, the coordinates of `d = point − origin` are
    /// `x = d · (v2 × n) / |n|²` and `y = −d · (v1 × n) / |n|²`. Off-plane
    /// points are flattened along the normal.
    #[must_use]
    pub fn flatten(&self, point: &Vector3) -> Vector2 {
        let det = self.normal.dot(&self.normal);
        let v1_cross = self.v1.cross(&self.normal);
        let v2_cross = self.v2.cross(&self.normal);
        let d = *point - self.origin;
        Vector2::new(d.dot(&v2_cross) / det, -d.dot(&v1_cross) / det)
    }

    /// Moves `point` along the normal until it meets the plane.
    #[must_use]
    pub fn project_point(&self, point: &Vector3) -> Vector3 {
        let t = (self.origin - *point).dot(&self.normal) / self.normal.dot(&self.normal);
        *point + self.normal * t
    }
}
