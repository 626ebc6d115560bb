use std::f64::consts::TAU;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use approx::AbsDiffEq;

use super::{check_finite, Vector2, TOLERANCE};
use crate::error::{GeometryError, PolyplaneError, Result};

/// An immutable 3D vector.
///
/// Equality is tolerance-based: two vectors compare equal when every
/// component differs by less than [`TOLERANCE`]. Use [`AbsDiffEq`] for a
/// different epsilon.
#[derive(Debug, Clone, Copy)]
pub struct Vector3(nalgebra::Vector3<f64>);

impl Vector3 {
    /// Creates a vector from its components.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(nalgebra::Vector3::new(x, y, z))
    }

    /// Creates a vector, rejecting NaN and infinite components.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidArgument` on a non-finite component.
    pub fn try_new(x: f64, y: f64, z: f64) -> Result<Self> {
        check_finite(&[x, y, z])?;
        Ok(Self::new(x, y, z))
    }

    /// Returns the zero vector.
    #[must_use]
    pub fn zeros() -> Self {
        Self(nalgebra::Vector3::zeros())
    }

    /// Returns the unit vector along x.
    #[must_use]
    pub fn x_axis() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Returns the unit vector along y.
    #[must_use]
    pub fn y_axis() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    /// Returns the unit vector along z.
    #[must_use]
    pub fn z_axis() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Returns the x component.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    /// Returns the y component.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    /// Returns the z component.
    #[must_use]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Borrows the underlying `nalgebra` vector.
    #[must_use]
    pub fn as_nalgebra(&self) -> &nalgebra::Vector3<f64> {
        &self.0
    }

    /// Multiplies every component by `k`.
    #[must_use]
    pub fn scale(&self, k: f64) -> Self {
        Self(self.0 * k)
    }

    /// Divides every component by `k`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DivisionByZero` if `|k| < TOLERANCE`.
    pub fn divide(&self, k: f64) -> Result<Self> {
        if k.abs() < TOLERANCE {
            return Err(GeometryError::DivisionByZero { divisor: k }.into());
        }
        Ok(Self(self.0 / k))
    }

    /// Returns the dot product.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.0.dot(&other.0)
    }

    /// Cross product `(ay·bz − az·by, az·bx − ax·bz, ax·by − ay·bx)`.
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        let (a, b) = (&self.0, &other.0);
        Self::new(
            a.y * b.z - a.z * b.y,
            a.z * b.x - a.x * b.z,
            a.x * b.y - a.y * b.x,
        )
    }

    /// Returns the Euclidean length.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    /// Returns the squared length.
    #[must_use]
    pub fn norm_squared(&self) -> f64 {
        self.0.norm_squared()
    }

    /// Returns `true` if every component is within `eps` of zero.
    #[must_use]
    pub fn is_zero(&self, eps: f64) -> bool {
        self.0.iter().all(|c| c.abs() < eps)
    }

    /// Returns the unit vector pointing the same way.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for a zero-length vector.
    pub fn unit(&self) -> Result<Self> {
        let len = self.norm();
        if len < TOLERANCE {
            return Err(GeometryError::Degenerate("zero-length vector has no direction".into()).into());
        }
        Ok(Self(self.0 / len))
    }

    /// Unsigned angle between two vectors, in `[0, π]`.
    ///
    /// Evaluated as `atan2(|a × b|, a · b)`, which equals
    /// `acos(a·b / (|a||b|))` but keeps full precision near 0 and π.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if either vector has zero length.
    pub fn angle_between(&self, other: &Self) -> Result<f64> {
        if self.norm() * other.norm() <= 0.0 {
            return Err(GeometryError::Degenerate(
                "angle between is undefined for a zero-length vector".into(),
            )
            .into());
        }
        Ok(self.cross(other).norm().atan2(self.dot(other)))
    }

    /// Signed angle from `self` to `other` about `plane_normal`, in `(−π, π]`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidPlaneNormal` if `plane_normal` is not a
    /// real multiple of `self × other`, and `GeometryError::Degenerate` if it
    /// has zero length.
    pub fn signed_angle_between(&self, other: &Self, plane_normal: &Self, eps: f64) -> Result<f64> {
        let cross = self.cross(other);
        if !plane_normal.is_multiple(&cross, eps) {
            return Err(GeometryError::InvalidPlaneNormal.into());
        }
        let len = plane_normal.norm();
        if len < eps {
            return Err(GeometryError::Degenerate("plane normal has zero length".into()).into());
        }
        Ok((cross.dot(plane_normal) / len).atan2(self.dot(other)))
    }

    /// Counter-clockwise angle from `self` to `other` about `plane_normal`,
    /// in `[0, 2π)`.
    ///
    /// # Errors
    ///
    /// Same as [`Vector3::signed_angle_between`].
    pub fn ccw_angle_between(&self, other: &Self, plane_normal: &Self, eps: f64) -> Result<f64> {
        let signed = self.signed_angle_between(other, plane_normal, eps)?;
        Ok(wrap_ccw(signed))
    }

    /// Returns `true` if `other` is a real scalar multiple of `self`.
    ///
    /// A zero `self` is compatible with anything. Otherwise the ratio is taken
    /// from the first non-zero component of `self` and every component of
    /// `self * ratio` must match `other` within `eps`.
    #[must_use]
    pub fn is_multiple(&self, other: &Self, eps: f64) -> bool {
        let Some(ratio) = (0..3)
            .find(|&i| self.0[i].abs() >= eps)
            .map(|i| other.0[i] / self.0[i])
        else {
            return true;
        };
        (self.0 * ratio - other.0).iter().all(|d| d.abs() < eps)
    }

    /// Linear interpolation `self + (other − self)·t`.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self((other.0 - self.0) * t + self.0)
    }

    /// Drops the z component.
    #[must_use]
    pub fn to_2d(&self) -> Vector2 {
        Vector2::new(self.0.x, self.0.y)
    }
}

/// Remaps a signed angle in `(−π, π]` to `[0, 2π)`.
pub(crate) fn wrap_ccw(signed: f64) -> f64 {
    if signed < 0.0 {
        let wrapped = signed + TAU;
        // a tiny negative angle can round up to exactly 2π
        if wrapped >= TAU {
            0.0
        } else {
            wrapped
        }
    } else {
        signed
    }
}

impl Default for Vector3 {
    fn default() -> Self {
        Self::zeros()
    }
}

impl PartialEq for Vector3 {
    fn eq(&self, other: &Self) -> bool {
        (self.0 - other.0).iter().all(|d| d.abs() < TOLERANCE)
    }
}

impl AbsDiffEq for Vector3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        TOLERANCE
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.0.abs_diff_eq(&other.0, epsilon)
    }
}

impl Add for Vector3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Vector3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Vector3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl From<nalgebra::Vector3<f64>> for Vector3 {
    fn from(v: nalgebra::Vector3<f64>) -> Self {
        Self(v)
    }
}

impl From<(f64, f64, f64)> for Vector3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector2> for Vector3 {
    fn from(v: Vector2) -> Self {
        v.to_3d()
    }
}

impl TryFrom<&[f64]> for Vector3 {
    type Error = PolyplaneError;

    fn try_from(components: &[f64]) -> Result<Self> {
        match *components {
            [x, y, z] => Self::try_new(x, y, z),
            _ => Err(GeometryError::InvalidArgument(format!(
                "expected 3 components, got {}",
                components.len()
            ))
            .into()),
        }
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}>", self.0.x, self.0.y, self.0.z)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn cross_uses_correct_index_pairs() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        // (2·6 − 3·5, 3·4 − 1·6, 1·5 − 2·4)
        assert_eq!(a.cross(&b), Vector3::new(-3.0, 6.0, -3.0));
        assert_eq!(Vector3::x_axis().cross(&Vector3::y_axis()), Vector3::z_axis());
        assert_eq!(Vector3::z_axis().cross(&Vector3::x_axis()), Vector3::y_axis());
    }

    #[test]
    fn arithmetic() {
        let a = Vector3::new(1.0, -2.0, 0.5);
        let b = Vector3::new(0.5, 1.0, 2.0);
        assert_eq!(a + b, Vector3::new(1.5, -1.0, 2.5));
        assert_eq!(a - b, Vector3::new(0.5, -3.0, -1.5));
        assert_eq!(-a, Vector3::new(-1.0, 2.0, -0.5));
        assert_eq!(a * 2.0, Vector3::new(2.0, -4.0, 1.0));
        assert_eq!(a.divide(2.0).unwrap(), Vector3::new(0.5, -1.0, 0.25));
        assert!((a.dot(&b) + 0.5).abs() < TOLERANCE);
        assert!((Vector3::new(3.0, 4.0, 12.0).norm() - 13.0).abs() < TOLERANCE);
    }

    #[test]
    fn divide_by_near_zero() {
        let err = Vector3::x_axis().divide(1e-17).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);
    }

    #[test]
    fn equality_is_tolerant() {
        let a = Vector3::new(1.0, 1.0, 1.0);
        let b = Vector3::new(1.0 + f64::EPSILON, 1.0, 1.0);
        assert_eq!(a, b);
        assert_ne!(a, Vector3::new(1.0 + 1e-9, 1.0, 1.0));
        assert_abs_diff_eq!(a, Vector3::new(1.0 + 1e-9, 1.0, 1.0), epsilon = 1e-8);
    }

    #[test]
    fn angle_between_basic() {
        let a = Vector3::x_axis();
        assert_abs_diff_eq!(a.angle_between(&Vector3::y_axis()).unwrap(), FRAC_PI_2);
        assert_abs_diff_eq!(a.angle_between(&-a).unwrap(), PI);
        assert!(a.angle_between(&Vector3::new(2.0, 0.0, 0.0)).unwrap().abs() < TOLERANCE);
        let err = a.angle_between(&Vector3::zeros()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegenerateInput);
    }

    #[test]
    fn signed_and_ccw_angles() {
        let z = Vector3::z_axis();
        let x = Vector3::x_axis();
        let y = Vector3::y_axis();
        assert_abs_diff_eq!(x.signed_angle_between(&y, &z, TOLERANCE).unwrap(), FRAC_PI_2);
        assert_abs_diff_eq!(y.signed_angle_between(&x, &z, TOLERANCE).unwrap(), -FRAC_PI_2);
        assert_abs_diff_eq!(
            y.ccw_angle_between(&x, &z, TOLERANCE).unwrap(),
            3.0 * FRAC_PI_2,
            epsilon = 1e-12
        );
        // a scaled, flipped normal is still a multiple of the cross product
        assert_abs_diff_eq!(
            x.signed_angle_between(&y, &(z * -3.0), TOLERANCE).unwrap(),
            -FRAC_PI_2
        );
    }

    #[test]
    fn signed_angle_rejects_foreign_normal() {
        let err = Vector3::x_axis()
            .signed_angle_between(&Vector3::y_axis(), &Vector3::x_axis(), TOLERANCE)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn multiples() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        assert!(a.is_multiple(&Vector3::new(2.0, 4.0, 6.0), TOLERANCE));
        assert!(a.is_multiple(&Vector3::new(-1.0, -2.0, -3.0), TOLERANCE));
        assert!(!a.is_multiple(&Vector3::new(1.0, -2.0, 3.0), TOLERANCE));
        assert!(Vector3::zeros().is_multiple(&a, TOLERANCE));
        assert!(a.is_multiple(&Vector3::zeros(), TOLERANCE));
        assert!(Vector3::new(0.0, 0.0, 2.0).is_multiple(&Vector3::new(0.0, 0.0, -5.0), TOLERANCE));
    }

    #[test]
    fn lerp_and_conversions() {
        let a = Vector3::zeros();
        let b = Vector3::new(2.0, 4.0, -2.0);
        assert_eq!(a.lerp(&b, 0.25), Vector3::new(0.5, 1.0, -0.5));
        let c: &[f64] = &[1.0, 2.0];
        assert_eq!(Vector3::try_from(c).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(Vector3::from((1.0, 2.0, 3.0)).to_2d(), Vector2::new(1.0, 2.0));
        assert_eq!(b.to_string(), "<2, 4, -2>");
    }

    #[test]
    fn unit_vector() {
        assert_abs_diff_eq!(
            Vector3::new(0.0, 3.0, 4.0).unit().unwrap(),
            Vector3::new(0.0, 0.6, 0.8),
            epsilon = 1e-15
        );
        assert!(Vector3::zeros().unit().is_err());
    }
}
