use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use approx::AbsDiffEq;

use super::vector3::wrap_ccw;
use super::{check_finite, Vector3, TOLERANCE};
use crate::error::{GeometryError, PolyplaneError, Result};

/// An immutable in-plane vector: a [`Vector3`] whose z component is always 0.
///
/// Only the operations that make sense in the plane are exposed; the cross
/// product collapses to its signed z magnitude ([`Vector2::cross_z`]).
#[derive(Debug, Clone, Copy)]
pub struct Vector2(nalgebra::Vector2<f64>);

impl Vector2 {
    /// Creates a vector from its components.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self(nalgebra::Vector2::new(x, y))
    }

    /// Creates a vector, rejecting NaN and infinite components.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidArgument` on a non-finite component.
    pub fn try_new(x: f64, y: f64) -> Result<Self> {
        check_finite(&[x, y])?;
        Ok(Self::new(x, y))
    }

    /// Returns the zero vector.
    #[must_use]
    pub fn zeros() -> Self {
        Self(nalgebra::Vector2::zeros())
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

    /// Multiplies both components by `k`.
    #[must_use]
    pub fn scale(&self, k: f64) -> Self {
        Self(self.0 * k)
    }

    /// Divides both components by `k`.
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

    /// Signed z magnitude of the cross product: positive when `other` lies
    /// counter-clockwise of `self`.
    #[must_use]
    pub fn cross_z(&self, other: &Self) -> f64 {
        self.0.x * other.0.y - self.0.y * other.0.x
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

    /// Returns `true` if both components are within `eps` of zero.
    #[must_use]
    pub fn is_zero(&self, eps: f64) -> bool {
        self.0.x.abs() < eps && self.0.y.abs() < eps
    }

    /// Unsigned angle between two vectors, in `[0, π]`.
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
        Ok(self.cross_z(other).abs().atan2(self.dot(other)))
    }

    /// Signed angle from `self` to `other` about `plane_normal`.
    ///
    /// # Errors
    ///
    /// See [`Vector3::signed_angle_between`].
    pub fn signed_angle_between(&self, other: &Self, plane_normal: &Vector3, eps: f64) -> Result<f64> {
        self.to_3d()
            .signed_angle_between(&other.to_3d(), plane_normal, eps)
    }

    /// Counter-clockwise angle from `self` to `other` about `plane_normal`,
    /// in `[0, 2π)`.
    ///
    /// # Errors
    ///
    /// See [`Vector3::signed_angle_between`].
    pub fn ccw_angle_between(&self, other: &Self, plane_normal: &Vector3, eps: f64) -> Result<f64> {
        Ok(wrap_ccw(self.signed_angle_between(other, plane_normal, eps)?))
    }

    /// Returns `true` if `other` is a real scalar multiple of `self`.
    #[must_use]
    pub fn is_multiple(&self, other: &Self, eps: f64) -> bool {
        self.to_3d().is_multiple(&other.to_3d(), eps)
    }

    /// Linear interpolation `self + (other − self)·t`.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self((other.0 - self.0) * t + self.0)
    }

    /// Embeds the vector in 3D with `z = 0`.
    #[must_use]
    pub fn to_3d(&self) -> Vector3 {
        Vector3::new(self.0.x, self.0.y, 0.0)
    }
}

impl Default for Vector2 {
    fn default() -> Self {
        Self::zeros()
    }
}

impl PartialEq for Vector2 {
    fn eq(&self, other: &Self) -> bool {
        (self.0.x - other.0.x).abs() < TOLERANCE && (self.0.y - other.0.y).abs() < TOLERANCE
    }
}

impl AbsDiffEq for Vector2 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        TOLERANCE
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.0.abs_diff_eq(&other.0, epsilon)
    }
}

impl Add for Vector2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Vector2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Vector2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<nalgebra::Vector2<f64>> for Vector2 {
    fn from(v: nalgebra::Vector2<f64>) -> Self {
        Self(v)
    }
}

impl TryFrom<&[f64]> for Vector2 {
    type Error = PolyplaneError;

    fn try_from(components: &[f64]) -> Result<Self> {
        match *components {
            [x, y] => Self::try_new(x, y),
            _ => Err(GeometryError::InvalidArgument(format!(
                "expected a 2D point, got {} components",
                components.len()
            ))
            .into()),
        }
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.0.x, self.0.y)
    }
}
