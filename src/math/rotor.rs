use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use approx::AbsDiffEq;
use nalgebra::Quaternion;

use super::{Vector3, TOLERANCE};
use crate::error::{GeometryError, Result};

/// A quaternion `x·i + y·j + z·k + s` used as a 3D rotation operator.
///
/// Composition is the Hamilton product and is not commutative: in `a * b`
/// the rotation of `b` is applied first.
#[derive(Debug, Clone, Copy)]
pub struct Rotor(Quaternion<f64>);

impl Rotor {
    /// Creates a rotor from its vector part `(x, y, z)` and scalar part `s`.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64, s: f64) -> Self {
        // nalgebra takes the scalar first
        Self(Quaternion::new(s, x, y, z))
    }

    /// The identity rotation `(0, 0, 0, 1)`.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// The unit rotor `i`.
    #[must_use]
    pub fn i() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// The unit rotor `j`.
    #[must_use]
    pub fn j() -> Self {
        Self::new(0.0, 1.0, 0.0, 0.0)
    }

    /// The unit rotor `k`.
    #[must_use]
    pub fn k() -> Self {
        Self::new(0.0, 0.0, 1.0, 0.0)
    }

    /// Builds `axis·sin(θ/2) + cos(θ/2)`.
    ///
    /// The axis is used as given, so the result is a unit rotor only when
    /// `axis` has unit length. See [`Rotor::from_axis_angle`].
    #[must_use]
    pub fn construct_rotor(axis: Vector3, theta: f64) -> Self {
        let half = theta / 2.0;
        let v = axis.scale(half.sin());
        Self::new(v.x(), v.y(), v.z(), half.cos())
    }

    /// Builds the unit rotor for a rotation of `theta` about `axis`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if `axis` has zero length.
    pub fn from_axis_angle(axis: Vector3, theta: f64) -> Result<Self> {
        Ok(Self::construct_rotor(axis.unit()?, theta))
    }

    /// A pure rotor (`s = 0`) carrying `v` as its vector part.
    #[must_use]
    pub fn from_vector(v: Vector3) -> Self {
        Self::new(v.x(), v.y(), v.z(), 0.0)
    }

    /// Returns the `i` component.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.0.coords.x
    }

    /// Returns the `j` component.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.0.coords.y
    }

    /// Returns the `k` component.
    #[must_use]
    pub fn z(&self) -> f64 {
        self.0.coords.z
    }

    /// Scalar part.
    #[must_use]
    pub fn s(&self) -> f64 {
        self.0.coords.w
    }

    /// Returns the `(x, y, z)` part as a vector.
    #[must_use]
    pub fn vector_part(&self) -> Vector3 {
        Vector3::new(self.x(), self.y(), self.z())
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

    /// Four-component dot product.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.0.coords.dot(&other.0.coords)
    }

    /// Returns the Euclidean norm of all four components.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    /// Returns the squared norm.
    #[must_use]
    pub fn norm_squared(&self) -> f64 {
        self.0.norm_squared()
    }

    /// Returns the rotor with its vector part negated.
    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self(self.0.conjugate())
    }

    /// Conjugate divided by the squared norm.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DivisionByZero` for a zero rotor.
    pub fn inverse(&self) -> Result<Self> {
        self.conjugate().divide(self.norm_squared())
    }

    /// Hamilton product `self · other`.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        Self(self.0 * other.0)
    }

    /// Returns `true` if both rotors describe the same rotation, i.e. they
    /// match component-wise within `eps` up to an overall sign.
    #[must_use]
    pub fn same_rotation(&self, other: &Self, eps: f64) -> bool {
        self.abs_diff_eq(other, eps) || self.abs_diff_eq(&-*other, eps)
    }

    /// Rotates `v` by the sandwich product `r v r⁻¹`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DivisionByZero` for a zero rotor.
    pub fn rotate(&self, v: Vector3) -> Result<Vector3> {
        let inv = self.inverse()?;
        Ok(self
            .multiply(&Self::from_vector(v))
            .multiply(&inv)
            .vector_part())
    }

    /// Returns `true` if `other` is a real scalar multiple of `self`.
    #[must_use]
    pub fn is_multiple(&self, other: &Self, eps: f64) -> bool {
        let (a, b) = (self.0.coords, other.0.coords);
        let Some(ratio) = (0..4).find(|&i| a[i].abs() >= eps).map(|i| b[i] / a[i]) else {
            return true;
        };
        (a * ratio - b).iter().all(|d| d.abs() < eps)
    }
}

impl PartialEq for Rotor {
    fn eq(&self, other: &Self) -> bool {
        (self.0.coords - other.0.coords)
            .iter()
            .all(|d| d.abs() < TOLERANCE)
    }
}

impl AbsDiffEq for Rotor {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        TOLERANCE
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.0.coords.abs_diff_eq(&other.0.coords, epsilon)
    }
}

impl Mul for Rotor {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<f64> for Rotor {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Add for Rotor {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Rotor {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Rotor {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl From<Vector3> for Rotor {
    fn from(v: Vector3) -> Self {
        Self::from_vector(v)
    }
}

impl fmt::Display for Rotor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}, {}>", self.x(), self.y(), self.z(), self.s())
    }
}
