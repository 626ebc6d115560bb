mod rotor;
mod vector2;
mod vector3;

pub use rotor::Rotor;
pub use vector2::Vector2;
pub use vector3::Vector3;

use crate::error::{GeometryError, Result};

/// Global geometric tolerance for floating-point comparisons.
///
/// Twice the machine epsilon of `f64`. Inputs at large geometric scales should
/// be rescaled or built with a looser [`GeomCfg`].
pub const TOLERANCE: f64 = 2.0 * f64::EPSILON;

/// Geometry configuration (tolerances).
///
/// Carried by [`crate::Plane`] and [`crate::Polygon`] so every check made on
/// their behalf uses the same epsilon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    /// Absolute tolerance for equality, degeneracy and zero-crossing checks.
    pub eps: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self { eps: TOLERANCE }
    }
}

impl GeomCfg {
    /// Creates a configuration with a custom tolerance.
    #[must_use]
    pub fn with_eps(eps: f64) -> Self {
        Self { eps }
    }
}

/// Linear interpolation between two scalars: `a + (b - a) * t`.
#[inline]
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (b - a) * t + a
}

/// Inverse of [`lerp`]: the parameter `t` at which `c` sits between `a` and `b`.
///
/// # Errors
///
/// Returns `GeometryError::DivisionByZero` if `a` and `b` are within `eps`.
pub fn rev_lerp(a: f64, b: f64, c: f64, eps: f64) -> Result<f64> {
    let span = b - a;
    if span.abs() < eps {
        return Err(GeometryError::DivisionByZero { divisor: span }.into());
    }
    Ok((c - a) / span)
}

/// Rejects NaN and infinite components.
pub(crate) fn check_finite(components: &[f64]) -> Result<()> {
    if components.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(GeometryError::InvalidArgument(format!(
            "non-finite component in {components:?}"
        ))
        .into())
    }
}
