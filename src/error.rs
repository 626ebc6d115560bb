use thiserror::Error;

/// Top-level error type for the polyplane geometry library.
#[derive(Debug, Error)]
pub enum PolyplaneError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Polygon(#[from] PolygonError),
}

/// Errors raised by vector, rotor and plane computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("division by near-zero divisor {divisor}")]
    DivisionByZero { divisor: f64 },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("plane normal is not a real multiple of the cross product")]
    InvalidPlaneNormal,

    #[error("plane basis vectors are parallel")]
    DegeneratePlane,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors raised while building or operating on a polygon.
#[derive(Debug, Error)]
pub enum PolygonError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("degenerate polygon: {0}")]
    Degenerate(String),

    #[error("vertex {index} forms a zero-degree interior angle")]
    DegenerateVertex { index: usize },

    #[error("polygon has a net turning angle of zero")]
    AmbiguousOrientation,

    #[error("vertex index {index} is out of range for a polygon with {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("polygon is not attached to a plane")]
    NoPlane,
}

/// Coarse classification of every failure the library reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    DegenerateInput,
    DegeneratePlane,
    AmbiguousOrientation,
    IndexOutOfRange,
    DivisionByZero,
}

impl PolyplaneError {
    /// Returns the coarse kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Geometry(err) => match err {
                GeometryError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
                GeometryError::Degenerate(_) => ErrorKind::DegenerateInput,
                GeometryError::DegeneratePlane => ErrorKind::DegeneratePlane,
                GeometryError::InvalidPlaneNormal | GeometryError::InvalidArgument(_) => {
                    ErrorKind::InvalidArgument
                }
            },
            Self::Polygon(err) => match err {
                PolygonError::InvalidArgument(_) | PolygonError::NoPlane => {
                    ErrorKind::InvalidArgument
                }
                PolygonError::Degenerate(_) | PolygonError::DegenerateVertex { .. } => {
                    ErrorKind::DegenerateInput
                }
                PolygonError::AmbiguousOrientation => ErrorKind::AmbiguousOrientation,
                PolygonError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            },
        }
    }
}

/// Convenience type alias for results using [`PolyplaneError`].
pub type Result<T> = std::result::Result<T, PolyplaneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_variants() {
        let err: PolyplaneError = GeometryError::DivisionByZero { divisor: 0.0 }.into();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);

        let err: PolyplaneError = PolygonError::DegenerateVertex { index: 2 }.into();
        assert_eq!(err.kind(), ErrorKind::DegenerateInput);

        let err: PolyplaneError = PolygonError::NoPlane.into();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn messages_are_transparent() {
        let err: PolyplaneError = PolygonError::IndexOutOfRange { index: 7, len: 4 }.into();
        assert_eq!(
            err.to_string(),
            "vertex index 7 is out of range for a polygon with 4 vertices"
        );
    }
}
