pub mod error;
pub mod geometry;
pub mod math;
pub mod polygon;

pub use error::{ErrorKind, PolyplaneError, Result};
pub use geometry::Plane;
pub use math::{GeomCfg, Rotor, Vector2, Vector3, TOLERANCE};
pub use polygon::Polygon;
