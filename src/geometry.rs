//! Planar geometry primitives for landmark analysis.
//!
//! All coordinates are normalized image coordinates in `[0, 1]` with y
//! increasing downward, matching the landmark provider contract.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Rays shorter than this are treated as degenerate
const MIN_RAY_LENGTH: f64 = 1e-9;

/// A 2D point in normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate, 0.0 at image left
    pub x: f64,
    /// Vertical coordinate, 0.0 at image top
    pub y: f64,
}

impl Point {
    /// Create a point from its coordinates
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Angle in degrees at vertex `b` formed by the rays `b -> a` and `b -> c`.
///
/// Computed from the two ray headings via `atan2`; the absolute heading
/// difference is reflected into `[0, 180]`. Both formulations from the
/// literature (`atan2` difference and `acos` of the normalized dot product)
/// agree on non-degenerate inputs; this implementation guards the degenerate
/// case explicitly instead of letting rounding produce a silent value.
///
/// # Errors
///
/// Returns [`Error::DegenerateGeometry`] if either ray has (near) zero
/// length, i.e. `a` or `c` coincides with the vertex `b`.
pub fn angle(a: Point, b: Point, c: Point) -> Result<f64> {
    let ba = (a.x - b.x, a.y - b.y);
    let bc = (c.x - b.x, c.y - b.y);

    if ba.0.hypot(ba.1) < MIN_RAY_LENGTH || bc.0.hypot(bc.1) < MIN_RAY_LENGTH {
        return Err(Error::DegenerateGeometry(
            "zero-length ray in angle computation".to_string(),
        ));
    }

    let raw = (ba.1.atan2(ba.0) - bc.1.atan2(bc.0)).to_degrees().abs();
    Ok(if raw > 180.0 { 360.0 - raw } else { raw })
}

/// Componentwise midpoint of two points
#[must_use]
pub fn midpoint(p: Point, q: Point) -> Point {
    Point::new((p.x + q.x) / 2.0, (p.y + q.y) / 2.0)
}
