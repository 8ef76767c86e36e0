//! # Cross-track geometry
//!
//! Distance of the vehicle from the line through its two nearest waypoints, which side of that
//! line it is on, and the direction from the vehicle to a waypoint.
//!
//! Two formulations of the perpendicular distance are provided. They agree for any non-degenerate
//! triangle but treat coincident waypoints differently:
//!  - `Heron`: the triangle height from Heron's formula. Coincident waypoints give the distance to
//!    the first waypoint.
//!  - `LineCoefficient`: the distance to the line `ax + by + c = 0`. Coincident waypoints give a
//!    distance of zero.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// Internal
use util::maths::cross_2d;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Method used to compute the perpendicular distance to the racing line.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CrossTrackMethod {
    Heron,
    LineCoefficient,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for CrossTrackMethod {
    fn default() -> Self {
        CrossTrackMethod::Heron
    }
}

impl CrossTrackMethod {
    /// Perpendicular distance from `car` to the infinite line through `p1` and `p2`.
    ///
    /// Units: meters
    pub fn distance(&self, p1: &Vector2<f64>, p2: &Vector2<f64>, car: &Vector2<f64>) -> f64 {
        match self {
            CrossTrackMethod::Heron => heron_distance(p1, p2, car),
            CrossTrackMethod::LineCoefficient => line_distance(p1, p2, car),
        }
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Height of the triangle `(p1, p2, car)` over the base `p1 -> p2`, from the three side lengths.
///
/// If `p1` and `p2` coincide the distance from `car` to `p1` is returned.
pub fn heron_distance(p1: &Vector2<f64>, p2: &Vector2<f64>, car: &Vector2<f64>) -> f64 {
    let a = (p1 - p2).norm();
    let b = (car - p1).norm();
    let c = (car - p2).norm();

    if a == 0.0 {
        return b;
    }

    let (a2, b2, c2) = (a * a, b * b, c * c);

    // 16 * area^2, which can go slightly negative through rounding when the points are collinear
    let det = -a2 * a2 + 2.0 * a2 * b2 + 2.0 * a2 * c2 - b2 * b2 + 2.0 * b2 * c2 - c2 * c2;

    det.abs().sqrt() / (2.0 * a)
}

/// Distance from `car` to the line through `p1` and `p2` written as `ax + by + c = 0`.
///
/// If `p1` and `p2` coincide the line is undefined and zero is returned.
pub fn line_distance(p1: &Vector2<f64>, p2: &Vector2<f64>, car: &Vector2<f64>) -> f64 {
    let a = p2.y - p1.y;
    let b = p1.x - p2.x;
    let c = p2.x * p1.y - p1.x * p2.y;

    let denom = (a * a + b * b).sqrt();
    if denom == 0.0 {
        return 0.0;
    }

    (a * car.x + b * car.y + c).abs() / denom
}

/// Which side of the directed line `p1 -> p2` the car is on.
///
/// Positive when the car is to the left, negative when it is to the right, zero when it is on the
/// line.
pub fn side_sign(p1: &Vector2<f64>, p2: &Vector2<f64>, car: &Vector2<f64>) -> f64 {
    let dir = p2 - p1;
    let rel = car - p1;

    cross_2d([dir.x, dir.y], [rel.x, rel.y])
}

/// Direction from `from` to `to`, measured anticlockwise from the +x axis.
///
/// Units: degrees, in the range [-180, 180]
pub fn bearing_deg(from: &Vector2<f64>, to: &Vector2<f64>) -> f64 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}
