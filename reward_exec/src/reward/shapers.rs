//! # Factor shapers
//!
//! Pure functions turning a raw measurement into a bounded reward factor. Each one is a single
//! formula, the choice of which to use and their constants come from [`super::Params`].

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::REWARD_FLOOR;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Added to the target speed in the speed ratio so a zero target doesn't divide by zero.
const SPEED_RATIO_EPSILON: f64 = 1e-9;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Linear distance factor, 1 on the line falling to the floor at the track edge.
///
/// `max(1e-3, 1 - d / (track_width / 2))`
pub fn distance_linear(dist_m: f64, track_width_m: f64) -> f64 {
    (1.0 - dist_m / (0.5 * track_width_m)).max(REWARD_FLOOR)
}

/// Exponential distance factor.
///
/// `exp(-decay * d / (width_fraction * track_width))`
pub fn distance_exponential(
    dist_m: f64,
    track_width_m: f64,
    decay: f64,
    width_fraction: f64,
) -> f64 {
    (-decay * dist_m / (width_fraction * track_width_m)).exp()
}

/// Gaussian speed factor centred on the target speed, with sigma a sixth of the speed range.
pub fn speed_gaussian(speed_ms: f64, target_ms: f64, min_speed_ms: f64, max_speed_ms: f64) -> f64 {
    let sigma = (max_speed_ms - min_speed_ms) / 6.0;
    let err = speed_ms - target_ms;

    (-0.5 * err * err / (sigma * sigma)).exp()
}

/// Capped speed ratio squared, `min(s / v, 1)^2`.
///
/// Going faster than the target is not penalised.
pub fn speed_ratio_squared(speed_ms: f64, target_ms: f64) -> f64 {
    (speed_ms / (target_ms + SPEED_RATIO_EPSILON)).min(1.0).powi(2)
}

/// Cosine power heading factor.
///
/// `cos(diff)^near_exponent` when `diff <= threshold_deg`, otherwise `cos(diff)^far_exponent`,
/// so the factor decays much faster once the heading error passes the threshold.
pub fn heading_cos_power(
    diff_deg: f64,
    threshold_deg: f64,
    near_exponent: i32,
    far_exponent: i32,
) -> f64 {
    let k = if diff_deg <= threshold_deg {
        near_exponent
    } else {
        far_exponent
    };

    diff_deg.to_radians().cos().powi(k)
}

/// Gaussian heading factor, `exp(-scale * diff^2)` with `diff` in degrees.
pub fn heading_gaussian(diff_deg: f64, scale: f64) -> f64 {
    (-scale * diff_deg * diff_deg).exp()
}

/// Multiplier for the heading factor when the vehicle is turning further away from the line.
///
/// The penalty applies when the signed heading error and the side of the line have the same
/// strict sign. On the line, or heading exactly at the reference, no penalty applies.
///
/// `signed_diff_deg` must be wrapped into (-180, 180]. Comparing raw headings instead would flip
/// the decision for a line heading near ±180 degrees, where a car a few degrees anticlockwise of
/// the target reads as a large clockwise error.
pub fn side_penalty(side_sign: f64, signed_diff_deg: f64, penalty: f64) -> f64 {
    let same_sign =
        (side_sign > 0.0 && signed_diff_deg > 0.0) || (side_sign < 0.0 && signed_diff_deg < 0.0);

    match same_sign {
        true => penalty,
        false => 1.0,
    }
}

/// Per-step progress rate factor, `scale * progress / steps`.
///
/// During the first `bootstrap_steps` steps the rate is meaningless so the factor is 1.
pub fn progress_rate(progress_pct: f64, steps: u64, scale: f64, bootstrap_steps: u64) -> f64 {
    if steps <= bootstrap_steps {
        1.0
    } else {
        scale * progress_pct / steps as f64
    }
}

/// Progress delta factor, `delta^exponent` for a positive delta and the floor otherwise.
pub fn progress_delta(delta_pct: f64, exponent: f64) -> f64 {
    if delta_pct <= 0.0 {
        REWARD_FLOOR
    } else {
        delta_pct.powf(exponent)
    }
}
