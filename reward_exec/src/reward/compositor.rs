//! # Reward compositor
//!
//! Combines the factor values of one step into the reward and applies the off-track gate.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use super::{Composition, REWARD_FLOOR};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Factor values for a single step.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct Factors {
    pub distance: f64,
    pub speed: f64,
    pub heading: f64,

    /// Per-step progress rate
    pub progress: f64,

    /// Change in progress since the previous step, shaped
    pub progress_delta: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Composition {
    /// Combine the factors into a reward, never less than the floor.
    pub fn compose(&self, factors: &Factors) -> f64 {
        let reward = match *self {
            Composition::Additive {
                base,
                distance_weight,
                speed_weight,
                heading_weight,
                progress_weight,
            } => {
                base + distance_weight * factors.distance
                    + speed_weight * factors.speed
                    + heading_weight * factors.heading
                    + progress_weight * factors.progress
            }
            Composition::Normalised => (factors.distance + factors.speed + factors.heading) / 3.0,
            Composition::ProgressDelta => factors.progress_delta,
        };

        // NaN also falls to the floor
        if reward >= REWARD_FLOOR {
            reward
        } else {
            REWARD_FLOOR
        }
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Off-track gate.
///
/// If any wheel is off the track, or the host reports the vehicle off track, the computed reward
/// is replaced by the floor. Returns the final reward and whether the gate fired.
pub fn gate_offtrack(reward: f64, all_wheels_on_track: bool, is_offtrack: bool) -> (f64, bool) {
    if !all_wheels_on_track || is_offtrack {
        (REWARD_FLOOR, true)
    } else {
        (reward, false)
    }
}
