//! # Reward module
//!
//! Scores the vehicle's telemetry against the racing line once per simulation step.
//!
//! Each step the two waypoints nearest the vehicle are found, and the perpendicular distance to
//! the line through them is measured along with which side of it the vehicle is on. The distance,
//! speed, heading and progress are then each shaped into a factor, and the factors are combined
//! into the reward according to the configured composition:
//!  - `Additive`: a weighted sum on top of a base value, speed and heading dominate once the
//!    vehicle is close to the line.
//!  - `Normalised`: the mean of the distance, speed and heading factors, near 1 only when all three
//!    are near perfect.
//!  - `ProgressDelta`: only the change in progress since the previous step.
//!
//! The reward is never below [`REWARD_FLOOR`], and is exactly the floor whenever the vehicle is
//! off the track.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod compositor;
mod params;
pub mod shapers;
mod state;
mod tracker;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use compositor::*;
pub use params::*;
pub use state::*;
pub use tracker::*;

use crate::traj::TrajectoryError;
use sim_if::TelemetryError;
use util::quadtree::QuadTreeError;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The lowest reward ever returned, and the reward for any off-track step.
pub const REWARD_FLOOR: f64 = 1e-3;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors that can occur while initialising the reward engine.
#[derive(Debug, thiserror::Error)]
pub enum RewardInitError {
    #[error("Invalid reward parameters: {0}")]
    InvalidParams(ParamsError),

    #[error("Could not load the racing line: {0}")]
    TrajectoryError(TrajectoryError),

    #[error("Could not build the waypoint index: {0}")]
    LocatorError(QuadTreeError),

    #[error("Could not create the reward archive: {0}")]
    ArchiveError(String),
}

/// Errors that can occur while scoring a step.
#[derive(Debug, thiserror::Error)]
pub enum RewardError {
    /// The host supplied telemetry that is missing fields or out of range. No reward is computed.
    #[error("Malformed telemetry: {0}")]
    MalformedInput(TelemetryError),

    #[error("The reward engine has not been initialised")]
    NotInitialised,
}
