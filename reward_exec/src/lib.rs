//! # Reward library.
//!
//! Racing line reward scoring. Allows the replay executable, the benchmarks and any other host
//! to use the scoring engine.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Cross-track geometry - distance and side of the vehicle relative to the racing line
pub mod geometry;

/// Waypoint locator - finds the two waypoints nearest the vehicle
pub mod locate;

/// Reward module - shapes and combines the scoring factors
pub mod reward;

/// Reference trajectory - the racing line the vehicle is scored against
pub mod traj;
