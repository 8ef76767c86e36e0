//! # Simulation host interface crate.
//!
//! Provides the data exchanged with the simulation host which calls the reward function once per
//! simulation step.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Per-step vehicle telemetry supplied by the host
pub mod telemetry;

// ------------------------------------------------------------------------------------------------
// REEXPORTS
// ------------------------------------------------------------------------------------------------

pub use telemetry::{Telemetry, TelemetryError};
