//! # Reward utilities
//!
//! Support shared by the crates of the racing line reward workspace: where files live, how runs
//! are logged and archived, and the small bits of maths and spatial search the scoring needs.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// CSV archiving of per-step records
pub mod archive;

/// Software root discovery
pub mod host;

pub mod logger;

/// Angle wrapping and 2D vector helpers
pub mod maths;

/// The stepped module interface
pub mod module;

/// TOML parameter loading
pub mod params;

pub mod quadtree;

/// Recorded telemetry logs
pub mod replay;

pub mod session;
pub mod time;
