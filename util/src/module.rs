//! Stepped module interface
//!
//! A stepped module is set up once and then driven one simulation step at a time by whoever owns
//! the loop, the simulation host or the replay executable. The scoring engine in `reward_exec` is
//! one.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use crate::session::Session;

// ---------------------------------------------------------------------------
// MODULE STATE
// ---------------------------------------------------------------------------

/// A module driven once per simulation step.
pub trait State {
    /// Configuration the module is set up from
    type InitData;
    type InitError;

    /// Per-step input
    type InputData;
    /// Per-step result handed back to the caller
    type OutputData;
    /// Diagnostics for the step, suitable for archiving
    type StatusReport;
    type ProcError;

    /// Set the module up, discarding any state from earlier steps.
    ///
    /// With a `session` the module archives into it, without one nothing is written to disk.
    fn init(
        &mut self,
        init_data: Self::InitData,
        session: Option<&Session>,
    ) -> Result<(), Self::InitError>;

    /// Process a single step.
    ///
    /// On success returns the step's output along with its status report. An error means no
    /// output was produced for this step.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>;
}
