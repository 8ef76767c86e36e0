//! # Scoring state
//!
//! State carried between scoring calls of one session: the waypoint the episode started at and the
//! progress seen on the previous step. Each engine owns its own state so independent sessions
//! never share it.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Cross-step scoring state.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct ScoringState {
    /// Closest waypoint at the most recent first step of an episode
    first_racingpoint_index: Option<usize>,

    /// Progress at the previous step, 0 at the start of the session and after going off track
    ///
    /// Units: percent
    previous_progress: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScoringState {
    /// A fresh state, as at the start of a session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_racingpoint_index(&self) -> Option<usize> {
        self.first_racingpoint_index
    }

    pub fn previous_progress(&self) -> f64 {
        self.previous_progress
    }

    /// Record the first step of an episode.
    ///
    /// The closest waypoint is stored as the episode's starting waypoint. If `reset_progress` is
    /// set the progress baseline also goes back to 0.
    pub fn start_episode(&mut self, closest_index: usize, reset_progress: bool) {
        debug!("Episode started at waypoint {}", closest_index);

        self.first_racingpoint_index = Some(closest_index);

        if reset_progress {
            self.previous_progress = 0.0;
        }
    }

    /// Update the progress baseline with this step's progress.
    ///
    /// Returns the change in progress since the previous step, or `None` if the vehicle is off
    /// track, in which case the baseline is reset to 0 so the step after it is measured from a
    /// fresh start.
    pub fn update_progress(&mut self, progress_pct: f64, is_offtrack: bool) -> Option<f64> {
        if is_offtrack {
            debug!(
                "Off track, progress baseline reset from {:.3}",
                self.previous_progress
            );
            self.previous_progress = 0.0;
            return None;
        }

        let delta = progress_pct - self.previous_progress;
        self.previous_progress = progress_pct;

        Some(delta)
    }

    /// Return to the start of session state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deltas() {
        let mut state = ScoringState::new();

        assert_eq!(state.update_progress(4.0, false), Some(4.0));
        assert_eq!(state.update_progress(5.0, false), Some(1.0));

        // No change, and moving backwards, still move the baseline
        assert_eq!(state.update_progress(5.0, false), Some(0.0));
        assert_eq!(state.update_progress(3.0, false), Some(-2.0));
        assert_eq!(state.previous_progress(), 3.0);
    }

    #[test]
    fn test_offtrack_resets_baseline() {
        let mut state = ScoringState::new();

        state.update_progress(30.0, false);
        assert_eq!(state.update_progress(31.0, true), None);
        assert_eq!(state.previous_progress(), 0.0);

        // Measured from 0, not from 30
        assert_eq!(state.update_progress(32.0, false), Some(32.0));
    }

    #[test]
    fn test_episode_start() {
        let mut state = ScoringState::new();
        assert_eq!(state.first_racingpoint_index(), None);

        state.update_progress(50.0, false);
        state.start_episode(7, false);
        assert_eq!(state.first_racingpoint_index(), Some(7));
        assert_eq!(state.previous_progress(), 50.0);

        state.start_episode(2, true);
        assert_eq!(state.first_racingpoint_index(), Some(2));
        assert_eq!(state.previous_progress(), 0.0);

        state.reset();
        assert_eq!(state, ScoringState::new());
    }
}
