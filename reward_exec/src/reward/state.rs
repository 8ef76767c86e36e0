//! Implementations for the reward engine state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, trace};
use nalgebra::Vector2;
use serde::Serialize;
use serde_json::{Map, Value};

// Internal
use super::*;
use crate::geometry::{bearing_deg, side_sign};
use crate::locate::Locator;
use crate::traj::Trajectory;
use sim_if::Telemetry;
use util::{
    archive::{Archived, Archiver},
    maths::get_ang_dist_deg,
    module::State,
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Reward engine module state
///
/// One engine is one scoring session. Engines share nothing, so independent vehicles or episodes
/// are scored by independent engines.
#[derive(Default)]
pub struct RewardEngine {
    pub(crate) params: Params,

    /// The racing line, `None` until the engine is initialised
    line: Option<RacingLine>,

    state: ScoringState,

    pub(crate) report: StatusReport,
    arch_report: Archiver,
}

/// The trajectory together with its locator.
struct RacingLine {
    trajectory: Trajectory,
    locator: Locator,
}

/// Status report for a single scoring step.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct StatusReport {
    /// Step counter from the telemetry
    pub steps: u64,

    /// The reward returned to the host
    pub reward: f64,

    pub closest_index: usize,
    pub second_closest_index: usize,

    /// Perpendicular distance from the line through the two nearest waypoints
    ///
    /// Units: meters
    pub cross_track_m: f64,

    /// Positive when left of the line, negative when right of it
    pub side: f64,

    /// Direction the heading was compared against
    ///
    /// Units: degrees
    pub reference_heading_deg: f64,

    /// Heading error, `heading - reference` wrapped into (-180, 180]
    ///
    /// Units: degrees
    pub heading_error_deg: f64,

    /// Speed the speed factor was measured against
    ///
    /// Units: meters/second
    pub target_speed_ms: f64,

    pub distance_factor: f64,
    pub speed_factor: f64,
    pub heading_factor: f64,
    pub progress_factor: f64,
    pub progress_delta_factor: f64,

    /// True if this was the first step of an episode
    pub episode_start: bool,

    /// True if the off-track gate replaced the computed reward
    pub offtrack_override: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for RewardEngine {
    type InitData = Params;
    type InitError = RewardInitError;

    type InputData = Telemetry;
    type OutputData = f64;
    type StatusReport = StatusReport;
    type ProcError = RewardError;

    /// Initialise the reward engine.
    ///
    /// Loads the racing line and builds its locator. Any previous scoring state is discarded.
    fn init(
        &mut self,
        init_data: Self::InitData,
        session: Option<&Session>,
    ) -> Result<(), Self::InitError> {
        init_data
            .validate()
            .map_err(RewardInitError::InvalidParams)?;

        let trajectory = match init_data.trajectory {
            TrajectorySource::Builtin { line } => Trajectory::builtin(line),
            TrajectorySource::Csv { ref path } => Trajectory::from_csv(path),
        }
        .map_err(RewardInitError::TrajectoryError)?;

        let locator = Locator::new(init_data.locator, &trajectory)
            .map_err(RewardInitError::LocatorError)?;

        info!(
            "Reward engine initialised: {} waypoints, {:?} locator, {:?} composition",
            trajectory.len(),
            locator.kind(),
            init_data.composition
        );

        // Only archive when running inside a session
        self.arch_report = match session {
            Some(s) => Archiver::from_path(s, "reward/status_report.csv")
                .map_err(|e| RewardInitError::ArchiveError(e.to_string()))?,
            None => Archiver::default(),
        };

        self.params = init_data;
        self.line = Some(RacingLine {
            trajectory,
            locator,
        });
        self.state = ScoringState::new();
        self.report = StatusReport::default();

        Ok(())
    }

    /// Score a single step.
    ///
    /// Processing involves:
    ///  1. Validating the telemetry
    ///  1. Locating the two nearest waypoints, recording the first one at an episode start
    ///  1. Measuring the cross-track distance, side and heading error
    ///  1. Shaping each measurement into a factor and updating the progress baseline
    ///  1. Composing the reward and applying the off-track gate
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        let telem = input_data;
        telem.validate().map_err(RewardError::MalformedInput)?;

        let line = self.line.as_ref().ok_or(RewardError::NotInitialised)?;

        // Clear the status report
        self.report = StatusReport::default();
        self.report.steps = telem.steps;

        // Locate the vehicle on the racing line
        let car = Vector2::new(telem.x, telem.y);
        let pair = line.locator.locate(&line.trajectory, &car);
        let closest = &line.trajectory.waypoints()[pair.closest_index];
        let second = &line.trajectory.waypoints()[pair.second_closest_index];

        if telem.steps == 1 {
            self.state
                .start_episode(pair.closest_index, self.params.reset_on_episode_start);
            self.report.episode_start = true;
        }

        // Geometry
        let cross_track_m =
            self.params
                .cross_track
                .distance(&closest.position_m, &second.position_m, &car);
        let side = side_sign(&closest.position_m, &second.position_m, &car);

        let route_deg = bearing_deg(&car, &second.position_m);
        let reference_deg = match self.params.heading.reference() {
            HeadingReference::RouteDirection => route_deg,
            HeadingReference::WaypointHeading => closest
                .target
                .map(|t| t.heading_deg)
                .unwrap_or(route_deg),
        };
        let heading_error_deg = get_ang_dist_deg(telem.heading, reference_deg);
        let heading_diff_deg = heading_error_deg.abs();

        // Factors
        let distance = match self.params.distance {
            DistanceShaper::Linear => shapers::distance_linear(cross_track_m, telem.track_width),
            DistanceShaper::Exponential {
                decay,
                width_fraction,
            } => shapers::distance_exponential(
                cross_track_m,
                telem.track_width,
                decay,
                width_fraction,
            ),
        };

        let (speed, target_speed_ms) = match self.params.speed {
            SpeedShaper::Gaussian {
                min_speed_ms,
                max_speed_ms,
            } => {
                let target = line
                    .trajectory
                    .min_target_speed(pair.closest_index, 0)
                    .unwrap_or(max_speed_ms);
                (
                    shapers::speed_gaussian(telem.speed, target, min_speed_ms, max_speed_ms),
                    target,
                )
            }
            SpeedShaper::RatioSquared {
                max_speed_ms,
                lookahead,
            } => {
                let target = line
                    .trajectory
                    .min_target_speed(pair.closest_index, lookahead)
                    .unwrap_or(max_speed_ms);
                (shapers::speed_ratio_squared(telem.speed, target), target)
            }
        };

        let heading = match self.params.heading {
            HeadingShaper::CosPower {
                threshold_deg,
                near_exponent,
                far_exponent,
                ..
            } => shapers::heading_cos_power(
                heading_diff_deg,
                threshold_deg,
                near_exponent,
                far_exponent,
            ),
            HeadingShaper::Gaussian {
                scale,
                side_penalty,
                ..
            } => {
                shapers::heading_gaussian(heading_diff_deg, scale)
                    * shapers::side_penalty(side, heading_error_deg, side_penalty)
            }
        };

        let progress = shapers::progress_rate(
            telem.progress,
            telem.steps,
            self.params.progress.rate_scale,
            self.params.progress.bootstrap_steps,
        );

        let progress_delta = match self.state.update_progress(telem.progress, telem.is_offtrack) {
            Some(delta) => shapers::progress_delta(delta, self.params.progress.delta_exponent),
            None => REWARD_FLOOR,
        };

        let factors = Factors {
            distance,
            speed,
            heading,
            progress,
            progress_delta,
        };

        // Compose and gate
        let (reward, offtrack_override) = gate_offtrack(
            self.params.composition.compose(&factors),
            telem.all_wheels_on_track,
            telem.is_offtrack,
        );

        self.report = StatusReport {
            reward,
            closest_index: pair.closest_index,
            second_closest_index: pair.second_closest_index,
            cross_track_m,
            side,
            reference_heading_deg: reference_deg,
            heading_error_deg,
            target_speed_ms,
            distance_factor: factors.distance,
            speed_factor: factors.speed,
            heading_factor: factors.heading,
            progress_factor: factors.progress,
            progress_delta_factor: factors.progress_delta,
            offtrack_override,
            ..self.report
        };

        trace!(
            "Step {}: wp ({}, {}), xtrack {:.3} m, heading err {:.1} deg, factors {:?}, reward {:.4}",
            telem.steps,
            pair.closest_index,
            pair.second_closest_index,
            cross_track_m,
            heading_error_deg,
            factors,
            reward
        );

        Ok((reward, self.report))
    }
}

impl Archived for RewardEngine {
    fn write(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.arch_report.serialise(self.report)?;

        Ok(())
    }
}

impl RewardEngine {
    /// Create an initialised engine which does not archive.
    pub fn new(params: Params) -> Result<Self, RewardInitError> {
        let mut engine = Self::default();
        engine.init(params, None)?;

        Ok(engine)
    }

    /// Score the raw parameter mapping supplied by the simulation host.
    ///
    /// The mapping must contain every field of [`Telemetry`], missing or ill-typed fields are a
    /// `MalformedInput` error and no reward is computed.
    pub fn reward_function(&mut self, params: &Map<String, Value>) -> Result<f64, RewardError> {
        let telem = Telemetry::from_params(params).map_err(RewardError::MalformedInput)?;

        let (reward, _) = self.proc(&telem)?;

        Ok(reward)
    }

    /// The parameters the engine was initialised with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The racing line, or `None` if the engine is not initialised.
    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.line.as_ref().map(|l| &l.trajectory)
    }

    /// The state carried between steps.
    pub fn scoring_state(&self) -> &ScoringState {
        &self.state
    }

    /// Report from the most recent step.
    pub fn report(&self) -> &StatusReport {
        &self.report
    }

    /// Discard the cross-step state, as if the session had been restarted.
    pub fn reset_session(&mut self) {
        self.state.reset();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::traj::BuiltinLine;

    /// Telemetry exactly at `t` of the way from waypoint 0 to waypoint 1 of the plain line,
    /// heading along the line.
    fn on_first_segment(t: f64) -> Telemetry {
        let traj = Trajectory::builtin(BuiltinLine::Plain).unwrap();
        let p0 = traj.waypoints()[0].position_m;
        let p1 = traj.waypoints()[1].position_m;
        let p = p0 + (p1 - p0) * t;

        Telemetry {
            x: p.x,
            y: p.y,
            heading: bearing_deg(&p0, &p1),
            speed: 4.0,
            track_width: 0.76,
            all_wheels_on_track: true,
            is_offtrack: false,
            progress: 1.0,
            steps: 1,
        }
    }

    #[test]
    fn test_uninitialised() {
        let mut engine = RewardEngine::default();
        assert!(matches!(
            engine.proc(&on_first_segment(0.25)),
            Err(RewardError::NotInitialised)
        ));
    }

    #[test]
    fn test_perfect_step() {
        let mut engine = RewardEngine::new(Params::additive()).unwrap();

        let (reward, report) = engine.proc(&on_first_segment(0.25)).unwrap();

        assert_eq!(report.closest_index, 0);
        assert_eq!(report.second_closest_index, 1);
        assert!(report.cross_track_m < 1e-6);
        assert!((report.distance_factor - 1.0).abs() < 1e-6);
        assert!((report.speed_factor - 1.0).abs() < 1e-12);
        assert!((report.heading_factor - 1.0).abs() < 1e-9);
        assert_eq!(report.progress_factor, 1.0);
        assert!(report.episode_start);
        assert!(!report.offtrack_override);

        // 1 + 1 + 10 + 5 + 1
        assert!((reward - 18.0).abs() < 1e-5);
        assert_eq!(report.reward, reward);
        assert_eq!(engine.scoring_state().first_racingpoint_index(), Some(0));
    }

    #[test]
    fn test_offtrack_gate() {
        let mut engine = RewardEngine::new(Params::additive()).unwrap();

        let mut telem = on_first_segment(0.25);
        telem.all_wheels_on_track = false;
        let (reward, report) = engine.proc(&telem).unwrap();
        assert_eq!(reward, REWARD_FLOOR);
        assert!(report.offtrack_override);

        // Factors are still reported
        assert!((report.speed_factor - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_malformed_input() {
        let mut engine = RewardEngine::new(Params::additive()).unwrap();

        let mut telem = on_first_segment(0.25);
        telem.track_width = -1.0;
        assert!(matches!(
            engine.proc(&telem),
            Err(RewardError::MalformedInput(_))
        ));

        let mut params = Map::new();
        params.insert("x".into(), Value::from(1.0));
        assert!(matches!(
            engine.reward_function(&params),
            Err(RewardError::MalformedInput(_))
        ));

        // Nothing was recorded
        assert_eq!(engine.scoring_state(), &ScoringState::new());
    }

    #[test]
    fn test_invalid_params() {
        let mut params = Params::additive();
        params.progress.delta_exponent = 0.0;

        assert!(matches!(
            RewardEngine::new(params),
            Err(RewardInitError::InvalidParams(_))
        ));

        let mut params = Params::additive();
        params.trajectory = TrajectorySource::Csv {
            path: "/no/such/line.csv".into(),
        };
        assert!(matches!(
            RewardEngine::new(params),
            Err(RewardInitError::TrajectoryError(_))
        ));
    }
}
