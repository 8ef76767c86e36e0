//! # Reference trajectory
//!
//! The reference trajectory (racing line) is an ordered, fixed sequence of waypoints which the
//! vehicle is scored against. A waypoint is identified by its index in the trajectory.
//!
//! Waypoints come in two flavours:
//!  - plain waypoints, which only carry a position,
//!  - profiled waypoints, which also carry the target speed, acceleration and heading the
//!    vehicle should have when passing them.
//!
//! Trajectories are created once, either from one of the built-in tables or from a CSV file, and
//! are never modified afterwards.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod racing_lines;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Minimum number of waypoints in a trajectory.
pub const MIN_NUM_WAYPOINTS: usize = 2;

/// Number of columns in a plain CSV row (x, y).
const PLAIN_ROW_WIDTH: usize = 2;

/// Number of columns in a profiled CSV row (x, y, speed, accel, heading).
const PROFILED_ROW_WIDTH: usize = 5;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Targets the vehicle should meet when passing a profiled waypoint.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaypointTarget {
    /// Target speed
    ///
    /// Units: meters/second
    pub speed_ms: f64,

    /// Target acceleration (or curvature, depending on the tool that generated the line). Carried
    /// but not used for scoring.
    pub accel_mss: f64,

    /// Target heading
    ///
    /// Units: degrees
    pub heading_deg: f64,
}

/// A single point on the reference trajectory.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub struct Waypoint {
    /// Position in the track frame
    ///
    /// Units: meters
    pub position_m: Vector2<f64>,

    /// Targets at this waypoint, `None` for plain waypoints
    pub target: Option<WaypointTarget>,
}

/// An ordered sequence of at least two waypoints.
#[derive(Debug, Clone, Serialize)]
pub struct Trajectory {
    waypoints: Vec<Waypoint>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The racing lines compiled into the executable.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinLine {
    /// 15 plain waypoints
    Plain,

    /// 120 profiled waypoints forming a closed lap
    Profiled,
}

#[derive(Debug, thiserror::Error)]
pub enum TrajectoryError {
    #[error("A trajectory needs at least 2 waypoints, found {0}")]
    TooFewWaypoints(usize),

    #[error("Waypoint {0} contains a non-finite value")]
    NonFiniteWaypoint(usize),

    #[error("Waypoint {index} has a negative target speed ({speed_ms} m/s)")]
    NegativeTargetSpeed { index: usize, speed_ms: f64 },

    #[error("Could not read the trajectory CSV: {0}")]
    CsvError(csv::Error),

    #[error("Row {row} of the trajectory CSV has {width} columns, expected 2 or 5")]
    InvalidRowWidth { row: usize, width: usize },

    #[error("Row {row} of the trajectory CSV has {found} columns, previous rows have {expected}")]
    InconsistentRowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Row {row} column {col} of the trajectory CSV is not a number: {value:?}")]
    InvalidValue {
        row: usize,
        col: usize,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Waypoint {
    /// Create a plain waypoint at the given position.
    pub fn new(x_m: f64, y_m: f64) -> Self {
        Self {
            position_m: Vector2::new(x_m, y_m),
            target: None,
        }
    }

    /// Create a profiled waypoint.
    pub fn profiled(x_m: f64, y_m: f64, speed_ms: f64, accel_mss: f64, heading_deg: f64) -> Self {
        Self {
            position_m: Vector2::new(x_m, y_m),
            target: Some(WaypointTarget {
                speed_ms,
                accel_mss,
                heading_deg,
            }),
        }
    }

    /// Create a waypoint from a table row of either 2 or 5 values.
    fn from_row(row: &[f64]) -> Option<Self> {
        match *row {
            [x, y] => Some(Self::new(x, y)),
            [x, y, speed, accel, heading] => Some(Self::profiled(x, y, speed, accel, heading)),
            _ => None,
        }
    }

    fn is_finite(&self) -> bool {
        let pos_finite = self.position_m.iter().all(|v| v.is_finite());

        match self.target {
            Some(t) => {
                pos_finite
                    && t.speed_ms.is_finite()
                    && t.accel_mss.is_finite()
                    && t.heading_deg.is_finite()
            }
            None => pos_finite,
        }
    }
}

impl Trajectory {
    /// Create a new trajectory, checking that it has enough waypoints, that they are all finite
    /// and that no target speed is negative.
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self, TrajectoryError> {
        if waypoints.len() < MIN_NUM_WAYPOINTS {
            return Err(TrajectoryError::TooFewWaypoints(waypoints.len()));
        }

        if let Some(i) = waypoints.iter().position(|w| !w.is_finite()) {
            return Err(TrajectoryError::NonFiniteWaypoint(i));
        }

        // The speed shapers assume targets in [0, inf)
        for (index, w) in waypoints.iter().enumerate() {
            if let Some(t) = w.target {
                if t.speed_ms < 0.0 {
                    return Err(TrajectoryError::NegativeTargetSpeed {
                        index,
                        speed_ms: t.speed_ms,
                    });
                }
            }
        }

        Ok(Self { waypoints })
    }

    /// Build one of the built-in racing lines.
    pub fn builtin(line: BuiltinLine) -> Result<Self, TrajectoryError> {
        let waypoints = match line {
            BuiltinLine::Plain => racing_lines::PLAIN
                .iter()
                .map(|r| Waypoint::new(r[0], r[1]))
                .collect(),
            BuiltinLine::Profiled => racing_lines::PROFILED
                .iter()
                .map(|r| Waypoint::profiled(r[0], r[1], r[2], r[3], r[4]))
                .collect(),
        };

        Self::new(waypoints)
    }

    /// Load a trajectory from a headerless CSV file.
    ///
    /// Each row is either `x, y` or `x, y, speed, accel, heading`, and all rows must have the
    /// same width. Lines starting with `#` are ignored.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self, TrajectoryError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_path(path)
            .map_err(TrajectoryError::CsvError)?;

        Self::from_csv_reader(reader)
    }

    /// Parse a trajectory from CSV text, see [`Trajectory::from_csv`].
    pub fn from_csv_str(text: &str) -> Result<Self, TrajectoryError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(text.as_bytes());

        Self::from_csv_reader(reader)
    }

    fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, TrajectoryError> {
        let mut waypoints = Vec::new();
        let mut expected_width = None;

        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(TrajectoryError::CsvError)?;

            // Check the width of the row against the allowed widths and the previous rows
            let width = record.len();
            if width != PLAIN_ROW_WIDTH && width != PROFILED_ROW_WIDTH {
                return Err(TrajectoryError::InvalidRowWidth { row, width });
            }
            match expected_width {
                Some(expected) if expected != width => {
                    return Err(TrajectoryError::InconsistentRowWidth {
                        row,
                        expected,
                        found: width,
                    })
                }
                _ => expected_width = Some(width),
            }

            let mut values = Vec::with_capacity(width);
            for (col, field) in record.iter().enumerate() {
                values.push(field.parse::<f64>().map_err(|_| {
                    TrajectoryError::InvalidValue {
                        row,
                        col,
                        value: field.to_string(),
                    }
                })?);
            }

            // Width was checked above so this always produces a waypoint
            waypoints.extend(Waypoint::from_row(&values));
        }

        Self::new(waypoints)
    }

    /// All waypoints in order.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Number of waypoints, always at least [`MIN_NUM_WAYPOINTS`].
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always `false`, trajectories cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Positions of all waypoints in order.
    pub fn positions(&self) -> Vec<Vector2<f64>> {
        self.waypoints.iter().map(|w| w.position_m).collect()
    }

    /// Lowest target speed over the waypoints `[index, index + lookahead]`.
    ///
    /// The window is clamped to the last waypoint, it does not wrap around to the start of the
    /// trajectory. Waypoints without targets are skipped, if none of them have a target `None` is
    /// returned.
    pub fn min_target_speed(&self, index: usize, lookahead: usize) -> Option<f64> {
        let end = index.saturating_add(lookahead).min(self.len() - 1);

        self.waypoints
            .get(index..=end)?
            .iter()
            .filter_map(|w| w.target.map(|t| t.speed_ms))
            .fold(None, |min: Option<f64>, s| match min {
                Some(m) => Some(m.min(s)),
                None => Some(s),
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_builtin_lines() {
        let plain = Trajectory::builtin(BuiltinLine::Plain).unwrap();
        assert_eq!(plain.len(), 15);
        assert!(plain.waypoints().iter().all(|w| w.target.is_none()));

        let profiled = Trajectory::builtin(BuiltinLine::Profiled).unwrap();
        assert_eq!(profiled.len(), 120);
        assert_eq!(profiled.waypoints()[0], profiled.waypoints()[119]);
        assert_eq!(profiled.waypoints()[0].target.unwrap().speed_ms, 4.0);
    }

    #[test]
    fn test_too_few_and_non_finite() {
        assert!(matches!(
            Trajectory::new(vec![Waypoint::new(0.0, 0.0)]),
            Err(TrajectoryError::TooFewWaypoints(1))
        ));
        assert!(matches!(
            Trajectory::new(vec![
                Waypoint::new(0.0, 0.0),
                Waypoint::profiled(1.0, 0.0, std::f64::NAN, 0.0, 0.0)
            ]),
            Err(TrajectoryError::NonFiniteWaypoint(1))
        ));
    }

    #[test]
    fn test_min_target_speed_clamps_to_end() {
        let traj = Trajectory::new(vec![
            Waypoint::profiled(0.0, 0.0, 4.0, 0.0, 0.0),
            Waypoint::profiled(1.0, 0.0, 3.0, 0.0, 0.0),
            Waypoint::profiled(2.0, 0.0, 2.5, 0.0, 0.0),
            Waypoint::profiled(3.0, 0.0, 3.5, 0.0, 0.0),
            Waypoint::profiled(4.0, 0.0, 1.0, 0.0, 0.0),
        ])
        .unwrap();

        assert_eq!(traj.min_target_speed(0, 0), Some(4.0));
        assert_eq!(traj.min_target_speed(0, 2), Some(2.5));
        assert_eq!(traj.min_target_speed(3, 2), Some(1.0));
        // Window at the end does not wrap back to the first waypoints
        assert_eq!(traj.min_target_speed(4, 2), Some(1.0));
        assert_eq!(traj.min_target_speed(5, 2), None);

        let plain = Trajectory::builtin(BuiltinLine::Plain).unwrap();
        assert_eq!(plain.min_target_speed(3, 2), None);
    }

    #[test]
    fn test_from_csv_str() {
        let traj = Trajectory::from_csv_str("# x, y\n0.0, 0.0\n1.0, 0.5\n2.0, 1.0\n").unwrap();
        assert_eq!(traj.len(), 3);
        assert_eq!(traj.waypoints()[1].position_m, Vector2::new(1.0, 0.5));

        let traj = Trajectory::from_csv_str("0,0,4,0.5,10\n1,0,3,0.5,20\n").unwrap();
        assert_eq!(traj.waypoints()[1].target.unwrap().heading_deg, 20.0);

        assert!(matches!(
            Trajectory::from_csv_str("0,0,1\n1,1,1\n"),
            Err(TrajectoryError::InvalidRowWidth { row: 0, width: 3 })
        ));
        assert!(matches!(
            Trajectory::from_csv_str("0,0\n1,1,4,0,0\n"),
            Err(TrajectoryError::InconsistentRowWidth { row: 1, .. })
        ));
        assert!(matches!(
            Trajectory::from_csv_str("0,0\n1,abc\n"),
            Err(TrajectoryError::InvalidValue { row: 1, col: 1, .. })
        ));
        assert!(matches!(
            Trajectory::from_csv_str("0,0\n"),
            Err(TrajectoryError::TooFewWaypoints(1))
        ));
    }

    #[test]
    fn test_negative_target_speed() {
        assert!(matches!(
            Trajectory::from_csv_str("0,0,-1,0,0\n1,0,-1,0,0\n2,0,-1,0,0\n"),
            Err(TrajectoryError::NegativeTargetSpeed { index: 0, .. })
        ));
        assert!(matches!(
            Trajectory::from_csv_str("0,0,2,0,0\n1,0,0,0,0\n2,0,-0.5,0,0\n"),
            Err(TrajectoryError::NegativeTargetSpeed { index: 2, .. })
        ));

        // Standing still is a valid target
        assert!(Trajectory::from_csv_str("0,0,0,0,0\n1,0,0,0,0\n").is_ok());
    }
}
