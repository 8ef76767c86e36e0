//! Reward scoring parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

// Internal
use crate::geometry::CrossTrackMethod;
use crate::locate::LocatorKind;
use crate::traj::BuiltinLine;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the reward engine.
///
/// Selects the reference trajectory, how the vehicle is located on it, and which shaper and
/// composition variants turn the measurements into a reward.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Params {
    /// Reset the progress baseline at the first step of every episode as well as when the
    /// vehicle goes off track.
    #[serde(default)]
    pub reset_on_episode_start: bool,

    /// Nearest waypoint search strategy
    #[serde(default)]
    pub locator: LocatorKind,

    /// Perpendicular distance formula
    #[serde(default)]
    pub cross_track: CrossTrackMethod,

    /// Where to load the racing line from
    pub trajectory: TrajectorySource,

    pub distance: DistanceShaper,

    pub speed: SpeedShaper,

    pub heading: HeadingShaper,

    pub progress: ProgressShaper,

    pub composition: Composition,
}

/// Progress shaping constants, used by both the per-step rate factor and the delta factor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ProgressShaper {
    /// Scale applied to `progress / steps`
    pub rate_scale: f64,

    /// Steps up to and including this one score a rate factor of 1
    pub bootstrap_steps: u64,

    /// Exponent applied to positive progress deltas
    pub delta_exponent: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrajectorySource {
    /// One of the tables compiled into the crate
    Builtin { line: BuiltinLine },

    /// A headerless CSV file of 2 or 5 columns
    Csv { path: PathBuf },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DistanceShaper {
    /// `max(1e-3, 1 - d / (track_width / 2))`
    Linear,

    /// `exp(-decay * d / (width_fraction * track_width))`
    Exponential { decay: f64, width_fraction: f64 },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpeedShaper {
    /// Gaussian around the closest waypoint's target speed, or `max_speed_ms` when the
    /// trajectory has no targets. Sigma is a sixth of the speed range.
    Gaussian {
        min_speed_ms: f64,
        max_speed_ms: f64,
    },

    /// `min(s / v, 1)^2` where `v` is the lowest target speed over the next `lookahead`
    /// waypoints, or `max_speed_ms` when the trajectory has no targets.
    RatioSquared { max_speed_ms: f64, lookahead: usize },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HeadingShaper {
    /// `cos(d)^near_exponent` up to `threshold_deg`, `cos(d)^far_exponent` beyond
    CosPower {
        reference: HeadingReference,
        threshold_deg: f64,
        near_exponent: i32,
        far_exponent: i32,
    },

    /// `exp(-scale * d^2)`, multiplied by `side_penalty` when the vehicle is turning further
    /// away from the line
    Gaussian {
        reference: HeadingReference,
        scale: f64,
        side_penalty: f64,
    },
}

/// The direction the vehicle's heading is compared against.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HeadingReference {
    /// Bearing from the vehicle to the second closest waypoint
    RouteDirection,

    /// The closest waypoint's target heading, or the route direction if it has none
    WaypointHeading,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Composition {
    /// `base + sum(weight * factor)` over distance, speed, heading and progress rate
    Additive {
        base: f64,
        distance_weight: f64,
        speed_weight: f64,
        heading_weight: f64,
        progress_weight: f64,
    },

    /// Mean of the distance, speed and heading factors
    Normalised,

    /// The progress delta factor alone
    ProgressDelta,
}

/// Reasons a parameter set is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("Parameter {0} must be finite, found {1}")]
    NonFinite(&'static str, f64),

    #[error("Parameter {0} must be greater than zero, found {1}")]
    NotPositive(&'static str, f64),

    #[error("Parameter {0} must not be negative, found {1}")]
    Negative(&'static str, f64),

    #[error("Maximum speed ({max}) must be greater than minimum speed ({min})")]
    InvalidSpeedRange { min: f64, max: f64 },

    #[error("Heading threshold must be within [0, 180] degrees, found {0}")]
    InvalidHeadingThreshold(f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Params {
    /// Fixed speed range Gaussian, steep cosine heading and per-step progress summed with
    /// weights, over the plain built-in line.
    pub fn additive() -> Self {
        Self {
            reset_on_episode_start: false,
            locator: LocatorKind::Exhaustive,
            cross_track: CrossTrackMethod::Heron,
            trajectory: TrajectorySource::Builtin {
                line: BuiltinLine::Plain,
            },
            distance: DistanceShaper::Linear,
            speed: SpeedShaper::Gaussian {
                min_speed_ms: 2.0,
                max_speed_ms: 4.0,
            },
            heading: HeadingShaper::CosPower {
                reference: HeadingReference::RouteDirection,
                threshold_deg: 20.0,
                near_exponent: 4,
                far_exponent: 10,
            },
            progress: ProgressShaper::default(),
            composition: Composition::Additive {
                base: 1.0,
                distance_weight: 1.0,
                speed_weight: 10.0,
                heading_weight: 5.0,
                progress_weight: 1.0,
            },
        }
    }

    /// Exponential distance, lookahead speed ratio and side aware heading averaged together,
    /// over the profiled built-in line.
    pub fn normalised() -> Self {
        Self {
            reset_on_episode_start: false,
            locator: LocatorKind::Exhaustive,
            cross_track: CrossTrackMethod::LineCoefficient,
            trajectory: TrajectorySource::Builtin {
                line: BuiltinLine::Profiled,
            },
            distance: DistanceShaper::Exponential {
                decay: 2.0,
                width_fraction: 0.3,
            },
            speed: SpeedShaper::RatioSquared {
                max_speed_ms: 4.0,
                lookahead: 2,
            },
            heading: HeadingShaper::Gaussian {
                reference: HeadingReference::WaypointHeading,
                scale: 0.1,
                side_penalty: 0.7,
            },
            progress: ProgressShaper::default(),
            composition: Composition::Normalised,
        }
    }

    /// Reward only the change in progress between steps.
    pub fn progress_delta() -> Self {
        Self {
            composition: Composition::ProgressDelta,
            ..Self::additive()
        }
    }

    /// Check that every constant is usable.
    pub fn validate(&self) -> Result<(), ParamsError> {
        match self.distance {
            DistanceShaper::Linear => (),
            DistanceShaper::Exponential {
                decay,
                width_fraction,
            } => {
                non_negative("distance.decay", decay)?;
                positive("distance.width_fraction", width_fraction)?;
            }
        }

        match self.speed {
            SpeedShaper::Gaussian {
                min_speed_ms,
                max_speed_ms,
            } => {
                non_negative("speed.min_speed_ms", min_speed_ms)?;
                positive("speed.max_speed_ms", max_speed_ms)?;
                if max_speed_ms <= min_speed_ms {
                    return Err(ParamsError::InvalidSpeedRange {
                        min: min_speed_ms,
                        max: max_speed_ms,
                    });
                }
            }
            SpeedShaper::RatioSquared { max_speed_ms, .. } => {
                positive("speed.max_speed_ms", max_speed_ms)?;
            }
        }

        match self.heading {
            HeadingShaper::CosPower { threshold_deg, .. } => {
                finite("heading.threshold_deg", threshold_deg)?;
                if !(0.0..=180.0).contains(&threshold_deg) {
                    return Err(ParamsError::InvalidHeadingThreshold(threshold_deg));
                }
            }
            HeadingShaper::Gaussian {
                scale,
                side_penalty,
                ..
            } => {
                non_negative("heading.scale", scale)?;
                non_negative("heading.side_penalty", side_penalty)?;
            }
        }

        finite("progress.rate_scale", self.progress.rate_scale)?;
        positive("progress.delta_exponent", self.progress.delta_exponent)?;

        if let Composition::Additive {
            base,
            distance_weight,
            speed_weight,
            heading_weight,
            progress_weight,
        } = self.composition
        {
            finite("composition.base", base)?;
            finite("composition.distance_weight", distance_weight)?;
            finite("composition.speed_weight", speed_weight)?;
            finite("composition.heading_weight", heading_weight)?;
            finite("composition.progress_weight", progress_weight)?;
        }

        Ok(())
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::additive()
    }
}

impl Default for ProgressShaper {
    fn default() -> Self {
        Self {
            rate_scale: 10.0,
            bootstrap_steps: 5,
            delta_exponent: 1.5,
        }
    }
}

impl HeadingShaper {
    /// The direction this shaper compares against.
    pub fn reference(&self) -> HeadingReference {
        match self {
            HeadingShaper::CosPower { reference, .. } => *reference,
            HeadingShaper::Gaussian { reference, .. } => *reference,
        }
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

fn finite(name: &'static str, value: f64) -> Result<(), ParamsError> {
    match value.is_finite() {
        true => Ok(()),
        false => Err(ParamsError::NonFinite(name, value)),
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ParamsError> {
    finite(name, value)?;
    match value > 0.0 {
        true => Ok(()),
        false => Err(ParamsError::NotPositive(name, value)),
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ParamsError> {
    finite(name, value)?;
    match value >= 0.0 {
        true => Ok(()),
        false => Err(ParamsError::Negative(name, value)),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert_eq!(Params::additive().validate(), Ok(()));
        assert_eq!(Params::normalised().validate(), Ok(()));
        assert_eq!(Params::progress_delta().validate(), Ok(()));
    }

    #[test]
    fn test_shipped_params_match_presets() {
        let additive: Params =
            util::params::from_str(include_str!("../../../params/reward_additive.toml")).unwrap();
        assert_eq!(additive, Params::additive());

        let normalised: Params =
            util::params::from_str(include_str!("../../../params/reward_normalised.toml"))
                .unwrap();
        assert_eq!(normalised, Params::normalised());

        let progress_delta: Params =
            util::params::from_str(include_str!("../../../params/reward_progress_delta.toml"))
                .unwrap();
        assert_eq!(
            progress_delta,
            Params {
                locator: LocatorKind::QuadTree,
                ..Params::progress_delta()
            }
        );
    }

    #[test]
    fn test_load_from_toml() {
        let params: Params = util::params::from_str(
            r#"
            locator = "quad_tree"

            [trajectory]
            type = "csv"
            path = "params/line.csv"

            [distance]
            type = "exponential"
            decay = 2.0
            width_fraction = 0.3

            [speed]
            type = "ratio_squared"
            max_speed_ms = 4.0
            lookahead = 2

            [heading]
            type = "gaussian"
            reference = "waypoint_heading"
            scale = 0.1
            side_penalty = 0.7

            [progress]
            rate_scale = 10.0
            bootstrap_steps = 5
            delta_exponent = 1.5

            [composition]
            type = "normalised"
            "#,
        )
        .unwrap();

        assert_eq!(params.locator, LocatorKind::QuadTree);
        assert_eq!(params.cross_track, CrossTrackMethod::Heron);
        assert!(!params.reset_on_episode_start);
        assert_eq!(
            params.trajectory,
            TrajectorySource::Csv {
                path: PathBuf::from("params/line.csv")
            }
        );
        assert_eq!(params.heading.reference(), HeadingReference::WaypointHeading);
        assert_eq!(params.composition, Composition::Normalised);
        assert_eq!(params.validate(), Ok(()));
    }

    #[test]
    fn test_invalid_params() {
        let mut params = Params::additive();
        params.speed = SpeedShaper::Gaussian {
            min_speed_ms: 4.0,
            max_speed_ms: 4.0,
        };
        assert_eq!(
            params.validate(),
            Err(ParamsError::InvalidSpeedRange { min: 4.0, max: 4.0 })
        );

        let mut params = Params::normalised();
        params.distance = DistanceShaper::Exponential {
            decay: 2.0,
            width_fraction: 0.0,
        };
        assert_eq!(
            params.validate(),
            Err(ParamsError::NotPositive("distance.width_fraction", 0.0))
        );

        let mut params = Params::additive();
        params.heading = HeadingShaper::CosPower {
            reference: HeadingReference::RouteDirection,
            threshold_deg: 200.0,
            near_exponent: 4,
            far_exponent: 10,
        };
        assert_eq!(
            params.validate(),
            Err(ParamsError::InvalidHeadingThreshold(200.0))
        );
    }
}
