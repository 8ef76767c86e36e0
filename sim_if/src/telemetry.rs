//! # Telemetry
//!
//! The host supplies a flat mapping of named values every step. This module converts that mapping
//! into a typed [`Telemetry`] record, failing loudly if anything is missing or malformed. No
//! defaults are ever synthesised for missing fields.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Maximum value of the progress field, in percent.
pub const MAX_PROGRESS_PCT: f64 = 100.0;

/// Names of all fields the host must provide on every call.
pub const REQUIRED_FIELDS: [&str; 9] = [
    "x",
    "y",
    "heading",
    "speed",
    "track_width",
    "all_wheels_on_track",
    "is_offtrack",
    "progress",
    "steps",
];

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Telemetry of the vehicle for a single simulation step.
///
/// Positions are in the same frame as the reference trajectory.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub struct Telemetry {
    /// Position of the vehicle along the X axis
    ///
    /// Units: meters
    pub x: f64,

    /// Position of the vehicle along the Y axis
    ///
    /// Units: meters
    pub y: f64,

    /// Heading of the vehicle, using the same sign convention as the trajectory headings.
    ///
    /// Units: degrees
    pub heading: f64,

    /// Speed of the vehicle
    ///
    /// Units: meters/second
    pub speed: f64,

    /// Width of the track
    ///
    /// Units: meters
    pub track_width: f64,

    /// True if all four wheels are on the drivable surface
    pub all_wheels_on_track: bool,

    /// True if the host considers the vehicle to have left the track
    pub is_offtrack: bool,

    /// Percentage of the track completed this episode, in [0, 100].
    pub progress: f64,

    /// Step counter within the episode, starting at 1.
    pub steps: u64,
}

// ------------------------------------------------------------------------------------------------
// ENUMERATIONS
// ------------------------------------------------------------------------------------------------

/// Malformed telemetry. Any of these indicates a bug in the host's telemetry pipeline.
#[derive(Debug, Error, PartialEq)]
pub enum TelemetryError {
    #[error("Telemetry is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Telemetry must be a JSON object, found {0}")]
    NotAnObject(String),

    #[error("Required telemetry field `{0}` is missing")]
    MissingField(&'static str),

    #[error("Telemetry field `{field}` should be {expected}, found {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("Telemetry field `{0}` is not finite ({1})")]
    NonFinite(&'static str, f64),

    #[error("Telemetry field `{field}` is out of range ({value}), expected {range}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        range: &'static str,
    },
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl Telemetry {
    /// Parse telemetry from a JSON object string.
    pub fn from_json(json_str: &str) -> Result<Self, TelemetryError> {
        let val: Value = serde_json::from_str(json_str)
            .map_err(|e| TelemetryError::InvalidJson(format!("{}", e)))?;

        match val {
            Value::Object(ref map) => Self::from_params(map),
            other => Err(TelemetryError::NotAnObject(other.to_string())),
        }
    }

    /// Build telemetry from the host's parameter mapping.
    ///
    /// Unknown keys are ignored, the host usually supplies many more fields than the scorer
    /// needs.
    pub fn from_params(params: &Map<String, Value>) -> Result<Self, TelemetryError> {
        let telem = Self {
            x: get_f64(params, "x")?,
            y: get_f64(params, "y")?,
            heading: get_f64(params, "heading")?,
            speed: get_f64(params, "speed")?,
            track_width: get_f64(params, "track_width")?,
            all_wheels_on_track: get_bool(params, "all_wheels_on_track")?,
            is_offtrack: get_bool(params, "is_offtrack")?,
            progress: get_f64(params, "progress")?,
            steps: get_u64(params, "steps")?,
        };

        telem.validate()?;

        Ok(telem)
    }

    /// Check that every field is finite and within its allowed range.
    pub fn validate(&self) -> Result<(), TelemetryError> {
        for (field, value) in [
            ("x", self.x),
            ("y", self.y),
            ("heading", self.heading),
            ("speed", self.speed),
            ("track_width", self.track_width),
            ("progress", self.progress),
        ]
        .iter()
        {
            if !value.is_finite() {
                return Err(TelemetryError::NonFinite(*field, *value));
            }
        }

        if self.speed < 0.0 {
            return Err(TelemetryError::OutOfRange {
                field: "speed",
                value: self.speed,
                range: ">= 0",
            });
        }

        if self.track_width <= 0.0 {
            return Err(TelemetryError::OutOfRange {
                field: "track_width",
                value: self.track_width,
                range: "> 0",
            });
        }

        if self.progress < 0.0 || self.progress > MAX_PROGRESS_PCT {
            return Err(TelemetryError::OutOfRange {
                field: "progress",
                value: self.progress,
                range: "[0, 100]",
            });
        }

        if self.steps == 0 {
            return Err(TelemetryError::OutOfRange {
                field: "steps",
                value: 0.0,
                range: ">= 1",
            });
        }

        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn get_value<'a>(
    params: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, TelemetryError> {
    params.get(field).ok_or(TelemetryError::MissingField(field))
}

fn get_f64(params: &Map<String, Value>, field: &'static str) -> Result<f64, TelemetryError> {
    let val = get_value(params, field)?;
    val.as_f64().ok_or_else(|| TelemetryError::WrongType {
        field,
        expected: "a number",
        found: val.to_string(),
    })
}

fn get_bool(params: &Map<String, Value>, field: &'static str) -> Result<bool, TelemetryError> {
    let val = get_value(params, field)?;
    val.as_bool().ok_or_else(|| TelemetryError::WrongType {
        field,
        expected: "a boolean",
        found: val.to_string(),
    })
}

fn get_u64(params: &Map<String, Value>, field: &'static str) -> Result<u64, TelemetryError> {
    let val = get_value(params, field)?;
    val.as_u64().ok_or_else(|| TelemetryError::WrongType {
        field,
        expected: "a non-negative integer",
        found: val.to_string(),
    })
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn valid_params() -> Map<String, Value> {
        match json!({
            "x": 3.2,
            "y": 0.7,
            "heading": -1.5,
            "speed": 3.0,
            "track_width": 1.07,
            "all_wheels_on_track": true,
            "is_offtrack": false,
            "progress": 12.5,
            "steps": 4,
            "closest_waypoints": [1, 2]
        }) {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_parse_valid() {
        let telem = Telemetry::from_params(&valid_params()).unwrap();

        assert_eq!((telem.x, telem.y), (3.2, 0.7));
        assert_eq!(telem.steps, 4);
        assert!(telem.all_wheels_on_track);
    }

    #[test]
    fn test_every_field_required() {
        for field in REQUIRED_FIELDS.iter() {
            let mut params = valid_params();
            params.remove(*field);

            assert_eq!(
                Telemetry::from_params(&params),
                Err(TelemetryError::MissingField(*field))
            );
        }
    }

    #[test]
    fn test_wrong_types() {
        let mut params = valid_params();
        params.insert("is_offtrack".into(), json!(0));
        assert!(matches!(
            Telemetry::from_params(&params),
            Err(TelemetryError::WrongType { field: "is_offtrack", .. })
        ));

        let mut params = valid_params();
        params.insert("steps".into(), json!(1.5));
        assert!(matches!(
            Telemetry::from_params(&params),
            Err(TelemetryError::WrongType { field: "steps", .. })
        ));

        let mut params = valid_params();
        params.insert("x".into(), json!("3.2"));
        assert!(matches!(
            Telemetry::from_params(&params),
            Err(TelemetryError::WrongType { field: "x", .. })
        ));
    }

    #[test]
    fn test_out_of_range() {
        let mut params = valid_params();
        params.insert("track_width".into(), json!(-1.0));
        assert!(matches!(
            Telemetry::from_params(&params),
            Err(TelemetryError::OutOfRange { field: "track_width", .. })
        ));

        let mut params = valid_params();
        params.insert("steps".into(), json!(0));
        assert!(matches!(
            Telemetry::from_params(&params),
            Err(TelemetryError::OutOfRange { field: "steps", .. })
        ));

        let mut telem = Telemetry::from_params(&valid_params()).unwrap();
        telem.x = f64::NAN;
        assert!(matches!(
            telem.validate(),
            Err(TelemetryError::NonFinite("x", _))
        ));
    }

    #[test]
    fn test_from_json() {
        let telem = Telemetry::from_json(
            r#"{"x": 1, "y": 2, "heading": 0, "speed": 0, "track_width": 1,
                "all_wheels_on_track": false, "is_offtrack": false,
                "progress": 0, "steps": 1}"#,
        )
        .unwrap();
        assert!(!telem.all_wheels_on_track);

        assert!(matches!(
            Telemetry::from_json("[1, 2]"),
            Err(TelemetryError::NotAnObject(_))
        ));
        assert!(matches!(
            Telemetry::from_json("{"),
            Err(TelemetryError::InvalidJson(_))
        ));
    }
}
