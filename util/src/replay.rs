//! # Telemetry replay module
//!
//! Reads a recorded telemetry log so that the scoring engine can be run without the simulation
//! host. The log is JSON lines: one host parameter mapping per line. Blank lines and lines
//! starting with `#` are skipped.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single recorded step.
pub struct RecordedStep {
    /// Line of the log the step was read from, starting at 1
    pub line_num: usize,

    /// The host parameter mapping for this step
    pub params: Map<String, Value>,
}

/// A telemetry replay log.
///
/// Steps are handed out in the order they were recorded by `next_step`.
pub struct ReplayLog {
    log_path: PathBuf,
    steps: VecDeque<RecordedStep>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Could not find the replay log at {0:?}")]
    LogNotFound(PathBuf),

    #[error("Could not load the replay log: {0}")]
    LogLoadError(std::io::Error),

    #[error("The replay log contains no steps")]
    LogEmpty,

    #[error("Line {0} of the replay log is not valid JSON: {1}")]
    InvalidJson(usize, serde_json::Error),

    #[error("Line {0} of the replay log is not a JSON object")]
    NotAnObject(usize),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ReplayLog {
    /// Load a replay log from the given path.
    pub fn new<P: AsRef<Path>>(log_path: P) -> Result<Self, ReplayError> {
        let path = log_path.as_ref().to_path_buf();

        // Check that the log file exists.
        if !path.exists() {
            return Err(ReplayError::LogNotFound(path));
        }

        let text = fs::read_to_string(&path).map_err(ReplayError::LogLoadError)?;

        let mut log = Self::from_str(&text)?;
        log.log_path = path;

        Ok(log)
    }

    /// Parse a replay log from its text.
    pub fn from_str(text: &str) -> Result<Self, ReplayError> {
        let mut steps = VecDeque::new();

        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let val: Value =
                serde_json::from_str(line).map_err(|e| ReplayError::InvalidJson(i + 1, e))?;

            match val {
                Value::Object(params) => steps.push_back(RecordedStep {
                    line_num: i + 1,
                    params,
                }),
                _ => return Err(ReplayError::NotAnObject(i + 1)),
            }
        }

        if steps.is_empty() {
            return Err(ReplayError::LogEmpty);
        }

        Ok(Self {
            log_path: PathBuf::new(),
            steps,
        })
    }

    /// Take the next recorded step, or `None` at the end of the log.
    pub fn next_step(&mut self) -> Option<RecordedStep> {
        self.steps.pop_front()
    }

    /// Get the number of steps remaining in the log
    pub fn get_num_steps(&self) -> usize {
        self.steps.len()
    }

    /// Get the path the log was loaded from (empty if parsed from a string)
    pub fn get_path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_log() {
        let mut log = ReplayLog::from_str(
            "# recorded lap\n\
             {\"x\": 1.0, \"steps\": 1}\n\
             \n\
             {\"x\": 1.5, \"steps\": 2}\n",
        )
        .unwrap();

        assert_eq!(log.get_num_steps(), 2);

        let first = log.next_step().unwrap();
        assert_eq!(first.line_num, 2);
        assert_eq!(first.params["steps"], 1);

        let second = log.next_step().unwrap();
        assert_eq!(second.line_num, 4);
        assert!(log.next_step().is_none());
    }

    #[test]
    fn test_invalid_logs() {
        assert!(matches!(
            ReplayLog::from_str("# nothing\n\n"),
            Err(ReplayError::LogEmpty)
        ));
        assert!(matches!(
            ReplayLog::from_str("{\"x\": 1}\n[1, 2]"),
            Err(ReplayError::NotAnObject(2))
        ));
        assert!(matches!(
            ReplayLog::from_str("{\"x\": "),
            Err(ReplayError::InvalidJson(1, _))
        ));
        assert!(matches!(
            ReplayLog::new("/no/such/replay.jsonl"),
            Err(ReplayError::LogNotFound(_))
        ));
    }
}
