//! Struct archiving functionality
//!
//! To add archiving functionality to a struct implement the `Archived` trait.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use csv::WriterBuilder;
pub use csv::Writer;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::path::Path;

// Internal imports
use crate::session::Session;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An object used to write CSV archive files.
///
/// A default archiver has no writer and silently discards records, which is what modules use
/// when running without a session.
#[derive(Default)]
pub struct Archiver {
    writer: Option<Writer<File>>,
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A trait which enables a struct to be archived as a csv.
///
/// To implement this trait, the struct shall have an `Archiver` member which
/// shall be setup in the struct's `init` or `new` functions.
pub trait Archived {
    /// Write the archives for this struct
    fn write(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Archiver {
    /// Create a new archiver from a paricular path relative to the session's
    /// archive root.
    ///
    /// Records must be flat (no nested structs or sequences).
    pub fn from_path<P: AsRef<Path>>(
        session: &Session,
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let session_path = session.arch_root.join(path);

        // Create any parent directories, then truncate the file
        if let Some(parent) = session_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        File::create(&session_path)?;

        // Open the file in append mode
        let file = OpenOptions::new().append(true).open(session_path)?;

        let w = WriterBuilder::new().has_headers(true).from_writer(file);

        Ok(Self { writer: Some(w) })
    }

    /// True if records passed to `serialise` are written somewhere.
    pub fn is_active(&self) -> bool {
        self.writer.is_some()
    }

    /// Serialise a record into the archive.
    pub fn serialise<T: Serialize>(&mut self, record: T) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(ref mut w) = self.writer {
            w.serialize(record)?;
            w.flush()?
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        step: u64,
        reward: f64,
        index: Option<usize>,
    }

    #[test]
    fn test_archiver_writes_header_and_rows() {
        let dir = std::env::temp_dir().join("reward_util_archive_test");
        let session = Session::in_dir("unit", &dir).unwrap();

        let mut arch = Archiver::from_path(&session, "module/rows.csv").unwrap();
        assert!(arch.is_active());

        arch.serialise(Row {
            step: 1,
            reward: 0.5,
            index: Some(3),
        })
        .unwrap();
        arch.serialise(Row {
            step: 2,
            reward: 0.25,
            index: None,
        })
        .unwrap();

        let text = std::fs::read_to_string(session.arch_root.join("module/rows.csv")).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["step,reward,index", "1,0.5,3", "2,0.25,"]);
    }

    #[test]
    fn test_default_archiver_discards() {
        let mut arch = Archiver::default();
        assert!(!arch.is_active());
        arch.serialise(Row {
            step: 1,
            reward: 1.0,
            index: None,
        })
        .unwrap();
    }
}
