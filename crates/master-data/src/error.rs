//! Error types for the master-data crate.
//!
//! Registry failures are reported with enough context (section, index and
//! offending value) for an operator to fix the JSON file by hand.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when parsing or querying a master-data registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// Two seed definitions share a name.
    #[error("seed '{name}' is defined more than once")]
    DuplicateSeed {
        /// The repeated seed name.
        name: String,
    },

    /// A name or label in the registry is blank.
    #[error("blank value in {section} at index {index}")]
    BlankValue {
        /// Registry section containing the blank entry.
        section: &'static str,
        /// Position of the entry within its section.
        index: usize,
    },

    /// A section lists the same name twice.
    #[error("duplicate entry '{value}' in {section}")]
    DuplicateEntry {
        /// Registry section containing the repeated entry.
        section: &'static str,
        /// The repeated value.
        value: String,
    },

    /// A recruit year lies outside the accepted range.
    #[error("recruit year {year} at index {index} is outside {min}..={max}")]
    YearOutOfRange {
        /// Position of the recruit year entry.
        index: usize,
        /// Offending year.
        year: i32,
        /// Smallest accepted year.
        min: i32,
        /// Largest accepted year.
        max: i32,
    },

    /// The administrator password is shorter than the accepted minimum.
    #[error("administrator password must be at least {min_len} characters")]
    WeakAdministratorPassword {
        /// Minimum accepted length.
        min_len: usize,
    },

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },
}
