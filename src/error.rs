use std::num::ParseFloatError;
use std::str::Utf8Error;

use thiserror::Error;

/// Everything that can go wrong while indexing or parsing a trajectory.
///
/// Line numbers are zero-based and counted from the start of the configuration that was being
/// parsed, not from the start of the file.
#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("incorrect number of particles: expected {expected}, found {found}")]
    ParticleCount { expected: usize, found: usize },

    #[error("line {line}: expected '=' in the {field} header")]
    MissingDelimiter { line: usize, field: &'static str },

    #[error("line {line}: expected {expected} values for {field}, found {found}")]
    MissingValues {
        line: usize,
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: unexpected value '{token}' after {field}")]
    TrailingValue {
        line: usize,
        field: &'static str,
        token: String,
    },

    #[error("line {line}: could not parse '{token}' as a number")]
    Float {
        line: usize,
        token: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("configuration at byte {offset} is not valid text")]
    Utf8 {
        offset: u64,
        #[source]
        source: Utf8Error,
    },

    #[error("trajectory contains no configurations")]
    EmptyTrajectory,
}

pub type Result<T> = std::result::Result<T, Error>;
