use std::path::PathBuf;

use thiserror::Error;

use crate::crypto::Algorithm;

/// Help line shown alongside usage and missing-record errors.
pub const HELP: &str = "Use -s to save passphrase hash for practice.";

#[derive(Debug, Error)]
pub enum DrillError {
    #[error("invalid argument. {}", HELP)]
    Usage,

    #[error("the passphrase cannot be empty or \"q\".")]
    EmptyPassphrase,

    #[error("passphrase hash file not found: {}. {}", .0.display(), HELP)]
    RecordNotFound(PathBuf),

    #[error("malformed passphrase hash record: {0}")]
    MalformedRecord(String),

    #[error("unsupported key derivation function '{0}'")]
    UnsupportedAlgorithm(String),

    #[error("the saved hash uses {0}, which is not available in this build. Use -s to save it again.")]
    AlgorithmUnavailable(Algorithm),

    #[error("invalid key derivation parameters: {0}")]
    InvalidParams(String),

    #[error("OS random generator unavailable")]
    Random,

    #[error("unexpected end of input")]
    UnexpectedEof,
}

impl DrillError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            DrillError::Usage => 1,
            DrillError::RecordNotFound(_) => 2,
            DrillError::AlgorithmUnavailable(_) => 3,
            DrillError::MalformedRecord(_) | DrillError::UnsupportedAlgorithm(_) => 4,
            DrillError::EmptyPassphrase
            | DrillError::InvalidParams(_)
            | DrillError::Random
            | DrillError::UnexpectedEof => 5,
        }
    }
}

/// Exit status for failures that are not a [`DrillError`].
pub const EXIT_FAILURE: u8 = 5;
