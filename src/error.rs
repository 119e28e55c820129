//! Error types for loading parameters and writing output.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Wave1dError>;

/// A problem with the contents of a parameter file.
///
/// Token errors mean the file could not be read as a parameter list at all.
/// The remaining variants each name one violated physical constraint.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("missing value for '{name}'")]
    MissingToken { name: &'static str },

    #[error("value '{token}' for '{name}' is not a number")]
    InvalidNumber { name: &'static str, token: String },

    #[error("wave speed c must be positive")]
    NonPositiveWaveSpeed,

    #[error("damping time tau must be positive")]
    NonPositiveDampingTime,

    #[error("x1 must be less than x2")]
    EmptyDomain,

    #[error("dx must be positive")]
    NonPositiveSpatialStep,

    #[error("dx too large for domain")]
    SpatialStepTooLarge,

    #[error("runtime must be positive or zero")]
    NegativeRuntime,

    #[error("outtime must be positive or zero")]
    NegativeOutputInterval,

    #[error("no output filename given")]
    MissingOutputFile,

    #[error("grid of {ngrid} points has no interior, dx too large for domain")]
    GridTooCoarse { ngrid: usize },

    #[error("derived {name} is too large, check the domain, dx, c and runtime")]
    CountOverflow { name: &'static str },
}

impl ParameterError {
    /// Token errors are about the file format, everything else is a
    /// value out of range.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ParameterError::MissingToken { .. }
                | ParameterError::InvalidNumber { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum Wave1dError {
    #[error("parameter file '{}' not found", .0.display())]
    ParameterFileNotFound(PathBuf),

    #[error("error while reading file '{}': {source}", .path.display())]
    ParameterFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parameter error in file '{}': {source}", .path.display())]
    Parameter {
        path: PathBuf,
        #[source]
        source: ParameterError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Wave1dError {
    /// Process exit status for this error class.
    pub fn exit_code(&self) -> u8 {
        match self {
            Wave1dError::ParameterFileNotFound(_) => 2,
            Wave1dError::ParameterFileRead { .. } => 3,
            Wave1dError::Parameter { source, .. } if source.is_malformed() => 3,
            Wave1dError::Parameter { .. } => 4,
            Wave1dError::Io(_) => 5,
        }
    }
}
