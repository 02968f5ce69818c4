//! Error types for esmplot-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the esmplot-io crate.
///
/// Covers missing files, failures reported by the NetCDF library, variables
/// or dimensions that a dataset does not provide, and shape problems found
/// while assembling gridded fields.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a requested variable is not present in a file.
    #[error(
        "variable '{name}' not found in {}; available variables: {}",
        path.display(),
        available.join(", ")
    )]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
        /// Data variables the file does provide.
        available: Vec<String>,
    },

    /// Returned when none of the accepted names for a logical axis is present.
    #[error(
        "no {axis} dimension found (expected one of: {}); available dimensions: {}",
        candidates.join(", "),
        available.join(", ")
    )]
    MissingDimension {
        /// Logical axis that was looked up (e.g. "pressure").
        axis: String,
        /// Names that were tried, in priority order.
        candidates: Vec<String>,
        /// Dimensions the variable actually has.
        available: Vec<String>,
    },

    /// Returned when a dimension has an unexpected size.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}
