//! Reduction error types.

use esmplot_io::IoError;

/// Errors that can occur while reducing gridded variables.
#[derive(Debug, thiserror::Error)]
pub enum ReduceError {
    /// A dimension or coordinate lookup failed in the underlying variable.
    #[error(transparent)]
    Io(#[from] IoError),

    /// A dimension exists but has no coordinate values to select on.
    #[error("dimension '{dim}' of '{var}' has no coordinate values")]
    MissingCoordinate { var: String, dim: String },

    /// A dimension that must be indexed is empty.
    #[error("dimension '{dim}' of '{var}' has length 0")]
    EmptyDimension { var: String, dim: String },

    /// No pressure level falls inside the requested band.
    #[error("no pressure level of '{var}' lies within {high}-{low} hPa (levels: {levels:?})")]
    EmptyBand {
        var: String,
        high: f64,
        low: f64,
        levels: Vec<f64>,
    },

    /// A pressure band was constructed from invalid bounds.
    #[error("invalid pressure band {a}-{b} hPa: bounds must be finite and positive")]
    InvalidBand { a: f64, b: f64 },

    /// Interpolation needs at least two finite samples.
    #[error("profile '{name}' has {found} finite level(s); at least 2 are needed to interpolate")]
    InsufficientLevels { name: String, found: usize },

    /// A profile must be one-dimensional along the pressure axis.
    #[error("'{var}' is not a vertical profile: remaining dimensions {dims:?}")]
    NotAProfile { var: String, dims: Vec<String> },

    /// Levels and values of a profile differ in length.
    #[error("profile '{name}' has {levels} levels but {values} values")]
    ProfileLength {
        name: String,
        levels: usize,
        values: usize,
    },
}
