//! Error types for the esmplot-layout crate.

/// Error type for all fallible operations in the esmplot-layout crate.
///
/// Covers malformed command-line ranges, projection names outside the
/// supported catalog, and color-scale configuration problems.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// Returned when a projection name is not in the catalog.
    #[error(
        "unsupported projection '{name}' (expected one of: PlateCarree, Robinson, NorthPolarStereo, SouthPolarStereo)"
    )]
    UnknownProjection {
        /// The name that was provided.
        name: String,
    },

    /// Returned when a `min,max` range string cannot be parsed.
    #[error("invalid range '{input}': {reason}")]
    InvalidRange {
        /// The raw argument.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Returned when a colormap name is not recognised.
    #[error("unknown colormap '{name}'")]
    UnknownColormap {
        /// The name that was provided.
        name: String,
    },

    /// Returned when an output format name is not `png` or `svg`.
    #[error("unknown output format '{name}' (expected png or svg)")]
    UnknownFormat {
        /// The name that was provided.
        name: String,
    },

    /// Returned when a color scale has unusable bounds or step.
    #[error("invalid color scale {min}..{max} step {step}: {reason}")]
    InvalidScale {
        min: f64,
        max: f64,
        step: f64,
        reason: String,
    },

    /// Returned when no color scale is known for a variable.
    #[error("no color scale configured for variable '{var}'; add a [scales.{var}] table")]
    MissingScale {
        /// Variable name.
        var: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_unknown_projection() {
        let err = LayoutError::UnknownProjection {
            name: "Mercenary".into(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported projection 'Mercenary' (expected one of: PlateCarree, Robinson, NorthPolarStereo, SouthPolarStereo)"
        );
    }

    #[test]
    fn error_invalid_range() {
        let err = LayoutError::InvalidRange {
            input: "abc".into(),
            reason: "expected 'min,max'".into(),
        };
        assert_eq!(err.to_string(), "invalid range 'abc': expected 'min,max'");
    }

    #[test]
    fn error_missing_scale() {
        let err = LayoutError::MissingScale { var: "pr".into() };
        assert!(err.to_string().contains("[scales.pr]"));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<LayoutError>();
    }
}
