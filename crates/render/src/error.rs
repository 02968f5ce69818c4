//! Error types for the esmplot-render crate.

use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;

/// Error type for all fallible operations in the esmplot-render crate.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Wraps a failure reported by the drawing backend.
    #[error("drawing failed: {reason}")]
    Draw {
        /// Description of the backend failure.
        reason: String,
    },

    /// Returned when a panel's field was not supplied.
    #[error("no field supplied for panel '{role}'")]
    MissingField {
        /// Input key of the panel.
        role: String,
    },

    /// Returned when the figure has nothing to draw.
    #[error("figure '{name}' has no data to draw")]
    EmptyFigure {
        /// Figure name or output path.
        name: String,
    },

    /// Returned when the output image could not be written.
    #[error("failed to write {}: {reason}", path.display())]
    Output {
        /// Output path.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Draw {
            reason: e.to_string(),
        }
    }
}
