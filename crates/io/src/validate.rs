//! Checks that a set of fields can share one figure.
//!
//! Problems are gathered in a [`ValidationCollector`] so a single run
//! reports every unusable input at once instead of stopping at the first.

use crate::error::IoError;
use crate::field::{CoordNames, Field2d};

// ---------------------------------------------------------------------------
// ValidationCollector
// ---------------------------------------------------------------------------

/// Problems found while checking the inputs of one figure.
#[derive(Debug, Default)]
pub struct ValidationCollector {
    problems: Vec<String>,
}

impl ValidationCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, problem: impl Into<String>) {
        self.problems.push(problem.into());
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    /// `Ok(())` when nothing was recorded, otherwise one
    /// [`IoError::Validation`] whose details join the problems with `"; "`.
    pub fn finish(self) -> Result<(), IoError> {
        match self.problems.len() {
            0 => Ok(()),
            count => Err(IoError::Validation {
                count,
                details: self.problems.join("; "),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Figure-level checks
// ---------------------------------------------------------------------------

/// Check that every `(label, field)` pair is plottable alongside the others.
///
/// Each field must be sampled against `names`, have at least one grid cell,
/// and contain at least one finite value.
pub fn validate_figure_fields<'a>(
    names: &CoordNames,
    fields: impl IntoIterator<Item = (&'a str, &'a Field2d)>,
) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    for (label, field) in fields {
        if field.coord_names() != names {
            c.push(format!(
                "{label}: sampled against {}/{} but the figure uses {}/{}",
                field.coord_names().lat(),
                field.coord_names().lon(),
                names.lat(),
                names.lon()
            ));
        }
        if field.values().is_empty() {
            c.push(format!("{label}: empty grid"));
        } else if field.finite_range().is_none() {
            c.push(format!("{label}: no finite values"));
        }
    }

    c
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
