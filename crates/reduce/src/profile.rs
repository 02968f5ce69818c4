//! One-dimensional vertical profiles.

use esmplot_io::{Axis, AxisAliases, GriddedVariable};

use crate::error::ReduceError;

/// Values on pressure levels (hPa), one value per level.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    name: String,
    levels: Vec<f64>,
    values: Vec<f64>,
}

impl Profile {
    /// # Errors
    ///
    /// Returns [`ReduceError::ProfileLength`] if `levels` and `values`
    /// differ in length.
    pub fn new(
        name: impl Into<String>,
        levels: Vec<f64>,
        values: Vec<f64>,
    ) -> Result<Self, ReduceError> {
        let name = name.into();
        if levels.len() != values.len() {
            return Err(ReduceError::ProfileLength {
                name,
                levels: levels.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            name,
            levels,
            values,
        })
    }

    /// Convert a variable whose only dimension is a pressure axis.
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError::NotAProfile`] if `var` is not 1-D along a
    /// pressure alias, and [`ReduceError::MissingCoordinate`] if the
    /// pressure dimension has no coordinate values.
    pub fn from_variable(var: &GriddedVariable, aliases: &AxisAliases) -> Result<Self, ReduceError> {
        let dims = var.dims();
        if dims.len() != 1 || !aliases.is_alias(Axis::Pressure, &dims[0]) {
            return Err(ReduceError::NotAProfile {
                var: var.name().to_string(),
                dims: dims.to_vec(),
            });
        }
        let levels = var
            .coord(&dims[0])
            .ok_or_else(|| ReduceError::MissingCoordinate {
                var: var.name().to_string(),
                dim: dims[0].clone(),
            })?
            .to_vec();
        Self::new(var.name(), levels, var.data().iter().copied().collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pressure levels in hPa.
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Apply `f` to every value.
    pub fn map_values(mut self, f: impl Fn(f64) -> f64) -> Self {
        self.values.iter_mut().for_each(|v| *v = f(*v));
        self
    }

    /// Iterate `(level, value)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.levels.iter().copied().zip(self.values.iter().copied())
    }
}
