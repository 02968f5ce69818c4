//! Leading time-dimension reduction.

use esmplot_io::{Axis, AxisAliases, GriddedVariable};
use tracing::debug;

use crate::error::ReduceError;
use crate::select::index_dim;

/// Take the first time step of `var`.
///
/// The time dimension is the first of the time aliases present in `var`
/// (`time`, then `valid_time` by default). Index 0 is selected; the
/// remaining steps are discarded, never aggregated. A variable without a
/// time dimension is returned unchanged.
///
/// # Errors
///
/// Returns [`ReduceError::EmptyDimension`] if the time dimension has no
/// steps.
pub fn select_first_time(
    var: GriddedVariable,
    aliases: &AxisAliases,
) -> Result<GriddedVariable, ReduceError> {
    let Some(dim) = aliases.find(Axis::Time, var.dims()).map(str::to_string) else {
        debug!(var = var.name(), dims = ?var.dims(), "no time dimension found");
        return Ok(var);
    };
    debug!(var = var.name(), dim = %dim, "selecting time index 0");
    index_dim(var, &dim, 0)
}
