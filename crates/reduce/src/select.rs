//! Dimension-level selection helpers shared by the reductions.

use std::collections::BTreeMap;

use esmplot_io::GriddedVariable;
use ndarray::{ArrayD, Axis as NdAxis};

use crate::error::ReduceError;

/// Take index `idx` along dimension `dim`, dropping that dimension.
pub(crate) fn index_dim(
    var: GriddedVariable,
    dim: &str,
    idx: usize,
) -> Result<GriddedVariable, ReduceError> {
    let Some(k) = var.dim_index(dim) else {
        return Ok(var);
    };
    if var.shape()[k] <= idx {
        return Err(ReduceError::EmptyDimension {
            var: var.name().to_string(),
            dim: dim.to_string(),
        });
    }
    let data = var.data().index_axis(NdAxis(k), idx).to_owned();
    rebuild_without(var, k, data)
}

/// Drop every length-1 dimension not listed in `keep`.
pub(crate) fn squeeze(mut var: GriddedVariable, keep: &[&str]) -> Result<GriddedVariable, ReduceError> {
    while let Some(dim) = var
        .dims()
        .iter()
        .zip(var.shape())
        .find(|(d, n)| **n == 1 && !keep.contains(&d.as_str()))
        .map(|(d, _)| d.clone())
    {
        var = index_dim(var, &dim, 0)?;
    }
    Ok(var)
}

/// Replace the data of `var` with `data`, which lacks dimension `k`.
pub(crate) fn rebuild_without(
    var: GriddedVariable,
    k: usize,
    data: ArrayD<f64>,
) -> Result<GriddedVariable, ReduceError> {
    let (name, mut dims, _, mut coords, units) = var.into_parts();
    let removed = dims.remove(k);
    coords.remove(&removed);
    Ok(GriddedVariable::new(name, dims, data, coords, units)?)
}

/// Replace the data of `var` with `data`, which lacks every dimension in
/// `removed` (listed by name).
pub(crate) fn rebuild_without_many(
    var: GriddedVariable,
    removed: &[&str],
    data: ArrayD<f64>,
) -> Result<GriddedVariable, ReduceError> {
    let (name, dims, _, coords, units) = var.into_parts();
    let dims: Vec<String> = dims
        .into_iter()
        .filter(|d| !removed.contains(&d.as_str()))
        .collect();
    let coords: BTreeMap<String, Vec<f64>> = coords
        .into_iter()
        .filter(|(d, _)| !removed.contains(&d.as_str()))
        .collect();
    Ok(GriddedVariable::new(name, dims, data, coords, units)?)
}
