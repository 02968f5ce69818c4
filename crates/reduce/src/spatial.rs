//! Area means over the latitude/longitude plane.

use esmplot_io::GriddedVariable;
use ndarray::{ArrayD, Axis as NdAxis, IxDyn};

use crate::error::ReduceError;
use crate::select::rebuild_without_many;
use crate::stats::nan_mean;

/// NaN-skipping mean of `var` over both `lat_dim` and `lon_dim` jointly.
///
/// Every remaining dimension is kept in its original order. The mean is
/// unweighted: each grid cell counts once.
///
/// # Errors
///
/// Returns [`ReduceError::Io`] wrapping a missing-dimension error if either
/// spatial dimension is absent.
pub fn spatial_mean(
    var: GriddedVariable,
    lat_dim: &str,
    lon_dim: &str,
) -> Result<GriddedVariable, ReduceError> {
    let missing = |axis: &str, name: &str| esmplot_io::IoError::MissingDimension {
        axis: axis.to_string(),
        candidates: vec![name.to_string()],
        available: var.dims().to_vec(),
    };
    let lat_k = var
        .dim_index(lat_dim)
        .ok_or_else(|| missing("latitude", lat_dim))?;
    let lon_k = var
        .dim_index(lon_dim)
        .ok_or_else(|| missing("longitude", lon_dim))?;

    // Move the spatial axes last, then flatten them into one.
    let outer: Vec<usize> = (0..var.dims().len())
        .filter(|&k| k != lat_k && k != lon_k)
        .collect();
    let mut order = outer.clone();
    order.extend([lat_k, lon_k]);

    let shape = var.shape();
    let outer_shape: Vec<usize> = outer.iter().map(|&k| shape[k]).collect();
    let n_outer: usize = outer_shape.iter().product();
    let n_cells = shape[lat_k] * shape[lon_k];

    let permuted = var.data().view().permuted_axes(IxDyn(&order));
    let flat: Vec<f64> = permuted.iter().copied().collect();
    let rows = ndarray::Array2::from_shape_vec((n_outer, n_cells), flat).map_err(|e| {
        esmplot_io::IoError::Validation {
            count: 1,
            details: format!("cannot flatten '{}' for area mean: {e}", var.name()),
        }
    })?;

    let means: Vec<f64> = rows
        .axis_iter(NdAxis(0))
        .map(|row| nan_mean(row.iter().copied()))
        .collect();
    let data = ArrayD::from_shape_vec(IxDyn(&outer_shape), means).map_err(|e| {
        esmplot_io::IoError::Validation {
            count: 1,
            details: format!("cannot reshape area mean of '{}': {e}", var.name()),
        }
    })?;

    rebuild_without_many(var, &[lat_dim, lon_dim], data)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use approx::assert_abs_diff_eq;

    use super::*;

    fn var(dims: &[&str], shape: &[usize], data: Vec<f64>) -> GriddedVariable {
        let mut coords = BTreeMap::new();
        for (d, &n) in dims.iter().zip(shape) {
            coords.insert(d.to_string(), (0..n).map(|i| 100.0 * (i + 1) as f64).collect());
        }
        GriddedVariable::new(
            "ta",
            dims.iter().map(|s| s.to_string()).collect(),
            ArrayD::from_shape_vec(IxDyn(shape), data).unwrap(),
            coords,
            None,
        )
        .unwrap()
    }

    #[test]
    fn mean_over_both_axes_keeps_pressure() {
        // [plev=2, lat=2, lon=2]
        let v = var(
            &["plev", "lat", "lon"],
            &[2, 2, 2],
            vec![1.0, 2.0, 3.0, 4.0, 10.0, 20.0, 30.0, 40.0],
        );
        let out = spatial_mean(v, "lat", "lon").unwrap();
        assert_eq!(out.dims(), &["plev"]);
        assert_eq!(out.coord("plev"), Some(&[100.0, 200.0][..]));
        assert_abs_diff_eq!(out.data()[[0]], 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(out.data()[[1]], 25.0, epsilon = 1e-12);
    }

    #[test]
    fn spatial_axes_in_any_position() {
        // [lat=2, plev=2, lon=1]
        let v = var(&["lat", "plev", "lon"], &[2, 2, 1], vec![1.0, 10.0, 3.0, 30.0]);
        let out = spatial_mean(v, "lat", "lon").unwrap();
        assert_eq!(out.dims(), &["plev"]);
        assert_abs_diff_eq!(out.data()[[0]], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out.data()[[1]], 20.0, epsilon = 1e-12);
    }

    #[test]
    fn nan_cells_are_skipped() {
        let v = var(&["plev", "lat", "lon"], &[1, 1, 3], vec![f64::NAN, 4.0, 8.0]);
        let out = spatial_mean(v, "lat", "lon").unwrap();
        assert_abs_diff_eq!(out.data()[[0]], 6.0, epsilon = 1e-12);
    }

    #[test]
    fn missing_spatial_dimension_errors() {
        let v = var(&["plev", "latitude"], &[1, 1], vec![0.0]);
        let err = spatial_mean(v, "lat", "lon").unwrap_err();
        assert!(matches!(err, ReduceError::Io(_)));
    }
}
