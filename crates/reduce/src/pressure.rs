//! Averaging over a band of pressure levels.

use esmplot_io::{Axis, AxisAliases, GriddedVariable};
use ndarray::Axis as NdAxis;
use tracing::debug;

use crate::error::ReduceError;
use crate::select::rebuild_without;
use crate::stats::nan_mean;

/// Tolerance when comparing a level against a band bound, in hPa.
const LEVEL_EPS: f64 = 1e-6;

/// An inclusive band of pressure levels in hPa.
///
/// `high` is the larger pressure (closer to the surface), `low` the smaller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureBand {
    high: f64,
    low: f64,
}

impl Default for PressureBand {
    fn default() -> Self {
        Self {
            high: 600.0,
            low: 200.0,
        }
    }
}

impl PressureBand {
    /// Create a band from two bounds given in either order.
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError::InvalidBand`] unless both bounds are finite
    /// and positive.
    pub fn new(a: f64, b: f64) -> Result<Self, ReduceError> {
        if !(a.is_finite() && b.is_finite() && a > 0.0 && b > 0.0) {
            return Err(ReduceError::InvalidBand { a, b });
        }
        Ok(Self {
            high: a.max(b),
            low: a.min(b),
        })
    }

    /// Larger pressure bound.
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Smaller pressure bound.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Whether `level` lies inside the band, bounds included.
    pub fn contains(&self, level: f64) -> bool {
        level >= self.low - LEVEL_EPS && level <= self.high + LEVEL_EPS
    }

    /// File-name label such as `600-200hPa`.
    pub fn label(&self) -> String {
        format!("{}-{}hPa", self.high, self.low)
    }
}

/// Average `var` over the levels of its pressure dimension that fall inside
/// `band`, removing that dimension.
///
/// The pressure dimension is the first pressure alias present in `var`.
/// Level selection depends only on the coordinate values, so ascending and
/// descending coordinates give the same result. NaN samples are skipped.
///
/// # Errors
///
/// Returns [`ReduceError::Io`] wrapping a missing-dimension error if `var`
/// has no pressure dimension, [`ReduceError::MissingCoordinate`] if the
/// dimension has no coordinate values, and [`ReduceError::EmptyBand`] if no
/// level falls inside the band.
pub fn average_band(
    var: GriddedVariable,
    band: &PressureBand,
    aliases: &AxisAliases,
) -> Result<GriddedVariable, ReduceError> {
    let dim = aliases.require(Axis::Pressure, var.dims())?.to_string();
    let Some(levels) = var.coord(&dim) else {
        return Err(ReduceError::MissingCoordinate {
            var: var.name().to_string(),
            dim,
        });
    };

    let selected: Vec<usize> = levels
        .iter()
        .enumerate()
        .filter(|(_, p)| band.contains(**p))
        .map(|(i, _)| i)
        .collect();
    if selected.is_empty() {
        return Err(ReduceError::EmptyBand {
            var: var.name().to_string(),
            high: band.high,
            low: band.low,
            levels: levels.to_vec(),
        });
    }
    debug!(
        var = var.name(),
        dim = %dim,
        selected = ?selected.iter().map(|&i| levels[i]).collect::<Vec<_>>(),
        "averaging pressure band"
    );

    let k = var.dim_index(&dim).unwrap_or_default();
    let data = var
        .data()
        .map_axis(NdAxis(k), |lane| nan_mean(selected.iter().map(|&i| lane[i])));
    rebuild_without(var, k, data)
}
