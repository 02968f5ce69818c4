//! Two-dimensional latitude/longitude fields ready for plotting.

use ndarray::{Array2, Ix2};

use crate::axes::{Axis, AxisAliases};
use crate::error::IoError;
use crate::variable::GriddedVariable;

/// The latitude/longitude coordinate names a figure is sampled against.
///
/// Resolved once from the primary dataset and reused for every other field
/// in the same figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordNames {
    lat: String,
    lon: String,
}

impl CoordNames {
    /// Create a name pair explicitly.
    pub fn new(lat: impl Into<String>, lon: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lon: lon.into(),
        }
    }

    /// Resolve the coordinate names of `var` using the latitude and longitude
    /// alias lists (`lat` before `latitude`, `lon` before `longitude` by
    /// default).
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingDimension`] if either axis has no match.
    pub fn resolve(var: &GriddedVariable, aliases: &AxisAliases) -> Result<Self, IoError> {
        let lat = aliases.require(Axis::Latitude, var.dims())?;
        let lon = aliases.require(Axis::Longitude, var.dims())?;
        Ok(Self::new(lat, lon))
    }

    /// Latitude coordinate name.
    pub fn lat(&self) -> &str {
        &self.lat
    }

    /// Longitude coordinate name.
    pub fn lon(&self) -> &str {
        &self.lon
    }
}

/// A 2-D field indexed `[lat, lon]` with its coordinate vectors.
#[derive(Debug, Clone)]
pub struct Field2d {
    name: String,
    names: CoordNames,
    lat: Vec<f64>,
    lon: Vec<f64>,
    values: Array2<f64>,
    units: Option<String>,
}

impl Field2d {
    /// Build a field from raw parts, validating the shape.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if `values` is not
    /// `lat.len() x lon.len()`.
    pub fn new(
        name: impl Into<String>,
        names: CoordNames,
        lat: Vec<f64>,
        lon: Vec<f64>,
        values: Array2<f64>,
        units: Option<String>,
    ) -> Result<Self, IoError> {
        let (ny, nx) = values.dim();
        if ny != lat.len() {
            return Err(IoError::DimensionMismatch {
                name: names.lat.clone(),
                expected: ny,
                got: lat.len(),
            });
        }
        if nx != lon.len() {
            return Err(IoError::DimensionMismatch {
                name: names.lon.clone(),
                expected: nx,
                got: lon.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            names,
            lat,
            lon,
            values,
            units,
        })
    }

    /// Sample a fully reduced variable against `names`.
    ///
    /// The variable must have exactly the two dimensions named by `names`,
    /// in either order; a `[lon, lat]` layout is transposed.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingDimension`] if either coordinate name is not
    /// a dimension of `var`, [`IoError::Validation`] if other dimensions
    /// remain or a coordinate vector was not read.
    pub fn from_variable(var: &GriddedVariable, names: &CoordNames) -> Result<Self, IoError> {
        let lat_idx = var.dim_index(names.lat()).ok_or_else(|| missing(var, "latitude", names.lat()))?;
        let lon_idx = var.dim_index(names.lon()).ok_or_else(|| missing(var, "longitude", names.lon()))?;

        if var.dims().len() != 2 {
            let residual: Vec<&str> = var
                .dims()
                .iter()
                .map(String::as_str)
                .filter(|d| *d != names.lat() && *d != names.lon())
                .collect();
            return Err(IoError::Validation {
                count: 1,
                details: format!(
                    "variable '{}' still has dimension(s) {} after reduction",
                    var.name(),
                    residual.join(", ")
                ),
            });
        }

        let lat = coord_or_err(var, names.lat())?;
        let lon = coord_or_err(var, names.lon())?;

        let view = var
            .data()
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|e| IoError::Validation {
                count: 1,
                details: format!("variable '{}' is not 2-D: {e}", var.name()),
            })?;
        let values = if lat_idx < lon_idx {
            view.to_owned()
        } else {
            view.t().to_owned()
        };

        Self::new(
            var.name(),
            names.clone(),
            lat,
            lon,
            values,
            var.units().map(str::to_string),
        )
    }

    /// Field name (the variable it was read from).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Coordinate names this field was sampled against.
    pub fn coord_names(&self) -> &CoordNames {
        &self.names
    }

    /// Latitude coordinate values.
    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    /// Longitude coordinate values.
    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// Values indexed `[lat, lon]`.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// `units` attribute, if present.
    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    /// Apply `f` to every value and replace the units.
    pub fn map_values(mut self, f: impl Fn(f64) -> f64, units: Option<String>) -> Self {
        self.values.mapv_inplace(f);
        self.units = units;
        self
    }

    /// Minimum and maximum of the finite values, or `None` if there are none.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

fn missing(var: &GriddedVariable, axis: &str, name: &str) -> IoError {
    IoError::MissingDimension {
        axis: axis.to_string(),
        candidates: vec![name.to_string()],
        available: var.dims().to_vec(),
    }
}

fn coord_or_err(var: &GriddedVariable, name: &str) -> Result<Vec<f64>, IoError> {
    var.coord(name)
        .map(<[f64]>::to_vec)
        .ok_or_else(|| IoError::Validation {
            count: 1,
            details: format!("no coordinate values for dimension '{name}' of '{}'", var.name()),
        })
}
