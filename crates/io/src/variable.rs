//! In-memory gridded variable with named dimensions.

use std::collections::BTreeMap;

use ndarray::ArrayD;

use crate::error::IoError;

/// An N-dimensional variable read from a gridded dataset.
///
/// Dimensions are named, and each dimension may carry a 1-D coordinate
/// vector of matching length. Construction validates that the array rank
/// matches the number of dimension names and that every coordinate vector
/// matches the length of its dimension.
#[derive(Debug, Clone)]
pub struct GriddedVariable {
    name: String,
    dims: Vec<String>,
    data: ArrayD<f64>,
    coords: BTreeMap<String, Vec<f64>>,
    units: Option<String>,
}

impl GriddedVariable {
    /// Create a new variable after validating its shape.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if the array rank differs from
    /// `dims.len()`, or if a coordinate vector's length differs from its
    /// dimension's length. Coordinates for names that are not dimensions
    /// are rejected with [`IoError::Validation`].
    pub fn new(
        name: impl Into<String>,
        dims: Vec<String>,
        data: ArrayD<f64>,
        coords: BTreeMap<String, Vec<f64>>,
        units: Option<String>,
    ) -> Result<Self, IoError> {
        let name = name.into();
        if data.ndim() != dims.len() {
            return Err(IoError::DimensionMismatch {
                name: format!("{name} rank"),
                expected: dims.len(),
                got: data.ndim(),
            });
        }

        for (dim_name, values) in &coords {
            let Some(axis) = dims.iter().position(|d| d == dim_name) else {
                return Err(IoError::Validation {
                    count: 1,
                    details: format!(
                        "coordinate '{dim_name}' is not a dimension of '{name}'"
                    ),
                });
            };
            let len = data.shape()[axis];
            if values.len() != len {
                return Err(IoError::DimensionMismatch {
                    name: dim_name.clone(),
                    expected: len,
                    got: values.len(),
                });
            }
        }

        Ok(Self {
            name,
            dims,
            data,
            coords,
            units,
        })
    }

    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dimension names, outermost first.
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    /// Data array.
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// Array shape, outermost first.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Position of dimension `name`, if present.
    pub fn dim_index(&self, name: &str) -> Option<usize> {
        self.dims.iter().position(|d| d == name)
    }

    /// Whether the variable has a dimension called `name`.
    pub fn has_dim(&self, name: &str) -> bool {
        self.dim_index(name).is_some()
    }

    /// Coordinate vector for dimension `name`, if one was read.
    pub fn coord(&self, name: &str) -> Option<&[f64]> {
        self.coords.get(name).map(Vec::as_slice)
    }

    /// All coordinate vectors keyed by dimension name.
    pub fn coords(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.coords
    }

    /// `units` attribute, if present.
    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    /// Return a copy with the `units` attribute replaced.
    pub fn with_units(mut self, units: Option<String>) -> Self {
        self.units = units;
        self
    }

    /// Decompose into `(name, dims, data, coords, units)`.
    pub fn into_parts(
        self,
    ) -> (
        String,
        Vec<String>,
        ArrayD<f64>,
        BTreeMap<String, Vec<f64>>,
        Option<String>,
    ) {
        (self.name, self.dims, self.data, self.coords, self.units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    fn dims(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn new_accepts_consistent_shape() {
        let data = ArrayD::zeros(IxDyn(&[2, 3]));
        let mut coords = BTreeMap::new();
        coords.insert("lat".to_string(), vec![0.0, 1.0]);
        coords.insert("lon".to_string(), vec![0.0, 1.0, 2.0]);
        let var = GriddedVariable::new("tas", dims(&["lat", "lon"]), data, coords, None).unwrap();
        assert_eq!(var.shape(), &[2, 3]);
        assert_eq!(var.dim_index("lon"), Some(1));
        assert_eq!(var.coord("lat"), Some(&[0.0, 1.0][..]));
        assert!(var.units().is_none());
    }

    #[test]
    fn new_rejects_rank_mismatch() {
        let data = ArrayD::zeros(IxDyn(&[2, 3]));
        let err = GriddedVariable::new("tas", dims(&["time", "lat", "lon"]), data, BTreeMap::new(), None)
            .unwrap_err();
        assert!(matches!(err, IoError::DimensionMismatch { expected: 3, got: 2, .. }));
    }

    #[test]
    fn new_rejects_coord_length_mismatch() {
        let data = ArrayD::zeros(IxDyn(&[2, 3]));
        let mut coords = BTreeMap::new();
        coords.insert("lon".to_string(), vec![0.0, 1.0]);
        let err = GriddedVariable::new("tas", dims(&["lat", "lon"]), data, coords, None).unwrap_err();
        match err {
            IoError::DimensionMismatch {
                name,
                expected,
                got,
            } => {
                assert_eq!(name, "lon");
                assert_eq!(expected, 3);
                assert_eq!(got, 2);
            }
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn new_rejects_coord_for_unknown_dim() {
        let data = ArrayD::zeros(IxDyn(&[2]));
        let mut coords = BTreeMap::new();
        coords.insert("plev".to_string(), vec![0.0, 1.0]);
        let err = GriddedVariable::new("ta", dims(&["lat"]), data, coords, None).unwrap_err();
        assert!(matches!(err, IoError::Validation { .. }));
    }
}
