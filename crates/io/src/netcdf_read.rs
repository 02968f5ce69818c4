//! Low-level NetCDF extraction helpers.

use std::path::Path;

use netcdf::AttributeValue;

use crate::error::IoError;

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Names of the data variables in `file`, i.e. every variable that is not a
/// coordinate variable (a variable named after one of the file's dimensions).
pub(crate) fn data_variable_names(file: &netcdf::File) -> Vec<String> {
    let dim_names: Vec<String> = file.dimensions().map(|d| d.name()).collect();
    file.variables()
        .map(|v| v.name())
        .filter(|name| !dim_names.contains(name))
        .collect()
}

/// Read a string attribute, ignoring attributes of any other type.
pub(crate) fn string_attribute(var: &netcdf::Variable<'_>, name: &str) -> Option<String> {
    var.attribute_value(name)
        .and_then(|res| res.ok())
        .and_then(|av| match av {
            AttributeValue::Str(s) => Some(s),
            _ => None,
        })
}

/// Read a scalar numeric attribute as `f64`.
fn numeric_attribute(var: &netcdf::Variable<'_>, name: &str) -> Option<f64> {
    var.attribute_value(name)
        .and_then(|res| res.ok())
        .and_then(|av| f64::try_from(av).ok())
}

/// Read every value of `var` as `f64`, masking `_FillValue` and
/// `missing_value` to NaN and applying CF `scale_factor` / `add_offset`.
pub(crate) fn read_values(var: &netcdf::Variable<'_>) -> Result<Vec<f64>, IoError> {
    let mut values = var.get_values::<f64, _>(..)?;

    let fill = numeric_attribute(var, "_FillValue");
    let missing = numeric_attribute(var, "missing_value");
    let scale = numeric_attribute(var, "scale_factor").unwrap_or(1.0);
    let offset = numeric_attribute(var, "add_offset").unwrap_or(0.0);

    for v in &mut values {
        if fill.is_some_and(|f| *v == f) || missing.is_some_and(|m| *v == m) {
            *v = f64::NAN;
        } else {
            *v = *v * scale + offset;
        }
    }
    Ok(values)
}

/// Read a variable together with its dimension names and shape.
///
/// Returns [`IoError::MissingVariable`] listing the file's data variables
/// if `var_name` does not exist.
pub(crate) fn read_nd(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<(Vec<String>, Vec<usize>, Vec<f64>, Option<String>), IoError> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| IoError::MissingVariable {
            name: var_name.to_string(),
            path: path.to_path_buf(),
            available: data_variable_names(file),
        })?;

    let dims: Vec<String> = var.dimensions().iter().map(|d| d.name()).collect();
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let values = read_values(&var)?;
    let units = string_attribute(&var, "units");

    Ok((dims, shape, values, units))
}

/// Read the 1-D coordinate variable for dimension `dim`, if the file has one.
///
/// Returns the values together with the coordinate's `units` attribute.
pub(crate) fn read_coord(
    file: &netcdf::File,
    dim: &str,
) -> Result<Option<(Vec<f64>, Option<String>)>, IoError> {
    let Some(var) = file.variable(dim) else {
        return Ok(None);
    };
    if var.dimensions().len() != 1 {
        return Ok(None);
    }
    let values = read_values(&var)?;
    Ok(Some((values, string_attribute(&var, "units"))))
}
