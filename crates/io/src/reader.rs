//! High-level reader configuration and orchestration.

use std::collections::BTreeMap;
use std::path::Path;

use ndarray::{ArrayD, IxDyn};
use tracing::{debug, info};

use crate::axes::{Axis, AxisAliases};
use crate::error::IoError;
use crate::netcdf_read;
use crate::variable::GriddedVariable;

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading gridded variables from NetCDF files.
///
/// The [`Default`] implementation uses the built-in axis alias lists and
/// converts pressure coordinates given in pascal to hectopascal.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Accepted dimension names per logical axis.
    aliases: AxisAliases,
    /// Whether pressure coordinates with `units = "Pa"` are rescaled to hPa.
    pressure_to_hpa: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            aliases: AxisAliases::default(),
            pressure_to_hpa: true,
        }
    }
}

impl ReaderConfig {
    /// Replace the axis alias lists.
    pub fn with_aliases(mut self, aliases: AxisAliases) -> Self {
        self.aliases = aliases;
        self
    }

    /// Enable or disable the Pa to hPa rescaling of pressure coordinates.
    pub fn with_pressure_to_hpa(mut self, enabled: bool) -> Self {
        self.pressure_to_hpa = enabled;
        self
    }

    /// Whether pascal pressure coordinates are rescaled to hPa.
    pub fn pressure_to_hpa(&self) -> bool {
        self.pressure_to_hpa
    }

    /// Axis alias lists used by this reader.
    pub fn aliases(&self) -> &AxisAliases {
        &self.aliases
    }
}

// ---------------------------------------------------------------------------
// read_variable
// ---------------------------------------------------------------------------

/// Read variable `var_name` from the NetCDF file at `path`.
///
/// The returned [`GriddedVariable`] carries the variable's dimension names,
/// the 1-D coordinate vector of every dimension that has one, and the
/// `units` attribute. Fill values are masked to NaN and packed data is
/// unpacked.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist,
/// [`IoError::MissingVariable`] (listing the available variables) if the
/// file has no variable called `var_name`, and [`IoError::Netcdf`] for
/// library failures.
pub fn read_variable(
    path: &Path,
    var_name: &str,
    config: &ReaderConfig,
) -> Result<GriddedVariable, IoError> {
    let file = netcdf_read::open_file(path)?;

    let (dims, shape, values, units) = netcdf_read::read_nd(&file, var_name, path)?;

    let mut coords = BTreeMap::new();
    for dim in &dims {
        let Some((mut values, coord_units)) = netcdf_read::read_coord(&file, dim)? else {
            debug!(dim = %dim, "no coordinate variable");
            continue;
        };
        if config.pressure_to_hpa
            && config.aliases.is_alias(Axis::Pressure, dim)
            && coord_units.as_deref().is_some_and(is_pascal)
        {
            debug!(dim = %dim, "converting pressure coordinate from Pa to hPa");
            values.iter_mut().for_each(|p| *p /= 100.0);
        }
        coords.insert(dim.clone(), values);
    }

    let data = ArrayD::from_shape_vec(IxDyn(&shape), values).map_err(|e| IoError::Validation {
        count: 1,
        details: format!("variable '{var_name}' has inconsistent shape {shape:?}: {e}"),
    })?;

    info!(
        path = %path.display(),
        var = var_name,
        dims = ?dims,
        shape = ?shape,
        "variable loaded"
    );

    GriddedVariable::new(var_name, dims, data, coords, units)
}

fn is_pascal(units: &str) -> bool {
    matches!(units.trim(), "Pa" | "pa" | "pascal" | "Pascal")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ReaderConfig::default();
        assert!(cfg.pressure_to_hpa);
        assert_eq!(cfg.aliases(), &AxisAliases::default());
    }

    #[test]
    fn builder_methods() {
        let aliases = AxisAliases::default().with_aliases(Axis::Time, ["t"]);
        let cfg = ReaderConfig::default()
            .with_aliases(aliases.clone())
            .with_pressure_to_hpa(false);
        assert!(!cfg.pressure_to_hpa);
        assert_eq!(cfg.aliases(), &aliases);
    }

    #[test]
    fn pascal_unit_spellings() {
        assert!(is_pascal("Pa"));
        assert!(is_pascal(" Pa "));
        assert!(!is_pascal("hPa"));
        assert!(!is_pascal("millibar"));
    }
}
