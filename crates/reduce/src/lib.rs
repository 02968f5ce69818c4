//! # esmplot-reduce
//!
//! Reductions that turn raw gridded variables into plottable data: taking
//! the first time step, averaging over a pressure band, area means over the
//! latitude/longitude plane, and linear interpolation of vertical profiles
//! onto standard pressure levels. Also holds the Kelvin-to-Celsius
//! conversion policy.

mod error;
mod interp;
mod pressure;
mod profile;
mod select;
mod spatial;
mod stats;
mod time;
mod units;

pub use error::ReduceError;
pub use interp::{STANDARD_LEVELS, interpolate_levels};
pub use pressure::{PressureBand, average_band};
pub use profile::Profile;
pub use spatial::spatial_mean;
pub use time::select_first_time;
pub use units::{CELSIUS_UNITS, FieldRole, KELVIN_OFFSET, UnitPolicy, kelvin_to_celsius};

/// Drop every length-1 dimension of `var` except those in `keep`.
///
/// Surface fields often carry a singleton `height` dimension that must go
/// before a field can be sampled on latitude/longitude.
///
/// # Errors
///
/// Propagates shape errors from rebuilding the variable.
pub fn squeeze(
    var: esmplot_io::GriddedVariable,
    keep: &[&str],
) -> Result<esmplot_io::GriddedVariable, ReduceError> {
    select::squeeze(var, keep)
}
