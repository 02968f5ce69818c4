//! # esmplot-io
//!
//! Read gridded climate variables (model output, reanalysis, precomputed
//! biases) from NetCDF files into named-dimension arrays, resolve which
//! coordinate names a dataset uses, and sample fully reduced variables into
//! 2-D latitude/longitude fields.

mod axes;
mod error;
mod field;
mod netcdf_read;
mod reader;
mod validate;
mod variable;

pub use axes::{Axis, AxisAliases, LAT_ALIASES, LON_ALIASES, PRESSURE_ALIASES, TIME_ALIASES};
pub use error::IoError;
pub use field::{CoordNames, Field2d};
pub use reader::{ReaderConfig, read_variable};
pub use validate::{ValidationCollector, validate_figure_fields};
pub use variable::GriddedVariable;
