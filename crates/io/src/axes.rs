//! Logical axes and the dimension names accepted for each of them.
//!
//! Gridded files from different producers name the same axis differently
//! (`lat` vs `latitude`, `time` vs `valid_time`, `plev` vs `pressure_level`).
//! Each logical axis carries an ordered alias list; lookups try the aliases
//! in order and return the first one present.

use std::fmt;

use crate::error::IoError;

/// Default aliases for the time axis, in priority order.
pub const TIME_ALIASES: &[&str] = &["time", "valid_time"];

/// Default aliases for the vertical pressure axis, in priority order.
pub const PRESSURE_ALIASES: &[&str] = &["plev", "level", "pressure_level"];

/// Default aliases for the latitude axis, in priority order.
pub const LAT_ALIASES: &[&str] = &["lat", "latitude"];

/// Default aliases for the longitude axis, in priority order.
pub const LON_ALIASES: &[&str] = &["lon", "longitude"];

/// A logical axis of a gridded variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Time,
    Pressure,
    Latitude,
    Longitude,
}

impl Axis {
    /// Built-in alias list for this axis.
    pub fn default_aliases(self) -> &'static [&'static str] {
        match self {
            Axis::Time => TIME_ALIASES,
            Axis::Pressure => PRESSURE_ALIASES,
            Axis::Latitude => LAT_ALIASES,
            Axis::Longitude => LON_ALIASES,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::Time => "time",
            Axis::Pressure => "pressure",
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
        };
        f.write_str(name)
    }
}

/// Ordered alias lists for every logical axis.
///
/// The [`Default`] implementation uses the built-in lists above.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisAliases {
    time: Vec<String>,
    pressure: Vec<String>,
    lat: Vec<String>,
    lon: Vec<String>,
}

impl Default for AxisAliases {
    fn default() -> Self {
        let owned = |axis: Axis| -> Vec<String> {
            axis.default_aliases().iter().map(|a| a.to_string()).collect()
        };
        Self {
            time: owned(Axis::Time),
            pressure: owned(Axis::Pressure),
            lat: owned(Axis::Latitude),
            lon: owned(Axis::Longitude),
        }
    }
}

impl AxisAliases {
    /// Replace the aliases for one axis.
    pub fn with_aliases<S: Into<String>>(
        mut self,
        axis: Axis,
        aliases: impl IntoIterator<Item = S>,
    ) -> Self {
        let list = aliases.into_iter().map(Into::into).collect();
        match axis {
            Axis::Time => self.time = list,
            Axis::Pressure => self.pressure = list,
            Axis::Latitude => self.lat = list,
            Axis::Longitude => self.lon = list,
        }
        self
    }

    /// Aliases for `axis`, in priority order.
    pub fn get(&self, axis: Axis) -> &[String] {
        match axis {
            Axis::Time => &self.time,
            Axis::Pressure => &self.pressure,
            Axis::Latitude => &self.lat,
            Axis::Longitude => &self.lon,
        }
    }

    /// Return the first alias of `axis` contained in `dims`.
    pub fn find<'a, S: AsRef<str>>(&'a self, axis: Axis, dims: &[S]) -> Option<&'a str> {
        self.get(axis)
            .iter()
            .map(String::as_str)
            .find(|alias| dims.iter().any(|d| d.as_ref() == *alias))
    }

    /// Like [`find`](Self::find), but a missing axis is an error that lists
    /// the candidates and the dimensions that are available.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingDimension`] if no alias matches.
    pub fn require<'a, S: AsRef<str>>(&'a self, axis: Axis, dims: &[S]) -> Result<&'a str, IoError> {
        self.find(axis, dims).ok_or_else(|| IoError::MissingDimension {
            axis: axis.to_string(),
            candidates: self.get(axis).to_vec(),
            available: dims.iter().map(|d| d.as_ref().to_string()).collect(),
        })
    }

    /// Whether `name` is one of the aliases of `axis`.
    pub fn is_alias(&self, axis: Axis, name: &str) -> bool {
        self.get(axis).iter().any(|a| a == name)
    }
}
