//! Geographic extent parsed from `min,max` range arguments.

use crate::error::LayoutError;

/// Parse a `"min,max"` string into a pair of numbers.
///
/// Whitespace around either number is ignored. The string must contain
/// exactly one comma with a number on each side.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidRange`] for a missing comma, extra fields
/// or a token that is not a finite number.
///
/// # Example
///
/// ```
/// use esmplot_layout::parse_range;
///
/// assert_eq!(parse_range("-10.5,30").unwrap(), (-10.5, 30.0));
/// assert!(parse_range("10;20").is_err());
/// ```
pub fn parse_range(input: &str) -> Result<(f64, f64), LayoutError> {
    let invalid = |reason: String| LayoutError::InvalidRange {
        input: input.to_string(),
        reason,
    };
    let parts: Vec<&str> = input.split(',').collect();
    let [min, max] = parts.as_slice() else {
        return Err(invalid(format!(
            "expected 'min,max', found {} field(s)",
            parts.len()
        )));
    };
    let number = |token: &str| -> Result<f64, LayoutError> {
        let token = token.trim();
        match token.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(invalid(format!("'{token}' is not a number"))),
        }
    };
    Ok((number(min)?, number(max)?))
}

/// Latitude/longitude bounds of a map, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoExtent {
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
}

impl GeoExtent {
    /// Build an extent from two `(min, max)` pairs. Reversed pairs are
    /// reordered.
    pub fn new(lat: (f64, f64), lon: (f64, f64)) -> Self {
        Self {
            lat_min: lat.0.min(lat.1),
            lat_max: lat.0.max(lat.1),
            lon_min: lon.0.min(lon.1),
            lon_max: lon.0.max(lon.1),
        }
    }

    /// Parse the two range arguments of a map command.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidRange`] if either argument is malformed.
    pub fn parse(lat_range: &str, lon_range: &str) -> Result<Self, LayoutError> {
        Ok(Self::new(parse_range(lat_range)?, parse_range(lon_range)?))
    }

    pub fn lat_min(&self) -> f64 {
        self.lat_min
    }

    pub fn lat_max(&self) -> f64 {
        self.lat_max
    }

    pub fn lon_min(&self) -> f64 {
        self.lon_min
    }

    pub fn lon_max(&self) -> f64 {
        self.lon_max
    }

    /// Shift `lon` by whole turns into `[lon_min, lon_min + 360)`. A
    /// non-finite longitude comes back as NaN so callers can skip it.
    pub fn wrap_lon(&self, lon: f64) -> f64 {
        if !lon.is_finite() {
            return f64::NAN;
        }
        self.lon_min + (lon - self.lon_min).rem_euclid(360.0)
    }

    /// Whether a latitude lies inside the bounds.
    pub fn contains_lat(&self, lat: f64) -> bool {
        lat >= self.lat_min && lat <= self.lat_max
    }

    /// Five evenly spaced tick positions across the longitude bounds.
    pub fn lon_ticks(&self) -> [f64; 5] {
        linspace5(self.lon_min, self.lon_max)
    }

    /// Five evenly spaced tick positions across the latitude bounds.
    pub fn lat_ticks(&self) -> [f64; 5] {
        linspace5(self.lat_min, self.lat_max)
    }
}

fn linspace5(a: f64, b: f64) -> [f64; 5] {
    std::array::from_fn(|i| a + (b - a) * i as f64 / 4.0)
}

/// Degree label for a longitude, e.g. `30°E`, `120°W`, `0°`.
pub fn format_lon(lon: f64) -> String {
    let l = ((lon + 180.0).rem_euclid(360.0)) - 180.0;
    let l = if lon != 0.0 && l == -180.0 { 180.0 } else { l };
    match l {
        v if v > 0.0 && v < 180.0 => format!("{}°E", trim_deg(v)),
        v if v < 0.0 => format!("{}°W", trim_deg(-v)),
        v => format!("{}°", trim_deg(v.abs())),
    }
}

/// Degree label for a latitude, e.g. `30°N`, `45°S`, `0°`.
pub fn format_lat(lat: f64) -> String {
    match lat {
        v if v > 0.0 => format!("{}°N", trim_deg(v)),
        v if v < 0.0 => format!("{}°S", trim_deg(-v)),
        _ => "0°".to_string(),
    }
}

fn trim_deg(v: f64) -> String {
    let rounded = (v * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}
