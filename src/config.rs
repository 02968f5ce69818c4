use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "esmplot.toml";

/// Top-level esmplot configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EsmplotConfig {
    /// Dataset labels used in titles and legends.
    #[serde(default)]
    pub labels: LabelsToml,

    /// Image format and panel size.
    #[serde(default)]
    pub output: OutputToml,

    /// Upper-air averaging band.
    #[serde(default)]
    pub pressure_band: PressureBandToml,

    /// Kelvin to Celsius conversion.
    #[serde(default)]
    pub units: UnitsToml,

    /// Per-variable color scales, merged over the built-in presets.
    #[serde(default)]
    pub scales: BTreeMap<String, ScaleToml>,

    /// Dimension names and coordinate handling of the NetCDF reader.
    #[serde(default)]
    pub reader: ReaderToml,
}

/// `[reader]` table. Each alias list, when given, replaces the built-in
/// list for that axis.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReaderToml {
    #[serde(default = "default_pressure_to_hpa")]
    pub pressure_to_hpa: bool,
    pub time: Option<Vec<String>>,
    pub pressure: Option<Vec<String>>,
    pub lat: Option<Vec<String>>,
    pub lon: Option<Vec<String>>,
}

impl Default for ReaderToml {
    fn default() -> Self {
        Self {
            pressure_to_hpa: default_pressure_to_hpa(),
            time: None,
            pressure: None,
            lat: None,
            lon: None,
        }
    }
}

fn default_pressure_to_hpa() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelsToml {
    #[serde(default = "default_model1")]
    pub model1: String,
    #[serde(default = "default_model2")]
    pub model2: String,
    #[serde(default = "default_observation")]
    pub observation: String,
}

impl Default for LabelsToml {
    fn default() -> Self {
        Self {
            model1: default_model1(),
            model2: default_model2(),
            observation: default_observation(),
        }
    }
}

fn default_model1() -> String {
    "CMIP7".to_string()
}
fn default_model2() -> String {
    "CMIP6".to_string()
}
fn default_observation() -> String {
    "Observation".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    #[serde(default = "default_format")]
    pub format: String,
    /// Width of one map panel cell in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Height of one map panel cell in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            format: default_format(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_format() -> String {
    "png".to_string()
}
fn default_width() -> u32 {
    600
}
fn default_height() -> u32 {
    480
}

/// Pressure band bounds in hPa; either order is accepted.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PressureBandToml {
    #[serde(default = "default_upper")]
    pub upper: f64,
    #[serde(default = "default_lower")]
    pub lower: f64,
}

impl Default for PressureBandToml {
    fn default() -> Self {
        Self {
            upper: default_upper(),
            lower: default_lower(),
        }
    }
}

fn default_upper() -> f64 {
    600.0
}
fn default_lower() -> f64 {
    200.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitsToml {
    /// `[var, obs_var]` pairs whose mean fields are converted to Celsius.
    #[serde(default = "default_celsius_pairs")]
    pub celsius_pairs: Vec<[String; 2]>,
}

impl Default for UnitsToml {
    fn default() -> Self {
        Self {
            celsius_pairs: default_celsius_pairs(),
        }
    }
}

fn default_celsius_pairs() -> Vec<[String; 2]> {
    vec![["tas".to_string(), "t2m".to_string()]]
}

/// `[scales.<var>]` table. A missing half falls back to the built-in preset.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleToml {
    pub mean: Option<ScaleEntryToml>,
    pub bias: Option<ScaleEntryToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleEntryToml {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub colormap: String,
}

/// Load the configuration.
///
/// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG`] is read
/// if present and the built-in defaults are used otherwise.
pub fn load(path: Option<&Path>) -> Result<EsmplotConfig> {
    let path: PathBuf = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = PathBuf::from(DEFAULT_CONFIG);
            if !p.exists() {
                debug!("no config file, using defaults");
                return Ok(EsmplotConfig::default());
            }
            p
        }
    };
    let toml_str = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: EsmplotConfig = toml::from_str(&toml_str)
        .with_context(|| format!("failed to parse TOML config: {}", path.display()))?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}
