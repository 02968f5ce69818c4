//! Pure conversion functions: TOML config structs -> crate API config types.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};

use crate::config::*;

use esmplot_io::{Axis, AxisAliases, ReaderConfig};
use esmplot_layout::{CellSize, ColorScale, Colormap, Labels, OutputFormat, ScaleCatalog, ScaleSet};
use esmplot_reduce::{PressureBand, UnitPolicy};

/// Library configuration resolved from the TOML file and global flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub labels: Labels,
    pub format: OutputFormat,
    pub cell: CellSize,
    pub band: PressureBand,
    pub units: UnitPolicy,
    pub scales: ScaleCatalog,
    pub reader: ReaderConfig,
}

/// Builds every library config type from `config`.
pub fn build_settings(config: &EsmplotConfig, cli_format: Option<&str>) -> Result<Settings> {
    Ok(Settings {
        labels: build_labels(&config.labels),
        format: build_format(&config.output, cli_format)?,
        cell: build_cell_size(&config.output)?,
        band: build_pressure_band(&config.pressure_band)?,
        units: build_unit_policy(&config.units),
        scales: build_scale_catalog(&config.scales)?,
        reader: build_reader(&config.reader)?,
    })
}

/// Parses an output format name, case-insensitively.
pub fn parse_format(s: &str) -> Result<OutputFormat> {
    s.parse::<OutputFormat>()
        .with_context(|| format!("invalid output format {s:?}"))
}

/// Parses a colormap name such as `"Spectral_r"`.
pub fn parse_colormap(s: &str) -> Result<Colormap> {
    s.parse::<Colormap>()
        .with_context(|| format!("invalid colormap {s:?}"))
}

/// Converts one `{ min, max, step, colormap }` entry into a [`ColorScale`].
pub fn parse_scale(entry: &ScaleEntryToml) -> Result<ColorScale> {
    let cmap = parse_colormap(&entry.colormap)?;
    Ok(ColorScale::new(entry.min, entry.max, entry.step, cmap)?)
}

pub fn build_labels(labels: &LabelsToml) -> Labels {
    Labels {
        model1: labels.model1.clone(),
        model2: labels.model2.clone(),
        observation: labels.observation.clone(),
    }
}

/// Resolves the output format: the CLI flag wins over `[output].format`.
pub fn build_format(output: &OutputToml, cli_format: Option<&str>) -> Result<OutputFormat> {
    parse_format(cli_format.unwrap_or(&output.format))
}

pub fn build_cell_size(output: &OutputToml) -> Result<CellSize> {
    if output.width == 0 || output.height == 0 {
        bail!(
            "panel size must be positive, got {}x{}",
            output.width,
            output.height
        );
    }
    Ok(CellSize {
        width: output.width,
        height: output.height,
    })
}

pub fn build_pressure_band(band: &PressureBandToml) -> Result<PressureBand> {
    Ok(PressureBand::new(band.upper, band.lower)?)
}

pub fn build_unit_policy(units: &UnitsToml) -> UnitPolicy {
    units
        .celsius_pairs
        .iter()
        .fold(UnitPolicy::none(), |p, [var, obs]| p.with_pair(var, obs))
}

/// Builds the NetCDF reader settings; a configured alias list replaces the
/// built-in one for its axis.
pub fn build_reader(reader: &ReaderToml) -> Result<ReaderConfig> {
    let mut aliases = AxisAliases::default();
    for (axis, key, list) in [
        (Axis::Time, "time", &reader.time),
        (Axis::Pressure, "pressure", &reader.pressure),
        (Axis::Latitude, "lat", &reader.lat),
        (Axis::Longitude, "lon", &reader.lon),
    ] {
        if let Some(list) = list {
            if list.iter().all(|name| name.trim().is_empty()) {
                bail!("[reader].{key} must name at least one dimension");
            }
            let names = list.iter().map(|name| name.trim()).filter(|name| !name.is_empty());
            aliases = aliases.with_aliases(axis, names);
        }
    }
    Ok(ReaderConfig::default()
        .with_aliases(aliases)
        .with_pressure_to_hpa(reader.pressure_to_hpa))
}

/// Merges the `[scales.<var>]` tables over the built-in presets.
///
/// A table that gives only one half takes the other from the preset of the
/// same variable; with no preset both halves are required.
pub fn build_scale_catalog(scales: &BTreeMap<String, ScaleToml>) -> Result<ScaleCatalog> {
    let mut catalog = ScaleCatalog::default();
    for (var, table) in scales {
        let preset = catalog.resolve(var).ok().cloned();
        let mean = match (&table.mean, &preset) {
            (Some(entry), _) => parse_scale(entry).with_context(|| format!("[scales.{var}].mean"))?,
            (None, Some(p)) => p.mean.clone(),
            (None, None) => bail!("[scales.{var}] has no mean scale and no built-in preset"),
        };
        let bias = match (&table.bias, &preset) {
            (Some(entry), _) => parse_scale(entry).with_context(|| format!("[scales.{var}].bias"))?,
            (None, Some(p)) => p.bias.clone(),
            (None, None) => bail!("[scales.{var}] has no bias scale and no built-in preset"),
        };
        catalog = catalog.with_scales(var.clone(), ScaleSet { mean, bias });
    }
    Ok(catalog)
}
