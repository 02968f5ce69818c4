//! Deterministic output file names.

use std::fmt;
use std::str::FromStr;

use crate::error::LayoutError;
use crate::panel::Period;
use crate::projection::Projection;

/// Image encoding of an output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Raster PNG.
    #[default]
    Png,
    /// Vector SVG.
    Svg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            _ => Err(LayoutError::UnknownFormat {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Parts that determine a map file name.
#[derive(Debug, Clone)]
pub struct MapName<'a> {
    pub var: &'a str,
    pub period: &'a Period,
    pub with_model2: bool,
    pub projection: Projection,
    /// Pressure band label such as `600-200hPa`, for upper-air maps.
    pub band: Option<&'a str>,
    pub format: OutputFormat,
}

impl MapName<'_> {
    /// `{var}_{period}_comparison_{with|without}_model2_{projection}`
    /// followed by `_{band}` and `_{season}` when present.
    pub fn file_name(&self) -> String {
        let mut name = format!(
            "{}_{}_comparison_{}_model2_{}",
            self.var,
            self.period.file_tag(),
            if self.with_model2 { "with" } else { "without" },
            self.projection.name()
        );
        if let Some(band) = self.band {
            name.push('_');
            name.push_str(band);
        }
        if let Period::Season(season) = self.period {
            name.push('_');
            name.push_str(season);
        }
        name.push('.');
        name.push_str(self.format.extension());
        name
    }
}

/// Kind of vertical-profile figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    Mean,
    Bias,
}

impl ProfileKind {
    pub fn file_name(self, format: OutputFormat) -> String {
        let stem = match self {
            ProfileKind::Mean => "vertical_profile_mean",
            ProfileKind::Bias => "vertical_profile_bias",
        };
        format!("{stem}.{}", format.extension())
    }
}
