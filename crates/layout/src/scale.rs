//! Color-scale policy: contour levels and colormaps per variable.
//!
//! Each variable has two scales, one for mean fields and one for bias
//! fields. Built-in presets cover the variables the tool is usually run on;
//! others come from configuration.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::LayoutError;

/// Guards the level count against rounding when `(max - min) / step` is
/// integral.
const ARANGE_EPS: f64 = 1e-9;

/// Upper bound on the number of contour boundaries of one scale.
pub const MAX_LEVELS: usize = 10_000;

/// Named colormaps understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColormapKind {
    Spectral,
    Rainbow,
    YlGnBu,
    Coolwarm,
    BrBG,
    RdBu,
    Viridis,
}

impl ColormapKind {
    const ALL: [ColormapKind; 7] = [
        ColormapKind::Spectral,
        ColormapKind::Rainbow,
        ColormapKind::YlGnBu,
        ColormapKind::Coolwarm,
        ColormapKind::BrBG,
        ColormapKind::RdBu,
        ColormapKind::Viridis,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColormapKind::Spectral => "Spectral",
            ColormapKind::Rainbow => "rainbow",
            ColormapKind::YlGnBu => "YlGnBu",
            ColormapKind::Coolwarm => "coolwarm",
            ColormapKind::BrBG => "BrBG",
            ColormapKind::RdBu => "RdBu",
            ColormapKind::Viridis => "viridis",
        }
    }
}

/// A colormap, optionally reversed (`_r` suffix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Colormap {
    kind: ColormapKind,
    reversed: bool,
}

impl Colormap {
    pub fn new(kind: ColormapKind) -> Self {
        Self {
            kind,
            reversed: false,
        }
    }

    pub fn reversed(mut self) -> Self {
        self.reversed = !self.reversed;
        self
    }

    pub fn kind(&self) -> ColormapKind {
        self.kind
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }
}

impl FromStr for Colormap {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, reversed) = match s.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (s, false),
        };
        let kind = ColormapKind::ALL
            .into_iter()
            .find(|k| k.name() == base)
            .ok_or_else(|| LayoutError::UnknownColormap {
                name: s.to_string(),
            })?;
        Ok(Self { kind, reversed })
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.name())?;
        if self.reversed {
            f.write_str("_r")?;
        }
        Ok(())
    }
}

/// Whether a panel shows a mean state or a bias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleClass {
    Mean,
    Bias,
}

/// Evenly spaced contour levels with a colormap.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    min: f64,
    max: f64,
    step: f64,
    colormap: Colormap,
}

impl ColorScale {
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidScale`] if a bound is not finite,
    /// `step` is not positive, `min > max`, or the scale would have more
    /// than [`MAX_LEVELS`] boundaries.
    pub fn new(min: f64, max: f64, step: f64, colormap: Colormap) -> Result<Self, LayoutError> {
        let invalid = |reason: &str| LayoutError::InvalidScale {
            min,
            max,
            step,
            reason: reason.to_string(),
        };
        if !(min.is_finite() && max.is_finite() && step.is_finite()) {
            return Err(invalid("bounds and step must be finite"));
        }
        if step <= 0.0 {
            return Err(invalid("step must be positive"));
        }
        if min > max {
            return Err(invalid("min must not exceed max"));
        }
        if (max - min) / step + 1.0 > MAX_LEVELS as f64 {
            return Err(invalid(&format!("more than {MAX_LEVELS} levels")));
        }
        Ok(Self {
            min,
            max,
            step,
            colormap,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn colormap(&self) -> Colormap {
        self.colormap
    }

    /// Contour boundaries `min, min + step, ...` following
    /// `arange(min, max + step, step)`: the stop is exclusive, so the last
    /// boundary can exceed `max` when `step` does not divide the range.
    pub fn levels(&self) -> Vec<f64> {
        let n = ((self.max + self.step - self.min) / self.step - ARANGE_EPS).ceil() as usize;
        (0..n).map(|i| self.min + i as f64 * self.step).collect()
    }
}

/// Mean and bias scales of one variable.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleSet {
    pub mean: ColorScale,
    pub bias: ColorScale,
}

impl ScaleSet {
    pub fn get(&self, class: ScaleClass) -> &ColorScale {
        match class {
            ScaleClass::Mean => &self.mean,
            ScaleClass::Bias => &self.bias,
        }
    }
}

/// Default bias scale: -8..8 step 0.5 on a diverging colormap.
fn bias_scale(colormap: ColormapKind) -> ColorScale {
    ColorScale {
        min: -8.0,
        max: 8.0,
        step: 0.5,
        colormap: Colormap::new(colormap),
    }
}

/// Color scales keyed by variable name.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleCatalog {
    scales: BTreeMap<String, ScaleSet>,
}

impl Default for ScaleCatalog {
    /// Built-in presets: `tas`, `evspsbl` and `ta`.
    fn default() -> Self {
        let mut scales = BTreeMap::new();
        scales.insert(
            "tas".to_string(),
            ScaleSet {
                mean: ColorScale {
                    min: -20.0,
                    max: 45.0,
                    step: 2.0,
                    colormap: Colormap::new(ColormapKind::Spectral).reversed(),
                },
                bias: bias_scale(ColormapKind::Coolwarm),
            },
        );
        scales.insert(
            "evspsbl".to_string(),
            ScaleSet {
                mean: ColorScale {
                    min: 0.0,
                    max: 20.0,
                    step: 2.0,
                    colormap: Colormap::new(ColormapKind::YlGnBu),
                },
                bias: bias_scale(ColormapKind::BrBG),
            },
        );
        scales.insert(
            "ta".to_string(),
            ScaleSet {
                mean: ColorScale {
                    min: 220.0,
                    max: 260.0,
                    step: 2.5,
                    colormap: Colormap::new(ColormapKind::Rainbow),
                },
                bias: bias_scale(ColormapKind::Coolwarm),
            },
        );
        Self { scales }
    }
}

impl ScaleCatalog {
    /// A catalog without presets.
    pub fn empty() -> Self {
        Self {
            scales: BTreeMap::new(),
        }
    }

    /// Add or replace the scales of `var`.
    pub fn with_scales(mut self, var: impl Into<String>, set: ScaleSet) -> Self {
        self.scales.insert(var.into(), set);
        self
    }

    /// Scales for `var`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::MissingScale`] if `var` has no entry.
    pub fn resolve(&self, var: &str) -> Result<&ScaleSet, LayoutError> {
        self.scales.get(var).ok_or_else(|| LayoutError::MissingScale {
            var: var.to_string(),
        })
    }
}
