//! Pure figure specifications consumed by the renderer.

use crate::extent::GeoExtent;
use crate::naming::OutputFormat;
use crate::panel::{Layout, PanelSpec};
use crate::projection::Projection;
use crate::scale::{ColorScale, ScaleSet};

/// Pixel size of one panel cell (map plus its color bar and title).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 600,
            height: 480,
        }
    }
}

/// Everything needed to draw one map figure, apart from the data.
#[derive(Debug, Clone, PartialEq)]
pub struct MapFigure {
    pub layout: Layout,
    pub projection: Projection,
    pub extent: GeoExtent,
    pub scales: ScaleSet,
    /// Request a national-border overlay.
    pub borders: bool,
    pub format: OutputFormat,
    pub cell: CellSize,
}

impl MapFigure {
    /// Color scale used by `panel`.
    pub fn scale_for(&self, panel: &PanelSpec) -> &ColorScale {
        self.scales.get(panel.scale_class())
    }

    /// Total image size in pixels.
    pub fn image_size(&self) -> (u32, u32) {
        let (rows, cols) = self.layout.shape().dims();
        (self.cell.width * cols as u32, self.cell.height * rows as u32)
    }
}

/// One line of a profile figure.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSeries {
    pub label: String,
    /// `(pressure hPa, value)` points.
    pub points: Vec<(f64, f64)>,
}

/// Everything needed to draw one vertical-profile figure.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFigure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ProfileSeries>,
    /// Pressure values that receive a labelled tick.
    pub pressure_ticks: Vec<f64>,
    pub format: OutputFormat,
    pub size: (u32, u32),
}

/// Pressure ticks on profile figures, hPa.
pub const PROFILE_PRESSURE_TICKS: [f64; 11] = [
    1000.0, 850.0, 700.0, 600.0, 500.0, 400.0, 300.0, 200.0, 100.0, 50.0, 1.0,
];

impl ProfileFigure {
    /// A figure with the default pressure ticks and a 1000x1200 canvas.
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        series: Vec<ProfileSeries>,
        format: OutputFormat,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: "Pressure (hPa)".to_string(),
            series,
            pressure_ticks: PROFILE_PRESSURE_TICKS.to_vec(),
            format,
            size: (1000, 1200),
        }
    }

    /// Minimum and maximum of every finite value across all series.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|&(_, v)| v))
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
