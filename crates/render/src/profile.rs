//! Vertical profile figures: value on x, pressure on an inverted y axis.

use std::path::Path;

use esmplot_layout::{OutputFormat, ProfileFigure};
use plotters::coord::Shift;
use plotters::coord::ranged1d::BindKeyPoints;
use plotters::prelude::*;
use tracing::info;

use crate::error::RenderError;

/// Line colors in series order; further series cycle.
const SERIES_COLORS: [RGBColor; 5] = [
    BLACK,
    BLUE,
    RED,
    RGBColor(255, 165, 0),
    RGBColor(128, 0, 128),
];

/// Render `figure` into `path`.
///
/// # Errors
///
/// Returns [`RenderError::EmptyFigure`] if no series has a finite point and
/// [`RenderError::Draw`] if the backend fails.
pub fn render_profiles(figure: &ProfileFigure, path: &Path) -> Result<(), RenderError> {
    let (Some(values), Some(pressures)) = (figure.value_range(), pressure_range(figure)) else {
        return Err(RenderError::EmptyFigure {
            name: figure.title.clone(),
        });
    };

    match figure.format {
        OutputFormat::Png => {
            let root = BitMapBackend::new(path, figure.size).into_drawing_area();
            draw_profiles(&root, figure, values, pressures)?;
        }
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, figure.size).into_drawing_area();
            draw_profiles(&root, figure, values, pressures)?;
        }
    }
    info!(path = %path.display(), series = figure.series.len(), "profile written");
    Ok(())
}

fn pressure_range(figure: &ProfileFigure) -> Option<(f64, f64)> {
    figure
        .series
        .iter()
        .flat_map(|s| s.points.iter())
        .filter(|(p, v)| p.is_finite() && v.is_finite())
        .fold(None, |acc, &(p, _)| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((f64::min(lo, p), f64::max(hi, p))),
        })
}

/// Pad a range by 5% on each side, or by one unit when it is degenerate.
fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    (lo - pad, hi + pad)
}

fn draw_profiles<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &ProfileFigure,
    values: (f64, f64),
    (p_lo, p_hi): (f64, f64),
) -> Result<(), RenderError> {
    root.fill(&WHITE)?;
    let (x0, x1) = padded(values);
    // The y axis carries negated pressure so surface levels sit at the bottom.
    let (y0, y1) = (-p_hi, -p_lo);
    let ticks: Vec<f64> = figure
        .pressure_ticks
        .iter()
        .filter(|&&p| p >= p_lo && p <= p_hi)
        .map(|p| -p)
        .collect();

    let mut chart = ChartBuilder::on(root)
        .caption(&figure.title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x0..x1, (y0..y1).with_key_points(ticks))?;

    chart
        .configure_mesh()
        .x_desc(figure.x_label.as_str())
        .y_desc(figure.y_label.as_str())
        .y_label_formatter(&|v| format!("{}", -v))
        .light_line_style(TRANSPARENT)
        .bold_line_style(BLACK.mix(0.3))
        .label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()?;

    for (i, series) in figure.series.iter().enumerate() {
        let color = SERIES_COLORS[i % SERIES_COLORS.len()];
        let points: Vec<(f64, f64)> = series
            .points
            .iter()
            .filter(|(p, v)| p.is_finite() && v.is_finite())
            .map(|&(p, v)| (v, -p))
            .collect();
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))?
            .label(series.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK.mix(0.4))
        .label_font(("sans-serif", 16))
        .draw()?;

    root.present()?;
    Ok(())
}
