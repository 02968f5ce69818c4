//! Map figures: one projected panel per layout slot, each with its own
//! horizontal color bar.

use std::collections::BTreeMap;
use std::path::Path;

use esmplot_io::Field2d;
use esmplot_layout::{
    GridStyle, MapFigure, OutputFormat, PanelRole, PanelSpec, format_lat, format_lon,
};
use plotters::coord::Shift;
use plotters::coord::ranged1d::BindKeyPoints;
use plotters::prelude::*;
use tracing::{debug, info};

use crate::colormap::LevelColors;
use crate::error::RenderError;
use crate::projection::MapProjector;

/// Upper bound on drawn cells along each axis; finer grids are strided.
const MAX_CELLS_LON: usize = 360;
const MAX_CELLS_LAT: usize = 180;

/// Edge sampling step for curved cells and gridlines, in degrees.
const EDGE_STEP_DEG: f64 = 2.0;

const GRID_COLOR: RGBColor = RGBColor(128, 128, 128);

/// The fields of one figure, keyed by panel role.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    fields: BTreeMap<PanelRole, Field2d>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: PanelRole, field: Field2d) {
        self.fields.insert(role, field);
    }

    pub fn get(&self, role: PanelRole) -> Option<&Field2d> {
        self.fields.get(&role)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate `(role, field)` pairs in role order.
    pub fn iter(&self) -> impl Iterator<Item = (PanelRole, &Field2d)> {
        self.fields.iter().map(|(r, f)| (*r, f))
    }
}

/// Render `figure` with data from `fields` into `path`.
///
/// Empty layout slots are left blank. Every drawn slot must have a field.
///
/// # Errors
///
/// Returns [`RenderError::MissingField`] if a drawn panel has no field and
/// [`RenderError::Draw`] if the backend fails.
pub fn render_map(figure: &MapFigure, fields: &FieldSet, path: &Path) -> Result<(), RenderError> {
    for panel in figure.layout.panels() {
        if fields.get(panel.role).is_none() {
            return Err(RenderError::MissingField {
                role: panel.role.input_key().to_string(),
            });
        }
    }

    let size = figure.image_size();
    match figure.format {
        OutputFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_map_figure(&root, figure, fields)?;
        }
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_map_figure(&root, figure, fields)?;
        }
    }
    info!(path = %path.display(), width = size.0, height = size.1, "map written");
    Ok(())
}

fn draw_map_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &MapFigure,
    fields: &FieldSet,
) -> Result<(), RenderError> {
    root.fill(&WHITE)?;
    let projector = MapProjector::new(figure.projection, figure.extent);
    if figure.borders {
        debug!("border overlay requested; no geography is bundled, skipping");
    }

    let cells = root.split_evenly(figure.layout.shape().dims());
    for (slot, cell) in figure.layout.slots().iter().zip(&cells) {
        let Some(panel) = slot else {
            continue;
        };
        let field = fields.get(panel.role).ok_or_else(|| RenderError::MissingField {
            role: panel.role.input_key().to_string(),
        })?;
        let colors = LevelColors::new(figure.scale_for(panel));
        draw_panel(cell, panel, field, &colors, &projector)?;
    }
    root.present()?;
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    cell: &DrawingArea<DB, Shift>,
    panel: &PanelSpec,
    field: &Field2d,
    colors: &LevelColors,
    projector: &MapProjector,
) -> Result<(), RenderError> {
    let body = cell.margin(6, 6, 6, 6).titled(&panel.title, ("sans-serif", 18))?;
    let (_, h) = body.dim_in_pixel();
    let bar_h = (h / 6).clamp(36, 70);
    let (map_area, bar_area) = body.split_vertically(h.saturating_sub(bar_h));
    draw_field(&map_area, field, colors, projector)?;
    draw_colorbar(&bar_area, colors)?;
    debug!(role = ?panel.role, field = field.name(), "panel drawn");
    Ok(())
}

/// Shrink `area` so the plane box keeps its aspect ratio.
fn fit_aspect<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    aspect: f64,
    reserved: (u32, u32),
) -> DrawingArea<DB, Shift> {
    let (w, h) = area.dim_in_pixel();
    let cw = w.saturating_sub(reserved.0) as f64;
    let ch = h.saturating_sub(reserved.1) as f64;
    if cw <= 0.0 || ch <= 0.0 || !aspect.is_finite() || aspect <= 0.0 {
        return area.margin(0, 0, 0, 0);
    }
    if cw / ch > aspect {
        let pad = ((cw - ch * aspect) / 2.0) as u32;
        area.margin(0, 0, pad, pad)
    } else {
        let pad = ((ch - cw / aspect) / 2.0) as u32;
        area.margin(pad, pad, 0, 0)
    }
}

fn draw_field<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    field: &Field2d,
    colors: &LevelColors,
    projector: &MapProjector,
) -> Result<(), RenderError> {
    let (x0, x1, y0, y1) = projector.plane_bounds();
    let explicit = projector.projection().grid_style() == GridStyle::ExplicitTicks;
    let (x_lab, y_lab) = if explicit { (24, 48) } else { (0, 0) };
    let area = fit_aspect(area, (x1 - x0) / (y1 - y0), (y_lab + 10, x_lab + 10));

    let (lon_ticks, lat_ticks) = if explicit {
        let extent = projector.extent();
        (extent.lon_ticks().to_vec(), extent.lat_ticks().to_vec())
    } else {
        (Vec::new(), Vec::new())
    };

    let mut chart = ChartBuilder::on(&area)
        .margin(5)
        .x_label_area_size(x_lab)
        .y_label_area_size(y_lab)
        .build_cartesian_2d(
            (x0..x1).with_key_points(lon_ticks),
            (y0..y1).with_key_points(lat_ticks),
        )?;

    chart.draw_series(
        cell_polygons(field, projector)
            .into_iter()
            .filter_map(|(points, value)| {
                colors
                    .color_for(value)
                    .map(|c| Polygon::new(clamp_points(points, (x0, x1, y0, y1)), c.filled()))
            }),
    )?;

    if explicit {
        chart
            .configure_mesh()
            .disable_mesh()
            .x_label_formatter(&|v| format_lon(*v))
            .y_label_formatter(&|v| format_lat(*v))
            .label_style(("sans-serif", 12))
            .draw()?;
    } else {
        chart.configure_mesh().disable_mesh().disable_axes().draw()?;
        draw_gridlines(&mut chart, projector)?;
        chart.draw_series(std::iter::once(PathElement::new(
            outline(projector),
            BLACK.stroke_width(1),
        )))?;
    }
    Ok(())
}

fn clamp_points(points: Vec<(f64, f64)>, (x0, x1, y0, y1): (f64, f64, f64, f64)) -> Vec<(f64, f64)> {
    points
        .into_iter()
        .map(|(x, y)| (x.clamp(x0, x1), y.clamp(y0, y1)))
        .collect()
}

/// Cell boundaries for a vector of cell centers.
fn cell_edges(centers: &[f64]) -> Vec<f64> {
    match centers.len() {
        0 => Vec::new(),
        1 => vec![centers[0] - 0.5, centers[0] + 0.5],
        n => {
            let mut edges = Vec::with_capacity(n + 1);
            edges.push(centers[0] - (centers[1] - centers[0]) / 2.0);
            edges.extend(centers.windows(2).map(|w| (w[0] + w[1]) / 2.0));
            edges.push(centers[n - 1] + (centers[n - 1] - centers[n - 2]) / 2.0);
            edges
        }
    }
}

/// Projected polygons and values of the (possibly strided) grid cells.
/// NaN cells are included; the caller skips them. Cells with a non-finite
/// coordinate edge are dropped.
pub(crate) fn cell_polygons(field: &Field2d, projector: &MapProjector) -> Vec<(Vec<(f64, f64)>, f64)> {
    let lat_edges = cell_edges(field.lat());
    let lon_edges = cell_edges(field.lon());
    let (ny, nx) = field.values().dim();
    let sy = ny.div_ceil(MAX_CELLS_LAT).max(1);
    let sx = nx.div_ceil(MAX_CELLS_LON).max(1);
    let (lat_lo_b, lat_hi_b) = projector.lat_bounds();
    let (lon_lo_b, lon_hi_b) = projector.lon_bounds();
    let curved = projector.projection().grid_style() != GridStyle::ExplicitTicks;

    let mut polys = Vec::with_capacity((ny / sy + 1) * (nx / sx + 1));
    for i in (0..ny).step_by(sy) {
        let i_end = (i + sy).min(ny);
        let (a, b) = (lat_edges[i], lat_edges[i_end]);
        if !(a.is_finite() && b.is_finite()) {
            continue;
        }
        let lat_lo = a.min(b).max(lat_lo_b).max(-90.0);
        let lat_hi = a.max(b).min(lat_hi_b).min(90.0);
        if lat_hi <= lat_lo {
            continue;
        }
        for j in (0..nx).step_by(sx) {
            let j_end = (j + sx).min(nx);
            let value = field.values()[[(i + i_end - 1) / 2, (j + j_end - 1) / 2]];
            let center = field.lon()[j];
            let shift = projector.wrap_lon(center) - center;
            let (a, b) = (lon_edges[j] + shift, lon_edges[j_end] + shift);
            if !(a.is_finite() && b.is_finite()) {
                continue;
            }
            let lon_lo = a.min(b).max(lon_lo_b);
            let lon_hi = a.max(b).min(lon_hi_b);
            if lon_hi <= lon_lo {
                continue;
            }
            let points = if curved {
                curved_cell(projector, lon_lo, lon_hi, lat_lo, lat_hi)
            } else {
                vec![
                    (lon_lo, lat_lo),
                    (lon_hi, lat_lo),
                    (lon_hi, lat_hi),
                    (lon_lo, lat_hi),
                ]
            };
            polys.push((points, value));
        }
    }
    polys
}

fn curved_cell(
    projector: &MapProjector,
    lon_lo: f64,
    lon_hi: f64,
    lat_lo: f64,
    lat_hi: f64,
) -> Vec<(f64, f64)> {
    let n = ((lon_hi - lon_lo) / EDGE_STEP_DEG).ceil().max(1.0) as usize;
    let lon_at = |k: usize| lon_lo + (lon_hi - lon_lo) * k as f64 / n as f64;
    let mut pts: Vec<(f64, f64)> = (0..=n).map(|k| projector.project(lon_at(k), lat_lo)).collect();
    pts.extend((0..=n).rev().map(|k| projector.project(lon_at(k), lat_hi)));
    pts
}

/// Boundary of the drawn region, projected.
fn outline(projector: &MapProjector) -> Vec<(f64, f64)> {
    let (lat0, lat1) = projector.lat_bounds();
    let (lon0, lon1) = projector.lon_bounds();
    let lons = sample_range(lon0, lon1);
    let lats = sample_range(lat0, lat1);
    let mut pts: Vec<(f64, f64)> = lons.iter().map(|&l| projector.project(l, lat0)).collect();
    pts.extend(lats.iter().map(|&p| projector.project(lon1, p)));
    pts.extend(lons.iter().rev().map(|&l| projector.project(l, lat1)));
    pts.extend(lats.iter().rev().map(|&p| projector.project(lon0, p)));
    pts
}

fn sample_range(a: f64, b: f64) -> Vec<f64> {
    let n = ((b - a).abs() / EDGE_STEP_DEG).ceil().max(1.0) as usize;
    (0..=n).map(|k| a + (b - a) * k as f64 / n as f64).collect()
}

fn draw_gridlines<DB: DrawingBackend, X, Y>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<X, Y>>,
    projector: &MapProjector,
) -> Result<(), RenderError>
where
    X: Ranged<ValueType = f64>,
    Y: Ranged<ValueType = f64>,
{
    let (lat0, lat1) = projector.lat_bounds();
    let style = GRID_COLOR.mix(0.5).stroke_width(1);
    let label_style = ("sans-serif", 11).into_font().color(&BLACK);

    let meridians: Vec<f64> = (-3..=2).map(|k| k as f64 * 60.0).collect();
    let parallels: Vec<f64> = (-2..=2)
        .map(|k| k as f64 * 30.0)
        .filter(|&p| p > lat0 && p < lat1)
        .collect();

    for &lon in &meridians {
        let pts: Vec<(f64, f64)> = sample_range(lat0, lat1)
            .into_iter()
            .map(|lat| projector.project(lon, lat))
            .collect();
        chart.draw_series(DashedLineSeries::new(pts, 4, 4, style))?;
    }
    for &lat in &parallels {
        let pts: Vec<(f64, f64)> = sample_range(-180.0, 180.0)
            .into_iter()
            .map(|lon| projector.project(lon, lat))
            .collect();
        chart.draw_series(DashedLineSeries::new(pts, 4, 4, style))?;
    }

    // Longitude labels along the bottom edge, latitude labels on the left.
    let label_lat = if projector.projection().is_polar() {
        if lat1 >= 90.0 { lat0 } else { lat1 }
    } else {
        lat0
    };
    chart.draw_series(meridians.iter().map(|&lon| {
        Text::new(format_lon(lon), projector.project(lon, label_lat), label_style.clone())
    }))?;
    let label_lon = if projector.projection().is_polar() { 135.0 } else { -180.0 };
    chart.draw_series(parallels.iter().map(|&lat| {
        Text::new(format_lat(lat), projector.project(label_lon, lat), label_style.clone())
    }))?;
    Ok(())
}

fn format_level(v: f64) -> String {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 { "0".to_string() } else { format!("{r}") }
}

/// Every k-th level so that at most `max` labels are drawn.
fn tick_levels(levels: &[f64], max: usize) -> Vec<f64> {
    let k = levels.len().div_ceil(max.max(1)).max(1);
    levels.iter().copied().step_by(k).collect()
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    colors: &LevelColors,
) -> Result<(), RenderError> {
    let levels = colors.levels();
    let (Some(&lo), Some(&hi)) = (levels.first(), levels.last()) else {
        return Ok(());
    };
    let ext = if hi > lo { (hi - lo) * 0.04 } else { 0.5 };
    let (w, _) = area.dim_in_pixel();

    let mut chart = ChartBuilder::on(area)
        .margin_left(w / 10)
        .margin_right(w / 10)
        .margin_top(4)
        .x_label_area_size(20)
        .build_cartesian_2d(
            ((lo - ext)..(hi + ext)).with_key_points(tick_levels(levels, 9)),
            0.0..1.0,
        )?;
    chart
        .configure_mesh()
        .disable_mesh()
        .disable_y_axis()
        .x_label_formatter(&|v| format_level(*v))
        .label_style(("sans-serif", 11))
        .draw()?;

    chart.draw_series(
        levels
            .windows(2)
            .enumerate()
            .map(|(i, w)| Rectangle::new([(w[0], 0.0), (w[1], 1.0)], colors.bin_color(i).filled())),
    )?;
    chart.draw_series([
        Polygon::new(vec![(lo, 0.0), (lo, 1.0), (lo - ext, 0.5)], colors.under().filled()),
        Polygon::new(vec![(hi, 0.0), (hi, 1.0), (hi + ext, 0.5)], colors.over().filled()),
    ])?;
    Ok(())
}
