//! Colormap palettes and level-to-color binning.
//!
//! Palettes are piecewise-linear in sRGB between fixed stops. A
//! [`LevelColors`] discretizes a palette against a set of contour
//! boundaries with out-of-range values taking the end colors, as in a
//! filled contour plot extended at both ends.

use esmplot_layout::{ColorScale, Colormap, ColormapKind};
use plotters::style::RGBColor;

/// A single color stop along the unit interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position in `[0, 1]`.
    pub pos: f64,
    /// sRGB 8-bit triplet.
    pub rgb: [u8; 3],
}

/// Continuous palette: stops with strictly increasing positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    stops: Vec<ColorStop>,
}

fn hex_stops(hex: &[u32]) -> Vec<ColorStop> {
    let n = hex.len() - 1;
    hex.iter()
        .enumerate()
        .map(|(i, &c)| ColorStop {
            pos: i as f64 / n as f64,
            rgb: [(c >> 16) as u8, (c >> 8) as u8, c as u8],
        })
        .collect()
}

impl Palette {
    /// Palette for a named colormap, reversed if requested.
    pub fn for_colormap(cmap: Colormap) -> Self {
        let mut stops = match cmap.kind() {
            ColormapKind::Spectral => hex_stops(&[
                0x9e0142, 0xd53e4f, 0xf46d43, 0xfdae61, 0xfee08b, 0xffffbf, 0xe6f598, 0xabdda4,
                0x66c2a5, 0x3288bd, 0x5e4fa2,
            ]),
            ColormapKind::Rainbow => hex_stops(&[0x8000ff, 0x00b4ec, 0x80ffb4, 0xffb462, 0xff0000]),
            ColormapKind::YlGnBu => hex_stops(&[
                0xffffd9, 0xedf8b1, 0xc7e9b4, 0x7fcdbb, 0x41b6c4, 0x1d91c0, 0x225ea8, 0x253494,
                0x081d58,
            ]),
            ColormapKind::Coolwarm => hex_stops(&[0x3b4cc0, 0x8db0fe, 0xdddddd, 0xf49a7b, 0xb40426]),
            ColormapKind::BrBG => hex_stops(&[
                0x543005, 0x8c510a, 0xbf812d, 0xdfc27d, 0xf6e8c3, 0xf5f5f5, 0xc7eae5, 0x80cdc1,
                0x35978f, 0x01665e, 0x003c30,
            ]),
            ColormapKind::RdBu => hex_stops(&[
                0x67001f, 0xb2182b, 0xd6604d, 0xf4a582, 0xfddbc7, 0xf7f7f7, 0xd1e5f0, 0x92c5de,
                0x4393c3, 0x2166ac, 0x053061,
            ]),
            ColormapKind::Viridis => hex_stops(&[
                0x440154, 0x482878, 0x3e4989, 0x31688e, 0x26828e, 0x1f9e89, 0x35b779, 0x6ece58,
                0xb5de2b, 0xfde725,
            ]),
        };
        if cmap.is_reversed() {
            stops.reverse();
            for s in &mut stops {
                s.pos = 1.0 - s.pos;
            }
        }
        Self { stops }
    }

    /// Color at position `t`, clamped to `[0, 1]`.
    pub fn sample(&self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let hi = self
            .stops
            .iter()
            .position(|s| s.pos >= t)
            .unwrap_or(self.stops.len() - 1);
        if hi == 0 {
            let [r, g, b] = self.stops[0].rgb;
            return RGBColor(r, g, b);
        }
        let (a, b) = (self.stops[hi - 1], self.stops[hi]);
        let f = (t - a.pos) / (b.pos - a.pos);
        let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * f).round() as u8;
        RGBColor(
            mix(a.rgb[0], b.rgb[0]),
            mix(a.rgb[1], b.rgb[1]),
            mix(a.rgb[2], b.rgb[2]),
        )
    }
}

/// Discrete colors for contour bins, plus under- and over-range colors.
#[derive(Debug, Clone)]
pub struct LevelColors {
    levels: Vec<f64>,
    /// `levels.len() + 1` colors: under, one per bin, over.
    colors: Vec<RGBColor>,
}

impl LevelColors {
    pub fn new(scale: &ColorScale) -> Self {
        let levels = scale.levels();
        let palette = Palette::for_colormap(scale.colormap());
        let n = levels.len() + 1;
        let colors = (0..n)
            .map(|i| palette.sample(if n > 1 { i as f64 / (n - 1) as f64 } else { 0.5 }))
            .collect();
        Self { levels, colors }
    }

    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Color for `value`, or `None` for NaN.
    pub fn color_for(&self, value: f64) -> Option<RGBColor> {
        if value.is_nan() {
            return None;
        }
        let idx = self.levels.partition_point(|&l| l <= value);
        Some(self.colors[idx])
    }

    /// Color of the bin between `levels[i]` and `levels[i + 1]`.
    pub fn bin_color(&self, i: usize) -> RGBColor {
        self.colors[(i + 1).min(self.colors.len() - 1)]
    }

    pub fn under(&self) -> RGBColor {
        self.colors[0]
    }

    pub fn over(&self) -> RGBColor {
        self.colors[self.colors.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(cmap: &str) -> ColorScale {
        ColorScale::new(0.0, 4.0, 1.0, cmap.parse().unwrap()).unwrap()
    }

    #[test]
    fn palette_endpoints_match_stops() {
        let p = Palette::for_colormap("coolwarm".parse().unwrap());
        assert_eq!(p.sample(0.0), RGBColor(0x3b, 0x4c, 0xc0));
        assert_eq!(p.sample(1.0), RGBColor(0xb4, 0x04, 0x26));
        assert_eq!(p.sample(-3.0), p.sample(0.0));
    }

    #[test]
    fn reversed_palette_swaps_ends() {
        let fwd = Palette::for_colormap("Spectral".parse().unwrap());
        let rev = Palette::for_colormap("Spectral_r".parse().unwrap());
        assert_eq!(fwd.sample(0.0), rev.sample(1.0));
        assert_eq!(fwd.sample(0.25), rev.sample(0.75));
    }

    #[test]
    fn values_bin_between_levels() {
        let lc = LevelColors::new(&scale("viridis"));
        assert_eq!(lc.levels(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(lc.color_for(0.5), Some(lc.bin_color(0)));
        assert_eq!(lc.color_for(3.5), Some(lc.bin_color(3)));
        assert_eq!(lc.color_for(1.0), Some(lc.bin_color(1)));
    }

    #[test]
    fn out_of_range_takes_end_colors() {
        let lc = LevelColors::new(&scale("BrBG"));
        assert_eq!(lc.color_for(-100.0), Some(lc.under()));
        assert_eq!(lc.color_for(100.0), Some(lc.over()));
        assert_eq!(lc.color_for(f64::NAN), None);
    }
}
