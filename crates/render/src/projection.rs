//! Forward projection of longitude/latitude onto map-plane coordinates.

use std::f64::consts::FRAC_PI_4;

use esmplot_layout::{GeoExtent, Projection};

/// Robinson table, every 5 degrees of latitude from 0 to 90:
/// `(parallel length, distance from equator)`.
const ROBINSON: [(f64, f64); 19] = [
    (1.0000, 0.0000),
    (0.9986, 0.0620),
    (0.9954, 0.1240),
    (0.9900, 0.1860),
    (0.9822, 0.2480),
    (0.9730, 0.3100),
    (0.9600, 0.3720),
    (0.9427, 0.4340),
    (0.9216, 0.4958),
    (0.8962, 0.5571),
    (0.8679, 0.6176),
    (0.8350, 0.6769),
    (0.7986, 0.7346),
    (0.7597, 0.7903),
    (0.7186, 0.8435),
    (0.6732, 0.8936),
    (0.6213, 0.9394),
    (0.5722, 0.9761),
    (0.5322, 1.0000),
];

/// Polar maps never extend further than this from their pole, in degrees of
/// latitude past the equator.
const POLAR_LIMIT: f64 = 45.0;

/// A projection bound to the extent of one map.
#[derive(Debug, Clone, Copy)]
pub struct MapProjector {
    projection: Projection,
    extent: GeoExtent,
}

impl MapProjector {
    pub fn new(projection: Projection, extent: GeoExtent) -> Self {
        Self { projection, extent }
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn extent(&self) -> GeoExtent {
        self.extent
    }

    /// Latitude range drawn by this map.
    pub fn lat_bounds(&self) -> (f64, f64) {
        match self.projection {
            Projection::PlateCarree => (self.extent.lat_min(), self.extent.lat_max()),
            Projection::Robinson => (-90.0, 90.0),
            Projection::NorthPolarStereo => (self.extent.lat_min().max(-POLAR_LIMIT), 90.0),
            Projection::SouthPolarStereo => (-90.0, self.extent.lat_max().min(POLAR_LIMIT)),
        }
    }

    /// Longitude range drawn by this map.
    pub fn lon_bounds(&self) -> (f64, f64) {
        match self.projection {
            Projection::PlateCarree => (self.extent.lon_min(), self.extent.lon_max()),
            _ => (-180.0, 180.0),
        }
    }

    /// Bring `lon` into the drawn longitude range by whole turns.
    pub fn wrap_lon(&self, lon: f64) -> f64 {
        match self.projection {
            Projection::PlateCarree => self.extent.wrap_lon(lon),
            _ => (lon + 180.0).rem_euclid(360.0) - 180.0,
        }
    }

    /// Project a point. The longitude should already be wrapped.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        match self.projection {
            Projection::PlateCarree => (lon, lat),
            Projection::Robinson => robinson(lon, lat),
            Projection::NorthPolarStereo => {
                let rho = (FRAC_PI_4 - lat.to_radians() / 2.0).tan();
                let l = lon.to_radians();
                (rho * l.sin(), -rho * l.cos())
            }
            Projection::SouthPolarStereo => {
                let rho = (FRAC_PI_4 + lat.to_radians() / 2.0).tan();
                let l = lon.to_radians();
                (rho * l.sin(), rho * l.cos())
            }
        }
    }

    /// Bounding box of the drawn region in map-plane coordinates:
    /// `(x_min, x_max, y_min, y_max)`.
    pub fn plane_bounds(&self) -> (f64, f64, f64, f64) {
        match self.projection {
            Projection::PlateCarree => (
                self.extent.lon_min(),
                self.extent.lon_max(),
                self.extent.lat_min(),
                self.extent.lat_max(),
            ),
            Projection::Robinson => {
                let (x, _) = robinson(180.0, 0.0);
                let (_, y) = robinson(0.0, 90.0);
                (-x, x, -y, y)
            }
            Projection::NorthPolarStereo | Projection::SouthPolarStereo => {
                let (lo, hi) = self.lat_bounds();
                let edge = if self.projection == Projection::NorthPolarStereo {
                    lo
                } else {
                    hi
                };
                let (_, r) = self.project(180.0, edge);
                let r = r.abs();
                (-r, r, -r, r)
            }
        }
    }
}

fn robinson(lon: f64, lat: f64) -> (f64, f64) {
    let a = lat.abs().min(90.0) / 5.0;
    let i = (a.floor() as usize).min(ROBINSON.len() - 2);
    let f = a - i as f64;
    let (x0, y0) = ROBINSON[i];
    let (x1, y1) = ROBINSON[i + 1];
    let plen = x0 + (x1 - x0) * f;
    let dist = y0 + (y1 - y0) * f;
    (
        0.8487 * plen * lon.to_radians(),
        1.3523 * dist * lat.signum(),
    )
}
