//! Linear interpolation of profiles onto a fixed set of pressure levels.

use tracing::debug;

use crate::error::ReduceError;
use crate::profile::Profile;

/// Standard pressure levels in hPa, surface first.
pub const STANDARD_LEVELS: [f64; 19] = [
    1000.0, 925.0, 850.0, 700.0, 600.0, 500.0, 400.0, 300.0, 250.0, 200.0, 150.0, 100.0, 70.0,
    50.0, 30.0, 20.0, 10.0, 5.0, 1.0,
];

/// Interpolate `profile` linearly in pressure onto `targets`.
///
/// NaN samples are dropped first. Targets outside the native range are
/// extrapolated linearly from the two outermost samples on that side, so
/// far-away levels can be inaccurate but are always finite. Targets equal
/// to a native level return that level's value exactly.
///
/// # Errors
///
/// Returns [`ReduceError::InsufficientLevels`] if fewer than two distinct
/// finite levels remain.
pub fn interpolate_levels(profile: &Profile, targets: &[f64]) -> Result<Profile, ReduceError> {
    let mut samples: Vec<(f64, f64)> = profile
        .points()
        .filter(|(p, v)| p.is_finite() && v.is_finite())
        .collect();
    samples.sort_by(|a, b| a.0.total_cmp(&b.0));
    samples.dedup_by(|a, b| a.0 == b.0);

    if samples.len() < 2 {
        return Err(ReduceError::InsufficientLevels {
            name: profile.name().to_string(),
            found: samples.len(),
        });
    }

    let values: Vec<f64> = targets.iter().map(|&p| interpolate_at(&samples, p)).collect();
    debug!(
        name = profile.name(),
        native = ?profile.levels(),
        targets = ?targets,
        "interpolated profile"
    );
    Profile::new(profile.name(), targets.to_vec(), values)
}

/// `samples` is sorted by pressure and has at least two entries.
fn interpolate_at(samples: &[(f64, f64)], p: f64) -> f64 {
    let n = samples.len();
    let seg = match samples.iter().position(|&(sp, _)| sp >= p) {
        Some(i) if samples[i].0 == p => return samples[i].1,
        Some(0) => 0,
        Some(i) => i - 1,
        None => n - 2,
    };
    let (p0, v0) = samples[seg];
    let (p1, v1) = samples[seg + 1];
    v0 + (v1 - v0) * (p - p0) / (p1 - p0)
}
