//! Kelvin to Celsius conversion policy.

use esmplot_io::Field2d;
use tracing::debug;

use crate::profile::Profile;

/// Offset between the Kelvin and Celsius scales.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Units attribute written on converted data.
pub const CELSIUS_UNITS: &str = "degC";

/// Whether a field holds a mean state or a difference between two states.
///
/// Differences are invariant under an additive unit offset, so bias fields
/// are never converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Mean,
    Bias,
}

pub fn kelvin_to_celsius(k: f64) -> f64 {
    k - KELVIN_OFFSET
}

/// Decides which mean fields are converted from Kelvin to Celsius.
///
/// Conversion applies when the `(var, obs_var)` pair of a run is one of the
/// configured pairs, or unconditionally when `always` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPolicy {
    celsius_pairs: Vec<(String, String)>,
    always: bool,
}

impl Default for UnitPolicy {
    fn default() -> Self {
        Self {
            celsius_pairs: vec![("tas".to_string(), "t2m".to_string())],
            always: false,
        }
    }
}

impl UnitPolicy {
    /// A policy that never converts.
    pub fn none() -> Self {
        Self {
            celsius_pairs: Vec::new(),
            always: false,
        }
    }

    /// Add a `(var, obs_var)` pair that triggers conversion.
    pub fn with_pair(mut self, var: impl Into<String>, obs_var: impl Into<String>) -> Self {
        self.celsius_pairs.push((var.into(), obs_var.into()));
        self
    }

    /// Convert every mean field regardless of variable names.
    pub fn with_always(mut self, always: bool) -> Self {
        self.always = always;
        self
    }

    /// Whether mean fields of a `(var, obs_var)` run are converted.
    pub fn converts(&self, var: &str, obs_var: &str) -> bool {
        self.always
            || self
                .celsius_pairs
                .iter()
                .any(|(v, o)| v == var && o == obs_var)
    }

    /// Convert `field` if it is a mean field of a converting run.
    pub fn apply_field(&self, field: Field2d, role: FieldRole, var: &str, obs_var: &str) -> Field2d {
        if role == FieldRole::Bias || !self.converts(var, obs_var) {
            return field;
        }
        debug!(field = field.name(), "converting Kelvin to Celsius");
        field.map_values(kelvin_to_celsius, Some(CELSIUS_UNITS.to_string()))
    }

    /// Convert `profile` if it is a mean profile of a converting run.
    pub fn apply_profile(
        &self,
        profile: Profile,
        role: FieldRole,
        var: &str,
        obs_var: &str,
    ) -> Profile {
        if role == FieldRole::Bias || !self.converts(var, obs_var) {
            return profile;
        }
        debug!(profile = profile.name(), "converting Kelvin to Celsius");
        profile.map_values(kelvin_to_celsius)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use esmplot_io::CoordNames;
    use ndarray::array;

    use super::*;

    fn field(v: f64) -> Field2d {
        Field2d::new(
            "tas",
            CoordNames::new("lat", "lon"),
            vec![0.0],
            vec![0.0],
            array![[v]],
            Some("K".into()),
        )
        .unwrap()
    }

    #[test]
    fn default_pair_converts_means() {
        let policy = UnitPolicy::default();
        let out = policy.apply_field(field(300.0), FieldRole::Mean, "tas", "t2m");
        assert_abs_diff_eq!(out.values()[[0, 0]], 26.85, epsilon = 1e-9);
        assert_eq!(out.units(), Some("degC"));
    }

    #[test]
    fn other_pairs_are_untouched() {
        let policy = UnitPolicy::default();
        assert!(!policy.converts("tas", "tas"));
        assert!(!policy.converts("evspsbl", "e"));
        let out = policy.apply_field(field(300.0), FieldRole::Mean, "ta", "t");
        assert_eq!(out.values()[[0, 0]], 300.0);
        assert_eq!(out.units(), Some("K"));
    }

    #[test]
    fn bias_is_never_converted() {
        let policy = UnitPolicy::default().with_always(true);
        let out = policy.apply_field(field(1.5), FieldRole::Bias, "tas", "t2m");
        assert_eq!(out.values()[[0, 0]], 1.5);

        let p = Profile::new("ta", vec![500.0], vec![2.0]).unwrap();
        let out = policy.apply_profile(p, FieldRole::Bias, "ta", "t");
        assert_eq!(out.values(), &[2.0]);
    }

    #[test]
    fn always_converts_mean_profiles() {
        let policy = UnitPolicy::none().with_always(true);
        let p = Profile::new("t", vec![500.0], vec![253.15]).unwrap();
        let out = policy.apply_profile(p, FieldRole::Mean, "ta", "t");
        assert_abs_diff_eq!(out.values()[0], -20.0, epsilon = 1e-9);
    }

    #[test]
    fn extra_pairs_extend_defaults() {
        let policy = UnitPolicy::default().with_pair("ta", "t");
        assert!(policy.converts("ta", "t"));
        assert!(policy.converts("tas", "t2m"));
    }
}
