//! The reduction chains used by the map and profile commands, run on
//! synthetic `[time, plev, lat, lon]` variables.

use std::collections::BTreeMap;

use approx::assert_abs_diff_eq;
use esmplot_io::{AxisAliases, CoordNames, Field2d, GriddedVariable};
use esmplot_reduce::{
    FieldRole, KELVIN_OFFSET, Profile, PressureBand, STANDARD_LEVELS, UnitPolicy, average_band,
    interpolate_levels, select_first_time, spatial_mean, squeeze,
};
use ndarray::{ArrayD, IxDyn};

const LEVELS: [f64; 6] = [1000.0, 850.0, 700.0, 500.0, 300.0, 100.0];
const LAT: [f64; 3] = [-30.0, 0.0, 30.0];
const LON: [f64; 4] = [0.0, 90.0, 180.0, 270.0];

/// Temperature that falls linearly with pressure; later time steps are
/// offset by 100 so that any use of them shows up.
fn upper_air(name: &str, dims: [&str; 4]) -> GriddedVariable {
    let shape = [2, LEVELS.len(), LAT.len(), LON.len()];
    let data = ArrayD::from_shape_fn(IxDyn(&shape), |ix| {
        200.0 + 0.1 * LEVELS[ix[1]] + 100.0 * ix[0] as f64 + ix[3] as f64
    });
    let mut coords = BTreeMap::new();
    coords.insert(dims[0].to_string(), vec![0.0, 1.0]);
    coords.insert(dims[1].to_string(), LEVELS.to_vec());
    coords.insert(dims[2].to_string(), LAT.to_vec());
    coords.insert(dims[3].to_string(), LON.to_vec());
    GriddedVariable::new(
        name,
        dims.iter().map(|d| d.to_string()).collect(),
        data,
        coords,
        Some("K".to_string()),
    )
    .unwrap()
}

#[test]
fn band_mean_map_field() {
    let aliases = AxisAliases::default();
    let var = upper_air("ta", ["time", "plev", "lat", "lon"]);

    let var = select_first_time(var, &aliases).unwrap();
    let var = average_band(var, &PressureBand::default(), &aliases).unwrap();
    let names = CoordNames::resolve(&var, &aliases).unwrap();
    let var = squeeze(var, &[names.lat(), names.lon()]).unwrap();
    let field = Field2d::from_variable(&var, &names).unwrap();

    // Levels 500 and 300 fall inside 600-200 hPa.
    let expected = 200.0 + 0.1 * (500.0 + 300.0) / 2.0;
    assert_eq!(field.values().dim(), (3, 4));
    assert_abs_diff_eq!(field.values()[[0, 0]], expected, epsilon = 1e-9);
    assert_abs_diff_eq!(field.values()[[2, 3]], expected + 3.0, epsilon = 1e-9);
}

#[test]
fn era5_names_resolve_through_the_chain() {
    let aliases = AxisAliases::default();
    let var = upper_air("t", ["valid_time", "pressure_level", "latitude", "longitude"]);

    let var = select_first_time(var, &aliases).unwrap();
    let var = average_band(var, &PressureBand::new(850.0, 700.0).unwrap(), &aliases).unwrap();
    let names = CoordNames::resolve(&var, &aliases).unwrap();
    assert_eq!(names.lat(), "latitude");
    let field = Field2d::from_variable(&var, &names).unwrap();
    assert_abs_diff_eq!(field.values()[[1, 0]], 200.0 + 0.1 * 775.0, epsilon = 1e-9);
}

#[test]
fn bias_fields_keep_kelvin() {
    let aliases = AxisAliases::default();
    let var = select_first_time(upper_air("ta", ["time", "plev", "lat", "lon"]), &aliases).unwrap();
    let var = average_band(var, &PressureBand::default(), &aliases).unwrap();
    let names = CoordNames::resolve(&var, &aliases).unwrap();
    let field = Field2d::from_variable(&var, &names).unwrap();
    let policy = UnitPolicy::none().with_pair("ta", "t");

    let mean = policy.apply_field(field.clone(), FieldRole::Mean, "ta", "t");
    let bias = policy.apply_field(field.clone(), FieldRole::Bias, "ta", "t");
    assert_abs_diff_eq!(
        mean.values()[[0, 0]],
        field.values()[[0, 0]] - KELVIN_OFFSET,
        epsilon = 1e-9
    );
    assert_eq!(bias.values(), field.values());
    assert_eq!(bias.units(), Some("K"));
}

#[test]
fn area_mean_profile_on_standard_levels() {
    let aliases = AxisAliases::default();
    let var = select_first_time(upper_air("ta", ["time", "plev", "lat", "lon"]), &aliases).unwrap();
    let var = spatial_mean(var, "lat", "lon").unwrap();
    let profile = Profile::from_variable(&var, &aliases).unwrap();

    // Mean over lon indices 0..4 adds 1.5 everywhere.
    assert_eq!(profile.levels(), &LEVELS);
    assert_abs_diff_eq!(profile.values()[0], 200.0 + 100.0 + 1.5, epsilon = 1e-9);

    let on_standard = interpolate_levels(&profile, &STANDARD_LEVELS).unwrap();
    assert_eq!(on_standard.levels(), &STANDARD_LEVELS);
    for (p, v) in on_standard.points() {
        assert!(v.is_finite(), "{p} hPa");
        // The synthetic field is linear in pressure, so interpolation and
        // extrapolation both reproduce it.
        assert_abs_diff_eq!(v, 201.5 + 0.1 * p, epsilon = 1e-9);
    }
}
