//! End-to-end tests of the `esmplot` binary against small NetCDF fixtures.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::{TempDir, tempdir};

/// Dimension names and sizes of one fixture file.
struct Grid {
    time: &'static str,
    lat: &'static str,
    lon: &'static str,
    /// Pressure dimension name and levels in hPa, if any.
    plev: Option<(&'static str, Vec<f64>)>,
}

impl Grid {
    fn surface() -> Self {
        Self {
            time: "time",
            lat: "lat",
            lon: "lon",
            plev: None,
        }
    }

    fn upper_air(plev: &'static str) -> Self {
        Self {
            plev: Some((plev, vec![1000.0, 850.0, 700.0, 500.0, 300.0, 200.0, 100.0])),
            ..Self::surface()
        }
    }

    fn era5(mut self) -> Self {
        self.time = "valid_time";
        self.lat = "latitude";
        self.lon = "longitude";
        self
    }
}

fn write_nc(path: &Path, var: &str, grid: &Grid, base: f64) {
    let lat: Vec<f64> = (0..13).map(|i| -60.0 + 10.0 * i as f64).collect();
    let lon: Vec<f64> = (0..24).map(|i| 15.0 * i as f64).collect();
    let mut file = netcdf::create(path).expect("create fixture");

    let mut dims: Vec<(&str, Vec<f64>)> = vec![(grid.time, vec![0.0, 1.0])];
    if let Some((name, levels)) = &grid.plev {
        dims.push((*name, levels.clone()));
    }
    dims.push((grid.lat, lat.clone()));
    dims.push((grid.lon, lon.clone()));

    for (name, values) in &dims {
        file.add_dimension(name, values.len()).expect("add dimension");
    }
    for (name, values) in &dims {
        let mut v = file.add_variable::<f64>(name, &[*name]).expect("add coordinate");
        v.put_values(values, ..).expect("put coordinate");
    }

    let n_lev = grid.plev.as_ref().map_or(1, |(_, l)| l.len());
    let n: usize = 2 * n_lev * lat.len() * lon.len();
    let data: Vec<f64> = (0..n)
        .map(|i| {
            let cell = i % (lat.len() * lon.len());
            let lev = (i / (lat.len() * lon.len())) % n_lev;
            base + (cell % 7) as f64 - 3.0 * lev as f64
        })
        .collect();
    let names: Vec<&str> = dims.iter().map(|(n, _)| *n).collect();
    let mut v = file.add_variable::<f64>(var, &names).expect("add data variable");
    v.put_attribute("units", "K").expect("add units");
    v.put_values(&data, ..).expect("put data");
}

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: tempdir().unwrap(),
        }
    }

    fn file(&self, name: &str, var: &str, grid: &Grid, base: f64) -> String {
        let path = self.dir.path().join(name);
        write_nc(&path, var, grid, base);
        path.display().to_string()
    }

    fn out(&self) -> PathBuf {
        self.dir.path().join("plots")
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_esmplot"))
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("spawn esmplot")
    }

    fn outputs(&self) -> Vec<String> {
        match fs::read_dir(self.out()) {
            Ok(entries) => {
                let mut names: Vec<String> = entries
                    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                    .collect();
                names.sort();
                names
            }
            Err(_) => Vec::new(),
        }
    }
}

/// Surface `tas` inputs without model 2: model1, "", obs, bias1, "", "".
fn surface_inputs(fx: &Fixture) -> Vec<String> {
    let g = Grid::surface();
    vec![
        fx.file("m1.nc", "tas", &g, 288.0),
        String::new(),
        fx.file("obs.nc", "t2m", &g, 287.0),
        fx.file("b1.nc", "tas", &g, 1.0),
        String::new(),
        String::new(),
        "tas".into(),
        "t2m".into(),
        fx.out().display().to_string(),
    ]
}

fn with_args<'a>(head: &[&'a str], inputs: &'a [String], tail: &[&'a str]) -> Vec<&'a str> {
    head.iter()
        .copied()
        .chain(inputs.iter().map(String::as_str))
        .chain(tail.iter().copied())
        .collect()
}

#[test]
fn annual_plate_carree_writes_one_image() {
    let fx = Fixture::new();
    let inputs = surface_inputs(&fx);
    let out = fx.run(&with_args(&["annual"], &inputs, &["PlateCarree", "-30,30", "0,360"]));

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        fx.outputs(),
        vec!["tas_annual_comparison_without_model2_PlateCarree.png".to_string()]
    );
    assert!(String::from_utf8_lossy(&out.stdout).contains("Plot saved to"));
}

#[test]
fn unknown_projection_exits_one_without_output() {
    let fx = Fixture::new();
    let inputs = surface_inputs(&fx);
    let out = fx.run(&with_args(&["annual"], &inputs, &["Mercenary", "-30,30", "0,360"]));

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Mercenary"));
    assert!(!fx.out().exists());
}

#[test]
fn malformed_range_exits_one_before_reading() {
    let fx = Fixture::new();
    let mut inputs = surface_inputs(&fx);
    // A missing model file would fail later; the range error must come first.
    inputs[0] = fx.dir.path().join("absent.nc").display().to_string();
    for bad in ["abc", "10;20", "1,2,3"] {
        let out = fx.run(&with_args(&["annual"], &inputs, &["PlateCarree", bad, "0,360"]));
        assert_eq!(out.status.code(), Some(1), "{bad}");
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(stderr.contains("min,max"), "{bad}: {stderr}");
        assert!(!stderr.contains("absent.nc"), "{bad}: {stderr}");
    }
    assert!(!fx.out().exists());
}

#[test]
fn missing_variable_lists_available() {
    let fx = Fixture::new();
    let mut inputs = surface_inputs(&fx);
    inputs[6] = "ta".into();
    let out = fx.run(&with_args(&["annual"], &inputs, &["Robinson", "-90,90", "0,360"]));

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("variable 'ta' not found"), "{stderr}");
    assert!(stderr.contains("available variables: tas"), "{stderr}");
    assert!(fx.outputs().is_empty());
}

#[test]
fn upper_air_season_with_model2_svg() {
    let fx = Fixture::new();
    let g = Grid::upper_air("plev");
    let inputs = vec![
        fx.file("m1.nc", "ta", &g, 240.0),
        fx.file("m2.nc", "ta", &g, 241.0),
        fx.file("obs.nc", "t", &Grid::upper_air("pressure_level"), 239.0),
        fx.file("b1.nc", "ta", &g, 1.0),
        fx.file("b2.nc", "ta", &g, 2.0),
        String::new(),
        "ta".into(),
        "t".into(),
        fx.out().display().to_string(),
    ];
    let out = fx.run(&with_args(
        &["--format", "svg", "season", "--upper-air"],
        &inputs,
        &["NorthPolarStereo", "0,90", "-180,180", "JJA"],
    ));

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        fx.outputs(),
        vec!["ta_season_comparison_with_model2_NorthPolarStereo_600-200hPa_JJA.svg".to_string()]
    );
    // No Celsius pair is configured for ta, so mean titles keep the file's unit.
    let svg = fs::read_to_string(
        fx.out().join("ta_season_comparison_with_model2_NorthPolarStereo_600-200hPa_JJA.svg"),
    )
    .unwrap();
    assert!(svg.contains("CMIP7 JJA Mean (K)"), "model 1 title");
    assert!(svg.contains("Observation JJA Mean (K)"), "observation title");
}

#[test]
fn profile_writes_mean_and_bias_figures() {
    let fx = Fixture::new();
    let g = Grid::upper_air("plev");
    let inputs = vec![
        fx.file("m1.nc", "ta", &g, 250.0),
        String::new(),
        fx.file("obs.nc", "t", &Grid::upper_air("pressure_level").era5(), 249.0),
        fx.file("b1.nc", "ta", &g, 0.5),
        String::new(),
        String::new(),
        "ta".into(),
        "t".into(),
        fx.out().display().to_string(),
    ];
    let out = fx.run(&with_args(&["profile"], &inputs, &[]));

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        fx.outputs(),
        vec![
            "vertical_profile_bias.png".to_string(),
            "vertical_profile_mean.png".to_string()
        ]
    );
}

#[test]
fn config_file_overrides_format_and_scales() {
    let fx = Fixture::new();
    let g = Grid::surface();
    let inputs = vec![
        fx.file("m1.nc", "pr", &g, 3.0),
        String::new(),
        fx.file("obs.nc", "tp", &g, 2.0),
        fx.file("b1.nc", "pr", &g, 1.0),
        String::new(),
        String::new(),
        "pr".into(),
        "tp".into(),
        fx.out().display().to_string(),
    ];
    let config = fx.dir.path().join("plots.toml");
    fs::write(
        &config,
        r#"
[output]
format = "svg"
width = 300
height = 240

[scales.pr]
mean = { min = 0, max = 12, step = 1, colormap = "YlGnBu" }
bias = { min = -4, max = 4, step = 0.5, colormap = "BrBG" }
"#,
    )
    .unwrap();

    let config_arg = config.display().to_string();
    let out = fx.run(&with_args(
        &["-c", &config_arg, "annual"],
        &inputs,
        &["Robinson", "-90,90", "0,360"],
    ));
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        fx.outputs(),
        vec!["pr_annual_comparison_without_model2_Robinson.svg".to_string()]
    );

    // Without the table the variable has no scale.
    let out = fx.run(&with_args(&["annual"], &inputs, &["Robinson", "-90,90", "0,360"]));
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("[scales.pr]"));
}
