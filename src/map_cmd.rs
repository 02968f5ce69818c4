use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{debug_span, info, info_span};

use esmplot_io::{
    CoordNames, Field2d, GriddedVariable, ReaderConfig, read_variable, validate_figure_fields,
};
use esmplot_layout::{
    GeoExtent, GridStyle, MapFigure, MapName, PanelRole, Period, Projection, Titles, select_layout,
};
use esmplot_reduce::{CELSIUS_UNITS, PressureBand, average_band, select_first_time, squeeze};
use esmplot_render::{FieldSet, render_map};

use crate::cli::{MapArgs, SeasonArgs};
use crate::config;
use crate::convert::{self, Settings};
use crate::inputs::{InputEntry, Inputs};

/// Resolved arguments of one map run.
#[derive(Debug)]
pub struct MapRun {
    pub inputs: Inputs,
    pub projection: Projection,
    pub extent: GeoExtent,
    pub period: Period,
    /// Pressure band to average over, for upper-air runs.
    pub band: Option<PressureBand>,
    pub settings: Settings,
}

/// Run the `annual` subcommand.
pub fn run_annual(args: MapArgs, config_path: Option<PathBuf>, format: Option<String>) -> Result<()> {
    let _cmd = info_span!("annual").entered();
    let run = resolve(&args, Period::Annual, false, config_path, format)?;
    execute(&run).map(|_| ())
}

/// Run the `season` subcommand.
pub fn run_season(args: SeasonArgs, config_path: Option<PathBuf>, format: Option<String>) -> Result<()> {
    let _cmd = info_span!("season", season = %args.season).entered();
    let period = Period::Season(args.season.trim().to_string());
    let run = resolve(&args.map, period, args.upper_air, config_path, format)?;
    execute(&run).map(|_| ())
}

/// Validate the command line and load the configuration. No dataset is
/// opened here, and range and projection errors come first.
fn resolve(
    args: &MapArgs,
    period: Period,
    upper_air: bool,
    config_path: Option<PathBuf>,
    format: Option<String>,
) -> Result<MapRun> {
    let extent = GeoExtent::parse(&args.lat_range, &args.lon_range)
        .context("latitude or longitude range is not in 'min,max' format")?;
    let projection: Projection = args.projection.trim().parse()?;
    let inputs = Inputs::from_args(&args.inputs)?;

    let cfg = config::load(config_path.as_deref())?;
    let settings = convert::build_settings(&cfg, format.as_deref())?;
    let band = upper_air.then_some(settings.band);

    inputs.echo();
    info!(
        projection = %projection,
        lat_min = extent.lat_min(),
        lat_max = extent.lat_max(),
        lon_min = extent.lon_min(),
        lon_max = extent.lon_max(),
        band = ?band.map(|b| b.label()),
        "map arguments"
    );

    Ok(MapRun {
        inputs,
        projection,
        extent,
        period,
        band,
        settings,
    })
}

/// Read one input and reduce it to a 2-D variable (time, band, singleton
/// dimensions removed).
fn reduce_input(entry: &InputEntry<'_>, run: &MapRun, reader: &ReaderConfig) -> Result<GriddedVariable> {
    let aliases = reader.aliases();
    let var = read_variable(entry.path, entry.var, reader)
        .with_context(|| format!("failed to load {} from {}", entry.var, entry.path.display()))?;
    let var = select_first_time(var, aliases)?;
    let var = match &run.band {
        Some(band) => average_band(var, band, aliases)
            .with_context(|| format!("pressure-band average of {}", entry.path.display()))?,
        None => var,
    };
    Ok(var)
}

fn to_field(var: GriddedVariable, names: &CoordNames, entry: &InputEntry<'_>) -> Result<Field2d> {
    let var = squeeze(var, &[names.lat(), names.lon()])?;
    Field2d::from_variable(&var, names)
        .with_context(|| format!("{} ({})", entry.role.input_key(), entry.path.display()))
}

/// Build the figure for `run` without rendering it.
pub fn build_figure(run: &MapRun) -> Result<(MapFigure, FieldSet)> {
    let s = &run.settings;
    let reader = &s.reader;
    let scales = s
        .scales
        .resolve(&run.inputs.var)
        .context("no color scale for this variable")?
        .clone();

    let mut reduced = Vec::new();
    for entry in run.inputs.entries() {
        let _input = debug_span!("input", key = entry.role.input_key()).entered();
        let var = reduce_input(&entry, run, reader)?;
        reduced.push((entry, var));
    }
    // Model 1 comes first and fixes the coordinate names for every field.
    let Some((_, first)) = reduced.first() else {
        bail!("no input fields");
    };
    let names = CoordNames::resolve(first, reader.aliases())?;

    let mut fields = FieldSet::new();
    for (entry, var) in reduced {
        let field = to_field(var, &names, &entry)?;
        let field = s
            .units
            .apply_field(field, entry.field_role(), &run.inputs.var, &run.inputs.obs_var);
        fields.insert(entry.role, field);
    }

    validate_figure_fields(&names, fields.iter().map(|(r, f)| (r.input_key(), f)))
        .finish()
        .context("input fields cannot share one figure")?;

    let titles = Titles {
        labels: s.labels.clone(),
        period: run.period.clone(),
        mean_unit: mean_unit(&fields),
    };
    let layout = select_layout(&run.inputs.presence(), &titles);
    let borders = matches!(run.period, Period::Season(_))
        && run.projection.grid_style() == GridStyle::LabeledGridlines;

    let figure = MapFigure {
        layout,
        projection: run.projection,
        extent: run.extent,
        scales,
        borders,
        format: s.format,
        cell: s.cell,
    };
    Ok((figure, fields))
}

/// Unit shown in mean-panel titles, taken from the model 1 field after
/// any Celsius conversion.
fn mean_unit(fields: &FieldSet) -> Option<String> {
    let units = fields.get(PanelRole::Model1)?.units()?.trim();
    match units {
        "" => None,
        CELSIUS_UNITS | "deg_C" | "degree_Celsius" | "celsius" => Some("°C".to_string()),
        other => Some(other.to_string()),
    }
}

/// Output path of `run` inside its output directory.
pub fn output_path(run: &MapRun) -> PathBuf {
    let band = run.band.map(|b| b.label());
    let name = MapName {
        var: &run.inputs.var,
        period: &run.period,
        with_model2: run.inputs.model2.is_some(),
        projection: run.projection,
        band: band.as_deref(),
        format: run.settings.format,
    };
    run.inputs.output_dir.join(name.file_name())
}

/// Load, reduce, render. Returns the written path.
pub fn execute(run: &MapRun) -> Result<PathBuf> {
    let (figure, fields) = build_figure(run)?;
    let path = output_path(run);

    std::fs::create_dir_all(&run.inputs.output_dir).with_context(|| {
        format!("failed to create output directory: {}", run.inputs.output_dir.display())
    })?;
    render_map(&figure, &fields, &path)
        .with_context(|| format!("failed to render {}", path.display()))?;

    println!("Plot saved to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::InputArgs;

    fn map_args(projection: &str, lat: &str) -> MapArgs {
        MapArgs {
            inputs: InputArgs {
                model1: "/nonexistent/m1.nc".into(),
                model2: String::new(),
                obs: "/nonexistent/obs.nc".into(),
                bias1: "/nonexistent/b1.nc".into(),
                bias2: String::new(),
                bias3: String::new(),
                var: "tas".into(),
                obs_var: "t2m".into(),
                output_dir: PathBuf::from("/nonexistent/out"),
            },
            projection: projection.into(),
            lat_range: lat.into(),
            lon_range: "0,360".into(),
        }
    }

    #[test]
    fn bad_range_fails_before_io() {
        let err = resolve(&map_args("PlateCarree", "10;20"), Period::Annual, false, None, None)
            .unwrap_err();
        assert!(format!("{err:#}").contains("'min,max'"));
    }

    #[test]
    fn unknown_projection_fails_before_io() {
        let err = resolve(&map_args("Mercenary", "-30,30"), Period::Annual, false, None, None)
            .unwrap_err();
        assert!(err.to_string().contains("Mercenary"));
    }

    #[test]
    fn output_name_reflects_run() {
        let period = Period::Season("DJF".into());
        let run = resolve(&map_args("Robinson", "-90,90"), period, true, None, Some("svg".into()))
            .unwrap();
        assert_eq!(
            output_path(&run),
            PathBuf::from("/nonexistent/out/tas_season_comparison_without_model2_Robinson_600-200hPa_DJF.svg")
        );
    }

    fn model1_field(units: Option<&str>) -> FieldSet {
        let field = Field2d::new(
            "ta",
            CoordNames::new("lat", "lon"),
            vec![0.0],
            vec![0.0],
            ndarray::array![[250.0]],
            units.map(str::to_string),
        )
        .unwrap();
        let mut fields = FieldSet::new();
        fields.insert(PanelRole::Model1, field);
        fields
    }

    #[test]
    fn mean_titles_carry_the_field_unit() {
        assert_eq!(mean_unit(&model1_field(Some("K"))), Some("K".to_string()));
        assert_eq!(mean_unit(&model1_field(Some("degC"))), Some("°C".to_string()));
        assert_eq!(mean_unit(&model1_field(Some(" "))), None);
        assert_eq!(mean_unit(&model1_field(None)), None);
        assert_eq!(mean_unit(&FieldSet::new()), None);
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let run = resolve(&map_args("PlateCarree", "-30,30"), Period::Annual, false, None, None)
            .unwrap();
        let err = execute(&run).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/m1.nc"));
        assert!(!run.inputs.output_dir.exists());
    }
}
