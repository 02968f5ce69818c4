use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug_span, info, info_span};

use esmplot_io::{Axis, CoordNames, read_variable};
use esmplot_layout::{
    Labels, OutputFormat, PanelRole, Period, ProfileFigure, ProfileKind, ProfileSeries, Titles,
};
use esmplot_reduce::{
    FieldRole, Profile, STANDARD_LEVELS, UnitPolicy, interpolate_levels, select_first_time,
    spatial_mean, squeeze,
};
use esmplot_render::render_profiles;

use crate::cli::ProfileArgs;
use crate::config;
use crate::convert::{self, Settings};
use crate::inputs::{InputEntry, Inputs};

const MEAN_TITLE: &str = "Vertical Temperature Profile (Mean)";
const MEAN_X_LABEL: &str = "Temperature (°C)";
const BIAS_TITLE: &str = "Vertical Temperature Bias Profile";
const BIAS_X_LABEL: &str = "Temperature Bias (K)";

/// Resolved arguments of one profile run.
#[derive(Debug)]
pub struct ProfileRun {
    pub inputs: Inputs,
    pub settings: Settings,
}

/// Run the `profile` subcommand.
pub fn run(args: ProfileArgs, config_path: Option<PathBuf>, format: Option<String>) -> Result<()> {
    let _cmd = info_span!("profile").entered();
    let inputs = Inputs::from_args(&args.inputs)?;
    let cfg = config::load(config_path.as_deref())?;
    let settings = convert::build_settings(&cfg, format.as_deref())?;
    inputs.echo();

    execute(&ProfileRun { inputs, settings }).map(|_| ())
}

/// Reduce one input to an area-mean profile on the standard levels.
fn load_profile(entry: &InputEntry<'_>, policy: &UnitPolicy, run: &ProfileRun) -> Result<Profile> {
    let reader = &run.settings.reader;
    let aliases = reader.aliases();
    let var = read_variable(entry.path, entry.var, reader)
        .with_context(|| format!("failed to load {} from {}", entry.var, entry.path.display()))?;
    let var = select_first_time(var, aliases)?;
    let names = CoordNames::resolve(&var, aliases)
        .with_context(|| format!("no spatial dimensions in {}", entry.path.display()))?;
    let var = spatial_mean(var, names.lat(), names.lon())?;
    let keep: Vec<&str> = aliases.find(Axis::Pressure, var.dims()).into_iter().collect();
    let var = squeeze(var, &keep)?;

    let profile = Profile::from_variable(&var, aliases)
        .with_context(|| format!("{} is not a vertical profile", entry.path.display()))?;
    let profile =
        policy.apply_profile(profile, entry.field_role(), &run.inputs.var, &run.inputs.obs_var);
    let interpolated = interpolate_levels(&profile, &STANDARD_LEVELS)
        .with_context(|| format!("interpolating {}", entry.path.display()))?;
    Ok(interpolated)
}

fn mean_label(labels: &Labels, role: PanelRole) -> String {
    let name = match role {
        PanelRole::Observation => &labels.observation,
        PanelRole::Model2 => &labels.model2,
        _ => &labels.model1,
    };
    format!("{name} (°C)")
}

/// Build the mean and bias figures.
pub fn build_figures(run: &ProfileRun) -> Result<(ProfileFigure, ProfileFigure)> {
    let policy = run.settings.units.clone().with_always(true);
    let titles = Titles {
        labels: run.settings.labels.clone(),
        period: Period::Annual,
        mean_unit: None,
    };

    let mut means = Vec::new();
    let mut biases = Vec::new();
    for entry in run.inputs.entries() {
        let _input = debug_span!("input", key = entry.role.input_key()).entered();
        let profile = load_profile(&entry, &policy, run)?;
        info!(key = entry.role.input_key(), levels = profile.levels().len(), "profile ready");
        let (label, target) = match entry.field_role() {
            FieldRole::Mean => (mean_label(&titles.labels, entry.role), &mut means),
            FieldRole::Bias => (titles.title(entry.role), &mut biases),
        };
        target.push((
            entry.role,
            ProfileSeries {
                label,
                points: profile.points().collect(),
            },
        ));
    }
    // Series order sets the line colors: observation, model 1, model 2.
    means.sort_by_key(|(role, _)| match role {
        PanelRole::Observation => 0,
        PanelRole::Model1 => 1,
        _ => 2,
    });
    biases.sort_by_key(|(role, _)| *role);

    let format = run.settings.format;
    let strip = |v: Vec<(PanelRole, ProfileSeries)>| -> Vec<ProfileSeries> {
        v.into_iter().map(|(_, s)| s).collect()
    };
    Ok((
        ProfileFigure::new(MEAN_TITLE, MEAN_X_LABEL, strip(means), format),
        ProfileFigure::new(BIAS_TITLE, BIAS_X_LABEL, strip(biases), format),
    ))
}

fn output_paths(run: &ProfileRun, format: OutputFormat) -> (PathBuf, PathBuf) {
    let dir = &run.inputs.output_dir;
    (
        dir.join(ProfileKind::Mean.file_name(format)),
        dir.join(ProfileKind::Bias.file_name(format)),
    )
}

/// Load, reduce, render both figures. Returns the written paths.
pub fn execute(run: &ProfileRun) -> Result<Vec<PathBuf>> {
    let (mean, bias) = build_figures(run)?;
    let (mean_path, bias_path) = output_paths(run, run.settings.format);

    std::fs::create_dir_all(&run.inputs.output_dir).with_context(|| {
        format!("failed to create output directory: {}", run.inputs.output_dir.display())
    })?;
    for (figure, path) in [(&mean, &mean_path), (&bias, &bias_path)] {
        render_profiles(figure, path).with_context(|| format!("failed to render {}", path.display()))?;
        println!("Plot saved to {}", path.display());
    }
    Ok(vec![mean_path, bias_path])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_labels_follow_configured_names() {
        let labels = Labels::default();
        assert_eq!(mean_label(&labels, PanelRole::Observation), "Observation (°C)");
        assert_eq!(mean_label(&labels, PanelRole::Model1), "CMIP7 (°C)");
        assert_eq!(mean_label(&labels, PanelRole::Model2), "CMIP6 (°C)");
    }

    #[test]
    fn profile_outputs_share_the_directory() {
        let args = crate::cli::InputArgs {
            model1: "m1.nc".into(),
            model2: String::new(),
            obs: "obs.nc".into(),
            bias1: "b1.nc".into(),
            bias2: String::new(),
            bias3: String::new(),
            var: "ta".into(),
            obs_var: "t".into(),
            output_dir: PathBuf::from("plots"),
        };
        let run = ProfileRun {
            inputs: Inputs::from_args(&args).unwrap(),
            settings: convert::build_settings(&crate::config::EsmplotConfig::default(), None)
                .unwrap(),
        };
        let (mean, bias) = output_paths(&run, OutputFormat::Svg);
        assert_eq!(mean, PathBuf::from("plots/vertical_profile_mean.svg"));
        assert_eq!(bias, PathBuf::from("plots/vertical_profile_bias.svg"));
    }
}
