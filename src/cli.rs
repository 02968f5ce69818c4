use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Comparison plots of climate-model output against reanalysis data.
#[derive(Parser)]
#[command(
    name = "esmplot",
    version,
    about = "Comparison plots of climate-model output against reanalysis data"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file (default: esmplot.toml if present).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output image format, png or svg. Overrides the config file.
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Plot annual-mean maps of models, observation and biases.
    Annual(MapArgs),
    /// Plot seasonal-mean maps, optionally averaged over a pressure band.
    Season(SeasonArgs),
    /// Plot area-mean vertical temperature profiles.
    Profile(ProfileArgs),
}

/// Input files shared by every subcommand. Optional inputs may be given as
/// empty strings.
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Model 1 mean file.
    pub model1: String,
    /// Model 2 mean file, or "" when absent.
    pub model2: String,
    /// Observation mean file.
    pub obs: String,
    /// Bias file, model 1 minus observation.
    pub bias1: String,
    /// Bias file, model 2 minus observation, or "".
    pub bias2: String,
    /// Bias file, model 1 minus model 2, or "".
    pub bias3: String,
    /// Variable name in the model and bias files.
    pub var: String,
    /// Variable name in the observation file.
    pub obs_var: String,
    /// Directory the figure is written to (created if absent).
    pub output_dir: PathBuf,
}

/// Arguments for the `annual` subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct MapArgs {
    #[command(flatten)]
    pub inputs: InputArgs,
    /// PlateCarree, Robinson, NorthPolarStereo or SouthPolarStereo.
    pub projection: String,
    /// Latitude range as "min,max".
    #[arg(allow_hyphen_values = true)]
    pub lat_range: String,
    /// Longitude range as "min,max".
    #[arg(allow_hyphen_values = true)]
    pub lon_range: String,
}

/// Arguments for the `season` subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct SeasonArgs {
    #[command(flatten)]
    pub map: MapArgs,
    /// Season label, e.g. DJF.
    pub season: String,
    /// Average every input over the configured pressure band first.
    #[arg(long)]
    pub upper_air: bool,
}

/// Arguments for the `profile` subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub inputs: InputArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUTS: [&str; 9] = [
        "m1.nc", "", "obs.nc", "b1.nc", "", "", "tas", "t2m", "out",
    ];

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("esmplot").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn annual_takes_negative_ranges() {
        let mut args = vec!["annual"];
        args.extend(INPUTS);
        args.extend(["PlateCarree", "-30,30", "0,360"]);
        let cli = parse(&args);
        let Command::Annual(a) = cli.command else {
            panic!("expected annual");
        };
        assert_eq!(a.inputs.model2, "");
        assert_eq!(a.lat_range, "-30,30");
        assert_eq!(a.inputs.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn season_flags_and_globals() {
        let mut args = vec!["-vv", "--format", "svg", "season", "--upper-air"];
        args.extend(INPUTS);
        args.extend(["Robinson", "-90,90", "-180,180", "DJF"]);
        let cli = parse(&args);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format.as_deref(), Some("svg"));
        let Command::Season(s) = cli.command else {
            panic!("expected season");
        };
        assert!(s.upper_air);
        assert_eq!(s.season, "DJF");
        assert_eq!(s.map.projection, "Robinson");
    }

    #[test]
    fn profile_takes_inputs_only() {
        let mut args = vec!["profile"];
        args.extend(INPUTS);
        let cli = parse(&args);
        assert!(matches!(cli.command, Command::Profile(_)));
    }

    #[test]
    fn missing_positional_is_a_usage_error() {
        assert!(Cli::try_parse_from(["esmplot", "annual", "m1.nc"]).is_err());
    }
}
