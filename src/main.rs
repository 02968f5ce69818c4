mod cli;
mod config;
mod convert;
mod inputs;
mod logging;
mod map_cmd;
mod profile_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config,
        format,
        command,
        ..
    } = cli;
    match command {
        Command::Annual(args) => map_cmd::run_annual(args, config, format),
        Command::Season(args) => map_cmd::run_season(args, config, format),
        Command::Profile(args) => profile_cmd::run(args, config, format),
    }
}
