//! Resolution of the positional input arguments shared by every subcommand.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::info;

use esmplot_layout::{PanelRole, Presence};
use esmplot_reduce::FieldRole;

use crate::cli::InputArgs;

/// One file to load: which panel it feeds, where it is, which variable.
#[derive(Debug, Clone)]
pub struct InputEntry<'a> {
    pub role: PanelRole,
    pub path: &'a Path,
    pub var: &'a str,
}

impl InputEntry<'_> {
    pub fn field_role(&self) -> FieldRole {
        match self.role {
            PanelRole::Observation | PanelRole::Model1 | PanelRole::Model2 => FieldRole::Mean,
            _ => FieldRole::Bias,
        }
    }
}

/// Input files with optional ones resolved to `None`.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub model1: PathBuf,
    pub model2: Option<PathBuf>,
    pub obs: PathBuf,
    pub bias1: PathBuf,
    pub bias2: Option<PathBuf>,
    pub bias3: Option<PathBuf>,
    pub var: String,
    pub obs_var: String,
    pub output_dir: PathBuf,
}

/// `None` for an empty or whitespace-only argument.
fn optional(arg: &str) -> Option<PathBuf> {
    let trimmed = arg.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

fn required(arg: &str, what: &str) -> Result<PathBuf> {
    match optional(arg) {
        Some(p) => Ok(p),
        None => bail!("{what} is required but was empty"),
    }
}

impl Inputs {
    pub fn from_args(args: &InputArgs) -> Result<Self> {
        let var = args.var.trim();
        let obs_var = args.obs_var.trim();
        if var.is_empty() || obs_var.is_empty() {
            bail!("variable names must not be empty");
        }
        Ok(Self {
            model1: required(&args.model1, "model 1 file")?,
            model2: optional(&args.model2),
            obs: required(&args.obs, "observation file")?,
            bias1: required(&args.bias1, "bias 1 file")?,
            bias2: optional(&args.bias2),
            bias3: optional(&args.bias3),
            var: var.to_string(),
            obs_var: obs_var.to_string(),
            output_dir: args.output_dir.clone(),
        })
    }

    pub fn presence(&self) -> Presence {
        Presence {
            model2: self.model2.is_some(),
            bias2: self.bias2.is_some(),
            bias3: self.bias3.is_some(),
        }
    }

    /// Every supplied input, model 1 first.
    pub fn entries(&self) -> Vec<InputEntry<'_>> {
        let var = self.var.as_str();
        let mut out = vec![
            InputEntry {
                role: PanelRole::Model1,
                path: &self.model1,
                var,
            },
            InputEntry {
                role: PanelRole::Observation,
                path: &self.obs,
                var: &self.obs_var,
            },
            InputEntry {
                role: PanelRole::BiasModel1Obs,
                path: &self.bias1,
                var,
            },
        ];
        let optional = [
            (PanelRole::Model2, &self.model2),
            (PanelRole::BiasModel2Obs, &self.bias2),
            (PanelRole::BiasModel1Model2, &self.bias3),
        ];
        out.extend(optional.into_iter().filter_map(|(role, path)| {
            path.as_deref().map(|path| InputEntry { role, path, var })
        }));
        out
    }

    /// Log the resolved arguments.
    pub fn echo(&self) {
        let shown = |p: &Option<PathBuf>| {
            p.as_ref()
                .map_or_else(|| "not provided".to_string(), |p| p.display().to_string())
        };
        info!(
            model1 = %self.model1.display(),
            model2 = %shown(&self.model2),
            obs = %self.obs.display(),
            bias1 = %self.bias1.display(),
            bias2 = %shown(&self.bias2),
            bias3 = %shown(&self.bias3),
            var = %self.var,
            obs_var = %self.obs_var,
            output_dir = %self.output_dir.display(),
            "input arguments"
        );
    }
}
