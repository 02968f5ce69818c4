//! Panel grid selection.
//!
//! The grid shape depends only on whether the second model is present:
//!
//! ```text
//! with model 2 (3x2)                  without model 2 (1x3)
//! +-------------+---------------+    +-----+--------+---------------+
//! | obs mean    | model1-model2 |    | obs | model1 | model1 - obs  |
//! | model1 mean | model1 - obs  |    +-----+--------+---------------+
//! | model2 mean | model2 - obs  |
//! +-------------+---------------+
//! ```
//!
//! A bias slot whose input was not supplied stays empty.

use tracing::debug;

use crate::scale::ScaleClass;

/// Which optional inputs were supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Presence {
    pub model2: bool,
    pub bias2: bool,
    pub bias3: bool,
}

/// The field a panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PanelRole {
    Observation,
    Model1,
    Model2,
    /// Model 1 minus observation.
    BiasModel1Obs,
    /// Model 2 minus observation.
    BiasModel2Obs,
    /// Model 1 minus model 2.
    BiasModel1Model2,
}

impl PanelRole {
    pub fn scale_class(self) -> ScaleClass {
        match self {
            PanelRole::Observation | PanelRole::Model1 | PanelRole::Model2 => ScaleClass::Mean,
            _ => ScaleClass::Bias,
        }
    }

    /// Input key this panel is drawn from.
    pub fn input_key(self) -> &'static str {
        match self {
            PanelRole::Observation => "obs",
            PanelRole::Model1 => "model1",
            PanelRole::Model2 => "model2",
            PanelRole::BiasModel1Obs => "bias1",
            PanelRole::BiasModel2Obs => "bias2",
            PanelRole::BiasModel1Model2 => "bias3",
        }
    }
}

/// Averaging period shown in panel titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Period {
    Annual,
    Season(String),
}

impl Period {
    /// Word used in titles: `Annual` or the season label.
    pub fn title(&self) -> &str {
        match self {
            Period::Annual => "Annual",
            Period::Season(s) => s,
        }
    }

    /// Word used in file names: `annual` or `season`.
    pub fn file_tag(&self) -> &'static str {
        match self {
            Period::Annual => "annual",
            Period::Season(_) => "season",
        }
    }
}

/// Display names of the three data sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub model1: String,
    pub model2: String,
    pub observation: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            model1: "CMIP7".to_string(),
            model2: "CMIP6".to_string(),
            observation: "Observation".to_string(),
        }
    }
}

/// Everything needed to title the panels of one figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Titles {
    pub labels: Labels,
    pub period: Period,
    /// Unit appended to mean-panel titles, e.g. `°C`.
    pub mean_unit: Option<String>,
}

impl Titles {
    pub fn title(&self, role: PanelRole) -> String {
        let l = &self.labels;
        let mean = |who: &str| {
            let base = format!("{who} {} Mean", self.period.title());
            match &self.mean_unit {
                Some(u) => format!("{base} ({u})"),
                None => base,
            }
        };
        match role {
            PanelRole::Observation => mean(&l.observation),
            PanelRole::Model1 => mean(&l.model1),
            PanelRole::Model2 => mean(&l.model2),
            PanelRole::BiasModel1Obs => format!("Bias ({} - Obs)", l.model1),
            PanelRole::BiasModel2Obs => format!("Bias ({} - Obs)", l.model2),
            PanelRole::BiasModel1Model2 => format!("Bias ({} - {})", l.model1, l.model2),
        }
    }
}

/// Grid dimensions of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridShape {
    /// One row, three columns.
    OneByThree,
    /// Three rows, two columns.
    ThreeByTwo,
}

impl GridShape {
    /// `(rows, cols)`.
    pub fn dims(self) -> (usize, usize) {
        match self {
            GridShape::OneByThree => (1, 3),
            GridShape::ThreeByTwo => (3, 2),
        }
    }
}

/// A drawn panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSpec {
    pub role: PanelRole,
    pub title: String,
}

impl PanelSpec {
    pub fn scale_class(&self) -> ScaleClass {
        self.role.scale_class()
    }
}

/// Grid shape plus one slot per cell, row-major. `None` marks an empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    shape: GridShape,
    slots: Vec<Option<PanelSpec>>,
}

impl Layout {
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Slots in row-major order.
    pub fn slots(&self) -> &[Option<PanelSpec>] {
        &self.slots
    }

    /// Slot at `(row, col)`.
    pub fn slot(&self, row: usize, col: usize) -> Option<&PanelSpec> {
        let (_, cols) = self.shape.dims();
        self.slots.get(row * cols + col).and_then(Option::as_ref)
    }

    /// Drawn panels in row-major order.
    pub fn panels(&self) -> impl Iterator<Item = &PanelSpec> {
        self.slots.iter().flatten()
    }
}

/// Choose the panel grid for the supplied inputs.
pub fn select_layout(presence: &Presence, titles: &Titles) -> Layout {
    let panel = |role: PanelRole| {
        Some(PanelSpec {
            role,
            title: titles.title(role),
        })
    };
    let optional = |present: bool, role: PanelRole| if present { panel(role) } else { None };

    let layout = if presence.model2 {
        Layout {
            shape: GridShape::ThreeByTwo,
            slots: vec![
                panel(PanelRole::Observation),
                optional(presence.bias3, PanelRole::BiasModel1Model2),
                panel(PanelRole::Model1),
                panel(PanelRole::BiasModel1Obs),
                panel(PanelRole::Model2),
                optional(presence.bias2, PanelRole::BiasModel2Obs),
            ],
        }
    } else {
        Layout {
            shape: GridShape::OneByThree,
            slots: vec![
                panel(PanelRole::Observation),
                panel(PanelRole::Model1),
                panel(PanelRole::BiasModel1Obs),
            ],
        }
    };
    debug!(
        shape = ?layout.shape,
        panels = layout.panels().count(),
        "selected panel layout"
    );
    layout
}
