//! Closed catalog of supported map projections.

use std::fmt;
use std::str::FromStr;

use crate::error::LayoutError;

/// A map projection by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Projection {
    PlateCarree,
    Robinson,
    NorthPolarStereo,
    SouthPolarStereo,
}

/// How a projection's panels annotate coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridStyle {
    /// Five evenly spaced ticks per axis with degree labels, clipped to the
    /// requested extent.
    ExplicitTicks,
    /// Dashed gray gridlines with labels, drawn by the projection.
    LabeledGridlines,
}

impl Projection {
    /// All catalog entries, in declaration order.
    pub const ALL: [Projection; 4] = [
        Projection::PlateCarree,
        Projection::Robinson,
        Projection::NorthPolarStereo,
        Projection::SouthPolarStereo,
    ];

    /// Name as accepted on the command line and used in output file names.
    pub fn name(self) -> &'static str {
        match self {
            Projection::PlateCarree => "PlateCarree",
            Projection::Robinson => "Robinson",
            Projection::NorthPolarStereo => "NorthPolarStereo",
            Projection::SouthPolarStereo => "SouthPolarStereo",
        }
    }

    pub fn grid_style(self) -> GridStyle {
        match self {
            Projection::PlateCarree => GridStyle::ExplicitTicks,
            _ => GridStyle::LabeledGridlines,
        }
    }

    /// Whether this is one of the polar stereographic projections.
    pub fn is_polar(self) -> bool {
        matches!(
            self,
            Projection::NorthPolarStereo | Projection::SouthPolarStereo
        )
    }
}

impl FromStr for Projection {
    type Err = LayoutError;

    /// Names are matched exactly, case included.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Projection::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| LayoutError::UnknownProjection {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
