//! # esmplot-render
//!
//! Draw [`MapFigure`](esmplot_layout::MapFigure)s and
//! [`ProfileFigure`](esmplot_layout::ProfileFigure)s to PNG or SVG with
//! `plotters`.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["MapFigure + FieldSet"] -->|"render_map()"| B["PNG / SVG"]
//!     C["ProfileFigure"] -->|"render_profiles()"| B
//!     D["ColorScale"] -->|"LevelColors::new()"| A
//!     E["Projection + GeoExtent"] -->|"MapProjector"| A
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `colormap` | Palettes and discrete contour-bin colors |
//! | `projection` | Forward map projections onto the drawing plane |
//! | `map` | Panel grids of filled maps with color bars |
//! | `profile` | Line plots against inverted pressure |
//! | `error` | Error types |

mod colormap;
mod error;
mod map;
mod profile;
mod projection;

pub use colormap::{ColorStop, LevelColors, Palette};
pub use error::RenderError;
pub use map::{FieldSet, render_map};
pub use profile::render_profiles;
pub use projection::MapProjector;
