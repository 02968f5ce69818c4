//! # esmplot-layout
//!
//! Pure decisions behind a comparison figure: which projection, which panel
//! grid, which contour levels and colormaps, and what the output file is
//! called. Nothing here touches data or pixels.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["lat/lon range args"] -->|"GeoExtent::parse()"| B["GeoExtent"]
//!     C["projection arg"] -->|"str::parse()"| D["Projection"]
//!     E["Presence + Titles"] -->|"select_layout()"| F["Layout"]
//!     G["ScaleCatalog"] -->|".resolve(var)"| H["ScaleSet"]
//!     B --> I["MapFigure"]
//!     D --> I
//!     F --> I
//!     H --> I
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `extent` | `min,max` range parsing, extent, degree labels |
//! | `projection` | Closed projection catalog |
//! | `panel` | Panel roles, titles and grid selection |
//! | `scale` | Contour levels, colormap names, per-variable presets |
//! | `naming` | Output formats and file names |
//! | `figure` | Figure specifications handed to the renderer |
//! | `error` | Error types |

mod error;
mod extent;
mod figure;
mod naming;
mod panel;
mod projection;
mod scale;

pub use error::LayoutError;
pub use extent::{GeoExtent, format_lat, format_lon, parse_range};
pub use figure::{CellSize, MapFigure, PROFILE_PRESSURE_TICKS, ProfileFigure, ProfileSeries};
pub use naming::{MapName, OutputFormat, ProfileKind};
pub use panel::{
    GridShape, Labels, Layout, PanelRole, PanelSpec, Period, Presence, Titles, select_layout,
};
pub use projection::{GridStyle, Projection};
pub use scale::{
    ColorScale, Colormap, ColormapKind, MAX_LEVELS, ScaleCatalog, ScaleClass, ScaleSet,
};
