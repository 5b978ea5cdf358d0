//! [xcprofile]'s visualization library.
//!
//! [xcprofile]: https://github.com/nelusnegur/xcprofile
//!
//! Projects loaded route profiles onto a shared distance/elevation scale and
//! renders them as an HTML page with an inline SVG chart, hover tooltips and
//! a toggleable legend.

pub(crate) mod scene;
pub(crate) mod template;

pub mod chart;
pub mod error;
pub mod render;

pub use crate::chart::ProfileChart;
pub use crate::chart::axes::AxisBounds;
pub use crate::chart::axes::ElevationRange;
pub use crate::chart::projection::Dimensions;
pub use crate::chart::projection::Margin;
pub use crate::chart::projection::Projection;
pub use crate::render::output::OutputFile;
