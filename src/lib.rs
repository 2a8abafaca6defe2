// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Table Plot
//!
//! Debug overlays for table extraction: draw the intermediate geometry of a
//! detection run over the page raster and see why a parameterization worked.
//!
//! ## Overlays
//!
//! - **Text boxes**: candidate text locations
//! - **Grid**: cell edges, drawn only where a boundary was detected
//! - **Contours**: table bounding boxes, in pixel space for ruled detection
//!   and content space for inferred detection
//! - **Guide edges**: vertical text-alignment guides (inferred detection)
//! - **Intersections**: ruling-line joints (ruled detection)
//! - **Segments**: ruling lines (ruled detection)
//!
//! ## Architecture
//!
//! - [`artifact`]: the detection output consumed by the renderers
//! - [`plot`]: dispatcher, coordinate mapping, renderers and export
//! - [`rendering`]: pluggable rasterization backends (tiny-skia)
//!
//! ## Quick Start
//!
//! ```ignore
//! use table_plot::artifact::{Artifact, PageRaster};
//! use table_plot::plot::Plotter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let raster = PageRaster::open("page-1.png")?;
//! let artifact = Artifact::from_json(&std::fs::read_to_string("table-1.json")?, raster)?;
//!
//! let figure = Plotter::new().render(&artifact, "grid", Some("grid.png".as_ref()))?;
//! println!("{} cell edges", figure.line_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Geometry and detection output
pub mod artifact;
pub mod geometry;

// Overlay rendering
pub mod plot;

// Figure rasterization
pub mod rendering;

// Re-exports
pub use artifact::{Artifact, BboxEntry, Cell, DetectionMode, EdgeGuide, PageRaster, Segments};
pub use error::{Error, Result};
pub use plot::{render, Figure, PlotKind, PlotOptions, Plotter};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
