//! Debug overlays for table-detection artifacts.
//!
//! This module draws the intermediate geometry of a table extraction over
//! the page raster, so a user can see why a given parameterization worked
//! or not.
//!
//! ## Kinds
//!
//! - `box`: detected text boxes
//! - `grid`: detected cell edges
//! - `contour`: table bounding boxes
//! - `edge-guide`: text-alignment guides (inferred detection only)
//! - `intersection`: ruling-line intersections (ruled detection only)
//! - `segment`: ruling-line segments (ruled detection only)
//!
//! ## Example
//!
//! ```ignore
//! use table_plot::plot::Plotter;
//!
//! let plotter = Plotter::new();
//! let figure = plotter.render(&artifact, "contour", Some("contour.png".as_ref()))?;
//! println!("{} outlines", figure.outline_count());
//! ```

mod export;
mod figure;
mod kind;
mod renderers;
mod style;
mod viewport;

pub use export::{export_figure, figure_to_json, figure_to_svg, ExportFormat};
pub use figure::{Figure, Primitive};
pub use kind::{is_supported, validate, PlotKind};
pub use renderers::{
    box_plot, build_figure, contour_plot, edge_guide_plot, grid_plot, intersection_plot,
    segment_plot,
};
pub use style::{PlotColors, PlotOptions, Rgba, LINE_CYCLE};
pub use viewport::{compute_viewport, AxisMap, Frame, Viewport, VIEWPORT_PADDING};

use std::path::Path;
use std::sync::Arc;

use crate::artifact::Artifact;
use crate::error::Result;
use crate::rendering::{default_backend, Backend, RenderOptions, RenderedImage};

/// Render dispatcher.
///
/// Checks run in a fixed order: backend availability, kind, mode/kind
/// combination, then the renderer's own collection checks. Nothing is drawn
/// or written until all of them pass.
#[derive(Clone)]
pub struct Plotter {
    backend: Arc<dyn Backend>,
    options: PlotOptions,
    render_options: RenderOptions,
}

impl Plotter {
    /// Create a plotter on the default backend.
    pub fn new() -> Self {
        Self::with_backend(default_backend())
    }

    /// Create a plotter on an explicit backend.
    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            options: PlotOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Set the overlay options.
    pub fn with_options(mut self, options: PlotOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the rasterization options used for raster exports.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Overlay options in use.
    pub fn options(&self) -> &PlotOptions {
        &self.options
    }

    /// Rasterization options in use.
    pub fn render_options(&self) -> &RenderOptions {
        &self.render_options
    }

    /// Render the overlay named `kind`, optionally persisting it to `destination`.
    pub fn render(
        &self,
        artifact: &Artifact,
        kind: &str,
        destination: Option<&Path>,
    ) -> Result<Figure> {
        self.backend.ensure_available()?;
        let kind: PlotKind = kind.parse()?;
        self.render_checked(artifact, kind, destination)
    }

    /// Typed variant of [`Plotter::render`].
    pub fn render_kind(
        &self,
        artifact: &Artifact,
        kind: PlotKind,
        destination: Option<&Path>,
    ) -> Result<Figure> {
        self.backend.ensure_available()?;
        self.render_checked(artifact, kind, destination)
    }

    /// Render every kind supported by the artifact's mode.
    pub fn render_all(&self, artifact: &Artifact) -> Result<Vec<Figure>> {
        self.backend.ensure_available()?;
        PlotKind::supported_for(artifact.mode)
            .map(|kind| self.render_checked(artifact, kind, None))
            .collect()
    }

    /// Rasterize a figure with the plotter's render options.
    pub fn rasterize(&self, figure: &Figure) -> Result<RenderedImage> {
        self.backend.rasterize(figure, &self.render_options)
    }

    /// Persist a figure; the format follows the extension of `path`.
    pub fn export(&self, figure: &Figure, path: &Path) -> Result<()> {
        export_figure(figure, self.backend.as_ref(), &self.render_options, path)
    }

    fn render_checked(
        &self,
        artifact: &Artifact,
        kind: PlotKind,
        destination: Option<&Path>,
    ) -> Result<Figure> {
        validate(artifact.mode, kind)?;
        let figure = build_figure(kind, artifact, &self.options)?;
        log::debug!(
            "Rendered {} overlay for {} artifact on {}: {} patches, {} lines, {} markers, viewport {:?}",
            kind,
            artifact.mode,
            self.backend.name(),
            figure.patch_count(),
            figure.line_count(),
            figure.marker_count(),
            figure.viewport().map(|v| v.as_tuple())
        );
        if let Some(path) = destination {
            self.export(&figure, path)?;
        }
        Ok(figure)
    }
}

impl Default for Plotter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Plotter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plotter")
            .field("backend", &self.backend.name())
            .field("options", &self.options)
            .field("render_options", &self.render_options)
            .finish()
    }
}

/// Render `kind` for `artifact` with a default [`Plotter`].
pub fn render(artifact: &Artifact, kind: &str, destination: Option<&Path>) -> Result<Figure> {
    Plotter::new().render(artifact, kind, destination)
}
