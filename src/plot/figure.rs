//! Figures: the display list produced by one render call.

use serde::Serialize;

use super::kind::PlotKind;
use super::style::Rgba;
use super::viewport::{Frame, Viewport};
use crate::artifact::{DetectionMode, PageRaster};
use crate::geometry::{LineSegment, Point, Rect};

/// A drawing primitive, in the coordinates of its figure's frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    /// Rectangle, optionally filled and/or outlined
    Patch {
        /// Rectangle corners
        rect: Rect,
        /// Fill color, `None` for an unfilled patch
        fill: Option<Rgba>,
        /// Outline color, `None` for no outline
        edge: Option<Rgba>,
    },
    /// Straight line
    Line {
        /// Endpoints
        segment: LineSegment,
        /// Stroke color
        color: Rgba,
    },
    /// Point marker
    Marker {
        /// Marker center
        at: Point,
        /// Marker color
        color: Rgba,
    },
}

impl Primitive {
    /// Translucent filled rectangle with no outline.
    pub fn filled(rect: Rect, color: Rgba) -> Self {
        Primitive::Patch {
            rect,
            fill: Some(color),
            edge: None,
        }
    }

    /// Unfilled rectangle outline.
    pub fn outlined(rect: Rect, color: Rgba) -> Self {
        Primitive::Patch {
            rect,
            fill: None,
            edge: Some(color),
        }
    }

    /// Line from `from` to `to`.
    pub fn line(from: Point, to: Point, color: Rgba) -> Self {
        Primitive::Line {
            segment: LineSegment { from, to },
            color,
        }
    }
}

/// A rendered overlay: raster backdrop, frame, limits and primitives.
///
/// Figures are independent values; each render call builds a new one and
/// nothing is shared between them except the (immutable) raster pixels.
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    kind: PlotKind,
    mode: DetectionMode,
    frame: Frame,
    viewport: Option<Viewport>,
    line_width: f32,
    marker_radius: f32,
    #[serde(skip)]
    raster: PageRaster,
    primitives: Vec<Primitive>,
}

impl Figure {
    pub(crate) fn new(
        kind: PlotKind,
        mode: DetectionMode,
        frame: Frame,
        raster: PageRaster,
        line_width: f32,
        marker_radius: f32,
    ) -> Self {
        Self {
            kind,
            mode,
            frame,
            viewport: None,
            line_width,
            marker_radius,
            raster,
            primitives: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub(crate) fn set_viewport(&mut self, viewport: Option<Viewport>) {
        self.viewport = viewport;
    }

    /// Kind the figure was rendered for.
    pub fn kind(&self) -> PlotKind {
        self.kind
    }

    /// Detection mode of the source artifact.
    pub fn mode(&self) -> DetectionMode {
        self.mode
    }

    /// Coordinate frame of the primitives.
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Padded viewport computed from the plotted geometry.
    ///
    /// `None` for pixel-space figures and for content-space figures with
    /// nothing to frame.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Axis limits used when drawing: the viewport, or the raster extent.
    pub fn limits(&self) -> Viewport {
        self.viewport.unwrap_or_else(|| self.frame.raster_extent())
    }

    /// Stroke width in canvas pixels.
    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    /// Marker radius in canvas pixels.
    pub fn marker_radius(&self) -> f32 {
        self.marker_radius
    }

    /// Raster backdrop.
    pub fn raster(&self) -> &PageRaster {
        &self.raster
    }

    /// All primitives in drawing order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Number of rectangle patches.
    pub fn patch_count(&self) -> usize {
        self.count(|p| matches!(p, Primitive::Patch { .. }))
    }

    /// Number of filled rectangle patches.
    pub fn filled_patch_count(&self) -> usize {
        self.count(|p| matches!(p, Primitive::Patch { fill: Some(_), .. }))
    }

    /// Number of unfilled rectangle patches.
    pub fn outline_count(&self) -> usize {
        self.count(|p| matches!(p, Primitive::Patch { fill: None, .. }))
    }

    /// Number of line primitives.
    pub fn line_count(&self) -> usize {
        self.count(|p| matches!(p, Primitive::Line { .. }))
    }

    /// Number of point markers.
    pub fn marker_count(&self) -> usize {
        self.count(|p| matches!(p, Primitive::Marker { .. }))
    }

    fn count(&self, pred: impl Fn(&Primitive) -> bool) -> usize {
        self.primitives.iter().filter(|p| pred(p)).count()
    }
}
