//! Coordinate mapping: padded viewports and the two plotting frames.
//!
//! Content-space geometry uses the page's own units with the origin at the
//! bottom-left and y growing upwards; the raster is stretched over
//! `(0, page_width, 0, page_height)` as a backdrop. Pixel-space geometry is
//! already expressed in the raster's pixel grid (origin top-left, y growing
//! downwards) and the raster is shown at its native extent.
//!
//! Each renderer picks its frame statically; nothing here guesses the frame
//! from the data.

use serde::Serialize;

use crate::geometry::{Point, Rect};

/// Margin added on every side of a computed viewport.
pub const VIEWPORT_PADDING: f32 = 10.0;

/// Axis limits of a plot, in the plot's frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// Left limit
    pub xmin: f32,
    /// Right limit
    pub xmax: f32,
    /// Lower limit
    pub ymin: f32,
    /// Upper limit
    pub ymax: f32,
}

impl Viewport {
    /// Create a viewport from its limits.
    pub fn new(xmin: f32, xmax: f32, ymin: f32, ymax: f32) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    /// Horizontal span.
    ///
    /// Computed in `f64`: limits far apart on the `f32` range still give a
    /// finite span.
    pub fn width(&self) -> f64 {
        self.xmax as f64 - self.xmin as f64
    }

    /// Vertical span, in `f64` like [`Viewport::width`].
    pub fn height(&self) -> f64 {
        self.ymax as f64 - self.ymin as f64
    }

    /// Limits as the `(xmin, xmax, ymin, ymax)` tuple.
    pub fn as_tuple(&self) -> (f32, f32, f32, f32) {
        (self.xmin, self.xmax, self.ymin, self.ymax)
    }

    /// Map from this viewport onto a `width` x `height` canvas.
    ///
    /// With `y_up` the upper limit lands on canvas row 0, otherwise the lower
    /// limit does.
    pub fn canvas_map(&self, y_up: bool, width: u32, height: u32) -> AxisMap {
        let sx = width as f64 / self.width();
        let sy = height as f64 / self.height();
        let tx = -(self.xmin as f64) * sx;
        if y_up {
            AxisMap::new(sx as f32, -sy as f32, tx as f32, (self.ymax as f64 * sy) as f32)
        } else {
            AxisMap::new(sx as f32, sy as f32, tx as f32, (-(self.ymin as f64) * sy) as f32)
        }
    }
}

/// Union bounding box of `rects`, padded by [`VIEWPORT_PADDING`] on each side.
///
/// Returns `None` when there is nothing to frame. Rectangles with non-finite
/// coordinates are skipped.
///
/// # Examples
///
/// ```
/// use table_plot::geometry::Rect;
/// use table_plot::plot::compute_viewport;
///
/// let vp = compute_viewport([Rect::from_points(0.0, 0.0, 10.0, 10.0)]).unwrap();
/// assert_eq!(vp.as_tuple(), (-10.0, 20.0, -10.0, 20.0));
/// ```
pub fn compute_viewport(rects: impl IntoIterator<Item = Rect>) -> Option<Viewport> {
    let mut union: Option<Rect> = None;
    for rect in rects {
        if !rect.is_finite() {
            log::warn!("Skipping non-finite rectangle {:?} in viewport", rect);
            continue;
        }
        union = Some(match union {
            Some(u) => u.union(&rect),
            None => rect.union(&rect),
        });
    }
    union.map(|u| {
        Viewport::new(
            u.min_x() - VIEWPORT_PADDING,
            u.max_x() + VIEWPORT_PADDING,
            u.min_y() - VIEWPORT_PADDING,
            u.max_y() + VIEWPORT_PADDING,
        )
    })
}

/// Coordinate frame of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "frame", rename_all = "snake_case")]
pub enum Frame {
    /// Page units; raster stretched over the page, y up
    ContentSpace {
        /// Page width
        page_width: f32,
        /// Page height
        page_height: f32,
    },
    /// Raster pixels at native extent, y down
    PixelSpace {
        /// Raster width in pixels
        width: u32,
        /// Raster height in pixels
        height: u32,
    },
}

impl Frame {
    /// True if y grows upwards in this frame.
    pub fn y_up(&self) -> bool {
        matches!(self, Frame::ContentSpace { .. })
    }

    /// Region covered by the raster backdrop.
    pub fn raster_extent(&self) -> Viewport {
        match *self {
            Frame::ContentSpace {
                page_width,
                page_height,
            } => Viewport::new(0.0, page_width, 0.0, page_height),
            Frame::PixelSpace { width, height } => {
                Viewport::new(0.0, width as f32, 0.0, height as f32)
            },
        }
    }

    /// Map from raster pixel coordinates into this frame.
    ///
    /// Row 0 of the raster is always the visually top row: in content space it
    /// sits at `y = page_height`.
    pub fn raster_map(&self, raster_width: u32, raster_height: u32) -> AxisMap {
        match *self {
            Frame::ContentSpace {
                page_width,
                page_height,
            } => AxisMap::new(
                page_width / raster_width as f32,
                -page_height / raster_height as f32,
                0.0,
                page_height,
            ),
            Frame::PixelSpace { .. } => AxisMap::identity(),
        }
    }
}

/// Axis-aligned affine map `(x, y) -> (sx * x + tx, sy * y + ty)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMap {
    /// X scale
    pub sx: f32,
    /// Y scale
    pub sy: f32,
    /// X translation
    pub tx: f32,
    /// Y translation
    pub ty: f32,
}

impl AxisMap {
    /// Create a map from its coefficients.
    pub fn new(sx: f32, sy: f32, tx: f32, ty: f32) -> Self {
        Self { sx, sy, tx, ty }
    }

    /// The identity map.
    pub fn identity() -> Self {
        Self::new(1.0, 1.0, 0.0, 0.0)
    }

    /// Apply the map to a point.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(self.sx * p.x + self.tx, self.sy * p.y + self.ty)
    }

    /// Map that applies `self` first, then `next`.
    pub fn then(&self, next: &AxisMap) -> AxisMap {
        AxisMap::new(
            next.sx * self.sx,
            next.sy * self.sy,
            next.sx * self.tx + next.tx,
            next.sy * self.ty + next.ty,
        )
    }
}
