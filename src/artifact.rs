//! Table-detection artifacts consumed by the renderers.
//!
//! An [`Artifact`] bundles everything the detection pipeline produced for one
//! table on one page: the detection mode, the page size, the page raster and
//! the geometry collections. Collections are `Option`s: `None` marks a
//! collection the pipeline never produced, `Some(vec![])` one it produced
//! empty. Only the former is an error, and only for renderers that need it.

use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use image::{ColorType, DynamicImage, ImageEncoder, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{LineSegment, Point, Rect};

/// Detection strategy that produced an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    /// Structure taken from visible ruling lines
    #[serde(alias = "lattice")]
    Ruled,
    /// Structure inferred from text positions alone
    #[serde(alias = "stream")]
    Inferred,
}

impl DetectionMode {
    /// Lowercase tag used in manifests and messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionMode::Ruled => "ruled",
            DetectionMode::Inferred => "inferred",
        }
    }
}

impl fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ruled" | "lattice" => Ok(DetectionMode::Ruled),
            "inferred" | "stream" => Ok(DetectionMode::Inferred),
            other => Err(format!("unknown detection mode '{}'", other)),
        }
    }
}

/// One cell of the detected table grid.
///
/// Corners are named by side: `lb` is left-bottom, `rt` right-top and so on.
/// An edge flag is set only where a boundary was actually detected, so
/// neighbouring cells may leave a side open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Left boundary detected
    #[serde(default)]
    pub left: bool,
    /// Right boundary detected
    #[serde(default)]
    pub right: bool,
    /// Top boundary detected
    #[serde(default)]
    pub top: bool,
    /// Bottom boundary detected
    #[serde(default)]
    pub bottom: bool,
    /// Left-bottom corner
    pub lb: Point,
    /// Left-top corner
    pub lt: Point,
    /// Right-bottom corner
    pub rb: Point,
    /// Right-top corner
    pub rt: Point,
}

impl Cell {
    /// Create a cell spanning `(x0, y0)`-`(x1, y1)` with every edge open.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            left: false,
            right: false,
            top: false,
            bottom: false,
            lb: Point::new(x0, y0),
            lt: Point::new(x0, y1),
            rb: Point::new(x1, y0),
            rt: Point::new(x1, y1),
        }
    }

    /// Set the four edge flags.
    pub fn with_edges(mut self, left: bool, right: bool, top: bool, bottom: bool) -> Self {
        self.left = left;
        self.right = right;
        self.top = top;
        self.bottom = bottom;
        self
    }

    /// Number of detected edges (0-4).
    pub fn edge_count(&self) -> usize {
        [self.left, self.right, self.top, self.bottom]
            .iter()
            .filter(|&&e| e)
            .count()
    }

    /// Bounding rectangle of the four corners.
    pub fn bounds(&self) -> Rect {
        let xs = [self.lb.x, self.lt.x, self.rb.x, self.rt.x];
        let ys = [self.lb.y, self.lt.y, self.rb.y, self.rt.y];
        Rect::from_points(
            xs.iter().copied().fold(f32::INFINITY, f32::min),
            ys.iter().copied().fold(f32::INFINITY, f32::min),
            xs.iter().copied().fold(f32::NEG_INFINITY, f32::max),
            ys.iter().copied().fold(f32::NEG_INFINITY, f32::max),
        )
    }
}

/// A bounding rectangle and the vertices detected inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BboxEntry {
    /// Bounding rectangle
    pub bbox: Rect,
    /// Line-intersection points (ruled mode only)
    #[serde(default)]
    pub vertices: Vec<Point>,
}

impl BboxEntry {
    /// Create an entry with no vertices.
    pub fn new(bbox: Rect) -> Self {
        Self {
            bbox,
            vertices: Vec::new(),
        }
    }

    /// Attach intersection vertices.
    pub fn with_vertices(mut self, vertices: Vec<Point>) -> Self {
        self.vertices = vertices;
        self
    }
}

/// Vertical text-alignment guide used by inferred detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeGuide {
    /// Horizontal position
    pub x: f32,
    /// Lower end
    pub y0: f32,
    /// Upper end
    pub y1: f32,
}

impl EdgeGuide {
    /// Create a guide at `x` spanning `y0..y1`.
    pub fn new(x: f32, y0: f32, y1: f32) -> Self {
        Self { x, y0, y1 }
    }

    /// The guide as a line segment.
    pub fn segment(&self) -> LineSegment {
        LineSegment::new(self.x, self.y0, self.x, self.y1)
    }
}

/// Ruling-line segments detected on the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segments {
    /// Vertical ruling lines
    #[serde(default)]
    pub vertical: Vec<LineSegment>,
    /// Horizontal ruling lines
    #[serde(default)]
    pub horizontal: Vec<LineSegment>,
}

impl Segments {
    /// Create from the two lists.
    pub fn new(vertical: Vec<LineSegment>, horizontal: Vec<LineSegment>) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// Total number of segments.
    pub fn len(&self) -> usize {
        self.vertical.len() + self.horizontal.len()
    }

    /// True when both lists are empty.
    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }

    /// Iterate vertical then horizontal segments.
    pub fn iter(&self) -> impl Iterator<Item = &LineSegment> {
        self.vertical.iter().chain(self.horizontal.iter())
    }
}

/// RGBA raster of the source page.
///
/// Cloning is cheap: figures share the pixel buffer with the artifact they
/// were rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRaster {
    image: Arc<RgbaImage>,
}

impl PageRaster {
    /// Wrap an RGBA image.
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }

    /// Decode a page image from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let img = image::open(path.as_ref()).map_err(|e| {
            Error::Image(format!("Failed to open {}: {}", path.as_ref().display(), e))
        })?;
        Ok(Self::from_image(img))
    }

    /// Decode a page image from encoded bytes (PNG, JPEG, TIFF).
    pub fn from_memory(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data)?;
        Ok(Self::from_image(img))
    }

    /// Convert any decoded image.
    pub fn from_image(image: DynamicImage) -> Self {
        Self::new(image.to_rgba8())
    }

    /// Build from raw non-premultiplied RGBA bytes.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        let actual = data.len();
        RgbaImage::from_raw(width, height, data)
            .map(Self::new)
            .ok_or_else(|| {
                Error::Image(format!(
                    "RGBA buffer of {} bytes does not match {}x{} ({} bytes)",
                    actual, width, height, expected
                ))
            })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// True if the raster has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Borrow the underlying image.
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }

    /// Encode as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        image::codecs::png::PngEncoder::new(&mut out).write_image(
            self.image.as_raw(),
            self.width(),
            self.height(),
            ColorType::Rgba8,
        )?;
        Ok(out.into_inner())
    }
}

/// Geometry produced by table detection for a single table.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Detection strategy
    pub mode: DetectionMode,
    /// Page (width, height) in content-space units
    pub page_size: (f32, f32),
    /// Raster of the source page
    pub raster: PageRaster,
    /// Candidate text locations (content-space)
    pub text_boxes: Option<Vec<Rect>>,
    /// Row-major cell grid (content-space)
    pub grid: Option<Vec<Vec<Cell>>>,
    /// Bounding rectangles and their vertices
    pub bbox_map: Option<Vec<BboxEntry>>,
    /// Vertical alignment guides (content-space, inferred only)
    pub edge_guides: Option<Vec<EdgeGuide>>,
    /// Ruling-line segments (content-space, ruled only)
    pub segments: Option<Segments>,
}

#[derive(Deserialize)]
struct ArtifactManifest {
    mode: DetectionMode,
    page_size: [f32; 2],
    #[serde(default)]
    text_boxes: Option<Vec<Rect>>,
    #[serde(default)]
    grid: Option<Vec<Vec<Cell>>>,
    #[serde(default)]
    bbox_map: Option<Vec<BboxEntry>>,
    #[serde(default)]
    edge_guides: Option<Vec<EdgeGuide>>,
    #[serde(default)]
    segments: Option<Segments>,
}

impl Artifact {
    /// Create an artifact with every collection absent.
    pub fn new(mode: DetectionMode, page_size: (f32, f32), raster: PageRaster) -> Self {
        Self {
            mode,
            page_size,
            raster,
            text_boxes: None,
            grid: None,
            bbox_map: None,
            edge_guides: None,
            segments: None,
        }
    }

    /// Parse a JSON manifest and attach the page raster.
    ///
    /// Keys missing from the manifest stay absent (`None`).
    pub fn from_json(json: &str, raster: PageRaster) -> Result<Self> {
        let manifest: ArtifactManifest = serde_json::from_str(json)?;
        Ok(Self {
            mode: manifest.mode,
            page_size: (manifest.page_size[0], manifest.page_size[1]),
            raster,
            text_boxes: manifest.text_boxes,
            grid: manifest.grid,
            bbox_map: manifest.bbox_map,
            edge_guides: manifest.edge_guides,
            segments: manifest.segments,
        })
    }

    /// Set the text boxes.
    pub fn with_text_boxes(mut self, boxes: Vec<Rect>) -> Self {
        self.text_boxes = Some(boxes);
        self
    }

    /// Set the cell grid.
    pub fn with_grid(mut self, grid: Vec<Vec<Cell>>) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Set the bounding-box map.
    pub fn with_bbox_map(mut self, entries: Vec<BboxEntry>) -> Self {
        self.bbox_map = Some(entries);
        self
    }

    /// Set the edge guides.
    pub fn with_edge_guides(mut self, guides: Vec<EdgeGuide>) -> Self {
        self.edge_guides = Some(guides);
        self
    }

    /// Set the ruling-line segments.
    pub fn with_segments(mut self, segments: Segments) -> Self {
        self.segments = Some(segments);
        self
    }

    /// Page width in content-space units.
    pub fn page_width(&self) -> f32 {
        self.page_size.0
    }

    /// Page height in content-space units.
    pub fn page_height(&self) -> f32 {
        self.page_size.1
    }
}
