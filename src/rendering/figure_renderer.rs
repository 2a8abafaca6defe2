//! Figure renderer - rasterizes figures with tiny-skia.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::ColorType;
use tiny_skia::{Color, ColorU8, FilterQuality, IntSize, Pixmap, PixmapPaint, Transform};

use super::path_rasterizer::PathRasterizer;
use super::{Backend, ImageFormat, RenderOptions, RenderedImage};
use crate::artifact::PageRaster;
use crate::error::{Error, Result};
use crate::plot::{AxisMap, Figure, Primitive};

/// Backend drawing figures onto tiny-skia pixmaps.
///
/// Holds no state: every call allocates its own pixmap, so one backend can
/// serve concurrent render calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkiaBackend;

impl SkiaBackend {
    /// Create a new backend.
    pub fn new() -> Self {
        Self
    }

    /// Draw a figure onto a fresh pixmap.
    pub fn draw(&self, figure: &Figure, options: &RenderOptions) -> Result<Pixmap> {
        let limits = figure.limits();
        let (width, height) = options.canvas_size(&limits)?;

        // Create pixmap with background
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            Error::Render(format!("Failed to create pixmap {}x{}", width, height))
        })?;
        if let Some([r, g, b, a]) = options.background {
            pixmap.fill(Color::from_rgba(r, g, b, a).unwrap_or(Color::WHITE));
        }

        let canvas = limits.canvas_map(figure.frame().y_up(), width, height);

        self.draw_raster(&mut pixmap, figure, &canvas)?;

        let rasterizer = PathRasterizer::new(figure.line_width());
        for primitive in figure.primitives() {
            match primitive {
                Primitive::Patch { rect, fill, edge } => {
                    let corners = rect.corners().map(|p| canvas.apply(p));
                    if let Some(color) = fill {
                        rasterizer.fill_polygon(&mut pixmap, &corners, *color);
                    }
                    if let Some(color) = edge {
                        rasterizer.stroke_polygon(&mut pixmap, &corners, *color);
                    }
                },
                Primitive::Line { segment, color } => {
                    rasterizer.stroke_line(
                        &mut pixmap,
                        canvas.apply(segment.from),
                        canvas.apply(segment.to),
                        *color,
                    );
                },
                Primitive::Marker { at, color } => {
                    rasterizer.fill_circle(
                        &mut pixmap,
                        canvas.apply(*at),
                        figure.marker_radius(),
                        *color,
                    );
                },
            }
        }

        log::debug!(
            "Rasterized {} figure: {}x{} px, {} primitives",
            figure.kind(),
            width,
            height,
            figure.primitives().len()
        );
        Ok(pixmap)
    }

    /// Composite the page raster into its frame's extent.
    fn draw_raster(&self, pixmap: &mut Pixmap, figure: &Figure, canvas: &AxisMap) -> Result<()> {
        let raster = figure.raster();
        let backdrop = raster_to_pixmap(raster)?;
        let map = figure
            .frame()
            .raster_map(raster.width(), raster.height())
            .then(canvas);
        let transform = Transform::from_row(map.sx, 0.0, 0.0, map.sy, map.tx, map.ty);
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        pixmap.draw_pixmap(0, 0, backdrop.as_ref(), &paint, transform, None);
        Ok(())
    }

    /// Encode pixmap to JPEG format.
    fn encode_jpeg(&self, pixmap: &Pixmap, quality: u8) -> Result<Vec<u8>> {
        // JPEG has no alpha channel
        let mut rgb_data = Vec::with_capacity(pixmap.pixels().len() * 3);
        for pixel in pixmap.pixels() {
            let c = pixel.demultiply();
            rgb_data.extend_from_slice(&[c.red(), c.green(), c.blue()]);
        }

        let mut output = Cursor::new(Vec::new());
        JpegEncoder::new_with_quality(&mut output, quality)
            .encode(&rgb_data, pixmap.width(), pixmap.height(), ColorType::Rgb8)
            .map_err(|e| Error::Render(format!("JPEG encoding failed: {}", e)))?;
        Ok(output.into_inner())
    }
}

impl Backend for SkiaBackend {
    fn name(&self) -> &str {
        "tiny-skia"
    }

    fn rasterize(&self, figure: &Figure, options: &RenderOptions) -> Result<RenderedImage> {
        let pixmap = self.draw(figure, options)?;

        // Encode to output format
        let data = match options.format {
            ImageFormat::Png => pixmap
                .encode_png()
                .map_err(|e| Error::Render(format!("PNG encoding failed: {}", e)))?,
            ImageFormat::Jpeg => self.encode_jpeg(&pixmap, options.jpeg_quality)?,
        };

        Ok(RenderedImage {
            data,
            width: pixmap.width(),
            height: pixmap.height(),
            format: options.format,
        })
    }
}

/// Convert the straight-alpha page raster into a premultiplied pixmap.
fn raster_to_pixmap(raster: &PageRaster) -> Result<Pixmap> {
    let rgba = raster.as_rgba();
    let size = IntSize::from_wh(rgba.width(), rgba.height())
        .ok_or_else(|| Error::Render("Page raster has no pixels".to_string()))?;

    let mut data = Vec::with_capacity(rgba.as_raw().len());
    for px in rgba.pixels() {
        let [r, g, b, a] = px.0;
        let c = ColorU8::from_rgba(r, g, b, a).premultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    Pixmap::from_vec(data, size)
        .ok_or_else(|| Error::Render("Failed to create raster pixmap".to_string()))
}
