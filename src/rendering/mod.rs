//! Figure rasterization.
//!
//! A [`Figure`] is a display list; turning it into pixels is the job of a
//! [`Backend`]. The crate ships [`SkiaBackend`], built on the pure-Rust
//! `tiny-skia` library when the `rendering` feature is enabled, and
//! [`NoBackend`], which reports itself unavailable.
//!
//! ## Example
//!
//! ```ignore
//! use table_plot::rendering::{Backend, RenderOptions, SkiaBackend};
//!
//! let image = SkiaBackend::new().rasterize(&figure, &RenderOptions::default())?;
//! image.save("contour.png")?;
//! ```
//!
//! Backends must keep no global "current figure" state: every call receives
//! the figure it draws and allocates its own canvas.

#[cfg(feature = "rendering")]
mod figure_renderer;
#[cfg(feature = "rendering")]
mod path_rasterizer;

#[cfg(feature = "rendering")]
pub use figure_renderer::SkiaBackend;

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::plot::{Figure, Viewport};

/// Largest canvas edge, in pixels.
pub const MAX_CANVAS_EDGE: u32 = 16384;

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// PNG format (lossless, supports transparency)
    #[default]
    Png,
    /// JPEG format (lossy, smaller file size)
    Jpeg,
}

/// Options for figure rasterization.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Canvas width in pixels; the height follows the figure's aspect ratio
    pub canvas_width: u32,
    /// Output image format
    pub format: ImageFormat,
    /// Background color (None for transparent)
    pub background: Option<[f32; 4]>,
    /// JPEG quality (1-100, only for JPEG format)
    pub jpeg_quality: u8,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            canvas_width: 1000,
            format: ImageFormat::Png,
            background: Some([1.0, 1.0, 1.0, 1.0]), // White background
            jpeg_quality: 85,
        }
    }
}

impl RenderOptions {
    /// Create options with a custom canvas width.
    pub fn with_width(canvas_width: u32) -> Self {
        Self {
            canvas_width: canvas_width.clamp(1, MAX_CANVAS_EDGE),
            ..Default::default()
        }
    }

    /// Set transparent background.
    pub fn with_transparent_background(mut self) -> Self {
        self.background = None;
        self
    }

    /// Set JPEG format with quality.
    pub fn as_jpeg(mut self, quality: u8) -> Self {
        self.format = ImageFormat::Jpeg;
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Set PNG format.
    pub fn as_png(mut self) -> Self {
        self.format = ImageFormat::Png;
        self
    }

    /// Canvas dimensions for a plot with the given limits.
    ///
    /// Axes keep an equal aspect ratio, so the height is derived from the
    /// width and the limits.
    pub fn canvas_size(&self, limits: &Viewport) -> Result<(u32, u32)> {
        let (w, h) = (limits.width(), limits.height());
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(Error::Render(format!(
                "Degenerate plot limits {:?}",
                limits.as_tuple()
            )));
        }
        let width = self.canvas_width.clamp(1, MAX_CANVAS_EDGE);
        let height = ((width as f64) * h / w).round().clamp(1.0, MAX_CANVAS_EDGE as f64) as u32;
        Ok((width, height))
    }
}

/// Rendered image output.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    /// Image data in the specified format
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Output format
    pub format: ImageFormat,
}

impl RenderedImage {
    /// Save the image to a file.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        std::fs::write(path.as_ref(), &self.data)?;
        Ok(())
    }

    /// Get the image data as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// A graphics backend able to rasterize figures.
pub trait Backend: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Fail with [`Error::BackendUnavailable`] if the backend cannot draw.
    fn ensure_available(&self) -> Result<()> {
        Ok(())
    }

    /// Draw `figure` onto a fresh canvas and encode it.
    fn rasterize(&self, figure: &Figure, options: &RenderOptions) -> Result<RenderedImage>;
}

/// Placeholder backend for builds without a rasterizer.
#[derive(Debug, Clone, Default)]
pub struct NoBackend {
    reason: Option<String>,
}

impl NoBackend {
    /// Create an unavailable backend with a custom reason.
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }

    fn error(&self) -> Error {
        Error::BackendUnavailable(
            self.reason
                .clone()
                .unwrap_or_else(|| "built without the \"rendering\" feature".to_string()),
        )
    }
}

impl Backend for NoBackend {
    fn name(&self) -> &str {
        "none"
    }

    fn ensure_available(&self) -> Result<()> {
        Err(self.error())
    }

    fn rasterize(&self, _figure: &Figure, _options: &RenderOptions) -> Result<RenderedImage> {
        Err(self.error())
    }
}

/// The best backend compiled into this build.
pub fn default_backend() -> Arc<dyn Backend> {
    #[cfg(feature = "rendering")]
    {
        Arc::new(SkiaBackend::new())
    }
    #[cfg(not(feature = "rendering"))]
    {
        Arc::new(NoBackend::default())
    }
}
