//! Figure export to PNG, JPEG, SVG and JSON.
//!
//! The format is picked from the destination's extension. Raster formats go
//! through the backend; SVG and JSON are written from the display list.

use std::fmt::Write as _;
use std::path::Path;

use base64::Engine;

use super::figure::{Figure, Primitive};
use super::style::Rgba;
use crate::error::{Error, Result};
use crate::rendering::{Backend, RenderOptions};

/// Output format of an exported figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// PNG raster
    Png,
    /// JPEG raster
    Jpeg,
    /// SVG vector drawing with the page raster embedded
    Svg,
    /// JSON display list
    Json,
}

impl ExportFormat {
    /// Pick the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpeg),
            "svg" => Ok(ExportFormat::Svg),
            "json" => Ok(ExportFormat::Json),
            _ => Err(Error::UnsupportedExportFormat(path.display().to_string())),
        }
    }
}

/// Persist `figure` at `path`.
pub fn export_figure(
    figure: &Figure,
    backend: &dyn Backend,
    options: &RenderOptions,
    path: &Path,
) -> Result<()> {
    let format = ExportFormat::from_path(path)?;
    match format {
        ExportFormat::Png => backend.rasterize(figure, &options.clone().as_png())?.save(path)?,
        ExportFormat::Jpeg => {
            let options = options.clone().as_jpeg(options.jpeg_quality);
            backend.rasterize(figure, &options)?.save(path)?;
        },
        ExportFormat::Svg => std::fs::write(path, figure_to_svg(figure, options)?)?,
        ExportFormat::Json => std::fs::write(path, figure_to_json(figure)?)?,
    }
    log::info!("Saved {} figure to {}", figure.kind(), path.display());
    Ok(())
}

/// Serialize the figure's display list as pretty JSON.
pub fn figure_to_json(figure: &Figure) -> Result<String> {
    Ok(serde_json::to_string_pretty(figure)?)
}

/// Render the figure as an SVG document.
///
/// The canvas size follows the same rules as rasterization, so SVG and PNG
/// exports of one figure line up.
pub fn figure_to_svg(figure: &Figure, options: &RenderOptions) -> Result<String> {
    let limits = figure.limits();
    let (width, height) = options.canvas_size(&limits)?;
    let canvas = limits.canvas_map(figure.frame().y_up(), width, height);

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        width, height, width, height
    );

    if let Some(bg) = options.background {
        let _ = write!(
            svg,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            width,
            height,
            color_to_svg(&bg)
        );
    }

    // Page raster as an embedded PNG, mapped into the frame's extent
    let raster = figure.raster();
    let png = raster.encode_png()?;
    let map = figure
        .frame()
        .raster_map(raster.width(), raster.height())
        .then(&canvas);
    let _ = write!(
        svg,
        r#"<image x="0" y="0" width="{}" height="{}" preserveAspectRatio="none" transform="matrix({} 0 0 {} {} {})" href="data:image/png;base64,{}"/>"#,
        raster.width(),
        raster.height(),
        map.sx,
        map.sy,
        map.tx,
        map.ty,
        base64::engine::general_purpose::STANDARD.encode(png)
    );

    for primitive in figure.primitives() {
        match primitive {
            Primitive::Patch { rect, fill, edge } => {
                let points = rect
                    .corners()
                    .iter()
                    .map(|p| {
                        let c = canvas.apply(*p);
                        format!("{},{}", c.x, c.y)
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                let fill = fill.as_ref().map_or("none".to_string(), color_to_svg);
                let stroke = edge.as_ref().map_or("none".to_string(), color_to_svg);
                let _ = write!(
                    svg,
                    r#"<polygon class="patch" points="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                    points,
                    fill,
                    stroke,
                    figure.line_width()
                );
            },
            Primitive::Line { segment, color } => {
                let a = canvas.apply(segment.from);
                let b = canvas.apply(segment.to);
                let _ = write!(
                    svg,
                    r#"<line class="line" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                    a.x,
                    a.y,
                    b.x,
                    b.y,
                    color_to_svg(color),
                    figure.line_width()
                );
            },
            Primitive::Marker { at, color } => {
                let c = canvas.apply(*at);
                let _ = write!(
                    svg,
                    r#"<circle class="marker" cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                    c.x,
                    c.y,
                    figure.marker_radius(),
                    color_to_svg(color)
                );
            },
        }
    }

    svg.push_str("</svg>");
    Ok(svg)
}

/// Convert RGBA color to SVG rgba() format.
fn color_to_svg(color: &Rgba) -> String {
    format!(
        "rgba({},{},{},{})",
        (color[0] * 255.0) as u8,
        (color[1] * 255.0) as u8,
        (color[2] * 255.0) as u8,
        color[3]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("a.png")).unwrap(), ExportFormat::Png);
        assert_eq!(ExportFormat::from_path(Path::new("a.JPG")).unwrap(), ExportFormat::Jpeg);
        assert_eq!(ExportFormat::from_path(Path::new("a.jpeg")).unwrap(), ExportFormat::Jpeg);
        assert_eq!(ExportFormat::from_path(Path::new("dir/a.svg")).unwrap(), ExportFormat::Svg);
        assert_eq!(ExportFormat::from_path(Path::new("a.json")).unwrap(), ExportFormat::Json);
    }

    #[test]
    fn test_format_from_path_unknown() {
        assert!(matches!(
            ExportFormat::from_path(Path::new("a.pdf")),
            Err(Error::UnsupportedExportFormat(_))
        ));
        assert!(ExportFormat::from_path(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_color_to_svg() {
        assert_eq!(color_to_svg(&[1.0, 0.0, 0.0, 0.5]), "rgba(255,0,0,0.5)");
    }
}
