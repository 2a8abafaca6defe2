//! Tests for persisting figures.
//!
//! These tests require the "rendering" feature to be enabled.

#![cfg(feature = "rendering")]

use std::fs;

use table_plot::geometry::Rect;
use table_plot::plot::{figure_to_svg, ExportFormat, Plotter};
use table_plot::rendering::RenderOptions;
use table_plot::{render, Artifact, BboxEntry, DetectionMode, Error, PageRaster};
use tempfile::tempdir;

fn raster() -> PageRaster {
    PageRaster::from_rgba(8, 8, vec![200; 8 * 8 * 4]).unwrap()
}

fn inferred() -> Artifact {
    Artifact::new(DetectionMode::Inferred, (100.0, 100.0), raster())
        .with_text_boxes(vec![Rect::from_points(10.0, 10.0, 40.0, 20.0)])
        .with_bbox_map(vec![BboxEntry::new(Rect::from_points(5.0, 5.0, 60.0, 30.0))])
}

#[test]
fn test_export_png() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("box.png");
    render(&inferred(), "box", Some(&path)).unwrap();

    let data = fs::read(&path).unwrap();
    assert_eq!(&data[0..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
}

#[test]
fn test_export_jpeg_by_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contour.JPEG");
    render(&inferred(), "contour", Some(&path)).unwrap();

    let data = fs::read(&path).unwrap();
    assert_eq!(&data[0..2], &[0xFF, 0xD8]);
}

#[test]
fn test_export_svg() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contour.svg");
    let plotter = Plotter::new().with_render_options(RenderOptions::with_width(300));
    plotter.render(&inferred(), "contour", Some(&path)).unwrap();

    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains(r#"width="300""#));
    assert!(svg.contains("data:image/png;base64,"));
    // Highlighted text box plus the table contour
    assert_eq!(svg.matches(r#"class="patch""#).count(), 2);
    assert!(svg.contains(r#"fill="none" stroke="rgba(255,0,0,1)""#));
}

#[test]
fn test_svg_matches_raster_canvas() {
    let plotter = Plotter::new().with_render_options(RenderOptions::with_width(250));
    let fig = plotter.render(&inferred(), "box", None).unwrap();
    let svg = figure_to_svg(&fig, plotter.render_options()).unwrap();
    let image = plotter.rasterize(&fig).unwrap();
    assert!(svg.contains(&format!(r#"height="{}""#, image.height)));
}

#[test]
fn test_export_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("box.json");
    render(&inferred(), "box", Some(&path)).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["kind"], "box");
    assert_eq!(value["mode"], "inferred");
    assert_eq!(value["frame"]["frame"], "content_space");
    assert_eq!(value["viewport"]["xmin"], 0.0);
    assert_eq!(value["primitives"].as_array().unwrap().len(), 1);
    assert_eq!(value["primitives"][0]["type"], "patch");
    assert!(value.get("raster").is_none());
}

#[test]
fn test_unsupported_extension_writes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("box.pdf");
    let err = render(&inferred(), "box", Some(&path)).unwrap_err();
    assert!(matches!(err, Error::UnsupportedExportFormat(_)));
    assert!(!path.exists());
    assert!(ExportFormat::from_path(&path).is_err());
}

#[test]
fn test_rejected_combination_writes_nothing() {
    let dir = tempdir().unwrap();
    for kind in ["intersection", "segment", "diagonal"] {
        let path = dir.path().join(format!("{}.png", kind));
        assert!(render(&inferred(), kind, Some(&path)).is_err());
        assert!(!path.exists(), "{} left a file behind", kind);
    }
}

#[test]
fn test_malformed_artifact_writes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("grid.png");
    let err = render(&inferred(), "grid", Some(&path)).unwrap_err();
    assert!(matches!(err, Error::MalformedArtifact(_)));
    assert!(!path.exists());
}

#[test]
fn test_export_all_kinds() {
    let dir = tempdir().unwrap();
    let plotter = Plotter::new().with_render_options(RenderOptions::with_width(120));
    let artifact = inferred()
        .with_grid(vec![])
        .with_edge_guides(vec![]);
    for fig in plotter.render_all(&artifact).unwrap() {
        let path = dir.path().join(format!("{}.png", fig.kind()));
        plotter.export(&fig, &path).unwrap();
        assert!(path.exists());
    }
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 4);
}

#[test]
fn test_export_svg_with_extreme_limits() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wide.svg");
    let artifact = Artifact::new(DetectionMode::Inferred, (100.0, 100.0), raster())
        .with_text_boxes(vec![Rect::from_points(-3e38, 0.0, 3e38, 1.0)]);
    let plotter = Plotter::new().with_render_options(RenderOptions::with_width(1000));
    let fig = plotter.render(&artifact, "box", Some(&path)).unwrap();

    assert!(fig.limits().width().is_finite());
    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains(r#"width="1000" height="1""#));
}
