//! The six overlay renderers.
//!
//! Every renderer validates the collections it reads before creating its
//! figure, so a failing call never yields a half-drawn figure. Frames are
//! fixed per renderer:
//!
//! | kind | frame |
//! |---|---|
//! | box, grid, edge-guide, segment | content-space |
//! | contour | pixel-space when ruled, content-space when inferred |
//! | intersection | pixel-space |

use super::figure::{Figure, Primitive};
use super::kind::PlotKind;
use super::style::PlotOptions;
use super::viewport::{compute_viewport, Frame};
use crate::artifact::{Artifact, BboxEntry, Cell, DetectionMode, EdgeGuide, Segments};
use crate::error::{Error, Result};
use crate::geometry::Rect;

/// Route `kind` to its renderer.
///
/// Does not check the mode/kind matrix; see [`super::validate`].
pub fn build_figure(kind: PlotKind, artifact: &Artifact, options: &PlotOptions) -> Result<Figure> {
    match kind {
        PlotKind::Box => box_plot(artifact, options),
        PlotKind::Grid => grid_plot(artifact, options),
        PlotKind::Contour => contour_plot(artifact, options),
        PlotKind::EdgeGuide => edge_guide_plot(artifact, options),
        PlotKind::Intersection => intersection_plot(artifact, options),
        PlotKind::Segment => segment_plot(artifact, options),
    }
}

/// Translucent patch per text box.
pub fn box_plot(artifact: &Artifact, options: &PlotOptions) -> Result<Figure> {
    let boxes = text_boxes(artifact, PlotKind::Box)?;
    let mut figure = new_figure(PlotKind::Box, artifact, content_frame(artifact)?, options);

    for rect in boxes {
        figure.push(Primitive::filled(*rect, options.colors.text_box));
    }
    figure.set_viewport(compute_viewport(boxes.iter().copied()));
    Ok(figure)
}

/// One line per detected cell edge.
pub fn grid_plot(artifact: &Artifact, options: &PlotOptions) -> Result<Figure> {
    let grid = grid(artifact)?;
    let mut figure = new_figure(PlotKind::Grid, artifact, content_frame(artifact)?, options);

    let mut index = 0;
    for cell in grid.iter().flatten() {
        let edges = [
            (cell.left, cell.lb, cell.lt),
            (cell.right, cell.rb, cell.rt),
            (cell.top, cell.lt, cell.rt),
            (cell.bottom, cell.lb, cell.rb),
        ];
        for (present, from, to) in edges {
            if present {
                figure.push(Primitive::line(from, to, options.colors.line(index)));
                index += 1;
            }
        }
    }
    figure.set_viewport(compute_viewport(grid.iter().flatten().map(Cell::bounds)));
    Ok(figure)
}

/// Table contours.
///
/// Ruled artifacts carry their contours in pixel space and are drawn over
/// the native raster without text boxes. Inferred artifacts carry a single
/// content-space bbox, drawn over the text boxes on the scaled raster.
pub fn contour_plot(artifact: &Artifact, options: &PlotOptions) -> Result<Figure> {
    match artifact.mode {
        DetectionMode::Ruled => {
            let entries = bbox_map(artifact, PlotKind::Contour)?;
            let frame = pixel_frame(artifact)?;
            let mut figure = new_figure(PlotKind::Contour, artifact, frame, options);

            for entry in entries {
                figure.push(Primitive::outlined(entry.bbox, options.colors.contour));
            }
            Ok(figure)
        },
        DetectionMode::Inferred => {
            let boxes = text_boxes(artifact, PlotKind::Contour)?;
            let entries = bbox_map(artifact, PlotKind::Contour)?;
            if entries.len() > 1 {
                log::debug!(
                    "Inferred artifact has {} table bboxes, drawing all of them",
                    entries.len()
                );
            }
            let frame = content_frame(artifact)?;
            let mut figure = new_figure(PlotKind::Contour, artifact, frame, options);

            for rect in boxes {
                figure.push(Primitive::filled(*rect, options.colors.highlighted_text));
            }
            for entry in entries {
                figure.push(Primitive::outlined(entry.bbox, options.colors.contour));
            }
            figure.set_viewport(compute_viewport(
                boxes.iter().copied().chain(entries.iter().map(|e| e.bbox)),
            ));
            Ok(figure)
        },
    }
}

/// Text boxes plus one vertical line per guide edge.
pub fn edge_guide_plot(artifact: &Artifact, options: &PlotOptions) -> Result<Figure> {
    let boxes = text_boxes(artifact, PlotKind::EdgeGuide)?;
    let guides = edge_guides(artifact)?;
    let frame = content_frame(artifact)?;
    let mut figure = new_figure(PlotKind::EdgeGuide, artifact, frame, options);

    for rect in boxes {
        figure.push(Primitive::filled(*rect, options.colors.highlighted_text));
    }
    for (index, guide) in guides.iter().enumerate() {
        let segment = guide.segment();
        figure.push(Primitive::line(segment.from, segment.to, options.colors.line(index)));
    }
    figure.set_viewport(compute_viewport(
        boxes
            .iter()
            .copied()
            .chain(guides.iter().map(|g| g.segment().bounds())),
    ));
    Ok(figure)
}

/// A marker on every line intersection, over the native raster.
pub fn intersection_plot(artifact: &Artifact, options: &PlotOptions) -> Result<Figure> {
    let entries = bbox_map(artifact, PlotKind::Intersection)?;
    let frame = pixel_frame(artifact)?;
    let mut figure = new_figure(PlotKind::Intersection, artifact, frame, options);

    for vertex in entries.iter().flat_map(|e| e.vertices.iter()) {
        figure.push(Primitive::Marker {
            at: *vertex,
            color: options.colors.marker,
        });
    }
    Ok(figure)
}

/// One line per vertical and horizontal ruling segment.
pub fn segment_plot(artifact: &Artifact, options: &PlotOptions) -> Result<Figure> {
    let segments = segments(artifact)?;
    let frame = content_frame(artifact)?;
    let mut figure = new_figure(PlotKind::Segment, artifact, frame, options);

    for (index, segment) in segments.iter().enumerate() {
        figure.push(Primitive::line(segment.from, segment.to, options.colors.line(index)));
    }
    figure.set_viewport(compute_viewport(segments.iter().map(|s| s.bounds())));
    Ok(figure)
}

fn new_figure(kind: PlotKind, artifact: &Artifact, frame: Frame, options: &PlotOptions) -> Figure {
    Figure::new(
        kind,
        artifact.mode,
        frame,
        artifact.raster.clone(),
        options.line_width,
        options.marker_radius,
    )
}

fn content_frame(artifact: &Artifact) -> Result<Frame> {
    require_raster(artifact)?;
    let (page_width, page_height) = artifact.page_size;
    if !(page_width.is_finite() && page_height.is_finite() && page_width > 0.0 && page_height > 0.0)
    {
        return Err(Error::MalformedArtifact(format!(
            "page size {}x{} is not a positive extent",
            page_width, page_height
        )));
    }
    Ok(Frame::ContentSpace {
        page_width,
        page_height,
    })
}

fn pixel_frame(artifact: &Artifact) -> Result<Frame> {
    require_raster(artifact)?;
    Ok(Frame::PixelSpace {
        width: artifact.raster.width(),
        height: artifact.raster.height(),
    })
}

fn require_raster(artifact: &Artifact) -> Result<()> {
    if artifact.raster.is_empty() {
        return Err(Error::MalformedArtifact("page raster has no pixels".to_string()));
    }
    Ok(())
}

fn missing(what: &str, kind: PlotKind, mode: DetectionMode) -> Error {
    Error::MalformedArtifact(format!(
        "{} is required for kind='{}' in {} mode but is absent",
        what, kind, mode
    ))
}

fn text_boxes(artifact: &Artifact, kind: PlotKind) -> Result<&[Rect]> {
    artifact
        .text_boxes
        .as_deref()
        .ok_or_else(|| missing("text_boxes", kind, artifact.mode))
}

fn grid(artifact: &Artifact) -> Result<&[Vec<Cell>]> {
    let grid = artifact
        .grid
        .as_deref()
        .ok_or_else(|| missing("grid", PlotKind::Grid, artifact.mode))?;
    if let Some(first) = grid.first() {
        if let Some((row, cells)) = grid.iter().enumerate().find(|(_, r)| r.len() != first.len()) {
            return Err(Error::MalformedArtifact(format!(
                "grid is not rectangular: row {} has {} cells, row 0 has {}",
                row,
                cells.len(),
                first.len()
            )));
        }
    }
    Ok(grid)
}

fn bbox_map(artifact: &Artifact, kind: PlotKind) -> Result<&[BboxEntry]> {
    match artifact.bbox_map.as_deref() {
        None => Err(missing("bbox_map", kind, artifact.mode)),
        Some([]) => Err(Error::MalformedArtifact(format!(
            "bbox_map is empty; kind='{}' in {} mode needs at least one table bbox",
            kind, artifact.mode
        ))),
        Some(entries) => Ok(entries),
    }
}

fn edge_guides(artifact: &Artifact) -> Result<&[EdgeGuide]> {
    artifact
        .edge_guides
        .as_deref()
        .ok_or_else(|| missing("edge_guides", PlotKind::EdgeGuide, artifact.mode))
}

fn segments(artifact: &Artifact) -> Result<&Segments> {
    artifact
        .segments
        .as_ref()
        .ok_or_else(|| missing("segments", PlotKind::Segment, artifact.mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::PageRaster;
    use crate::geometry::{LineSegment, Point};

    fn artifact(mode: DetectionMode) -> Artifact {
        let raster = PageRaster::from_rgba(20, 10, vec![255; 20 * 10 * 4]).unwrap();
        Artifact::new(mode, (200.0, 100.0), raster)
    }

    #[test]
    fn test_box_plot_scenario() {
        let a = artifact(DetectionMode::Inferred)
            .with_text_boxes(vec![Rect::from_points(0.0, 0.0, 10.0, 10.0)]);
        let fig = box_plot(&a, &PlotOptions::default()).unwrap();
        assert_eq!(fig.filled_patch_count(), 1);
        assert_eq!(fig.viewport().unwrap().as_tuple(), (-10.0, 20.0, -10.0, 20.0));
    }

    #[test]
    fn test_box_plot_without_boxes() {
        let a = artifact(DetectionMode::Ruled).with_text_boxes(vec![]);
        let fig = box_plot(&a, &PlotOptions::default()).unwrap();
        assert_eq!(fig.patch_count(), 0);
        assert!(fig.viewport().is_none());
        assert_eq!(fig.limits().as_tuple(), (0.0, 200.0, 0.0, 100.0));
    }

    #[test]
    fn test_box_plot_absent_boxes() {
        let a = artifact(DetectionMode::Inferred);
        assert!(matches!(
            box_plot(&a, &PlotOptions::default()),
            Err(Error::MalformedArtifact(_))
        ));
    }

    #[test]
    fn test_grid_edges() {
        let cells = vec![vec![
            Cell::new(0.0, 0.0, 10.0, 10.0).with_edges(true, true, true, true),
            Cell::new(10.0, 0.0, 20.0, 10.0).with_edges(false, true, false, true),
        ]];
        let a = artifact(DetectionMode::Ruled).with_grid(cells);
        let fig = grid_plot(&a, &PlotOptions::default()).unwrap();
        assert_eq!(fig.line_count(), 6);
        assert_eq!(fig.viewport().unwrap().as_tuple(), (-10.0, 30.0, -10.0, 20.0));
    }

    #[test]
    fn test_grid_left_edge_geometry() {
        let cells = vec![vec![Cell::new(0.0, 0.0, 10.0, 5.0).with_edges(true, false, false, false)]];
        let a = artifact(DetectionMode::Inferred).with_grid(cells);
        let fig = grid_plot(&a, &PlotOptions::default()).unwrap();
        match &fig.primitives()[0] {
            Primitive::Line { segment, .. } => {
                assert_eq!(*segment, LineSegment::new(0.0, 0.0, 0.0, 5.0));
            },
            other => panic!("expected line, got {:?}", other),
        }
    }

    #[test]
    fn test_ragged_grid_is_malformed() {
        let cells = vec![vec![Cell::new(0.0, 0.0, 1.0, 1.0)], vec![]];
        let a = artifact(DetectionMode::Ruled).with_grid(cells);
        let err = grid_plot(&a, &PlotOptions::default()).unwrap_err();
        assert!(err.to_string().contains("not rectangular"));
    }

    #[test]
    fn test_contour_ruled_uses_pixel_space() {
        let a = artifact(DetectionMode::Ruled)
            .with_text_boxes(vec![Rect::from_points(0.0, 0.0, 5.0, 5.0)])
            .with_bbox_map(vec![BboxEntry::new(Rect::from_points(1.0, 1.0, 15.0, 8.0))]);
        let fig = contour_plot(&a, &PlotOptions::default()).unwrap();
        assert_eq!(fig.filled_patch_count(), 0);
        assert_eq!(fig.outline_count(), 1);
        assert_eq!(fig.frame(), Frame::PixelSpace { width: 20, height: 10 });
        assert!(fig.viewport().is_none());
    }

    #[test]
    fn test_contour_inferred_uses_content_space() {
        let a = artifact(DetectionMode::Inferred)
            .with_text_boxes(vec![Rect::from_points(20.0, 20.0, 40.0, 30.0)])
            .with_bbox_map(vec![BboxEntry::new(Rect::from_points(10.0, 10.0, 90.0, 60.0))]);
        let fig = contour_plot(&a, &PlotOptions::default()).unwrap();
        assert_eq!(fig.filled_patch_count(), 1);
        assert_eq!(fig.outline_count(), 1);
        assert!(fig.frame().y_up());
        assert_eq!(fig.viewport().unwrap().as_tuple(), (0.0, 100.0, 0.0, 70.0));
    }

    #[test]
    fn test_contour_empty_bbox_map_is_malformed() {
        let a = artifact(DetectionMode::Ruled).with_bbox_map(vec![]);
        assert!(matches!(
            contour_plot(&a, &PlotOptions::default()),
            Err(Error::MalformedArtifact(_))
        ));
    }

    #[test]
    fn test_edge_guides() {
        let a = artifact(DetectionMode::Inferred)
            .with_text_boxes(vec![Rect::from_points(10.0, 10.0, 20.0, 20.0)])
            .with_edge_guides(vec![EdgeGuide::new(10.0, 5.0, 40.0), EdgeGuide::new(20.0, 10.0, 20.0)]);
        let fig = edge_guide_plot(&a, &PlotOptions::default()).unwrap();
        assert_eq!(fig.filled_patch_count(), 1);
        assert_eq!(fig.line_count(), 2);
        assert_eq!(fig.viewport().unwrap().as_tuple(), (0.0, 30.0, -5.0, 50.0));
    }

    #[test]
    fn test_intersections() {
        let a = artifact(DetectionMode::Ruled).with_bbox_map(vec![
            BboxEntry::new(Rect::from_points(0.0, 0.0, 10.0, 10.0))
                .with_vertices(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)]),
            BboxEntry::new(Rect::from_points(12.0, 0.0, 18.0, 10.0))
                .with_vertices(vec![Point::new(12.0, 0.0)]),
        ]);
        let fig = intersection_plot(&a, &PlotOptions::default()).unwrap();
        assert_eq!(fig.marker_count(), 3);
        assert_eq!(fig.limits().as_tuple(), (0.0, 20.0, 0.0, 10.0));
    }

    #[test]
    fn test_segments() {
        let a = artifact(DetectionMode::Ruled).with_segments(Segments::new(
            vec![LineSegment::new(50.0, 10.0, 50.0, 90.0)],
            vec![LineSegment::new(10.0, 50.0, 90.0, 50.0)],
        ));
        let fig = segment_plot(&a, &PlotOptions::default()).unwrap();
        assert_eq!(fig.line_count(), 2);
        assert_eq!(fig.viewport().unwrap().as_tuple(), (0.0, 100.0, 0.0, 100.0));
    }

    #[test]
    fn test_content_frame_rejects_zero_page() {
        let raster = PageRaster::from_rgba(1, 1, vec![0; 4]).unwrap();
        let a = Artifact::new(DetectionMode::Inferred, (0.0, 100.0), raster).with_text_boxes(vec![]);
        let err = box_plot(&a, &PlotOptions::default()).unwrap_err();
        assert!(err.to_string().contains("page size"));
    }

    #[test]
    fn test_empty_raster_is_malformed() {
        let raster = PageRaster::from_rgba(0, 0, vec![]).unwrap();
        let a = Artifact::new(DetectionMode::Ruled, (10.0, 10.0), raster)
            .with_bbox_map(vec![BboxEntry::new(Rect::from_points(0.0, 0.0, 1.0, 1.0))]);
        let err = intersection_plot(&a, &PlotOptions::default()).unwrap_err();
        assert!(err.to_string().contains("raster"));
    }
}
