//! Path rasterizer - strokes and fills overlay primitives using tiny-skia.
//!
//! All coordinates handed to the rasterizer are canvas pixels; the frame
//! mapping happens before, so stroke widths stay constant on screen.

use tiny_skia::{Color, FillRule, LineCap, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

use crate::geometry::Point;
use crate::plot::Rgba;

/// Create an anti-aliased solid paint.
pub(crate) fn create_paint(color: Rgba) -> Paint<'static> {
    let [r, g, b, a] = color;
    let mut paint = Paint::default();
    paint.set_color(Color::from_rgba(r, g, b, a).unwrap_or(Color::BLACK));
    paint.anti_alias = true;
    paint
}

/// Rasterizer for overlay primitives.
pub struct PathRasterizer {
    line_width: f32,
}

impl PathRasterizer {
    /// Create a rasterizer stroking with `line_width` pixels.
    pub fn new(line_width: f32) -> Self {
        Self { line_width }
    }

    /// Fill a closed polygon.
    pub fn fill_polygon(&self, pixmap: &mut Pixmap, points: &[Point], color: Rgba) {
        if let Some(path) = polygon_path(points) {
            pixmap.fill_path(
                &path,
                &create_paint(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    /// Stroke the outline of a closed polygon.
    pub fn stroke_polygon(&self, pixmap: &mut Pixmap, points: &[Point], color: Rgba) {
        if let Some(path) = polygon_path(points) {
            self.stroke(pixmap, &path, color);
        }
    }

    /// Stroke a single line.
    pub fn stroke_line(&self, pixmap: &mut Pixmap, from: Point, to: Point, color: Rgba) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        match pb.finish() {
            Some(path) => self.stroke(pixmap, &path, color),
            None => log::debug!("Skipping degenerate line {:?} -> {:?}", from, to),
        }
    }

    /// Fill a circular marker.
    pub fn fill_circle(&self, pixmap: &mut Pixmap, center: Point, radius: f32, color: Rgba) {
        if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) {
            pixmap.fill_path(
                &path,
                &create_paint(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn stroke(&self, pixmap: &mut Pixmap, path: &Path, color: Rgba) {
        let stroke = Stroke {
            width: self.line_width,
            line_cap: LineCap::Square,
            ..Stroke::default()
        };
        pixmap.stroke_path(path, &create_paint(color), &stroke, Transform::identity(), None);
    }
}

fn polygon_path(points: &[Point]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let c = pixmap.pixel(x, y).unwrap().demultiply();
        (c.red(), c.green(), c.blue(), c.alpha())
    }

    #[test]
    fn test_fill_polygon() {
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        let rasterizer = PathRasterizer::new(1.0);
        let square = [
            Point::new(2.0, 2.0),
            Point::new(8.0, 2.0),
            Point::new(8.0, 8.0),
            Point::new(2.0, 8.0),
        ];
        rasterizer.fill_polygon(&mut pixmap, &square, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(pixel(&pixmap, 5, 5), (255, 0, 0, 255));
        assert_eq!(pixel(&pixmap, 0, 0).3, 0);
    }

    #[test]
    fn test_stroke_vertical_line() {
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        let rasterizer = PathRasterizer::new(2.0);
        rasterizer.stroke_line(
            &mut pixmap,
            Point::new(5.0, 1.0),
            Point::new(5.0, 9.0),
            [0.0, 0.0, 1.0, 1.0],
        );
        assert!(pixel(&pixmap, 5, 5).3 > 0);
        assert_eq!(pixel(&pixmap, 1, 5).3, 0);
    }

    #[test]
    fn test_empty_polygon_is_ignored() {
        let mut pixmap = Pixmap::new(4, 4).unwrap();
        PathRasterizer::new(1.0).fill_polygon(&mut pixmap, &[], [0.0, 0.0, 0.0, 1.0]);
        assert!(pixmap.pixels().iter().all(|p| p.alpha() == 0));
    }

    #[test]
    fn test_fill_circle() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();
        PathRasterizer::new(1.0).fill_circle(
            &mut pixmap,
            Point::new(10.0, 10.0),
            4.0,
            [1.0, 0.0, 0.0, 1.0],
        );
        assert_eq!(pixel(&pixmap, 10, 10), (255, 0, 0, 255));
        assert_eq!(pixel(&pixmap, 1, 1).3, 0);
    }
}
