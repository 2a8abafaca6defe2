//! Geometric primitives shared by the artifact model and the renderers.
//!
//! Coordinates are plain `f32` values; which frame they live in (content-space
//! or pixel-space) is decided by the renderer that reads them, never by the
//! types themselves.

use serde::{Deserialize, Serialize};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use table_plot::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f32; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// An axis-aligned rectangle given by two opposite corners `(x0, y0)` and `(x1, y1)`.
///
/// The corners are stored as supplied; use [`Rect::min_x`] and friends when the
/// ordering of the corners matters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Rect {
    /// First corner x
    pub x0: f32,
    /// First corner y
    pub y0: f32,
    /// Opposite corner x
    pub x1: f32,
    /// Opposite corner y
    pub y1: f32,
}

impl Rect {
    /// Create a rectangle from two corner points.
    ///
    /// # Examples
    ///
    /// ```
    /// use table_plot::geometry::Rect;
    ///
    /// let rect = Rect::from_points(10.0, 20.0, 110.0, 70.0);
    /// assert_eq!(rect.width(), 100.0);
    /// assert_eq!(rect.height(), 50.0);
    /// ```
    pub fn from_points(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Smallest x coordinate.
    pub fn min_x(&self) -> f32 {
        self.x0.min(self.x1)
    }

    /// Largest x coordinate.
    pub fn max_x(&self) -> f32 {
        self.x0.max(self.x1)
    }

    /// Smallest y coordinate.
    pub fn min_y(&self) -> f32 {
        self.y0.min(self.y1)
    }

    /// Largest y coordinate.
    pub fn max_y(&self) -> f32 {
        self.y0.max(self.y1)
    }

    /// Signed width `x1 - x0`.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Signed height `y1 - y0`.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Corner points in drawing order: (x0,y0), (x1,y0), (x1,y1), (x0,y1).
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x0, self.y0),
            Point::new(self.x1, self.y0),
            Point::new(self.x1, self.y1),
            Point::new(self.x0, self.y1),
        ]
    }

    /// Compute the union of this rectangle with another.
    ///
    /// Returns the smallest normalized rectangle that contains both rectangles.
    ///
    /// # Examples
    ///
    /// ```
    /// use table_plot::geometry::Rect;
    ///
    /// let r1 = Rect::from_points(0.0, 0.0, 50.0, 50.0);
    /// let r2 = Rect::from_points(25.0, 25.0, 75.0, 75.0);
    /// let union = r1.union(&r2);
    ///
    /// assert_eq!(union, Rect::from_points(0.0, 0.0, 75.0, 75.0));
    /// ```
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_points(
            self.min_x().min(other.min_x()),
            self.min_y().min(other.min_y()),
            self.max_x().max(other.max_x()),
            self.max_y().max(other.max_y()),
        )
    }

    /// True if every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }
}

impl From<[f32; 4]> for Rect {
    fn from([x0, y0, x1, y1]: [f32; 4]) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

impl From<Rect> for [f32; 4] {
    fn from(r: Rect) -> Self {
        [r.x0, r.y0, r.x1, r.y1]
    }
}

/// A straight line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct LineSegment {
    /// Start point
    pub from: Point,
    /// End point
    pub to: Point,
}

impl LineSegment {
    /// Create a segment from its endpoint coordinates.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            from: Point::new(x0, y0),
            to: Point::new(x1, y1),
        }
    }

    /// Degenerate rectangle spanned by the two endpoints.
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.from.x, self.from.y, self.to.x, self.to.y)
    }
}

impl From<[f32; 4]> for LineSegment {
    fn from([x0, y0, x1, y1]: [f32; 4]) -> Self {
        Self::new(x0, y0, x1, y1)
    }
}

impl From<LineSegment> for [f32; 4] {
    fn from(s: LineSegment) -> Self {
        [s.from.x, s.from.y, s.to.x, s.to.y]
    }
}
