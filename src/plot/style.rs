//! Colors and stroke settings for plotted primitives.

use serde::{Deserialize, Serialize};

/// RGBA color with components in `0.0..=1.0`.
pub type Rgba = [f32; 4];

/// Line colors cycled through by successive line primitives.
pub const LINE_CYCLE: [Rgba; 10] = [
    [0.122, 0.467, 0.706, 1.0], // blue
    [1.000, 0.498, 0.055, 1.0], // orange
    [0.173, 0.627, 0.173, 1.0], // green
    [0.839, 0.153, 0.157, 1.0], // red
    [0.580, 0.404, 0.741, 1.0], // purple
    [0.549, 0.337, 0.294, 1.0], // brown
    [0.890, 0.467, 0.761, 1.0], // pink
    [0.498, 0.498, 0.498, 1.0], // gray
    [0.737, 0.741, 0.133, 1.0], // olive
    [0.090, 0.745, 0.812, 1.0], // cyan
];

/// Colors for the different overlay primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotColors {
    /// Text boxes in the `box` overlay (RGBA)
    pub text_box: Rgba,
    /// Text boxes behind contours and guide edges (RGBA)
    pub highlighted_text: Rgba,
    /// Table contours (RGBA)
    pub contour: Rgba,
    /// Intersection markers (RGBA)
    pub marker: Rgba,
    /// Line color cycle; must not be empty
    pub lines: Vec<Rgba>,
}

impl Default for PlotColors {
    fn default() -> Self {
        Self {
            text_box: [0.122, 0.467, 0.706, 0.5],    // Blue with 50% opacity
            highlighted_text: [0.0, 0.0, 1.0, 0.5], // Pure blue with 50% opacity
            contour: [1.0, 0.0, 0.0, 1.0],          // Red
            marker: [1.0, 0.0, 0.0, 1.0],           // Red
            lines: LINE_CYCLE.to_vec(),
        }
    }
}

impl PlotColors {
    /// Color of the `index`-th line primitive.
    pub fn line(&self, index: usize) -> Rgba {
        if self.lines.is_empty() {
            LINE_CYCLE[index % LINE_CYCLE.len()]
        } else {
            self.lines[index % self.lines.len()]
        }
    }
}

/// Options controlling how overlays are drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotOptions {
    /// Colors for the overlay primitives
    pub colors: PlotColors,
    /// Stroke width of lines and contours, in canvas pixels
    pub line_width: f32,
    /// Radius of intersection markers, in canvas pixels
    pub marker_radius: f32,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            colors: PlotColors::default(),
            line_width: 1.5,
            marker_radius: 3.0,
        }
    }
}

impl PlotOptions {
    /// Set the stroke width.
    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width.max(0.1);
        self
    }

    /// Set the marker radius.
    pub fn with_marker_radius(mut self, radius: f32) -> Self {
        self.marker_radius = radius.max(0.5);
        self
    }

    /// Replace the colors.
    pub fn with_colors(mut self, colors: PlotColors) -> Self {
        self.colors = colors;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_colors_default() {
        let colors = PlotColors::default();
        assert_eq!(colors.text_box[3], 0.5);
        assert_eq!(colors.highlighted_text[2], 1.0);
        assert_eq!(colors.contour[0], 1.0); // Red
        assert_eq!(colors.lines.len(), 10);
    }

    #[test]
    fn test_line_cycle_wraps() {
        let colors = PlotColors::default();
        assert_eq!(colors.line(0), colors.line(10));
        assert_ne!(colors.line(0), colors.line(1));

        let empty = PlotColors {
            lines: Vec::new(),
            ..PlotColors::default()
        };
        assert_eq!(empty.line(3), LINE_CYCLE[3]);
    }

    #[test]
    fn test_plot_options_builders() {
        let opts = PlotOptions::default().with_line_width(0.0).with_marker_radius(6.0);
        assert_eq!(opts.line_width, 0.1);
        assert_eq!(opts.marker_radius, 6.0);
    }
}
