//! Plot kinds and the mode/kind validity matrix.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::artifact::DetectionMode;
use crate::error::{Error, Result};

/// The overlay to draw for an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlotKind {
    /// Detected text boxes
    Box,
    /// Cell boundaries of the table grid
    Grid,
    /// Table bounding contours
    Contour,
    /// Text-alignment guide edges
    EdgeGuide,
    /// Ruling-line intersections
    Intersection,
    /// Ruling-line segments
    Segment,
}

impl PlotKind {
    /// Every kind, in a stable order.
    pub const ALL: [PlotKind; 6] = [
        PlotKind::Box,
        PlotKind::Grid,
        PlotKind::Contour,
        PlotKind::EdgeGuide,
        PlotKind::Intersection,
        PlotKind::Segment,
    ];

    /// Tag accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            PlotKind::Box => "box",
            PlotKind::Grid => "grid",
            PlotKind::Contour => "contour",
            PlotKind::EdgeGuide => "edge-guide",
            PlotKind::Intersection => "intersection",
            PlotKind::Segment => "segment",
        }
    }

    /// Kinds that can be drawn for artifacts of `mode`.
    pub fn supported_for(mode: DetectionMode) -> impl Iterator<Item = PlotKind> {
        Self::ALL.into_iter().filter(move |&kind| is_supported(mode, kind))
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlotKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PlotKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnsupportedKind(s.to_string()))
    }
}

/// Whether `kind` is meaningful for artifacts produced in `mode`.
///
/// Ruled detection never computes guide edges; inferred detection has no
/// ruling lines, hence no segments or intersections.
pub fn is_supported(mode: DetectionMode, kind: PlotKind) -> bool {
    match (mode, kind) {
        (_, PlotKind::Box | PlotKind::Grid | PlotKind::Contour) => true,
        (DetectionMode::Ruled, PlotKind::Intersection | PlotKind::Segment) => true,
        (DetectionMode::Ruled, PlotKind::EdgeGuide) => false,
        (DetectionMode::Inferred, PlotKind::EdgeGuide) => true,
        (DetectionMode::Inferred, PlotKind::Intersection | PlotKind::Segment) => false,
    }
}

/// Fail with [`Error::UnsupportedCombination`] for pairs outside the matrix.
pub fn validate(mode: DetectionMode, kind: PlotKind) -> Result<()> {
    if is_supported(mode, kind) {
        Ok(())
    } else {
        Err(Error::UnsupportedCombination { mode, kind })
    }
}
