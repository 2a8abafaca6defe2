//! Error types for the plotting library.
//!
//! This module defines all error types that can occur while validating an
//! artifact, building a figure, or exporting it.

use crate::artifact::DetectionMode;
use crate::plot::PlotKind;

/// Result type alias for plotting operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during plotting.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No graphics backend is available to draw figures
    #[error("Graphics backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Plot kind is not one of the recognized tags
    #[error("Unsupported plot kind: '{0}'")]
    UnsupportedKind(String),

    /// Plot kind is recognized but meaningless for the artifact's detection mode
    #[error("{mode} detection does not support kind='{kind}'")]
    UnsupportedCombination {
        /// Detection mode of the artifact
        mode: DetectionMode,
        /// Requested plot kind
        kind: PlotKind,
    },

    /// A collection required by the selected renderer is missing
    #[error("Malformed artifact: {0}")]
    MalformedArtifact(String),

    /// Destination extension does not map to an export format
    #[error("Unsupported export format: '{0}'")]
    UnsupportedExportFormat(String),

    /// Raster decoding or encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Backend failed to allocate or encode a canvas
    #[error("Render error: {0}")]
    Render(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_kind_error() {
        let err = Error::UnsupportedKind("diagonal".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Unsupported plot kind"));
        assert!(msg.contains("diagonal"));
    }

    #[test]
    fn test_unsupported_combination_error() {
        let err = Error::UnsupportedCombination {
            mode: DetectionMode::Ruled,
            kind: PlotKind::EdgeGuide,
        };
        let msg = format!("{}", err);
        assert_eq!(msg, "ruled detection does not support kind='edge-guide'");
    }

    #[test]
    fn test_malformed_artifact_error() {
        let err = Error::MalformedArtifact("bbox_map is empty".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Malformed artifact"));
        assert!(msg.contains("bbox_map"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
