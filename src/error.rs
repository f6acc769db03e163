//! Error types shared by the grid reconstruction core and its I/O collaborators.

use crate::types::Crop;
use thiserror::Error;

/// Errors raised while reconstructing a ledger grid or writing its results.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Two bounding lines are parallel or a line has coincident endpoints.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Fewer than two rule lines were found along one axis.
    #[error("insufficient {axis} lines: found {found}, need at least 2")]
    InsufficientLines { axis: &'static str, found: usize },

    /// The two halves of a stacked page disagree on their column count.
    #[error("split halves disagree on column count: top={top} bottom={bottom}")]
    InconsistentSplit { top: usize, bottom: usize },

    /// No cell satisfied the label test.
    #[error("no label found among {0}")]
    NoLabelFound(&'static str),

    /// A crop removes every pixel of the image it is applied to.
    #[error("crop {crop:?} leaves no pixels of a {width}x{height} image")]
    EmptyCrop {
        crop: Crop,
        width: usize,
        height: usize,
    },

    /// A pixel buffer does not match the dimensions it was given with.
    #[error("buffer of {actual} bytes does not fit a {width}x{height} image")]
    BufferSize {
        width: usize,
        height: usize,
        actual: usize,
    },

    /// Image decoding or encoding failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem access failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization or parsing failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid runtime configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Result type used throughout the crate.
pub type LedgerResult<T> = Result<T, LedgerError>;
