#![doc = include_str!("../README.md")]

// Core: geometry, Hough search, lines, cells, grids.
pub mod angle;
pub mod cell;
pub mod geometry;
pub mod grid;
pub mod hough;
pub mod image;
pub mod lines;
pub mod types;

// Page pipeline and its collaborators.
pub mod batch;
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod output;

// --- High-level re-exports -------------------------------------------------

pub use crate::batch::{collect_inputs, BatchRunner};
pub use crate::detector::{ExtractParams, LedgerDetector, ObservationRow, PageResult};
pub use crate::diagnostics::{BatchReport, PageReport};
pub use crate::error::{LedgerError, LedgerResult};
pub use crate::grid::Grid;
pub use crate::output::CsvSink;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use ledger_grid::prelude::*;
///
/// # fn main() -> LedgerResult<()> {
/// let detector = LedgerDetector::new(ExtractParams::default());
/// let page = detector.process_path(std::path::Path::new("images/page_001.png"))?;
/// for row in &page.rows {
///     println!("chart {} row {}: {} marks", row.chart_in_file, row.row_no, row.marked_days());
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::grid::Grid;
    pub use crate::image::InkImage;
    pub use crate::lines::{EdgePolicy, Horizontal, Vertical};
    pub use crate::types::{Crop, Line, Offset, Point};
    pub use crate::{ExtractParams, LedgerDetector, LedgerError, LedgerResult, PageResult};
}
