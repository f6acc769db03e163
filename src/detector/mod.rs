//! Per-page extraction pipeline.
//!
//! [`LedgerDetector`] turns one scanned ledger page into observation rows:
//!
//! 1. invert the page and optionally split two stacked tables apart;
//! 2. cut each table into the left index strip and the right data region;
//! 3. find row labels in the index strip and group them into months;
//! 4. for every month, rebuild the lattice, find the day columns, and test
//!    each data cell under a day for a slash mark.
//!
//! Modules
//! - [`params`] – every threshold of the pipeline, JSON-loadable.
//! - [`records`] – rows and overlay patches emitted per page.
//! - `page` – the [`LedgerDetector`] implementation.

mod page;
pub mod params;
pub mod records;

pub use page::LedgerDetector;
pub use params::{
    CellParams, ExtractParams, LabelParams, LineParams, PageParams, SmoothingWindow,
};
pub use records::{ObservationRow, Overlay, OverlayKind, PageResult, DAYS_IN_MONTH};
