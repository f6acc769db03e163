//! Serializable reports describing what the extractor saw.
//!
//! A [`PageReport`] travels with every page result; the batch driver gathers
//! them into a [`BatchReport`] that the CLI can write as JSON.

pub mod batch;
pub mod page;
pub mod timing;

pub use batch::{BatchReport, PageFailure};
pub use page::{MonthReport, PageReport};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
