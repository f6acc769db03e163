//! Values emitted for one processed page.

use crate::diagnostics::PageReport;
use crate::types::Patch;
use serde::Serialize;

/// Days per month column block in the CSV.
pub const DAYS_IN_MONTH: usize = 31;

/// One data row of one month table.
///
/// `chart_in_file` and `row_no` are 1-based. Year, month, and species are not
/// known to the extractor and stay blank in the output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ObservationRow {
    pub file_name: String,
    pub chart_in_file: usize,
    pub row_no: usize,
    pub days: [bool; DAYS_IN_MONTH],
}

impl ObservationRow {
    pub fn marked_days(&self) -> usize {
        self.days.iter().filter(|d| **d).count()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    RowLabel,
    ColumnLabel,
    Mark,
}

/// A highlighted cell in root-page coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Overlay {
    pub kind: OverlayKind,
    pub patch: Patch,
}

/// Everything produced for a page: CSV rows, overlay patches, and a report.
#[derive(Clone, Debug, Serialize)]
pub struct PageResult {
    pub file_name: String,
    pub rows: Vec<ObservationRow>,
    pub overlays: Vec<Overlay>,
    pub report: PageReport,
}

impl PageResult {
    pub fn marks(&self) -> usize {
        self.rows.iter().map(ObservationRow::marked_days).sum()
    }
}
