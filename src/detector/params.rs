//! Parameter types configuring the extraction stages.
//!
//! Every threshold of the pipeline lives here so that it can be overridden
//! from a JSON config or a test. Defaults are tuned for ledger scans of a few
//! thousand pixels per side; small synthetic pages usually need a smaller
//! `PageParams::index_split_margin` and `label_strip_offset`.

use crate::angle::AngleBand;
use crate::hough::SegmentSearch;
use crate::types::Crop;
use serde::{Deserialize, Serialize};

/// Rule-line detection (standard Hough + dedup).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineParams {
    /// Half-width of the angle band around the expected rule orientation.
    pub angle_tolerance_deg: f64,
    /// Number of angles sampled across the band.
    pub angle_steps: usize,
    /// Peak threshold as a fraction of the image extent along the rule.
    pub threshold_ratio: f64,
    /// Peak suppression radius along rho (pixels).
    pub min_distance: usize,
    /// Peak suppression radius along theta (angle samples).
    pub min_angle: usize,
    /// Endpoint distance under which two lines are considered the same rule.
    pub merge_distance: f64,
    /// Ink intensity a pixel needs to vote.
    pub ink_threshold: u8,
}

impl Default for LineParams {
    fn default() -> Self {
        Self {
            angle_tolerance_deg: 3.0,
            angle_steps: 61,
            threshold_ratio: 0.4,
            min_distance: 30,
            min_angle: 10,
            merge_distance: 40.0,
            ink_threshold: 128,
        }
    }
}

/// Cell interior extraction and content tests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellParams {
    /// Margin trimmed from the interior to drop rule-line ink.
    pub interior_crop: Crop,
    /// Mean ink above which an index cell is a row label.
    pub row_label_threshold: f64,
    /// Mean ink above which a header cell is a column label.
    pub col_label_threshold: f64,
    /// Header cells narrower or shorter than this are never labels.
    pub min_label_cell_px: i32,
    /// Votes needed before a stroke is traced.
    pub segment_votes: u32,
    /// Minimum stroke extent along x or y.
    pub segment_length: usize,
    /// Largest gap bridged while tracing a stroke.
    pub segment_gap: usize,
    /// Normal angles of a forward-slash mark.
    pub mark_band: AngleBand,
    /// Normal angles searched by the label stroke test.
    pub label_band: AngleBand,
    /// Ink intensity a pixel needs to count as a stroke pixel.
    pub ink_threshold: u8,
}

impl Default for CellParams {
    fn default() -> Self {
        Self {
            interior_crop: Crop::uniform(4),
            row_label_threshold: 20.0,
            col_label_threshold: 15.0,
            min_label_cell_px: 8,
            segment_votes: 10,
            segment_length: 15,
            segment_gap: 2,
            mark_band: AngleBand::new(65.0, 25.0, 161),
            label_band: AngleBand::full_circle(),
            ink_threshold: 128,
        }
    }
}

impl CellParams {
    pub fn segment_search(&self) -> SegmentSearch {
        SegmentSearch {
            votes: self.segment_votes,
            min_length: self.segment_length,
            max_gap: self.segment_gap,
        }
    }
}

/// Neighbours consulted when closing a one-flag gap.
///
/// Flag `i` becomes true when flags `i - before` and `i + after` are both true.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmoothingWindow {
    pub before: usize,
    pub after: usize,
}

impl Default for SmoothingWindow {
    fn default() -> Self {
        Self {
            before: 1,
            after: 1,
        }
    }
}

/// Row and column label derivation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelParams {
    /// Column of the index grid whose cells decide row labels.
    pub row_index_column: usize,
    pub row_window: SmoothingWindow,
    pub col_window: SmoothingWindow,
    /// Most label columns accepted in one header row.
    pub max_days: usize,
    /// Demote the first label column when no data cell under it is marked.
    pub recheck_first_label: bool,
}

impl Default for LabelParams {
    fn default() -> Self {
        Self {
            row_index_column: 1,
            row_window: SmoothingWindow::default(),
            col_window: SmoothingWindow::default(),
            max_days: 31,
            recheck_first_label: false,
        }
    }
}

/// Page layout heuristics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageParams {
    /// The index strip ends this many pixels left of the page centre.
    pub index_split_margin: usize,
    /// Offset of the synthetic line bounding the row-label strip.
    pub label_strip_offset: i32,
    /// Vertical line of the index strip the label line is offset from.
    pub label_strip_reference: usize,
    /// Shortest run of label rows accepted as a month.
    pub min_month_rows: usize,
    /// Split pages with more cell rows than this into two stacked tables.
    pub split_row_limit: Option<usize>,
    /// Extra pixels each half keeps past the split line.
    pub split_overlap: usize,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            index_split_margin: 200,
            label_strip_offset: 200,
            label_strip_reference: 1,
            min_month_rows: 5,
            split_row_limit: None,
            split_overlap: 10,
        }
    }
}

/// Everything the page pipeline needs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractParams {
    pub lines: LineParams,
    pub cells: CellParams,
    pub labels: LabelParams,
    pub page: PageParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let params: ExtractParams =
            serde_json::from_str(r#"{ "lines": { "merge_distance": 12.5 }, "page": { "split_row_limit": 40 } }"#)
                .unwrap();
        assert_eq!(params.lines.merge_distance, 12.5);
        assert_eq!(params.lines.angle_steps, 61);
        assert_eq!(params.page.split_row_limit, Some(40));
        assert_eq!(params.labels.max_days, 31);
        assert_eq!(params.cells.interior_crop, Crop::uniform(4));
    }
}
