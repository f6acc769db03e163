//! Splitting a page grid into sub-grids.

use super::Grid;
use crate::detector::params::ExtractParams;
use crate::error::{LedgerError, LedgerResult};
use crate::lines::EdgePolicy;
use crate::types::Crop;
use log::{debug, warn};

/// Edge policies used when a split half re-detects its rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SplitEdges {
    pub horizontal: EdgePolicy,
    pub vertical: EdgePolicy,
}

impl Grid {
    /// Split into the left index strip and the right data region.
    ///
    /// The index strip ends `margin` pixels left of the centre and the data
    /// region starts there, so the two are complementary.
    pub fn split_columns(&self, margin: usize) -> LedgerResult<(Grid, Grid)> {
        let width = self.width();
        let index_right = width / 2 + margin;
        let data_left = width.saturating_sub(index_right);
        let index = self.crop(&Crop::new(0, 0, 0, index_right))?;
        let data = self.crop(&Crop::new(0, 0, data_left, 0))?;
        Ok((index, data))
    }

    /// Split a page holding two stacked tables.
    ///
    /// Requires cells to be built. Grids with at most `limit` rows are
    /// returned unchanged. Otherwise the page is cut at the rule closing the
    /// middle row, each half (padded by `split_overlap` pixels) re-detects
    /// its rules and cells, and the halves are kept only when they agree on
    /// the column count; a disagreement keeps the page whole.
    pub fn split(self, limit: usize, params: &ExtractParams, edges: SplitEdges) -> LedgerResult<Vec<Grid>> {
        if self.rows() <= limit {
            return Ok(vec![self]);
        }
        match self.split_halves(params, edges) {
            Ok((top, bottom)) => Ok(vec![top, bottom]),
            Err(LedgerError::InconsistentSplit { top, bottom }) => {
                warn!("stacked split abandoned: top has {top} columns, bottom has {bottom}");
                Ok(vec![self])
            }
            Err(err) => Err(err),
        }
    }

    fn split_halves(&self, params: &ExtractParams, edges: SplitEdges) -> LedgerResult<(Grid, Grid)> {
        let middle = self.rows() / 2;
        let cut = self
            .horizontal()
            .get(middle)
            .map(|line| line.p0.y.max(line.p1.y))
            .ok_or(LedgerError::InsufficientLines {
                axis: "horizontal",
                found: self.horizontal().len(),
            })?;
        let cut = cut.clamp(0, self.height() as i32) as usize;
        let overlap = params.page.split_overlap;
        debug!("splitting {} rows at y={cut}", self.rows());

        let top_end = (cut + overlap).min(self.height());
        let bottom_start = cut.saturating_sub(overlap);
        let mut top = self.crop(&Crop::new(0, self.height() - top_end, 0, 0))?;
        let mut bottom = self.crop(&Crop::new(bottom_start, 0, 0, 0))?;
        for half in [&mut top, &mut bottom] {
            half.detect_lines(&params.lines, edges.horizontal, edges.vertical);
            half.build_cells(&params.cells)?;
        }
        if top.cols() != bottom.cols() {
            return Err(LedgerError::InconsistentSplit {
                top: top.cols(),
                bottom: bottom.cols(),
            });
        }
        Ok((top, bottom))
    }
}
