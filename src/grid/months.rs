//! Month segmentation: label runs in the index strip bound month tables.

use super::Grid;
use crate::error::LedgerResult;
use crate::types::{Crop, Point};
use log::debug;
use serde::Serialize;

/// Vertical extent of one month table, in root-page coordinates.
///
/// `label_rows` is the half-open run of index rows flagged as labels. The
/// table also takes in the unlabelled row on either side: the one above
/// carries the day header and the one below closes the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MonthSpan {
    pub label_rows: (usize, usize),
    pub top: i32,
    pub bottom: i32,
}

/// Maximal runs of `true`, as half-open `(start, end)` index pairs.
pub fn label_runs(flags: &[bool]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, &flag) in flags.iter().enumerate() {
        match (flag, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, flags.len()));
    }
    runs
}

/// Month spans of an index grid with derived row labels.
///
/// Runs shorter than `min_rows` are noise and dropped. Coordinates are read
/// from the index column's cell corners.
pub fn month_spans(index: &Grid, column: usize, min_rows: usize) -> Vec<MonthSpan> {
    let rows = index.rows();
    let cols = index.cols();
    if rows == 0 || cols == 0 {
        return Vec::new();
    }
    let column = column.min(cols - 1);
    let cell = move |row: usize| &index.cells()[row][column];
    let root = move |p: Point| index.offset().apply(p);

    label_runs(index.row_labels())
        .into_iter()
        .filter(|(start, end)| {
            let keep = end - start >= min_rows;
            if !keep {
                debug!("label run {start}..{end} too short for a month");
            }
            keep
        })
        .map(|(start, end)| MonthSpan {
            label_rows: (start, end),
            top: root(cell(start.saturating_sub(1)).top_right).y,
            bottom: root(cell(end.min(rows - 1)).bottom_right).y,
        })
        .collect()
}

impl Grid {
    /// Crop one child grid per month span out of this (data region) grid.
    pub fn crop_months(&self, spans: &[MonthSpan]) -> LedgerResult<Vec<Grid>> {
        let height = self.height() as i32;
        spans
            .iter()
            .map(|span| {
                let top = (span.top - self.offset().y).clamp(0, height);
                let bottom = (span.bottom - self.offset().y).clamp(0, height);
                self.crop(&Crop::new(
                    top as usize,
                    (height - bottom) as usize,
                    0,
                    0,
                ))
            })
            .collect()
    }
}
