//! Row and column label derivation.

use super::Grid;
use crate::detector::params::{CellParams, LabelParams, SmoothingWindow};
use crate::error::{LedgerError, LedgerResult};
use log::debug;

/// Close one-flag gaps: flag `i` becomes true when the flags `window.before`
/// positions earlier and `window.after` positions later are both true.
///
/// Runs left to right in place, so a closed gap can close the next one.
pub fn smooth_gaps(flags: &mut [bool], window: SmoothingWindow) {
    let end = flags.len().saturating_sub(window.after);
    for i in window.before..end {
        if flags[i - window.before] && flags[i + window.after] {
            flags[i] = true;
        }
    }
}

/// Keep only the first `max` true flags.
pub fn cap_labels(flags: &mut [bool], max: usize) {
    let mut seen = 0;
    for flag in flags.iter_mut().filter(|f| **f) {
        if seen >= max {
            *flag = false;
        } else {
            seen += 1;
        }
    }
}

impl Grid {
    /// Flag rows whose index cell holds ink, then close small gaps.
    pub fn derive_row_labels(&mut self, cells: &CellParams, labels: &LabelParams) -> &[bool] {
        let column = labels.row_index_column;
        let mut flags: Vec<bool> = self
            .cells
            .iter()
            .map(|row| {
                row.get(column)
                    .is_some_and(|cell| cell.is_label(cells.row_label_threshold, cells))
            })
            .collect();
        smooth_gaps(&mut flags, labels.row_window);
        debug!(
            "row labels: {} of {} rows",
            flags.iter().filter(|f| **f).count(),
            flags.len()
        );
        self.row_labels = flags;
        &self.row_labels
    }

    /// Flag header cells holding a day number, close gaps, and cap the count
    /// at `labels.max_days`.
    pub fn derive_column_labels(&mut self, cells: &CellParams, labels: &LabelParams) -> &[bool] {
        let min = cells.min_label_cell_px;
        let mut flags: Vec<bool> = self
            .header_row()
            .unwrap_or(&[])
            .iter()
            .map(|cell| {
                cell.width() > min
                    && cell.height() > min
                    && cell.is_label(cells.col_label_threshold, cells)
            })
            .collect();
        smooth_gaps(&mut flags, labels.col_window);
        cap_labels(&mut flags, labels.max_days);
        self.col_labels = flags;

        if labels.recheck_first_label {
            self.recheck_first_label(cells);
        }
        debug!(
            "column labels: {} of {} columns",
            self.col_labels.iter().filter(|f| **f).count(),
            self.col_labels.len()
        );
        &self.col_labels
    }

    /// Demote the first label column when no data cell below it is marked.
    fn recheck_first_label(&mut self, params: &CellParams) {
        let Ok(first) = self.first_label_column() else {
            return;
        };
        let marked = self
            .cells
            .iter()
            .skip(1)
            .filter_map(|row| row.get(first))
            .any(|cell| cell.has_mark(params));
        if !marked {
            debug!("first label column {first} has no marks; demoted");
            self.col_labels[first] = false;
        }
    }

    pub fn first_label_row(&self) -> LedgerResult<usize> {
        self.row_labels
            .iter()
            .position(|&f| f)
            .ok_or(LedgerError::NoLabelFound("row labels"))
    }

    pub fn first_label_column(&self) -> LedgerResult<usize> {
        self.col_labels
            .iter()
            .position(|&f| f)
            .ok_or(LedgerError::NoLabelFound("column labels"))
    }

    /// Indices of label columns, i.e. the day columns in calendar order.
    pub fn label_columns(&self) -> Vec<usize> {
        self.col_labels
            .iter()
            .enumerate()
            .filter_map(|(i, &f)| f.then_some(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::InkImage;
    use crate::types::Line;

    fn flags(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == 'T').collect()
    }

    #[test]
    fn smoothing_closes_flanked_gaps() {
        let mut f = flags("TFTTFT");
        smooth_gaps(&mut f, SmoothingWindow::default());
        assert_eq!(f, flags("TTTTTT"));
    }

    #[test]
    fn smoothing_leaves_unflanked_gaps() {
        let mut f = flags("FTFFTF");
        smooth_gaps(&mut f, SmoothingWindow::default());
        assert_eq!(f, flags("FTFFTF"));
    }

    #[test]
    fn wider_window_looks_two_back() {
        let mut f = flags("TFFTF");
        smooth_gaps(
            &mut f,
            SmoothingWindow {
                before: 2,
                after: 1,
            },
        );
        assert_eq!(f, flags("TFTTF"));
    }

    #[test]
    fn smoothing_short_sequences() {
        let mut empty: Vec<bool> = Vec::new();
        smooth_gaps(&mut empty, SmoothingWindow::default());
        let mut one = flags("T");
        smooth_gaps(&mut one, SmoothingWindow::default());
        assert_eq!(one, flags("T"));
    }

    #[test]
    fn cap_keeps_the_first_labels() {
        let mut f = vec![true; 40];
        f[0] = false;
        cap_labels(&mut f, 31);
        assert_eq!(f.iter().filter(|x| **x).count(), 31);
        assert!(!f[0]);
        assert!(f[1..32].iter().all(|x| *x));
        assert!(f[32..].iter().all(|x| !*x));
    }

    /// Header cells with ink in columns `labelled`, over a one-row-plus-data grid.
    fn header_grid(cols: usize, labelled: &[usize]) -> Grid {
        let (cw, ch) = (30usize, 30usize);
        let (w, h) = (cols * cw, 2 * ch);
        let mut data = vec![0u8; w * h];
        for &c in labelled {
            for y in 8..22 {
                for x in c * cw + 8..c * cw + 22 {
                    data[y * w + x] = 255;
                }
            }
        }
        let mut grid = Grid::new(InkImage::from_ink(w, h, data).unwrap());
        for y in [0, ch, 2 * ch] {
            grid.horizontal_mut()
                .add_line(Line::from_coords(0, y as i32, w as i32, y as i32));
        }
        for c in 0..=cols {
            let x = (c * cw) as i32;
            grid.vertical_mut()
                .add_line(Line::from_coords(x, 0, x, h as i32));
        }
        grid.build_cells(&CellParams::default()).unwrap();
        grid
    }

    #[test]
    fn header_labels_are_smoothed_and_capped() {
        let mut grid = header_grid(40, &(1..38).filter(|c| *c != 5).collect::<Vec<_>>());
        let labels = grid
            .derive_column_labels(&CellParams::default(), &LabelParams::default())
            .to_vec();
        assert_eq!(labels.len(), 40);
        assert!(!labels[0]);
        assert!(labels[5], "gap at 5 is closed");
        assert_eq!(labels.iter().filter(|f| **f).count(), 31);
        assert!(labels[1..32].iter().all(|f| *f));
        assert_eq!(grid.first_label_column().unwrap(), 1);
        assert_eq!(grid.label_columns().len(), 31);
    }

    #[test]
    fn recheck_demotes_unmarked_first_column() {
        let mut grid = header_grid(6, &[1, 2, 3]);
        let params = LabelParams {
            recheck_first_label: true,
            ..LabelParams::default()
        };
        let labels = grid
            .derive_column_labels(&CellParams::default(), &params)
            .to_vec();
        assert_eq!(labels, vec![false, false, true, true, false, false]);
    }

    #[test]
    fn blank_header_has_no_first_label() {
        let mut grid = header_grid(4, &[]);
        grid.derive_column_labels(&CellParams::default(), &LabelParams::default());
        assert!(matches!(
            grid.first_label_column(),
            Err(LedgerError::NoLabelFound(_))
        ));
    }

    #[test]
    fn row_labels_read_the_index_column() {
        let mut grid = header_grid(3, &[1]);
        let labels = grid
            .derive_row_labels(&CellParams::default(), &LabelParams::default())
            .to_vec();
        assert_eq!(labels, vec![true, false]);
        assert_eq!(grid.first_label_row().unwrap(), 0);
    }
}
