#![allow(dead_code)]

use image::GrayImage;
use ledger_grid::image::InkImage;

/// White page with black ink drawn on it, clipped to the page.
pub struct Page {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl Page {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "page dimensions must be positive");
        Self {
            width,
            height,
            data: vec![255; width * height],
        }
    }

    fn ink(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = 0;
        }
    }

    /// Horizontal rule `thickness` px tall starting at row `y`, over `[x0, x1)`.
    pub fn hline(&mut self, y: usize, x0: usize, x1: usize, thickness: usize) {
        for yy in y..y + thickness {
            for x in x0..x1 {
                self.ink(x, yy);
            }
        }
    }

    /// Vertical rule `thickness` px wide starting at column `x`, over `[y0, y1)`.
    pub fn vline(&mut self, x: usize, y0: usize, y1: usize, thickness: usize) {
        for y in y0..y1 {
            for xx in x..x + thickness {
                self.ink(xx, y);
            }
        }
    }

    pub fn block(&mut self, x0: usize, y0: usize, x1: usize, y1: usize) {
        for y in y0..y1 {
            for x in x0..x1 {
                self.ink(x, y);
            }
        }
    }

    /// A `/` stroke, 3 px thick, rising `span` px up and right from
    /// `(x0, y_base)`.
    pub fn slash(&mut self, x0: usize, y_base: usize, span: usize) {
        for i in 0..=span {
            for t in 0..3 {
                self.ink(x0 + i + t, y_base - i);
            }
        }
    }

    pub fn to_gray(&self) -> GrayImage {
        GrayImage::from_raw(self.width as u32, self.height as u32, self.data.clone())
            .expect("buffer matches dimensions")
    }

    pub fn to_ink(&self) -> InkImage {
        InkImage::from_gray(&self.to_gray())
    }
}

/// Page ruled with full-length 2 px rules at the given rows and columns.
pub fn ruled_page(width: usize, height: usize, rows: &[usize], cols: &[usize]) -> Page {
    let mut page = Page::new(width, height);
    for &y in rows {
        page.hline(y, 0, width, 2);
    }
    for &x in cols {
        page.vline(x, 0, height, 2);
    }
    page
}

/// 6 horizontal × 5 vertical rules, 70×50 px cells, 10 px from the borders.
pub const GRID_ROWS: [usize; 6] = [10, 60, 110, 160, 210, 260];
pub const GRID_COLS: [usize; 5] = [10, 80, 150, 220, 290];

/// The 6×5-rule page with a slash in each listed `(row, col)` cell.
pub fn grid_with_slashes(cells: &[(usize, usize)]) -> Page {
    let mut page = ruled_page(300, 270, &GRID_ROWS, &GRID_COLS);
    for &(r, c) in cells {
        page.slash(GRID_COLS[c] + 25, GRID_ROWS[r] + 35, 20);
    }
    page
}

/// Two 4-row tables stacked on one 300×420 page, sharing the rule at y=210.
/// `top_cols` and `bottom_cols` are the vertical rules of each table.
pub fn stacked_tables(top_cols: &[usize], bottom_cols: &[usize]) -> Page {
    let mut page = Page::new(300, 420);
    for y in (10..420).step_by(50) {
        page.hline(y, 0, 300, 2);
    }
    for &x in top_cols {
        page.vline(x, 10, 212, 2);
    }
    for &x in bottom_cols {
        page.vline(x, 210, 412, 2);
    }
    page
}

/// Row pitch of the journal page.
pub const JOURNAL_PITCH: usize = 50;
/// Label rows of the journal page; rows 0 and 7 flank the month.
pub const JOURNAL_LABEL_ROWS: std::ops::RangeInclusive<usize> = 1..=6;
/// Day columns of the journal page's data region.
pub const JOURNAL_DAYS: usize = 5;

/// A 600×410 journal page holding one month.
///
/// The left half is the index strip: rules at x=5 and x=60 and an ink label
/// in rows 1..=6 between x=75 and x=140. The right half is the month table:
/// rules every 50 px from x=305 to x=555 (the page border closes the last
/// column), day numbers in header columns 1..=5, and a slash in each listed
/// `(row, col)` data cell.
pub fn journal_page(marks: &[(usize, usize)]) -> Page {
    let mut page = Page::new(600, 410);
    for r in 0..9 {
        page.hline(5 + JOURNAL_PITCH * r, 0, 600, 2);
    }
    for x in [5, 60] {
        page.vline(x, 5, 407, 2);
    }
    for x in (305..=555).step_by(JOURNAL_PITCH) {
        page.vline(x, 5, 407, 2);
    }
    for r in JOURNAL_LABEL_ROWS {
        let top = 5 + JOURNAL_PITCH * r;
        page.block(75, top + 15, 140, top + 35);
    }
    for c in 1..=JOURNAL_DAYS {
        let left = 305 + JOURNAL_PITCH * c;
        page.block(left + 10, 20, left + 40, 40);
    }
    for &(r, c) in marks {
        page.slash(305 + JOURNAL_PITCH * c + 12, 5 + JOURNAL_PITCH * r + 38, 20);
    }
    page
}

/// Parameters sized for the synthetic journal page.
pub fn journal_params() -> ledger_grid::ExtractParams {
    let mut params = ledger_grid::ExtractParams::default();
    params.page.index_split_margin = 0;
    params.page.label_strip_offset = 100;
    params
}
