//! Grid: one page region, its rule lines, and the cell lattice between them.
//!
//! A [`Grid`] is built either from a whole page or as a crop of another grid.
//! Crops share the page buffer and carry an [`Offset`] so that every cell can
//! be mapped back to root-page coordinates. The usual lifecycle is
//! [`Grid::detect_lines`] → [`Grid::build_cells`] → label derivation
//! (see [`labels`]).

pub mod labels;
pub mod months;
pub mod split;

pub use labels::{cap_labels, smooth_gaps};
pub use months::{label_runs, month_spans, MonthSpan};

use crate::cell::Cell;
use crate::detector::params::{CellParams, LineParams};
use crate::error::{LedgerError, LedgerResult};
use crate::image::InkImage;
use crate::lines::{Axis, EdgePolicy, GridLineDetector, Horizontal, LineSet, Vertical};
use crate::types::{Crop, Offset};
use ::image::GrayImage;
use log::debug;

#[derive(Clone, Debug)]
pub struct Grid {
    image: InkImage,
    offset: Offset,
    horizontal: LineSet<Horizontal>,
    vertical: LineSet<Vertical>,
    cells: Vec<Vec<Cell>>,
    row_labels: Vec<bool>,
    col_labels: Vec<bool>,
}

impl Grid {
    /// Root grid over an already inverted page.
    pub fn new(image: InkImage) -> Self {
        Self::with_offset(image, Offset::ZERO)
    }

    /// Root grid over a grayscale page (dark ink on light paper).
    pub fn from_gray(gray: &GrayImage) -> Self {
        Self::new(InkImage::from_gray(gray))
    }

    fn with_offset(image: InkImage, offset: Offset) -> Self {
        Self {
            image,
            offset,
            horizontal: LineSet::new(),
            vertical: LineSet::new(),
            cells: Vec::new(),
            row_labels: Vec::new(),
            col_labels: Vec::new(),
        }
    }

    /// Child grid over `crop` of this grid's image. Lines and cells are not
    /// inherited; the child detects its own.
    pub fn crop(&self, crop: &Crop) -> LedgerResult<Grid> {
        let image = self.image.crop(crop)?;
        Ok(Self::with_offset(image, self.offset.compose(crop)))
    }

    pub fn image(&self) -> &InkImage {
        &self.image
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn width(&self) -> usize {
        self.image.width()
    }

    pub fn height(&self) -> usize {
        self.image.height()
    }

    pub fn horizontal(&self) -> &LineSet<Horizontal> {
        &self.horizontal
    }

    pub fn vertical(&self) -> &LineSet<Vertical> {
        &self.vertical
    }

    pub fn horizontal_mut(&mut self) -> &mut LineSet<Horizontal> {
        &mut self.horizontal
    }

    pub fn vertical_mut(&mut self) -> &mut LineSet<Vertical> {
        &mut self.vertical
    }

    /// Run both line detectors on this grid's image.
    pub fn detect_lines(
        &mut self,
        params: &LineParams,
        horizontal_edges: EdgePolicy,
        vertical_edges: EdgePolicy,
    ) {
        let view = self.image.view();
        self.horizontal =
            GridLineDetector::<Horizontal>::new(params.clone()).detect(&view, horizontal_edges);
        self.vertical =
            GridLineDetector::<Vertical>::new(params.clone()).detect(&view, vertical_edges);
    }

    /// Pair consecutive rules into rows and columns and build every cell.
    ///
    /// Resets both label sequences to all-false with one flag per row/column.
    pub fn build_cells(&mut self, params: &CellParams) -> LedgerResult<()> {
        check_lines(&self.horizontal)?;
        check_lines(&self.vertical)?;

        let mut cells = Vec::with_capacity(self.horizontal.len() - 1);
        for (top, bottom) in self.horizontal.bands() {
            let row = self
                .vertical
                .bands()
                .map(|(left, right)| {
                    Cell::new(&self.image, self.offset, top, bottom, left, right, params)
                })
                .collect::<LedgerResult<Vec<_>>>()?;
            cells.push(row);
        }
        self.cells = cells;
        self.row_labels = vec![false; self.rows()];
        self.col_labels = vec![false; self.cols()];
        debug!(
            "grid at ({}, {}): {}x{} cells",
            self.offset.x,
            self.offset.y,
            self.rows(),
            self.cols()
        );
        Ok(())
    }

    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    /// First cell row, holding the column labels of a month table.
    pub fn header_row(&self) -> Option<&[Cell]> {
        self.cells.first().map(Vec::as_slice)
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn row_labels(&self) -> &[bool] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[bool] {
        &self.col_labels
    }
}

fn check_lines<A: Axis>(set: &LineSet<A>) -> LedgerResult<()> {
    if set.len() < 2 {
        return Err(LedgerError::InsufficientLines {
            axis: A::NAME,
            found: set.len(),
        });
    }
    Ok(())
}
