//! One quadrilateral of a ledger grid and the tests run on its contents.

use crate::detector::params::CellParams;
use crate::error::LedgerResult;
use crate::geometry::intersect;
use crate::hough::probabilistic_segments;
use crate::image::InkImage;
use crate::types::{Line, Offset, Patch, Point};

/// Area bounded by two consecutive horizontal and two consecutive vertical
/// rules.
///
/// Corners are in the local frame of the owning grid; `offset` maps them to
/// the root page. The interior is a window into the grid image with rule ink
/// trimmed away.
#[derive(Clone, Debug)]
pub struct Cell {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
    offset: Offset,
    interior: InkImage,
}

impl Cell {
    /// Intersect the four bounding rules and cut the interior out of `image`.
    pub fn new(
        image: &InkImage,
        offset: Offset,
        top: &Line,
        bottom: &Line,
        left: &Line,
        right: &Line,
        params: &CellParams,
    ) -> LedgerResult<Cell> {
        let top_left = intersect(top, left)?;
        let top_right = intersect(top, right)?;
        let bottom_left = intersect(bottom, left)?;
        let bottom_right = intersect(bottom, right)?;
        let interior = Self::cut_interior(
            image,
            [top_left, top_right, bottom_left, bottom_right],
            params,
        );
        Ok(Cell {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
            offset,
            interior,
        })
    }

    /// Largest axis-aligned box inside the corners, clamped to the image and
    /// trimmed by the interior margin.
    fn cut_interior(image: &InkImage, corners: [Point; 4], params: &CellParams) -> InkImage {
        let [tl, tr, bl, br] = corners;
        let w = image.width() as i32;
        let h = image.height() as i32;
        let top = tl.y.max(tr.y).clamp(0, h);
        let bottom = bl.y.min(br.y).clamp(0, h);
        let left = tl.x.max(bl.x).clamp(0, w);
        let right = tr.x.min(br.x).clamp(0, w);
        if bottom <= top || right <= left {
            return image.window(0, 0, 0, 0);
        }
        let inside = image.window(
            left as usize,
            top as usize,
            (right - left) as usize,
            (bottom - top) as usize,
        );
        // cells too small for the margin keep their whole interior
        inside.crop(&params.interior_crop).unwrap_or(inside)
    }

    pub fn interior(&self) -> &InkImage {
        &self.interior
    }

    pub fn is_empty(&self) -> bool {
        self.interior.is_empty()
    }

    /// Width of the top edge.
    pub fn width(&self) -> i32 {
        self.top_right.x - self.top_left.x
    }

    /// Height of the left edge.
    pub fn height(&self) -> i32 {
        self.bottom_left.y - self.top_left.y
    }

    pub fn mean_ink(&self) -> f64 {
        self.interior.view().mean()
    }

    /// Label test: any stroke at all, or enough ink on average.
    pub fn is_label(&self, threshold: f64, params: &CellParams) -> bool {
        if self.is_empty() {
            return false;
        }
        let strokes = probabilistic_segments(
            &self.interior.view(),
            &params.label_band.radians(),
            params.ink_threshold,
            &params.segment_search(),
        );
        !strokes.is_empty() || self.mean_ink() > threshold
    }

    /// Mark test: at least one stroke leaning like `/`.
    pub fn has_mark(&self, params: &CellParams) -> bool {
        if self.is_empty() {
            return false;
        }
        !probabilistic_segments(
            &self.interior.view(),
            &params.mark_band.radians(),
            params.ink_threshold,
            &params.segment_search(),
        )
        .is_empty()
    }

    /// Rectangle in root-page coordinates anchored at the top-left corner.
    pub fn patch(&self) -> Patch {
        Patch {
            origin: self.offset.apply(self.top_left),
            width: self.width(),
            height: self.height(),
        }
    }
}
