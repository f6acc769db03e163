//! Pixel-space value types shared by the geometry, cell, and grid modules.

use serde::{Deserialize, Serialize};

/// Integer pixel coordinate, produced by snapping a line intersection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Translation from a cropped image's local origin to the root page origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset of a child image obtained by applying `crop` to an image at `self`.
    #[inline]
    pub fn compose(self, crop: &Crop) -> Offset {
        Offset {
            x: self.x + crop.left as i32,
            y: self.y + crop.top as i32,
        }
    }

    /// Map a local point into root-page coordinates.
    #[inline]
    pub fn apply(self, p: Point) -> Point {
        Point::new(p.x + self.x, p.y + self.y)
    }
}

/// Margins (pixels) removed from each edge when deriving a sub-image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Crop {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl Crop {
    pub const fn new(top: usize, bottom: usize, left: usize, right: usize) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Same margin on every side.
    pub const fn uniform(margin: usize) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// True when the crop leaves at least one pixel of a `width`×`height` image.
    #[inline]
    pub fn fits(&self, width: usize, height: usize) -> bool {
        self.top + self.bottom < height && self.left + self.right < width
    }

    /// Dimensions left after cropping, or `None` when nothing remains.
    pub fn remaining(&self, width: usize, height: usize) -> Option<(usize, usize)> {
        self.fits(width, height).then(|| {
            (
                width - self.left - self.right,
                height - self.top - self.bottom,
            )
        })
    }
}

/// Segment between two pixel points.
///
/// Intersection math treats it as the infinite line through both points.
/// Endpoint order matters for [`crate::geometry::too_close`]: `p0` is always
/// the endpoint at the lower coordinate along the line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    pub p0: Point,
    pub p1: Point,
}

impl Line {
    pub const fn new(p0: Point, p1: Point) -> Self {
        Self { p0, p1 }
    }

    pub const fn from_coords(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Translate both endpoints.
    pub fn translated(&self, dx: i32, dy: i32) -> Line {
        Line::from_coords(self.p0.x + dx, self.p0.y + dy, self.p1.x + dx, self.p1.y + dy)
    }
}

/// Rectangle in root-page coordinates, used for rendering overlays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    pub origin: Point,
    pub width: i32,
    pub height: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_compose_additively() {
        let a = Crop::new(3, 1, 7, 2);
        let b = Crop::new(10, 0, 4, 5);
        let once = Offset::ZERO.compose(&a);
        assert_eq!(once, Offset::new(7, 3));
        let twice = once.compose(&b);
        assert_eq!(twice, Offset::new(11, 13));
        assert_eq!(twice.apply(Point::new(5, 6)), Point::new(16, 19));
    }

    #[test]
    fn crop_fit_requires_positive_remainder() {
        let crop = Crop::new(5, 5, 2, 2);
        assert!(crop.fits(5, 11));
        assert!(!crop.fits(4, 11));
        assert!(!crop.fits(5, 10));
        assert_eq!(crop.remaining(10, 20), Some((6, 10)));
        assert_eq!(crop.remaining(10, 10), None);
    }
}
