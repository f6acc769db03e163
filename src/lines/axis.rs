//! The two rule orientations of a ledger grid.
//!
//! Line sets and the line detector are written once and parametrized by an
//! [`Axis`]; the axis decides which coordinate orders lines, which angle band
//! the Hough search covers, and how full-span rules are laid out.

use crate::types::Line;

/// Orientation of a family of rule lines.
pub trait Axis: Copy + Default + Send + Sync + 'static {
    /// Human-readable name used in logs and errors.
    const NAME: &'static str;
    /// Hough normal angle of a perfect rule, in degrees.
    const NORMAL_DEG: f64;

    /// Coordinate lines are ordered by (y for horizontal rules, x for vertical).
    fn sort_key(line: &Line) -> i32;

    /// Length of a full-span rule in a `width`×`height` image.
    fn extent(width: usize, height: usize) -> usize;

    /// Size of the image across the rules; the trailing edge sits here.
    fn span(width: usize, height: usize) -> usize;

    /// Full-span rule at `position` across the image.
    fn rule_at(position: i32, width: usize, height: usize) -> Line;

    /// Copy of `reference` moved `distance` pixels across the image and
    /// stretched to full span.
    fn shifted(reference: &Line, distance: i32, width: usize, height: usize) -> Line;
}

/// Rules running left to right; ordered top to bottom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Horizontal;

/// Rules running top to bottom; ordered left to right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Vertical;

impl Axis for Horizontal {
    const NAME: &'static str = "horizontal";
    const NORMAL_DEG: f64 = 90.0;

    #[inline]
    fn sort_key(line: &Line) -> i32 {
        line.p0.y
    }

    #[inline]
    fn extent(width: usize, _height: usize) -> usize {
        width
    }

    #[inline]
    fn span(_width: usize, height: usize) -> usize {
        height
    }

    fn rule_at(position: i32, width: usize, _height: usize) -> Line {
        Line::from_coords(0, position, width as i32, position)
    }

    fn shifted(reference: &Line, distance: i32, width: usize, _height: usize) -> Line {
        Line::from_coords(
            0,
            reference.p0.y + distance,
            width as i32,
            reference.p1.y + distance,
        )
    }
}

impl Axis for Vertical {
    const NAME: &'static str = "vertical";
    const NORMAL_DEG: f64 = 0.0;

    #[inline]
    fn sort_key(line: &Line) -> i32 {
        line.p0.x
    }

    #[inline]
    fn extent(_width: usize, height: usize) -> usize {
        height
    }

    #[inline]
    fn span(width: usize, _height: usize) -> usize {
        width
    }

    fn rule_at(position: i32, _width: usize, height: usize) -> Line {
        Line::from_coords(position, 0, position, height as i32)
    }

    fn shifted(reference: &Line, distance: i32, _width: usize, height: usize) -> Line {
        Line::from_coords(
            reference.p0.x + distance,
            0,
            reference.p1.x + distance,
            height as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifted_rules_span_the_image() {
        let h = Line::from_coords(3, 10, 90, 12);
        assert_eq!(
            Horizontal::shifted(&h, 5, 100, 50),
            Line::from_coords(0, 15, 100, 17)
        );
        let v = Line::from_coords(20, 4, 22, 40);
        assert_eq!(
            Vertical::shifted(&v, -5, 100, 50),
            Line::from_coords(15, 0, 17, 50)
        );
    }

    #[test]
    fn trailing_edge_sits_on_the_far_border() {
        assert_eq!(Horizontal::span(100, 50), 50);
        assert_eq!(Vertical::span(100, 50), 100);
        assert_eq!(
            Horizontal::rule_at(50, 100, 50),
            Line::from_coords(0, 50, 100, 50)
        );
    }
}
