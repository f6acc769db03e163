//! Line geometry on integer pixel segments.
//!
//! Lines are lifted to homogeneous coordinates (`l = p0 × p1`) so that the
//! intersection of two lines is a single cross product. Results are snapped
//! to the pixel grid by truncation toward zero.

use crate::error::{LedgerError, LedgerResult};
use crate::types::{Line, Point};
use nalgebra::{Vector2, Vector3};

const PARALLEL_EPS: f64 = 1e-9;

#[inline]
fn homogeneous(p: Point) -> Vector3<f64> {
    Vector3::new(p.x as f64, p.y as f64, 1.0)
}

/// Homogeneous line through both endpoints of `line`.
#[inline]
pub fn homogeneous_line(line: &Line) -> Vector3<f64> {
    homogeneous(line.p0).cross(&homogeneous(line.p1))
}

/// Intersection of the infinite lines through `a` and `b`.
///
/// Coordinates are truncated, not rounded. Fails with
/// [`LedgerError::DegenerateGeometry`] when the lines are parallel or either
/// line has coincident endpoints.
pub fn intersect(a: &Line, b: &Line) -> LedgerResult<Point> {
    let x = homogeneous_line(a).cross(&homogeneous_line(b));
    if x.z.abs() < PARALLEL_EPS {
        return Err(LedgerError::DegenerateGeometry(format!(
            "lines {a:?} and {b:?} do not intersect"
        )));
    }
    Ok(Point::new((x.x / x.z) as i32, (x.y / x.z) as i32))
}

/// Lengthen `line` by `length` pixels past its second endpoint.
pub fn extend(line: &Line, length: f64) -> LedgerResult<Line> {
    let dir = Vector2::new(
        (line.p1.x - line.p0.x) as f64,
        (line.p1.y - line.p0.y) as f64,
    );
    let norm = dir.norm();
    if norm == 0.0 {
        return Err(LedgerError::DegenerateGeometry(format!(
            "cannot extend zero-length line {line:?}"
        )));
    }
    let step = dir / norm * length;
    let end = Point::new(
        (line.p1.x as f64 + step.x) as i32,
        (line.p1.y as f64 + step.y) as i32,
    );
    Ok(Line::new(line.p0, end))
}

/// True when either pair of corresponding endpoints lies closer than `threshold`.
///
/// This compares `a.p0` with `b.p0` and `a.p1` with `b.p1` only, so both lines
/// must use the same endpoint ordering.
pub fn too_close(a: &Line, b: &Line, threshold: f64) -> bool {
    let d0 = endpoint_distance(a.p0, b.p0);
    let d1 = endpoint_distance(a.p1, b.p1);
    d0.min(d1) < threshold
}

#[inline]
fn endpoint_distance(p: Point, q: Point) -> f64 {
    Vector2::new((p.x - q.x) as f64, (p.y - q.y) as f64).norm()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_aligned_lines_meet_exactly() {
        for k in [0, 1, 17, 250, 4095] {
            for m in [0, 3, 64, 999] {
                let horizontal = Line::from_coords(0, k, 1200, k);
                let vertical = Line::from_coords(m, 0, m, 5000);
                assert_eq!(intersect(&horizontal, &vertical).unwrap(), Point::new(m, k));
            }
        }
    }

    #[test]
    fn intersection_truncates_toward_zero() {
        // x = y / 2 meets y = 5 at x = 2.5
        let slanted = Line::from_coords(0, 0, 2, 4);
        let horizontal = Line::from_coords(0, 5, 10, 5);
        assert_eq!(intersect(&slanted, &horizontal).unwrap(), Point::new(2, 5));
    }

    #[test]
    fn parallel_lines_are_degenerate() {
        let a = Line::from_coords(0, 0, 10, 0);
        let b = Line::from_coords(0, 5, 10, 5);
        assert!(matches!(
            intersect(&a, &b),
            Err(LedgerError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn extend_moves_second_endpoint_along_direction() {
        let line = Line::from_coords(0, 0, 3, 4);
        let longer = extend(&line, 5.0).unwrap();
        assert_eq!(longer.p0, line.p0);
        assert_eq!(longer.p1, Point::new(6, 8));
    }

    #[test]
    fn extend_rejects_zero_length() {
        let line = Line::from_coords(4, 4, 4, 4);
        assert!(extend(&line, 10.0).is_err());
    }

    #[test]
    fn a_line_is_too_close_to_itself() {
        let line = Line::from_coords(0, 37, 800, 41);
        for threshold in [0.001, 1.0, 40.0] {
            assert!(too_close(&line, &line, threshold));
        }
    }

    #[test]
    fn one_close_endpoint_is_enough() {
        let a = Line::from_coords(0, 100, 800, 100);
        let b = Line::from_coords(0, 110, 800, 190);
        assert!(too_close(&a, &b, 40.0));
        let c = Line::from_coords(0, 150, 800, 150);
        assert!(!too_close(&a, &c, 40.0));
    }
}
