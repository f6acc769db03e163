//! Progressive probabilistic Hough transform for short strokes.
//!
//! Ink pixels are visited in raster order. Each pixel votes for all sampled
//! angles; once a bin reaches `votes`, the line through that pixel is walked
//! in both directions (tolerating gaps of up to `max_gap` pixels). Walked
//! pixels are removed from further consideration, and when the walk is long
//! enough their votes are withdrawn and the segment is reported.

use super::rho_offset;
use crate::image::{ImageU8, ImageView};
use crate::types::{Line, Point};

const SHIFT: u32 = 16;

/// Acceptance knobs for the segment search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentSearch {
    /// Votes a bin needs before its line is walked.
    pub votes: u32,
    /// Minimum extent along x or y for a walked line to count.
    pub min_length: usize,
    /// Largest run of missing pixels bridged during a walk.
    pub max_gap: usize,
}

impl Default for SegmentSearch {
    fn default() -> Self {
        Self {
            votes: 10,
            min_length: 15,
            max_gap: 2,
        }
    }
}

/// Find line segments in `image` whose normal angle is one of `thetas`.
pub fn probabilistic_segments(
    image: &ImageU8<'_>,
    thetas: &[f64],
    ink_threshold: u8,
    search: &SegmentSearch,
) -> Vec<Line> {
    let (w, h) = (image.w, image.h);
    if w == 0 || h == 0 || thetas.is_empty() {
        return Vec::new();
    }

    let offset = rho_offset(w, h) as i64;
    let n_theta = thetas.len();
    let n_rho = 2 * offset as usize + 1;
    let trig: Vec<(f64, f64)> = thetas.iter().map(|t| (t.cos(), t.sin())).collect();
    let mut accum = vec![0i32; n_rho * n_theta];

    let points = image.ink_points(ink_threshold);
    let mut mask = vec![false; w * h];
    for &(x, y) in &points {
        mask[y * w + x] = true;
    }

    let rho_bin = |x: i64, y: i64, (c, s): (f64, f64)| -> usize {
        ((x as f64 * c + y as f64 * s).round() as i64 + offset) as usize
    };
    let in_bounds = |x: i64, y: i64| x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < h;

    let mut segments = Vec::new();
    for (px, py) in points {
        if !mask[py * w + px] {
            continue;
        }
        let (x, y) = (px as i64, py as i64);

        let mut max_value = search.votes as i32 - 1;
        let mut max_theta = None;
        for (j, &cs) in trig.iter().enumerate() {
            let cell = &mut accum[rho_bin(x, y, cs) * n_theta + j];
            *cell += 1;
            if *cell > max_value {
                max_value = *cell;
                max_theta = Some(j);
            }
        }
        let Some(j) = max_theta else {
            continue;
        };

        let (c, s) = trig[j];
        let walk = Walk::new(x, y, -s, c);

        // Pass 1: find both ends, bridging short gaps.
        let mut ends = [(x, y), (x, y)];
        for (k, end) in ends.iter_mut().enumerate() {
            let mut gap = 0usize;
            for (x1, y1) in walk.steps(k == 1) {
                if !in_bounds(x1, y1) {
                    break;
                }
                gap += 1;
                if mask[y1 as usize * w + x1 as usize] {
                    gap = 0;
                    *end = (x1, y1);
                } else if gap > search.max_gap {
                    break;
                }
            }
        }

        let min_length = search.min_length as i64;
        let good_line = (ends[1].1 - ends[0].1).abs() >= min_length
            || (ends[1].0 - ends[0].0).abs() >= min_length;

        // Pass 2: consume the walked pixels.
        for (k, end) in ends.iter().enumerate() {
            for (x1, y1) in walk.steps(k == 1) {
                if !in_bounds(x1, y1) {
                    break;
                }
                let idx = y1 as usize * w + x1 as usize;
                if mask[idx] {
                    if good_line {
                        for (jj, &cs) in trig.iter().enumerate() {
                            accum[rho_bin(x1, y1, cs) * n_theta + jj] -= 1;
                        }
                    }
                    mask[idx] = false;
                }
                if (x1, y1) == *end {
                    break;
                }
            }
        }

        if good_line {
            segments.push(Line::new(
                Point::new(ends[0].0 as i32, ends[0].1 as i32),
                Point::new(ends[1].0 as i32, ends[1].1 as i32),
            ));
        }
    }
    segments
}

/// Fixed-point walk along direction `(a, b)` from a start pixel.
struct Walk {
    x0: i64,
    y0: i64,
    dx0: i64,
    dy0: i64,
    x_major: bool,
}

impl Walk {
    fn new(x: i64, y: i64, a: f64, b: f64) -> Self {
        let one = (1i64 << SHIFT) as f64;
        let half = 1i64 << (SHIFT - 1);
        if a.abs() > b.abs() {
            Walk {
                x0: x,
                y0: (y << SHIFT) + half,
                dx0: if a > 0.0 { 1 } else { -1 },
                dy0: (b * one / a.abs()).round() as i64,
                x_major: true,
            }
        } else {
            Walk {
                x0: (x << SHIFT) + half,
                y0: y,
                dx0: (a * one / b.abs()).round() as i64,
                dy0: if b > 0.0 { 1 } else { -1 },
                x_major: false,
            }
        }
    }

    /// Pixels visited from the start point, forward or backward.
    fn steps(&self, backward: bool) -> impl Iterator<Item = (i64, i64)> + '_ {
        let (dx, dy) = if backward {
            (-self.dx0, -self.dy0)
        } else {
            (self.dx0, self.dy0)
        };
        let x_major = self.x_major;
        (0i64..).map(move |i| {
            let px = self.x0 + dx * i;
            let py = self.y0 + dy * i;
            if x_major {
                (px, py >> SHIFT)
            } else {
                (px >> SHIFT, py)
            }
        })
    }
}
