//! Hough-based rule detection for one axis.

use super::axis::Axis;
use super::set::{EdgePolicy, LineSet};
use crate::angle::{is_mostly_horizontal, AngleBand};
use crate::detector::params::LineParams;
use crate::hough::{HoughAccumulator, HoughPeak, PeakParams};
use crate::image::ImageU8;
use crate::types::Line;
use log::debug;
use std::marker::PhantomData;

/// Convert a Hough peak to a segment clipped to the image frame.
///
/// Mostly horizontal lines are evaluated at `x = 0` and `x = width`, the
/// others at `y = 0` and `y = height`.
pub fn polar_to_segment(theta: f64, rho: f64, width: usize, height: usize) -> Line {
    let (s, c) = theta.sin_cos();
    if is_mostly_horizontal(theta) {
        let x1 = width as f64;
        let y0 = (rho / s).round() as i32;
        let y1 = ((rho - x1 * c) / s).round() as i32;
        Line::from_coords(0, y0, width as i32, y1)
    } else {
        let y1 = height as f64;
        let x0 = (rho / c).round() as i32;
        let x1 = ((rho - y1 * s) / c).round() as i32;
        Line::from_coords(x0, 0, x1, height as i32)
    }
}

/// Finds the rule lines of one orientation in a grayscale ink image.
#[derive(Clone, Debug)]
pub struct GridLineDetector<A: Axis> {
    params: LineParams,
    _axis: PhantomData<A>,
}

impl<A: Axis> GridLineDetector<A> {
    pub fn new(params: LineParams) -> Self {
        Self {
            params,
            _axis: PhantomData,
        }
    }

    pub fn params(&self) -> &LineParams {
        &self.params
    }

    /// Sampled Hough angles for this axis.
    pub fn thetas(&self) -> Vec<f64> {
        AngleBand::around(
            A::NORMAL_DEG,
            self.params.angle_tolerance_deg,
            self.params.angle_steps,
        )
        .radians()
    }

    /// Votes a peak must exceed: a fraction of the rule length.
    pub fn threshold(&self, width: usize, height: usize) -> f64 {
        A::extent(width, height) as f64 * self.params.threshold_ratio
    }

    pub fn find_peaks(&self, image: &ImageU8<'_>) -> Vec<HoughPeak> {
        let thetas = self.thetas();
        let acc = HoughAccumulator::build(image, &thetas, self.params.ink_threshold);
        acc.peaks(&PeakParams {
            threshold: self.threshold(image.w, image.h),
            min_distance: self.params.min_distance,
            min_angle: self.params.min_angle,
        })
    }

    /// Detect, sort, deduplicate, then add the requested border rules.
    pub fn detect(&self, image: &ImageU8<'_>, edges: EdgePolicy) -> LineSet<A> {
        let (w, h) = (image.w, image.h);
        let peaks = self.find_peaks(image);
        let segments = peaks
            .iter()
            .map(|p| polar_to_segment(p.theta, p.rho, w, h))
            .collect();
        let mut set = LineSet::<A>::from_lines(segments);
        let merged = set.dedup(self.params.merge_distance);
        set.synthesize_edges(edges, w, h, self.params.merge_distance);
        debug!(
            "{} rules: {} peaks, {} merged, {} after edges",
            A::NAME,
            peaks.len(),
            merged,
            set.len()
        );
        set
    }
}
