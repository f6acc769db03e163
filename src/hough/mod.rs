//! Hough transforms over ink images.
//!
//! - [`standard`]: full-image accumulator restricted to an angle band, with
//!   prominent-peak extraction. Used to find rule lines.
//! - [`probabilistic`]: progressive probabilistic transform returning short
//!   segments. Used to find strokes inside a single cell.
//!
//! Both vote with every pixel whose ink intensity exceeds `ink_threshold`.

pub mod probabilistic;
pub mod standard;

pub use probabilistic::{probabilistic_segments, SegmentSearch};
pub use standard::{HoughAccumulator, HoughPeak, PeakParams};

/// Half-range of the rho axis for an image of the given size.
#[inline]
pub(crate) fn rho_offset(width: usize, height: usize) -> usize {
    ((width * width + height * height) as f64).sqrt().ceil() as usize
}
