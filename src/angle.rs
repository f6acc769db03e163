//! Angle utilities used by the Hough stages.
//!
//! Hough angles follow the normal-form convention `x·cosθ + y·sinθ = ρ` in
//! image coordinates (y pointing down): a horizontal rule has its normal at
//! θ = 90°, a vertical rule at θ = 0°, and a forward slash `/` at θ ≈ 45°.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;

/// Inclusive, evenly spaced range of Hough angles in degrees.
///
/// `start_deg` may be larger than `end_deg`; the samples then run downward.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AngleBand {
    pub start_deg: f64,
    pub end_deg: f64,
    pub steps: usize,
}

impl AngleBand {
    pub const fn new(start_deg: f64, end_deg: f64, steps: usize) -> Self {
        Self {
            start_deg,
            end_deg,
            steps,
        }
    }

    /// Band of `steps` angles within `tolerance_deg` of `center_deg`.
    pub fn around(center_deg: f64, tolerance_deg: f64, steps: usize) -> Self {
        Self::new(center_deg - tolerance_deg, center_deg + tolerance_deg, steps)
    }

    /// Every orientation, sampled at whole degrees over [-90°, 90°).
    pub const fn full_circle() -> Self {
        Self::new(-90.0, 89.0, 180)
    }

    /// Sample angles in radians.
    pub fn radians(&self) -> Vec<f64> {
        match self.steps {
            0 => Vec::new(),
            1 => vec![self.start_deg.to_radians()],
            n => {
                let step = (self.end_deg - self.start_deg) / (n - 1) as f64;
                (0..n)
                    .map(|i| (self.start_deg + step * i as f64).to_radians())
                    .collect()
            }
        }
    }
}

/// True when the line with normal angle `theta` is closer to horizontal
/// than to vertical, i.e. it is best parametrized by x.
#[inline]
pub fn is_mostly_horizontal(theta: f64) -> bool {
    theta.abs() > FRAC_PI_4
}
