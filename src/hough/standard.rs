//! Angle-restricted Hough line transform.
//!
//! The accumulator has one column per sampled angle and one row per integer
//! rho in `[-offset, offset]`, where `offset` is the image diagonal. Peaks are
//! picked greedily by vote count; each accepted peak suppresses a window of
//! `±min_distance` rho bins and `±min_angle` angle bins around itself.

use super::rho_offset;
use crate::image::{ImageU8, ImageView};
use log::debug;
use serde::Serialize;
use std::cmp::Ordering;

/// A line in normal form `x·cosθ + y·sinθ = rho`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HoughPeak {
    pub theta: f64,
    pub rho: f64,
    pub votes: u32,
}

/// Peak selection knobs.
#[derive(Clone, Copy, Debug)]
pub struct PeakParams {
    /// Peaks must collect strictly more votes than this.
    pub threshold: f64,
    /// Suppression half-width along rho, in bins (pixels).
    pub min_distance: usize,
    /// Suppression half-width along theta, in angle samples.
    pub min_angle: usize,
}

/// Vote table for one image and one set of angles.
pub struct HoughAccumulator {
    votes: Vec<u32>,
    thetas: Vec<f64>,
    offset: usize,
    n_rho: usize,
}

impl HoughAccumulator {
    /// Accumulate votes from every pixel of `image` brighter than `ink_threshold`.
    pub fn build(image: &ImageU8<'_>, thetas: &[f64], ink_threshold: u8) -> Self {
        let offset = rho_offset(image.w, image.h);
        let n_rho = 2 * offset + 1;
        let n_theta = thetas.len();
        let mut votes = vec![0u32; n_rho * n_theta];
        let trig: Vec<(f64, f64)> = thetas.iter().map(|t| (t.cos(), t.sin())).collect();

        for (x, y) in image.ink_points(ink_threshold) {
            for (t, &(c, s)) in trig.iter().enumerate() {
                let rho = (x as f64 * c + y as f64 * s).round() as isize + offset as isize;
                if rho >= 0 && (rho as usize) < n_rho {
                    votes[rho as usize * n_theta + t] += 1;
                }
            }
        }

        Self {
            votes,
            thetas: thetas.to_vec(),
            offset,
            n_rho,
        }
    }

    #[inline]
    fn at(&self, rho_idx: usize, theta_idx: usize) -> u32 {
        self.votes[rho_idx * self.thetas.len() + theta_idx]
    }

    /// Largest vote count anywhere in the table.
    pub fn max_votes(&self) -> u32 {
        self.votes.iter().copied().max().unwrap_or(0)
    }

    /// Prominent peaks, strongest first.
    pub fn peaks(&self, params: &PeakParams) -> Vec<HoughPeak> {
        let n_theta = self.thetas.len();
        if n_theta == 0 {
            return Vec::new();
        }

        // Local maxima above threshold within the suppression window.
        let mut candidates: Vec<(usize, usize, u32)> = Vec::new();
        for r in 0..self.n_rho {
            for t in 0..n_theta {
                let v = self.at(r, t);
                if (v as f64) <= params.threshold {
                    continue;
                }
                if self.is_window_max(r, t, v, params) {
                    candidates.push((r, t, v));
                }
            }
        }

        // Plateaus of equal maxima collapse to their centroid.
        let mut merged = merge_plateaus(candidates);
        merged.sort_by(|a, b| match b.2.cmp(&a.2) {
            Ordering::Equal => (a.0, a.1).cmp(&(b.0, b.1)),
            other => other,
        });

        let mut accepted: Vec<(usize, usize, u32)> = Vec::new();
        for cand in merged {
            let suppressed = accepted.iter().any(|&(r, t, _)| {
                r.abs_diff(cand.0) <= params.min_distance && t.abs_diff(cand.1) <= params.min_angle
            });
            if !suppressed {
                accepted.push(cand);
            }
        }

        debug!(
            "hough peaks: {} accepted over threshold {:.1} (max votes {})",
            accepted.len(),
            params.threshold,
            self.max_votes()
        );

        accepted
            .into_iter()
            .map(|(r, t, v)| HoughPeak {
                theta: self.thetas[t],
                rho: r as f64 - self.offset as f64,
                votes: v,
            })
            .collect()
    }

    fn is_window_max(&self, r: usize, t: usize, v: u32, params: &PeakParams) -> bool {
        let r_lo = r.saturating_sub(params.min_distance);
        let r_hi = (r + params.min_distance).min(self.n_rho - 1);
        let t_lo = t.saturating_sub(params.min_angle);
        let t_hi = (t + params.min_angle).min(self.thetas.len() - 1);
        for rr in r_lo..=r_hi {
            for tt in t_lo..=t_hi {
                if self.at(rr, tt) > v {
                    return false;
                }
            }
        }
        true
    }
}

fn merge_plateaus(candidates: Vec<(usize, usize, u32)>) -> Vec<(usize, usize, u32)> {
    let mut visited = vec![false; candidates.len()];
    let mut merged = Vec::new();
    for start in 0..candidates.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut stack = vec![start];
        let (mut sum_r, mut sum_t, mut count, mut best) = (0usize, 0usize, 0usize, 0u32);
        while let Some(i) = stack.pop() {
            let (r, t, v) = candidates[i];
            sum_r += r;
            sum_t += t;
            count += 1;
            best = best.max(v);
            for (j, &(rj, tj, _)) in candidates.iter().enumerate() {
                if !visited[j] && r.abs_diff(rj) <= 1 && t.abs_diff(tj) <= 1 {
                    visited[j] = true;
                    stack.push(j);
                }
            }
        }
        let r = (sum_r as f64 / count as f64).round() as usize;
        let t = (sum_t as f64 / count as f64).round() as usize;
        merged.push((r, t, best));
    }
    merged
}
