//! Fixed-radius circle detection with a Hough vote grid.
//!
//! Pipeline
//! - Edge evidence: Sobel gradients and non‑maximum suppression are
//!   re-derived from the source (the same stages the Canny detector uses);
//!   pixels reaching [`EDGE_MAGNITUDE_FRACTION`] of the strongest response
//!   are edge pixels.
//! - Voting: with `use_gradient`, each edge pixel casts two votes at
//!   `radius` along ± its gradient; otherwise it votes on a full discretized
//!   circle of `radius` around itself. Votes accumulate in the caller's
//!   [`HoughAccumulator`], which is cleared first and left holding the raw
//!   counts for inspection.
//! - Peaks: cells are scored by their 3×3 vote sum. A peak must reach
//!   [`VOTES_PER_RADIUS`]` × radius`, reach [`RELATIVE_PEAK_FRACTION`] of the
//!   best score, and be the local maximum within `radius / 2` (at least one
//!   cell); equal scores defer to the lower row-major index.
//!
//! Notes
//! - A single radius per call; sweeping several radii is left to callers.
//! - A radius longer than `width + height` cannot fit any center and edge
//!   pixel in the grid, so it yields no circles without voting.
//! - The gradient variant is far more selective: a full circle of votes per
//!   edge pixel spreads evidence over every center at that distance.
mod peaks;
mod vote;

pub use vote::EDGE_MAGNITUDE_FRACTION;

use crate::error::{AnalysisError, Result};
use crate::image::buffer::ensure_same_size;
use crate::image::{HoughAccumulator, ImageView, PixelBuffer, Sample};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Minimum peak score per pixel of radius.
pub const VOTES_PER_RADIUS: f32 = 1.0;
/// Peaks must reach this fraction of the best score in the grid.
pub const RELATIVE_PEAK_FRACTION: f32 = 0.5;

/// Parameters for [`find_circles`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughParams {
    /// Circle radius in pixels (> 0).
    pub radius: usize,
    /// Vote only along the gradient direction.
    pub use_gradient: bool,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            radius: 10,
            use_gradient: true,
        }
    }
}

/// A detected circle center.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleCandidate {
    pub x: usize,
    pub y: usize,
    pub radius: usize,
    /// 3×3 vote sum at the center.
    pub score: u32,
}

/// Count circles of `radius` in `src`, leaving raw votes in `hough`.
pub fn detect_circles<S: Sample>(
    src: &PixelBuffer<'_, S>,
    radius: usize,
    use_gradient: bool,
    hough: &mut HoughAccumulator<'_>,
) -> Result<usize> {
    find_circles(src, radius, use_gradient, hough).map(|circles| circles.len())
}

/// Like [`detect_circles`] but returns the centers, strongest first.
pub fn find_circles<S: Sample>(
    src: &PixelBuffer<'_, S>,
    radius: usize,
    use_gradient: bool,
    hough: &mut HoughAccumulator<'_>,
) -> Result<Vec<CircleCandidate>> {
    if radius == 0 {
        return Err(AnalysisError::invalid("radius", "must be positive"));
    }
    src.validate()?;
    hough.validate()?;
    ensure_same_size("hough accumulator", src.dims(), hough.dims())?;

    // no pixel pair inside the grid is further apart than w + h
    if radius > hough.w + hough.h {
        hough.clear();
        debug!(
            "hough r={} exceeds {}x{} grid, no circles",
            radius, hough.w, hough.h
        );
        return Ok(Vec::new());
    }

    let t0 = Instant::now();
    let points = vote::edge_points(src);
    let edges_ms = t0.elapsed().as_secs_f64() * 1000.0;

    let t1 = Instant::now();
    hough.clear();
    let cast = if use_gradient {
        vote::vote_along_gradient(&points, radius, hough)
    } else {
        vote::vote_full_circle(&points, radius, hough)
    };
    let vote_ms = t1.elapsed().as_secs_f64() * 1000.0;

    let t2 = Instant::now();
    let scores = peaks::neighborhood_scores(hough);
    let best = scores.iter().copied().max().unwrap_or(0);
    let floor = (VOTES_PER_RADIUS * radius as f32).ceil() as u32;
    let relative = (RELATIVE_PEAK_FRACTION * best as f32).ceil() as u32;
    let min_score = floor.max(relative).max(1);
    let suppression = (radius / 2).max(1);
    let mut circles: Vec<CircleCandidate> =
        peaks::local_maxima(&scores, hough.w, hough.h, min_score, suppression)
            .into_iter()
            .map(|(x, y, score)| CircleCandidate {
                x,
                y,
                radius,
                score,
            })
            .collect();
    // stable: equal scores keep row-major order
    circles.sort_by(|a, b| b.score.cmp(&a.score));
    let peaks_ms = t2.elapsed().as_secs_f64() * 1000.0;

    debug!(
        "hough r={} gradient={} edge_px={} votes={} best={} min_score={} circles={} \
         edges={:.3}ms vote={:.3}ms peaks={:.3}ms",
        radius,
        use_gradient,
        points.len(),
        cast,
        best,
        min_score,
        circles.len(),
        edges_ms,
        vote_ms,
        peaks_ms
    );
    Ok(circles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_radius_is_invalid() {
        let src = [0u8; 16];
        let mut cells = [0u32; 16];
        let src = PixelBuffer::new(4, 4, 1, &src).unwrap();
        let mut acc = HoughAccumulator::new(4, 4, &mut cells).unwrap();
        let err = detect_circles(&src, 0, true, &mut acc).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn accumulator_size_must_match() {
        let src = [0u8; 16];
        let mut cells = [0u32; 12];
        let src = PixelBuffer::new(4, 4, 1, &src).unwrap();
        let mut acc = HoughAccumulator::new(4, 3, &mut cells).unwrap();
        let err = detect_circles(&src, 2, false, &mut acc).unwrap_err();
        assert!(err.is_dimension_mismatch());
    }

    fn disk(w: usize, h: usize, r: usize) -> Vec<u8> {
        let (cx, cy) = ((w / 2) as i64, (h / 2) as i64);
        let mut img = vec![20u8; w * h];
        for y in 0..h {
            for x in 0..w {
                let (dx, dy) = (x as i64 - cx, y as i64 - cy);
                if dx * dx + dy * dy <= (r * r) as i64 {
                    img[y * w + x] = 230;
                }
            }
        }
        img
    }

    #[test]
    fn oversized_radius_finds_nothing_in_either_mode() {
        let img = disk(40, 40, 8);
        let src = PixelBuffer::new(40, 40, 1, &img).unwrap();
        let mut cells = vec![9u32; 40 * 40];
        let mut acc = HoughAccumulator::new(40, 40, &mut cells).unwrap();
        for radius in [81, 1usize << 40, usize::MAX] {
            for use_gradient in [true, false] {
                assert_eq!(
                    detect_circles(&src, radius, use_gradient, &mut acc).unwrap(),
                    0,
                    "radius={radius} gradient={use_gradient}"
                );
                assert_eq!(acc.total_votes(), 0);
            }
        }
    }

    #[test]
    fn flat_image_clears_stale_votes_and_finds_nothing() {
        let src = [40u8; 64];
        let mut cells = [5u32; 64];
        let src = PixelBuffer::new(8, 8, 1, &src).unwrap();
        let mut acc = HoughAccumulator::new(8, 8, &mut cells).unwrap();
        assert_eq!(detect_circles(&src, 3, true, &mut acc).unwrap(), 0);
        assert_eq!(acc.total_votes(), 0);
    }
}
