//! Edge extraction and vote casting for a fixed radius.
use crate::edges::grad::sobel_gradients;
use crate::edges::nms::suppress_non_maxima;
use crate::image::{HoughAccumulator, ImageF32, PixelBuffer, Sample};

/// Fraction of the strongest suppressed magnitude an edge pixel must reach.
pub const EDGE_MAGNITUDE_FRACTION: f32 = 0.25;

/// An edge pixel with its unit gradient direction.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EdgePoint {
    pub x: usize,
    pub y: usize,
    pub dir: [f32; 2],
}

/// Re-derive edge pixels of `src` (Sobel + non-maximum suppression + a
/// relative magnitude gate), in row-major order.
pub(crate) fn edge_points<S: Sample>(src: &PixelBuffer<'_, S>) -> Vec<EdgePoint> {
    let intensity = ImageF32::intensity(src);
    let grad = sobel_gradients(&intensity);
    let thin = suppress_non_maxima(&grad);
    let max_mag = thin.max_value();
    if max_mag <= 0.0 {
        return Vec::new();
    }
    let threshold = EDGE_MAGNITUDE_FRACTION * max_mag;

    let mut points = Vec::new();
    for y in 0..thin.h {
        for x in 0..thin.w {
            if thin.get(x, y) < threshold {
                continue;
            }
            if let Some(dir) = grad.direction(x, y) {
                points.push(EdgePoint { x, y, dir });
            }
        }
    }
    points
}

#[inline]
fn offset_in_bounds(
    x: usize,
    y: usize,
    dx: i64,
    dy: i64,
    w: usize,
    h: usize,
) -> Option<(usize, usize)> {
    let nx = usize::try_from((x as i64).checked_add(dx)?).ok()?;
    let ny = usize::try_from((y as i64).checked_add(dy)?).ok()?;
    (nx < w && ny < h).then_some((nx, ny))
}

/// Two votes per edge pixel, `radius` away along ± its gradient.
pub(crate) fn vote_along_gradient(
    points: &[EdgePoint],
    radius: usize,
    acc: &mut HoughAccumulator<'_>,
) -> u64 {
    let r = radius as f32;
    let mut cast = 0u64;
    for p in points {
        for sign in [1.0f32, -1.0] {
            let dx = (sign * r * p.dir[0]).round() as i64;
            let dy = (sign * r * p.dir[1]).round() as i64;
            if let Some((cx, cy)) = offset_in_bounds(p.x, p.y, dx, dy, acc.w, acc.h) {
                acc.vote(cx, cy);
                cast += 1;
            }
        }
    }
    cast
}

/// Distinct integer offsets on a circle of `radius`, in a fixed order.
pub(crate) fn circle_offsets(radius: usize) -> Vec<(i64, i64)> {
    let r = radius as f64;
    let steps = ((4.0 * std::f64::consts::PI * r).ceil() as usize).max(8);
    let mut offsets: Vec<(i64, i64)> = (0..steps)
        .map(|i| {
            let theta = 2.0 * std::f64::consts::PI * i as f64 / steps as f64;
            ((r * theta.cos()).round() as i64, (r * theta.sin()).round() as i64)
        })
        .collect();
    offsets.sort_unstable();
    offsets.dedup();
    offsets
}

/// Every edge pixel votes for all centers `radius` away from it.
pub(crate) fn vote_full_circle(
    points: &[EdgePoint],
    radius: usize,
    acc: &mut HoughAccumulator<'_>,
) -> u64 {
    let offsets = circle_offsets(radius);
    let mut cast = 0u64;
    for p in points {
        for &(dx, dy) in &offsets {
            if let Some((cx, cy)) = offset_in_bounds(p.x, p.y, dx, dy, acc.w, acc.h) {
                acc.vote(cx, cy);
                cast += 1;
            }
        }
    }
    cast
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_offsets_are_unique_and_on_radius() {
        let offsets = circle_offsets(5);
        let mut sorted = offsets.clone();
        sorted.dedup();
        assert_eq!(sorted.len(), offsets.len());
        for (dx, dy) in offsets {
            let d = ((dx * dx + dy * dy) as f64).sqrt();
            assert!((d - 5.0).abs() <= 0.75, "({dx}, {dy}) at {d}");
        }
    }

    #[test]
    fn gradient_votes_land_on_both_sides() {
        let mut cells = vec![0u32; 20 * 20];
        let mut acc = HoughAccumulator::new(20, 20, &mut cells).unwrap();
        let points = [EdgePoint {
            x: 10,
            y: 10,
            dir: [1.0, 0.0],
        }];
        let cast = vote_along_gradient(&points, 4, &mut acc);
        assert_eq!(cast, 2);
        assert_eq!(acc.get(14, 10), 1);
        assert_eq!(acc.get(6, 10), 1);
    }

    #[test]
    fn extreme_offsets_are_dropped_without_overflow() {
        assert_eq!(offset_in_bounds(3, 4, i64::MAX, 0, 10, 10), None);
        assert_eq!(offset_in_bounds(3, 4, 0, i64::MIN, 10, 10), None);
        assert_eq!(offset_in_bounds(3, 4, -3, 5, 10, 10), Some((0, 9)));
        assert_eq!(offset_in_bounds(3, 4, -4, 0, 10, 10), None);
    }

    #[test]
    fn out_of_bounds_votes_are_dropped() {
        let mut cells = vec![0u32; 8 * 8];
        let mut acc = HoughAccumulator::new(8, 8, &mut cells).unwrap();
        let points = [EdgePoint {
            x: 1,
            y: 1,
            dir: [0.0, 1.0],
        }];
        assert_eq!(vote_along_gradient(&points, 3, &mut acc), 1);
        assert_eq!(acc.get(1, 4), 1);
    }
}
