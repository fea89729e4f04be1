//! Peak extraction over a raw vote grid.
//!
//! Votes for one circle scatter over a few neighboring cells because of
//! rounding, so peaks are ranked by the 3×3 neighborhood sum of the raw
//! votes. The raw grid itself is never modified.
use crate::image::{HoughAccumulator, ImageView};

/// Neighborhood (3×3, clipped at the border) vote sums, row-major.
pub(crate) fn neighborhood_scores(acc: &HoughAccumulator<'_>) -> Vec<u32> {
    let (w, h) = (acc.w, acc.h);
    let mut scores = vec![0u32; w * h];
    for y in 0..h {
        let y0 = y.saturating_sub(1);
        let y1 = (y + 1).min(h - 1);
        for x in 0..w {
            let x0 = x.saturating_sub(1);
            let x1 = (x + 1).min(w - 1);
            let mut sum = 0u32;
            for yy in y0..=y1 {
                let row = acc.row(yy);
                for &v in &row[x0..=x1] {
                    sum = sum.saturating_add(v);
                }
            }
            scores[y * w + x] = sum;
        }
    }
    scores
}

/// Cells scoring at least `min_score` that are the strict local maximum
/// within `suppression_radius`; equal neighbors defer to the lower row-major
/// index. Returned as `(x, y, score)` in row-major order.
pub(crate) fn local_maxima(
    scores: &[u32],
    w: usize,
    h: usize,
    min_score: u32,
    suppression_radius: usize,
) -> Vec<(usize, usize, u32)> {
    let r = suppression_radius as i64;
    let r_sq = r * r;
    let mut peaks = Vec::new();
    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            let val = scores[idx];
            if val == 0 || val < min_score {
                continue;
            }
            let mut is_max = true;
            'outer: for dy in -r..=r {
                for dx in -r..=r {
                    if (dx == 0 && dy == 0) || dx * dx + dy * dy > r_sq {
                        continue;
                    }
                    let nx = x as i64 + dx;
                    let ny = y as i64 + dy;
                    if nx < 0 || ny < 0 || nx as usize >= w || ny as usize >= h {
                        continue;
                    }
                    let nidx = ny as usize * w + nx as usize;
                    if scores[nidx] > val || (scores[nidx] == val && nidx < idx) {
                        is_max = false;
                        break 'outer;
                    }
                }
            }
            if is_max {
                peaks.push((x, y, val));
            }
        }
    }
    peaks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_sum_the_neighborhood() {
        let mut cells = vec![0u32; 5 * 5];
        cells[2 * 5 + 2] = 4;
        cells[2 * 5 + 3] = 1;
        let acc = HoughAccumulator::new(5, 5, &mut cells).unwrap();
        let scores = neighborhood_scores(&acc);
        assert_eq!(scores[2 * 5 + 2], 5);
        assert_eq!(scores[2 * 5 + 4], 1);
        assert_eq!(scores[0], 0);
    }

    #[test]
    fn plateau_yields_a_single_peak() {
        let scores = vec![0, 7, 7, 0, 0, 0, 0, 0, 0];
        let peaks = local_maxima(&scores, 3, 3, 1, 1);
        assert_eq!(peaks, vec![(1, 0, 7)]);
    }

    #[test]
    fn distant_peaks_are_both_kept() {
        let mut scores = vec![0u32; 10];
        scores[1] = 5;
        scores[8] = 6;
        let peaks = local_maxima(&scores, 10, 1, 1, 2);
        assert_eq!(peaks, vec![(1, 0, 5), (8, 0, 6)]);
        assert!(local_maxima(&scores, 10, 1, 6, 2).len() == 1);
    }
}
