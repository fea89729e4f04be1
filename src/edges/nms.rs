//! Non‑maximum suppression on gradient magnitude with direction alignment.
//!
//! For each interior pixel the gradient direction is quantized to one of four
//! axes (0°, 45°, 90°, 135°) and the magnitude is compared against the two
//! neighbors along that axis. Ties are broken asymmetrically: a pixel must be
//! strictly greater than its neighbor on the "before" side and at least equal
//! to the one on the "after" side, so a step edge whose two flanking pixels
//! share a magnitude keeps exactly one of them.
//!
//! The outermost 1‑pixel frame is always suppressed.
use crate::edges::grad::Grad;
use crate::image::{ImageF32, ImageView, ImageViewMut};

const TAN_22_5_DEG: f32 = 0.414_213_56;

/// Return the gradient magnitude thinned to one‑pixel ridges; suppressed
/// pixels (and the border) are zero.
pub fn suppress_non_maxima(grad: &Grad) -> ImageF32 {
    let w = grad.mag.w;
    let h = grad.mag.h;
    let mut out = ImageF32::new(w, h);
    if w < 3 || h < 3 {
        return out;
    }

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);
        let out_row = out.row_mut(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag <= 0.0 {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0) == (gy >= 0.0);

            // (before, after) along the quantized gradient axis
            let (before, after) = if abs_gy <= abs_gx * TAN_22_5_DEG {
                (mag_row[x - 1], mag_row[x + 1])
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x - 1], mag_next[x + 1])
            } else {
                (mag_prev[x + 1], mag_next[x - 1])
            };

            if mag > before && mag >= after {
                out_row[x] = mag;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::grad::sobel_gradients;

    #[test]
    fn step_edge_thins_to_single_column() {
        let mut img = ImageF32::new(10, 7);
        for y in 0..7 {
            for x in 5..10 {
                img.set(x, y, 200.0);
            }
        }
        let thin = suppress_non_maxima(&sobel_gradients(&img));
        for y in 1..6 {
            let kept: Vec<usize> = (0..10).filter(|&x| thin.get(x, y) > 0.0).collect();
            assert_eq!(kept, vec![4], "row {y}");
        }
        for x in 0..10 {
            assert_eq!(thin.get(x, 0), 0.0);
            assert_eq!(thin.get(x, 6), 0.0);
        }
    }

    #[test]
    fn diagonal_edge_survives() {
        let mut img = ImageF32::new(12, 12);
        for y in 0..12 {
            for x in 0..12 {
                if x + y >= 12 {
                    img.set(x, y, 255.0);
                }
            }
        }
        let thin = suppress_non_maxima(&sobel_gradients(&img));
        let kept = thin.data.iter().filter(|&&v| v > 0.0).count();
        assert!(kept >= 8, "expected a diagonal ridge, kept {kept}");
        assert!(kept <= 2 * 10, "ridge should be thin, kept {kept}");
    }
}
