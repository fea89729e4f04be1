//! Double-threshold hysteresis over a thinned magnitude image.
//!
//! Pixels at or above `high` seed the edge set; pixels in `[low, high)` join
//! only when 8-connected, transitively, to a seed. Zero-magnitude pixels
//! (suppressed or border) never join, whatever `low` is.
use crate::image::ImageF32;

/// Edge mask (row-major, `w * h`) plus how many pixels seeded it.
pub struct HysteresisMask {
    pub edges: Vec<bool>,
    pub strong: usize,
}

impl HysteresisMask {
    pub fn count(&self) -> usize {
        self.edges.iter().filter(|&&e| e).count()
    }
}

pub fn hysteresis(thin: &ImageF32, low: f32, high: f32) -> HysteresisMask {
    let w = thin.w;
    let h = thin.h;
    let mut edges = vec![false; w * h];
    let mut stack: Vec<usize> = Vec::new();

    for (idx, &m) in thin.data.iter().enumerate() {
        if m > 0.0 && m >= high {
            edges[idx] = true;
            stack.push(idx);
        }
    }
    let strong = stack.len();

    while let Some(idx) = stack.pop() {
        let x = idx % w;
        let y = idx / w;
        let x0 = x.saturating_sub(1);
        let x1 = (x + 1).min(w - 1);
        let y0 = y.saturating_sub(1);
        let y1 = (y + 1).min(h - 1);
        for ny in y0..=y1 {
            for nx in x0..=x1 {
                let nidx = ny * w + nx;
                if edges[nidx] {
                    continue;
                }
                let m = thin.data[nidx];
                if m > 0.0 && m >= low {
                    edges[nidx] = true;
                    stack.push(nidx);
                }
            }
        }
    }

    HysteresisMask { edges, strong }
}
