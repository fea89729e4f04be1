//! Owned single-channel f32 scratch image in row-major layout.
//!
//! Intermediate stages (intensity, gradients, suppressed magnitude) live here
//! so they never touch caller memory. Intensity is kept on the 0..255 scale
//! regardless of the source sample depth, which puts gradient magnitudes in
//! the same units as the integer Canny thresholds.
use super::buffer::PixelBuffer;
use super::sample::Sample;
use super::traits::{ImageView, ImageViewMut};

/// Rec. 601 luma weights applied to the first three channels.
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

#[derive(Clone, Debug)]
pub struct ImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Backing storage, `w * h` values in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    /// Intensity of `src` on the 0..255 scale.
    ///
    /// Single- and two-channel sources use channel 0; sources with three or
    /// more channels use the luma of the first three (alpha is ignored).
    pub fn intensity<S: Sample>(src: &PixelBuffer<'_, S>) -> Self {
        let mut out = Self::new(src.w, src.h);
        if src.w == 0 {
            return out;
        }
        let c = src.channels;
        for (y, dst) in out.data.chunks_mut(src.w).enumerate() {
            let row = src.row(y);
            for (x, v) in dst.iter_mut().enumerate() {
                let px = &row[x * c..x * c + c];
                *v = 255.0 * luminance_unit(px);
            }
        }
        out
    }

    /// Convert (x, y) to a linear index into `data`.
    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    /// Value at (x, y).
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }

    /// Overwrite the value at (x, y).
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Largest value, or 0 for an empty or all-negative image.
    pub fn max_value(&self) -> f32 {
        self.data.iter().copied().fold(0.0f32, f32::max)
    }
}

/// Unit-range luminance of one interleaved pixel.
#[inline]
pub fn luminance_unit<S: Sample>(px: &[S]) -> f32 {
    if px.len() >= 3 {
        LUMA_WEIGHTS[0] * px[0].to_unit()
            + LUMA_WEIGHTS[1] * px[1].to_unit()
            + LUMA_WEIGHTS[2] * px[2].to_unit()
    } else {
        px[0].to_unit()
    }
}

impl ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.w
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[f32]> {
        Some(&self.data)
    }
}

impl ImageViewMut for ImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.w;
        &mut self.data[start..start + self.w]
    }
}
