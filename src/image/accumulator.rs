//! Caller-owned vote buffer for the circle Hough transform.
use super::buffer::check_layout;
use super::traits::{ImageView, ImageViewMut};
use crate::error::Result;

/// `w × h` grid of vote counts indexed by candidate center.
#[derive(Debug)]
pub struct HoughAccumulator<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // cells between rows
    pub data: &'a mut [u32],
}

impl<'a> HoughAccumulator<'a> {
    pub fn new(w: usize, h: usize, data: &'a mut [u32]) -> Result<Self> {
        Self::with_stride(w, h, w, data)
    }

    pub fn with_stride(w: usize, h: usize, stride: usize, data: &'a mut [u32]) -> Result<Self> {
        check_layout("accumulator storage", w, h, stride, 1, data.len())?;
        Ok(Self { w, h, stride, data })
    }

    pub fn validate(&self) -> Result<()> {
        check_layout(
            "accumulator storage",
            self.w,
            self.h,
            self.stride,
            1,
            self.data.len(),
        )
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.data[y * self.stride + x]
    }

    #[inline]
    pub fn vote(&mut self, x: usize, y: usize) {
        let idx = y * self.stride + x;
        self.data[idx] = self.data[idx].saturating_add(1);
    }

    /// Reset every cell (padding excluded) to zero.
    pub fn clear(&mut self) {
        for y in 0..self.h {
            self.row_mut(y).fill(0);
        }
    }

    /// Largest vote count, 0 for an empty accumulator.
    pub fn max_votes(&self) -> u32 {
        self.rows()
            .map(|row| row.iter().copied().max().unwrap_or(0))
            .max()
            .unwrap_or(0)
    }

    pub fn total_votes(&self) -> u64 {
        self.rows()
            .map(|row| row.iter().map(|&v| v as u64).sum::<u64>())
            .sum()
    }
}

impl<'a> ImageView for HoughAccumulator<'a> {
    type Pixel = u32;

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
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

impl<'a> ImageViewMut for HoughAccumulator<'a> {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u32] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}
