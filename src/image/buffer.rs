//! Borrowed views over caller-owned interleaved rasters.
//!
//! `stride` counts samples between the starts of consecutive rows and may
//! include padding; `row_bytes()` converts it to bytes for the sample type.
//! The engine never keeps a view past the call it was handed to.
use super::sample::Sample;
use super::traits::{ImageView, ImageViewMut};
use crate::error::{AnalysisError, Dims, Result};

/// Read-only view of a `w × h` raster with `channels` interleaved samples.
#[derive(Clone, Copy, Debug)]
pub struct PixelBuffer<'a, S: Sample = u8> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // samples between rows
    pub channels: usize,
    pub data: &'a [S],
}

/// Mutable view used for destinations.
#[derive(Debug)]
pub struct PixelBufferMut<'a, S: Sample = u8> {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub channels: usize,
    pub data: &'a mut [S],
}

pub(crate) fn check_layout(
    what: &'static str,
    w: usize,
    h: usize,
    stride: usize,
    channels: usize,
    len: usize,
) -> Result<()> {
    let declared = Dims {
        width: w,
        height: h,
        channels,
    };
    let row_len = w.checked_mul(channels);
    let needed = stride.checked_mul(h);
    match (row_len, needed) {
        (Some(row_len), Some(needed)) if channels > 0 && stride >= row_len && len >= needed => {
            Ok(())
        }
        _ => {
            let per_row = channels.max(1);
            let found = Dims {
                width: stride / per_row,
                height: if stride == 0 { 0 } else { len / stride },
                channels,
            };
            Err(AnalysisError::mismatch(what, declared, found))
        }
    }
}

/// Reject `found` unless it has the same width and height as `expected`.
pub(crate) fn ensure_same_size(what: &'static str, expected: Dims, found: Dims) -> Result<()> {
    if expected.width == found.width && expected.height == found.height {
        Ok(())
    } else {
        Err(AnalysisError::mismatch(what, expected, found))
    }
}

/// Reject `found` unless width, height and channel count all match.
pub(crate) fn ensure_same_layout(what: &'static str, expected: Dims, found: Dims) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(AnalysisError::mismatch(what, expected, found))
    }
}

/// Reject a buffer whose channel count is not exactly `channels`.
pub(crate) fn ensure_channels(what: &'static str, dims: Dims, channels: usize) -> Result<()> {
    if dims.channels == channels {
        Ok(())
    } else {
        Err(AnalysisError::mismatch(
            what,
            Dims { channels, ..dims },
            dims,
        ))
    }
}

/// Reject a buffer with fewer than `min` channels.
pub(crate) fn ensure_min_channels(what: &'static str, dims: Dims, min: usize) -> Result<()> {
    if dims.channels >= min {
        Ok(())
    } else {
        Err(AnalysisError::mismatch(
            what,
            Dims {
                channels: min,
                ..dims
            },
            dims,
        ))
    }
}

impl<'a, S: Sample> PixelBuffer<'a, S> {
    /// Tightly packed view (`stride == w * channels`).
    pub fn new(w: usize, h: usize, channels: usize, data: &'a [S]) -> Result<Self> {
        Self::with_stride(w, h, w.saturating_mul(channels), channels, data)
    }

    /// View with explicit row stride (in samples).
    pub fn with_stride(
        w: usize,
        h: usize,
        stride: usize,
        channels: usize,
        data: &'a [S],
    ) -> Result<Self> {
        check_layout("buffer storage", w, h, stride, channels, data.len())?;
        Ok(Self {
            w,
            h,
            stride,
            channels,
            data,
        })
    }

    /// Re-check the layout invariant; views built from public fields skip it.
    pub fn validate(&self) -> Result<()> {
        check_layout(
            "source storage",
            self.w,
            self.h,
            self.stride,
            self.channels,
            self.data.len(),
        )
    }

    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.stride * std::mem::size_of::<S>()
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &'a [S] {
        let start = y * self.stride + x * self.channels;
        &self.data[start..start + self.channels]
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, c: usize) -> S {
        self.data[y * self.stride + x * self.channels + c]
    }

    pub fn pixel_count(&self) -> usize {
        self.w * self.h
    }
}

impl<'a, S: Sample> ImageView for PixelBuffer<'a, S> {
    type Pixel = S;

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
    fn channels(&self) -> usize {
        self.channels
    }
    #[inline]
    fn row(&self, y: usize) -> &[S] {
        let start = y * self.stride;
        &self.data[start..start + self.w * self.channels]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[S]> {
        self.is_contiguous()
            .then(|| &self.data[..self.w * self.h * self.channels])
    }
}

impl<'a, S: Sample> PixelBufferMut<'a, S> {
    pub fn new(w: usize, h: usize, channels: usize, data: &'a mut [S]) -> Result<Self> {
        Self::with_stride(w, h, w.saturating_mul(channels), channels, data)
    }

    pub fn with_stride(
        w: usize,
        h: usize,
        stride: usize,
        channels: usize,
        data: &'a mut [S],
    ) -> Result<Self> {
        check_layout("buffer storage", w, h, stride, channels, data.len())?;
        Ok(Self {
            w,
            h,
            stride,
            channels,
            data,
        })
    }

    pub fn validate(&self) -> Result<()> {
        check_layout(
            "destination storage",
            self.w,
            self.h,
            self.stride,
            self.channels,
            self.data.len(),
        )
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> PixelBuffer<'_, S> {
        PixelBuffer {
            w: self.w,
            h: self.h,
            stride: self.stride,
            channels: self.channels,
            data: &*self.data,
        }
    }

    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.stride * std::mem::size_of::<S>()
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [S] {
        let start = y * self.stride + x * self.channels;
        &mut self.data[start..start + self.channels]
    }

    /// Iterate rows top to bottom, each trimmed to `w * channels` samples.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [S]> + '_ {
        let row_len = self.w * self.channels;
        let stride = self.stride.max(1);
        self.data[..self.stride * self.h]
            .chunks_mut(stride)
            .map(move |row| &mut row[..row_len])
    }

    /// Run `f(y, row)` on every row; rows go to the rayon pool when the
    /// `parallel` feature is on.
    #[cfg(feature = "parallel")]
    pub fn for_each_row_mut<F>(&mut self, f: F)
    where
        F: Fn(usize, &mut [S]) + Sync + Send,
    {
        use rayon::prelude::*;

        let row_len = self.w * self.channels;
        let stride = self.stride.max(1);
        self.data[..self.stride * self.h]
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| f(y, &mut row[..row_len]));
    }

    #[cfg(not(feature = "parallel"))]
    pub fn for_each_row_mut<F>(&mut self, f: F)
    where
        F: Fn(usize, &mut [S]) + Sync + Send,
    {
        for (y, row) in self.rows_mut().enumerate() {
            f(y, row);
        }
    }

    pub fn fill(&mut self, value: S) {
        for row in self.rows_mut() {
            row.fill(value);
        }
    }
}

impl<'a, S: Sample> ImageView for PixelBufferMut<'a, S> {
    type Pixel = S;

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
    fn channels(&self) -> usize {
        self.channels
    }
    #[inline]
    fn row(&self, y: usize) -> &[S] {
        let start = y * self.stride;
        &self.data[start..start + self.w * self.channels]
    }
}

impl<'a, S: Sample> ImageViewMut for PixelBufferMut<'a, S> {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [S] {
        let start = y * self.stride;
        let end = start + self.w * self.channels;
        &mut self.data[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_rows_skip_padding() {
        // 2x2 RGB with 2 samples of padding per row.
        let data: Vec<u8> = vec![
            1, 2, 3, 4, 5, 6, 0, 0, //
            7, 8, 9, 10, 11, 12, 0, 0,
        ];
        let view = PixelBuffer::with_stride(2, 2, 8, 3, &data).unwrap();
        assert_eq!(view.row(1), &[7, 8, 9, 10, 11, 12]);
        assert_eq!(view.pixel(1, 0), &[4, 5, 6]);
        assert_eq!(view.row_bytes(), 8);
        assert!(view.as_slice().is_none());
    }

    #[test]
    fn short_storage_is_rejected() {
        let data = vec![0u8; 11];
        let err = PixelBuffer::new(2, 2, 3, &data).unwrap_err();
        assert!(err.is_dimension_mismatch());

        let err = PixelBuffer::with_stride(4, 1, 3, 1, &data).unwrap_err();
        assert!(err.is_dimension_mismatch());
    }

    #[test]
    fn rows_mut_leaves_padding_untouched() {
        let mut data = vec![9u16; 2 * 5];
        let mut view = PixelBufferMut::with_stride(2, 2, 5, 2, &mut data).unwrap();
        view.fill(1);
        assert_eq!(data, vec![1, 1, 1, 1, 9, 1, 1, 1, 1, 9]);
    }
}
