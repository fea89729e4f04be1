//! Owned raster for callers that do not already manage their own storage.
use super::buffer::{PixelBuffer, PixelBufferMut};
use super::sample::Sample;

/// Tightly packed, caller-side owned buffer with borrowed view conversion.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelImage<S: Sample = u8> {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<S>,
}

impl<S: Sample> PixelImage<S> {
    /// Zero-filled image of the given layout.
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![S::default(); width * height * channels],
        }
    }

    /// Wrap existing samples; `None` if `data` has the wrong length.
    pub fn from_vec(width: usize, height: usize, channels: usize, data: Vec<S>) -> Option<Self> {
        (channels > 0 && data.len() == width * height * channels).then_some(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn samples(&self) -> &[S] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<S> {
        self.data
    }

    pub fn as_view(&self) -> PixelBuffer<'_, S> {
        PixelBuffer {
            w: self.width,
            h: self.height,
            stride: self.width * self.channels,
            channels: self.channels,
            data: &self.data,
        }
    }

    pub fn as_view_mut(&mut self) -> PixelBufferMut<'_, S> {
        PixelBufferMut {
            w: self.width,
            h: self.height,
            stride: self.width * self.channels,
            channels: self.channels,
            data: &mut self.data,
        }
    }
}
