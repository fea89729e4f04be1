//! Frequency counts over hue and over single channels.
//!
//! Hue binning: with `N` bins, a pixel of hue `h` degrees lands in
//! `floor(h * N / 360)`, clamped to `N - 1`. Achromatic pixels have hue 0
//! and therefore land in bin 0.
use crate::color::{read_rgb, rgb_to_hsv_pixel};
use crate::error::{AnalysisError, Result};
use crate::image::buffer::{ensure_min_channels, ensure_same_size};
use crate::image::{ImageView, PixelBuffer, Sample};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// One bin per degree.
pub const DEFAULT_HUE_BINS: usize = 360;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramParams {
    pub bins: usize,
}

impl Default for HistogramParams {
    fn default() -> Self {
        Self {
            bins: DEFAULT_HUE_BINS,
        }
    }
}

/// Owned bucket counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Histogram {
    pub bins: Vec<u64>,
}

impl Histogram {
    pub fn new(num_bins: usize) -> Self {
        Self {
            bins: vec![0; num_bins],
        }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.bins.iter().sum()
    }

    /// Fullest bin as `(index, count)`; the lowest index wins ties.
    pub fn peak(&self) -> Option<(usize, u64)> {
        let mut best: Option<(usize, u64)> = None;
        for (i, &count) in self.bins.iter().enumerate() {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((i, count));
            }
        }
        best
    }

    /// Bin frequencies summing to 1, or all zeros for an empty count.
    pub fn normalized(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return vec![0.0; self.bins.len()];
        }
        self.bins
            .iter()
            .map(|&c| c as f64 / total as f64)
            .collect()
    }

    /// Sum of absolute differences of the normalized histograms, in [0, 2].
    /// `None` when the bin counts differ.
    pub fn l1_distance(&self, other: &Histogram) -> Option<f64> {
        if self.bins.len() != other.bins.len() {
            return None;
        }
        Some(
            self.normalized()
                .iter()
                .zip(other.normalized())
                .map(|(a, b)| (a - b).abs())
                .sum(),
        )
    }
}

#[inline]
fn unit_bin(value: f32, n: usize) -> usize {
    ((value.max(0.0) * n as f32) as usize).min(n - 1)
}

/// Count hues of the RGB source (first three channels) into `out`.
///
/// `out` is zeroed first; afterwards its sum equals the pixel count.
pub fn hue_histogram<S: Sample>(src: &PixelBuffer<'_, S>, out: &mut [u64]) -> Result<()> {
    if out.is_empty() {
        return Err(AnalysisError::invalid("bins", "histogram needs at least one bin"));
    }
    src.validate()?;
    ensure_min_channels("hue histogram source channels", src.dims(), 3)?;

    let start = Instant::now();
    out.fill(0);
    let n = out.len();
    for row in src.rows() {
        for px in row.chunks_exact(src.channels) {
            let hue = rgb_to_hsv_pixel(read_rgb(px)).h;
            out[unit_bin(hue / 360.0, n)] += 1;
        }
    }
    debug!(
        "hue_histogram {}x{} bins={} in {:.3} ms",
        src.w,
        src.h,
        n,
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

/// Owned-result form of [`hue_histogram`].
pub fn hue_histogram_bins<S: Sample>(src: &PixelBuffer<'_, S>, bins: usize) -> Result<Histogram> {
    let mut hist = Histogram::new(bins);
    hue_histogram(src, &mut hist.bins)?;
    Ok(hist)
}

/// Count normalized values of one channel into `out` (zeroed first).
pub fn channel_histogram<S: Sample>(
    src: &PixelBuffer<'_, S>,
    channel: usize,
    out: &mut [u64],
) -> Result<()> {
    if out.is_empty() {
        return Err(AnalysisError::invalid("bins", "histogram needs at least one bin"));
    }
    src.validate()?;
    if channel >= src.channels {
        return Err(AnalysisError::invalid(
            "channel",
            format!("{} out of range for {} channels", channel, src.channels),
        ));
    }

    out.fill(0);
    let n = out.len();
    for row in src.rows() {
        for px in row.chunks_exact(src.channels) {
            out[unit_bin(px[channel].to_unit(), n)] += 1;
        }
    }
    Ok(())
}

/// Hue histograms of an image and its quantized counterpart, side by side.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramComparison {
    pub original: Histogram,
    pub quantized: Histogram,
    pub l1_distance: f64,
}

impl HistogramComparison {
    pub fn between<S: Sample, T: Sample>(
        original: &PixelBuffer<'_, S>,
        quantized: &PixelBuffer<'_, T>,
        bins: usize,
    ) -> Result<Self> {
        ensure_same_size("quantized image", original.dims(), quantized.dims())?;
        let original = hue_histogram_bins(original, bins)?;
        let quantized = hue_histogram_bins(quantized, bins)?;
        let l1_distance = original.l1_distance(&quantized).unwrap_or(0.0);
        debug!(
            "histogram comparison bins={} l1={:.4} peaks={:?}/{:?}",
            bins,
            l1_distance,
            original.peak(),
            quantized.peak()
        );
        Ok(Self {
            original,
            quantized,
            l1_distance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(pixels: &[[u8; 3]]) -> Vec<u8> {
        pixels.iter().flatten().copied().collect()
    }

    #[test]
    fn primaries_fill_expected_bins() {
        let data = rgb(&[[255, 0, 0], [0, 255, 0], [0, 0, 255], [90, 90, 90]]);
        let src = PixelBuffer::new(2, 2, 3, &data).unwrap();
        let hist = hue_histogram_bins(&src, 6).unwrap();
        assert_eq!(hist.bins, vec![2, 0, 1, 0, 1, 0]);
        assert_eq!(hist.total(), 4);
        assert_eq!(hist.peak(), Some((0, 2)));
    }

    #[test]
    fn stale_counts_are_cleared() {
        let data = rgb(&[[10, 10, 10]]);
        let src = PixelBuffer::new(1, 1, 3, &data).unwrap();
        let mut out = [7u64; 4];
        hue_histogram(&src, &mut out).unwrap();
        assert_eq!(out, [1, 0, 0, 0]);
    }

    #[test]
    fn empty_output_is_invalid() {
        let data = rgb(&[[1, 2, 3]]);
        let src = PixelBuffer::new(1, 1, 3, &data).unwrap();
        assert!(hue_histogram(&src, &mut []).unwrap_err().is_invalid_parameter());
        assert!(channel_histogram(&src, 0, &mut [])
            .unwrap_err()
            .is_invalid_parameter());
        assert!(channel_histogram(&src, 3, &mut [0; 4])
            .unwrap_err()
            .is_invalid_parameter());
    }

    #[test]
    fn channel_counts_cover_full_range() {
        let data = [0u8, 63, 64, 128, 255, 255];
        let src = PixelBuffer::new(6, 1, 1, &data).unwrap();
        let mut out = [0u64; 4];
        channel_histogram(&src, 0, &mut out).unwrap();
        assert_eq!(out, [2, 1, 1, 2]);
    }

    #[test]
    fn l1_distance_spans_zero_to_two() {
        let a = Histogram { bins: vec![3, 0] };
        let b = Histogram { bins: vec![0, 5] };
        assert_eq!(a.l1_distance(&a), Some(0.0));
        assert_eq!(a.l1_distance(&b), Some(2.0));
        assert_eq!(a.l1_distance(&Histogram::new(3)), None);
        assert_eq!(Histogram::new(2).normalized(), vec![0.0, 0.0]);
    }
}
