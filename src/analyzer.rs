//! Configured entry point running one analysis at a time.
use crate::config::AnalysisConfig;
use crate::edges::{canny_edges_with, CannyReport};
use crate::error::Result;
use crate::histogram::{hue_histogram_bins, Histogram, HistogramComparison};
use crate::hough::{find_circles, CircleCandidate};
use crate::image::{HoughAccumulator, PixelBuffer, PixelBufferMut, Sample};
use crate::quantize::{quantize_with, Palette};

/// Holds an [`AnalysisConfig`] and applies it to caller buffers.
#[derive(Clone, Debug, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AnalysisConfig {
        &mut self.config
    }

    /// Canny edge map of `src` with the configured thresholds and kernel.
    pub fn edges<S: Sample, D: Sample>(
        &self,
        src: &PixelBuffer<'_, S>,
        dst: &mut PixelBufferMut<'_, D>,
    ) -> Result<CannyReport> {
        canny_edges_with(src, dst, &self.config.canny)
    }

    /// Circles of the configured radius, strongest first.
    pub fn circles<S: Sample>(
        &self,
        src: &PixelBuffer<'_, S>,
        hough: &mut HoughAccumulator<'_>,
    ) -> Result<Vec<CircleCandidate>> {
        let params = &self.config.hough;
        find_circles(src, params.radius, params.use_gradient, hough)
    }

    pub fn quantize<S: Sample, D: Sample>(
        &self,
        src: &PixelBuffer<'_, S>,
        dst: &mut PixelBufferMut<'_, D>,
    ) -> Result<Palette> {
        quantize_with(src, dst, &self.config.kmeans)
    }

    pub fn hue_histogram<S: Sample>(&self, src: &PixelBuffer<'_, S>) -> Result<Histogram> {
        hue_histogram_bins(src, self.config.histogram.bins)
    }

    /// Hue histograms of `original` and `quantized` plus their L1 distance.
    pub fn compare_histograms<S: Sample, T: Sample>(
        &self,
        original: &PixelBuffer<'_, S>,
        quantized: &PixelBuffer<'_, T>,
    ) -> Result<HistogramComparison> {
        HistogramComparison::between(original, quantized, self.config.histogram.bins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_bins_are_used() {
        let mut analyzer = Analyzer::default();
        analyzer.config_mut().histogram.bins = 12;
        let data = [255u8, 0, 0, 0, 255, 0];
        let src = PixelBuffer::new(2, 1, 3, &data).unwrap();
        let hist = analyzer.hue_histogram(&src).unwrap();
        assert_eq!(hist.len(), 12);
        assert_eq!(hist.bins[0], 1);
        assert_eq!(hist.bins[4], 1);
    }

    #[test]
    fn invalid_configuration_surfaces_on_use() {
        let mut analyzer = Analyzer::default();
        analyzer.config_mut().kmeans.k = 0;
        let data = [0u8; 12];
        let mut out = [0u8; 12];
        let src = PixelBuffer::new(2, 2, 3, &data).unwrap();
        let mut dst = PixelBufferMut::new(2, 2, 3, &mut out).unwrap();
        assert!(analyzer
            .quantize(&src, &mut dst)
            .unwrap_err()
            .is_invalid_parameter());
    }
}
