//! Canny edge detector writing a binary map into a caller buffer.
use crate::edges::grad::{image_gradients, GradientKernel};
use crate::edges::hysteresis::hysteresis;
use crate::edges::nms::suppress_non_maxima;
use crate::error::{AnalysisError, Result};
use crate::image::buffer::ensure_same_size;
use crate::image::{ImageF32, ImageView, PixelBuffer, PixelBufferMut, Sample};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Thresholds are gradient magnitudes on the 0..255 intensity scale
/// (a full-contrast vertical step gives 1020 with Sobel).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyParams {
    pub min_threshold: u32,
    pub max_threshold: u32,
    pub kernel: GradientKernel,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            min_threshold: 50,
            max_threshold: 150,
            kernel: GradientKernel::Sobel,
        }
    }
}

impl CannyParams {
    pub fn validate(&self) -> Result<()> {
        if self.min_threshold >= self.max_threshold {
            return Err(AnalysisError::invalid(
                "min_threshold",
                format!(
                    "must be below max_threshold ({} >= {})",
                    self.min_threshold, self.max_threshold
                ),
            ));
        }
        Ok(())
    }
}

/// Counts and stage timings of one detector run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CannyReport {
    pub edge_pixels: usize,
    pub strong_pixels: usize,
    pub gradient_ms: f64,
    pub nms_ms: f64,
    pub hysteresis_ms: f64,
}

/// Detect edges of `src` into `dst` (full-scale = edge, zero = background).
///
/// `dst` must match `src` in width and height; every channel of an edge
/// pixel is set.
pub fn canny_edges<S: Sample, D: Sample>(
    src: &PixelBuffer<'_, S>,
    dst: &mut PixelBufferMut<'_, D>,
    min_threshold: u32,
    max_threshold: u32,
) -> Result<()> {
    let params = CannyParams {
        min_threshold,
        max_threshold,
        ..CannyParams::default()
    };
    canny_edges_with(src, dst, &params).map(|_| ())
}

/// [`canny_edges`] with an explicit gradient kernel, returning run details.
pub fn canny_edges_with<S: Sample, D: Sample>(
    src: &PixelBuffer<'_, S>,
    dst: &mut PixelBufferMut<'_, D>,
    params: &CannyParams,
) -> Result<CannyReport> {
    params.validate()?;
    src.validate()?;
    dst.validate()?;
    ensure_same_size("edge map destination", src.dims(), dst.dims())?;

    let gradient_start = Instant::now();
    let intensity = ImageF32::intensity(src);
    let grad = image_gradients(&intensity, params.kernel);
    let gradient_ms = gradient_start.elapsed().as_secs_f64() * 1000.0;

    let nms_start = Instant::now();
    let thin = suppress_non_maxima(&grad);
    let nms_ms = nms_start.elapsed().as_secs_f64() * 1000.0;

    let hysteresis_start = Instant::now();
    let mask = hysteresis(
        &thin,
        params.min_threshold as f32,
        params.max_threshold as f32,
    );
    let hysteresis_ms = hysteresis_start.elapsed().as_secs_f64() * 1000.0;

    let channels = dst.channels;
    let w = dst.w;
    for (y, row) in dst.rows_mut().enumerate() {
        let flags = &mask.edges[y * w..(y + 1) * w];
        for (px, &edge) in row.chunks_exact_mut(channels).zip(flags) {
            px.fill(if edge { D::FULL_SCALE } else { D::default() });
        }
    }

    let report = CannyReport {
        edge_pixels: mask.count(),
        strong_pixels: mask.strong,
        gradient_ms,
        nms_ms,
        hysteresis_ms,
    };
    debug!(
        "canny {}x{} thresholds=[{}, {}) edges={} strong={} grad={:.3}ms nms={:.3}ms hyst={:.3}ms",
        src.w,
        src.h,
        params.min_threshold,
        params.max_threshold,
        report.edge_pixels,
        report.strong_pixels,
        report.gradient_ms,
        report.nms_ms,
        report.hysteresis_ms
    );
    Ok(report)
}
