//! Palette reduction by k-means clustering of pixel colors.
//!
//! Pipeline
//! - Features: the first three channels of every pixel, either as unit RGB
//!   or as `(hue / 360, saturation, value)` depending on [`ColorModel`].
//! - Clustering: deterministic seeds along the diagonal of the features'
//!   bounding box, then Lloyd iterations until no pixel changes cluster or
//!   `max_iterations` is reached.
//! - Output: each pixel is replaced by its centroid (converted back to RGB
//!   for the HSV model); channels past the third are copied through.
//!
//! Notes
//! - Seeding uses no randomness, so identical inputs give identical output.
//! - Clusters that lose every pixel keep their previous centroid and report
//!   a count of zero in the [`Palette`].
//! - At most one cluster per pixel is formed, so a `k` above the pixel count
//!   yields a palette with one entry per pixel.
mod kmeans;

use crate::color::{hsv_to_rgb_pixel, read_rgb, rgb_to_hsv_pixel, ColorModel, Hsv};
use crate::error::{AnalysisError, Result};
use crate::image::buffer::{ensure_min_channels, ensure_same_layout};
use crate::image::{ImageView, PixelBuffer, PixelBufferMut, Sample};
use kmeans::Feature;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Parameters for [`quantize_with`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeansParams {
    /// Number of palette entries (>= 1).
    pub k: usize,
    pub model: ColorModel,
    /// Upper bound on assign/update rounds (>= 1).
    pub max_iterations: usize,
}

impl Default for KMeansParams {
    fn default() -> Self {
        Self {
            k: 8,
            model: ColorModel::Rgb,
            max_iterations: 32,
        }
    }
}

impl KMeansParams {
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(AnalysisError::invalid("k", "must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(AnalysisError::invalid("max_iterations", "must be at least 1"));
        }
        Ok(())
    }
}

/// Final clustering of a [`quantize_with`] run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    /// Centroid colors as unit RGB, in cluster order; `min(k, pixels)`
    /// entries, and one for an empty image.
    pub colors: Vec<[f32; 3]>,
    /// Pixels assigned to each color.
    pub counts: Vec<usize>,
    pub iterations: usize,
    /// False when `max_iterations` stopped the run first.
    pub converged: bool,
}

impl Palette {
    /// Number of clusters that received at least one pixel.
    pub fn used_colors(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }
}

/// Reduce `src` to `k` colors in `dst`.
pub fn quantize<S: Sample, D: Sample>(
    src: &PixelBuffer<'_, S>,
    dst: &mut PixelBufferMut<'_, D>,
    k: usize,
    model: ColorModel,
) -> Result<()> {
    let params = KMeansParams {
        k,
        model,
        ..KMeansParams::default()
    };
    quantize_with(src, dst, &params).map(|_| ())
}

/// [`quantize`] with an explicit iteration cap, returning the palette.
pub fn quantize_with<S: Sample, D: Sample>(
    src: &PixelBuffer<'_, S>,
    dst: &mut PixelBufferMut<'_, D>,
    params: &KMeansParams,
) -> Result<Palette> {
    params.validate()?;
    src.validate()?;
    dst.validate()?;
    ensure_min_channels("quantize source channels", src.dims(), 3)?;
    ensure_same_layout("quantize destination", src.dims(), dst.dims())?;

    let t0 = Instant::now();
    let features = collect_features(src, params.model);
    let clustering = kmeans::run(&features, params.k, params.max_iterations);
    let cluster_ms = t0.elapsed().as_secs_f64() * 1000.0;

    let colors: Vec<[f32; 3]> = clustering
        .centroids
        .iter()
        .map(|c| centroid_rgb(c, params.model))
        .collect();

    let t1 = Instant::now();
    let channels = src.channels;
    let w = src.w;
    let assignments = &clustering.assignments;
    let palette = &colors;
    dst.for_each_row_mut(|y, out| {
        let row = src.row(y);
        let labels = &assignments[y * w..(y + 1) * w];
        for ((px_in, px_out), &label) in row
            .chunks_exact(channels)
            .zip(out.chunks_exact_mut(channels))
            .zip(labels)
        {
            let rgb = palette[label];
            px_out[0] = D::from_unit(rgb[0]);
            px_out[1] = D::from_unit(rgb[1]);
            px_out[2] = D::from_unit(rgb[2]);
            for (o, i) in px_out[3..].iter_mut().zip(&px_in[3..]) {
                *o = D::from_unit(i.to_unit());
            }
        }
    });
    let write_ms = t1.elapsed().as_secs_f64() * 1000.0;

    let palette = Palette {
        colors,
        counts: clustering.counts,
        iterations: clustering.iterations,
        converged: clustering.converged,
    };
    debug!(
        "quantize {}x{} k={} model={:?} iterations={} converged={} used={} cluster={:.3}ms write={:.3}ms",
        src.w,
        src.h,
        params.k,
        params.model,
        palette.iterations,
        palette.converged,
        palette.used_colors(),
        cluster_ms,
        write_ms
    );
    Ok(palette)
}

fn collect_features<S: Sample>(src: &PixelBuffer<'_, S>, model: ColorModel) -> Vec<Feature> {
    let mut features = Vec::with_capacity(src.pixel_count());
    for row in src.rows() {
        for px in row.chunks_exact(src.channels) {
            let rgb = read_rgb(px);
            let f = match model {
                ColorModel::Rgb => rgb,
                ColorModel::Hsv => {
                    let hsv = rgb_to_hsv_pixel(rgb);
                    [hsv.h / 360.0, hsv.s, hsv.v]
                }
            };
            features.push(Feature::new(f[0] as f64, f[1] as f64, f[2] as f64));
        }
    }
    features
}

fn centroid_rgb(c: &Feature, model: ColorModel) -> [f32; 3] {
    match model {
        ColorModel::Rgb => [c.x as f32, c.y as f32, c.z as f32],
        ColorModel::Hsv => hsv_to_rgb_pixel(Hsv {
            h: c.x as f32 * 360.0,
            s: c.y as f32,
            v: c.z as f32,
        }),
    }
}
