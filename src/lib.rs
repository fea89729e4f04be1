#![doc = include_str!("../README.md")]

pub mod analyzer;
pub mod color;
pub mod config;
pub mod edges;
pub mod error;
pub mod histogram;
pub mod hough;
pub mod image;
pub mod quantize;
pub mod similarity;

// --- High-level re-exports -------------------------------------------------

pub use crate::analyzer::Analyzer;
pub use crate::color::{hsv_to_rgb, rgb_to_hsv, ColorModel};
pub use crate::config::{load_config, AnalysisConfig};
pub use crate::edges::canny_edges;
pub use crate::error::{AnalysisError, Dims, Result};
pub use crate::histogram::{hue_histogram, Histogram, HistogramComparison};
pub use crate::hough::{detect_circles, CircleCandidate};
pub use crate::quantize::{quantize, Palette};
pub use crate::similarity::ssd;

// --- Prelude ---------------------------------------------------------------

/// Buffer views plus every analysis entry point.
///
/// ```
/// use pixel_analysis::prelude::*;
///
/// # fn main() -> Result<(), AnalysisError> {
/// let (w, h) = (32usize, 24usize);
/// let gray = vec![0u8; w * h];
/// let img = PixelBuffer::new(w, h, 1, &gray)?;
///
/// let mut votes = vec![0u32; w * h];
/// let mut acc = HoughAccumulator::new(w, h, &mut votes)?;
/// let found = detect_circles(&img, 5, true, &mut acc)?;
/// println!("circles={found} ssd={}", ssd(&img, &img)?);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{
        HoughAccumulator, ImageView, PixelBuffer, PixelBufferMut, PixelImage, Sample,
    };
    pub use crate::{
        canny_edges, detect_circles, hsv_to_rgb, hue_histogram, quantize, rgb_to_hsv, ssd,
        AnalysisConfig, AnalysisError, Analyzer, ColorModel,
    };
}
