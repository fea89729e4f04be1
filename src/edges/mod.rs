//! Edge processing: image gradients, non‑maximum suppression, hysteresis and
//! the Canny detector built from them.
//!
//! - Gradient computation (Sobel/Scharr) returning `gx`, `gy` and magnitude.
//! - Direction‑aligned non‑maximum suppression producing a thinned
//!   magnitude image.
//! - Double‑threshold hysteresis with 8‑connectivity.
//!
//! Borders are clamped (replicate) for the gradient pass and excluded from
//! suppression, so the outermost pixel frame is never an edge. The circle
//! detector reuses the gradient and suppression stages.

pub mod canny;
pub mod grad;
pub mod hysteresis;
pub mod nms;

pub use canny::{canny_edges, canny_edges_with, CannyParams, CannyReport};
pub use grad::{image_gradients, sobel_gradients, Grad, GradientKernel};
pub use hysteresis::{hysteresis, HysteresisMask};
pub use nms::suppress_non_maxima;
