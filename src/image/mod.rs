//! Raster views and scratch images.
//!
//! Callers own every buffer; the engine borrows sources as [`PixelBuffer`],
//! destinations as [`PixelBufferMut`] and vote grids as [`HoughAccumulator`].
//! [`ImageF32`] is the engine's own per-call scratch space.
pub mod accumulator;
pub mod buffer;
pub mod f32;
pub mod interop;
pub mod owned;
pub mod sample;
pub mod traits;

pub use self::accumulator::HoughAccumulator;
pub use self::buffer::{PixelBuffer, PixelBufferMut};
pub use self::f32::ImageF32;
pub use self::owned::PixelImage;
pub use self::sample::Sample;
pub use self::traits::{ImageView, ImageViewMut, Rows};
