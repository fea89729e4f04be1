//! Sample depths a buffer may carry.
//!
//! Every routine reads samples through their normalized value in [0, 1] and
//! writes through `from_unit`, so one implementation covers 8-bit, 16-bit and
//! float rasters.

/// A single channel value of a raster.
pub trait Sample: Copy + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Full-scale value ("on" in binary maps).
    const FULL_SCALE: Self;

    /// Map the sample to [0, 1].
    fn to_unit(self) -> f32;

    /// Map a unit value back to the sample range, clamping and rounding.
    fn from_unit(v: f32) -> Self;
}

impl Sample for u8 {
    const FULL_SCALE: Self = u8::MAX;

    #[inline]
    fn to_unit(self) -> f32 {
        self as f32 / 255.0
    }

    #[inline]
    fn from_unit(v: f32) -> Self {
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl Sample for u16 {
    const FULL_SCALE: Self = u16::MAX;

    #[inline]
    fn to_unit(self) -> f32 {
        self as f32 / 65535.0
    }

    #[inline]
    fn from_unit(v: f32) -> Self {
        (v.clamp(0.0, 1.0) * 65535.0).round() as u16
    }
}

impl Sample for f32 {
    const FULL_SCALE: Self = 1.0;

    #[inline]
    fn to_unit(self) -> f32 {
        self
    }

    #[inline]
    fn from_unit(v: f32) -> Self {
        v.clamp(0.0, 1.0)
    }
}
