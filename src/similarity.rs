//! Sum-of-squared-differences scoring between two rasters.
use crate::error::Result;
use crate::image::buffer::ensure_same_layout;
use crate::image::{ImageView, PixelBuffer, Sample};
use log::debug;

#[inline]
fn row_ssd<S: Copy + Into<i64>>(a: &[S], b: &[S]) -> u64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = x.into() - y.into();
            (d * d) as u64
        })
        .sum()
}

#[cfg(feature = "parallel")]
fn sum_rows<S>(a: &PixelBuffer<'_, S>, b: &PixelBuffer<'_, S>) -> u64
where
    S: Sample + Into<i64>,
{
    use rayon::prelude::*;

    (0..a.h)
        .into_par_iter()
        .map(|y| row_ssd(a.row(y), b.row(y)))
        .sum()
}

#[cfg(not(feature = "parallel"))]
fn sum_rows<S>(a: &PixelBuffer<'_, S>, b: &PixelBuffer<'_, S>) -> u64
where
    S: Sample + Into<i64>,
{
    a.rows().zip(b.rows()).map(|(ra, rb)| row_ssd(ra, rb)).sum()
}

/// Sum over every sample of `(a - b)^2` on the raw integer values.
///
/// Both buffers must agree in width, height and channel count; strides may
/// differ.
pub fn ssd<S: Sample + Into<i64>>(a: &PixelBuffer<'_, S>, b: &PixelBuffer<'_, S>) -> Result<u64> {
    a.validate()?;
    b.validate()?;
    ensure_same_layout("ssd operand", a.dims(), b.dims())?;
    let score = sum_rows(a, b);
    debug!("ssd {}x{}x{} = {}", a.w, a.h, a.channels, score);
    Ok(score)
}

/// [`ssd`] divided by the number of samples; 0 for empty images.
pub fn mean_squared_error<S: Sample + Into<i64>>(
    a: &PixelBuffer<'_, S>,
    b: &PixelBuffer<'_, S>,
) -> Result<f64> {
    let total = ssd(a, b)?;
    let samples = a.w * a.h * a.channels;
    Ok(if samples == 0 {
        0.0
    } else {
        total as f64 / samples as f64
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_buffers_score_zero() {
        let data: Vec<u8> = (0..48).collect();
        let a = PixelBuffer::new(4, 4, 3, &data).unwrap();
        assert_eq!(ssd(&a, &a).unwrap(), 0);
    }

    #[test]
    fn known_difference_and_symmetry() {
        let a = [0u8, 10, 255, 3];
        let b = [255u8, 10, 0, 0];
        let va = PixelBuffer::new(2, 2, 1, &a).unwrap();
        let vb = PixelBuffer::new(2, 2, 1, &b).unwrap();
        let expected = 2 * 255u64 * 255 + 9;
        assert_eq!(ssd(&va, &vb).unwrap(), expected);
        assert_eq!(ssd(&vb, &va).unwrap(), expected);
        assert_eq!(mean_squared_error(&va, &vb).unwrap(), expected as f64 / 4.0);
    }

    #[test]
    fn padding_is_ignored() {
        let tight = [1u16, 2, 3, 4];
        let padded = [1u16, 2, 999, 3, 4, 999];
        let a = PixelBuffer::new(2, 2, 1, &tight).unwrap();
        let b = PixelBuffer::with_stride(2, 2, 3, 1, &padded).unwrap();
        assert_eq!(ssd(&a, &b).unwrap(), 0);
    }

    #[test]
    fn channel_mismatch_is_rejected() {
        let a = [0u8; 12];
        let va = PixelBuffer::new(2, 2, 3, &a).unwrap();
        let vb = PixelBuffer::new(3, 2, 2, &a).unwrap();
        assert!(ssd(&va, &vb).unwrap_err().is_dimension_mismatch());
    }
}
