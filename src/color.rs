//! RGB ↔ HSV conversion, per pixel and over whole buffers.
//!
//! Buffer encoding of HSV: channel 0 holds `hue_degrees / 360`, channels 1
//! and 2 hold saturation and value, each scaled to the sample's full range.
//! Achromatic pixels (max == min) map to hue 0 and saturation 0.
//!
//! An 8-bit HSV buffer quantizes hue to 256 steps, which can move a
//! saturated color by up to ~3 levels on the way back. A `u16` or `f32` HSV
//! buffer reproduces 8-bit RGB within one level.
use crate::error::Result;
use crate::image::buffer::{ensure_channels, ensure_same_size};
use crate::image::{ImageView, PixelBuffer, PixelBufferMut, Sample};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Channel semantics of a buffer; buffers carry no tag of their own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorModel {
    #[default]
    Rgb,
    Hsv,
}

/// Hue in degrees [0, 360), saturation and value in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

/// Convert one unit-range RGB triple.
pub fn rgb_to_hsv_pixel(rgb: [f32; 3]) -> Hsv {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    if delta <= 0.0 {
        return Hsv { h: 0.0, s: 0.0, v: max };
    }

    let sector = if max == r {
        (g - b) / delta
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    let mut h = (60.0 * sector).rem_euclid(360.0);
    if h >= 360.0 {
        h = 0.0;
    }
    Hsv {
        h,
        s: delta / max,
        v: max,
    }
}

/// Inverse of [`rgb_to_hsv_pixel`]; hue is taken modulo 360.
pub fn hsv_to_rgb_pixel(hsv: Hsv) -> [f32; 3] {
    let v = hsv.v;
    let c = v * hsv.s;
    let h = hsv.h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h.floor() as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [r + m, g + m, b + m]
}

#[inline]
pub(crate) fn read_rgb<S: Sample>(px: &[S]) -> [f32; 3] {
    [px[0].to_unit(), px[1].to_unit(), px[2].to_unit()]
}

/// Decode an HSV-encoded pixel (see module docs).
#[inline]
pub(crate) fn read_hsv<S: Sample>(px: &[S]) -> Hsv {
    Hsv {
        h: px[0].to_unit() * 360.0,
        s: px[1].to_unit(),
        v: px[2].to_unit(),
    }
}

#[inline]
fn encode_hsv(hsv: Hsv) -> [f32; 3] {
    [hsv.h / 360.0, hsv.s, hsv.v]
}

/// Convert an RGB buffer into an HSV buffer of the same size.
pub fn rgb_to_hsv<S: Sample, D: Sample>(
    src: &PixelBuffer<'_, S>,
    dst: &mut PixelBufferMut<'_, D>,
) -> Result<()> {
    check_pair(src, dst)?;
    let start = Instant::now();
    map_pixels(src, dst, |px| encode_hsv(rgb_to_hsv_pixel(read_rgb(px))));
    debug!(
        "rgb_to_hsv {}x{} in {:.3} ms",
        src.w,
        src.h,
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

/// Convert an HSV buffer back into RGB.
pub fn hsv_to_rgb<S: Sample, D: Sample>(
    src: &PixelBuffer<'_, S>,
    dst: &mut PixelBufferMut<'_, D>,
) -> Result<()> {
    check_pair(src, dst)?;
    let start = Instant::now();
    map_pixels(src, dst, |px| hsv_to_rgb_pixel(read_hsv(px)));
    debug!(
        "hsv_to_rgb {}x{} in {:.3} ms",
        src.w,
        src.h,
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

fn check_pair<S: Sample, D: Sample>(
    src: &PixelBuffer<'_, S>,
    dst: &PixelBufferMut<'_, D>,
) -> Result<()> {
    src.validate()?;
    dst.validate()?;
    ensure_channels("color source channels", src.dims(), 3)?;
    ensure_channels("color destination channels", dst.dims(), 3)?;
    ensure_same_size("color destination", src.dims(), dst.dims())
}

/// Apply a unit-range 3-channel transform to every pixel of `src`.
fn map_pixels<S, D, F>(src: &PixelBuffer<'_, S>, dst: &mut PixelBufferMut<'_, D>, f: F)
where
    S: Sample,
    D: Sample,
    F: Fn(&[S]) -> [f32; 3] + Sync + Send,
{
    dst.for_each_row_mut(|y, out| {
        let row = src.row(y);
        for (px_in, px_out) in row.chunks_exact(3).zip(out.chunks_exact_mut(3)) {
            let v = f(px_in);
            px_out[0] = D::from_unit(v[0]);
            px_out[1] = D::from_unit(v[1]);
            px_out[2] = D::from_unit(v[2]);
        }
    });
}
