//! Zero-copy views over `image::ImageBuffer` values.
//!
//! Collaborators that decode with the `image` crate can hand its buffers to
//! the engine directly; `ImageBuffer` storage is always tightly packed.
use super::buffer::{PixelBuffer, PixelBufferMut};
use super::sample::Sample;
use image::{ImageBuffer, Pixel};

impl<'a, P> From<&'a ImageBuffer<P, Vec<P::Subpixel>>> for PixelBuffer<'a, P::Subpixel>
where
    P: Pixel,
    P::Subpixel: Sample,
{
    fn from(img: &'a ImageBuffer<P, Vec<P::Subpixel>>) -> Self {
        let (w, h) = img.dimensions();
        let channels = P::CHANNEL_COUNT as usize;
        PixelBuffer {
            w: w as usize,
            h: h as usize,
            stride: w as usize * channels,
            channels,
            data: img.as_raw().as_slice(),
        }
    }
}

impl<'a, P> From<&'a mut ImageBuffer<P, Vec<P::Subpixel>>> for PixelBufferMut<'a, P::Subpixel>
where
    P: Pixel,
    P::Subpixel: Sample,
{
    fn from(img: &'a mut ImageBuffer<P, Vec<P::Subpixel>>) -> Self {
        let (w, h) = img.dimensions();
        let channels = P::CHANNEL_COUNT as usize;
        let data: &'a mut [P::Subpixel] = img;
        PixelBufferMut {
            w: w as usize,
            h: h as usize,
            stride: w as usize * channels,
            channels,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn rgb_image_borrows_as_three_channel_view() {
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(2, 1, Rgb([10, 20, 30]));
        let view = PixelBuffer::from(&img);
        assert_eq!((view.w, view.h, view.channels, view.stride), (3, 2, 3, 9));
        assert_eq!(view.pixel(2, 1), &[10, 20, 30]);
        assert!(view.validate().is_ok());
    }

    #[test]
    fn gray_image_writes_through_mut_view() {
        let mut img = GrayImage::new(2, 2);
        {
            let mut view = PixelBufferMut::from(&mut img);
            view.pixel_mut(1, 0)[0] = 200;
        }
        assert_eq!(img.get_pixel(1, 0), &Luma([200]));
    }
}
