//! Region cropping. No I/O, no platform types.

use image::imageops;

use crate::error::{Result, SnipError};
use crate::raster::{CapturedImage, CroppedImage};
use crate::selection_logic::Region;

/// Copies exactly `region`'s pixels out of `image`.
///
/// Fails with [`SnipError::OutOfBounds`] when any part of the region lies
/// outside the image; the region is never clamped.
pub fn crop(image: &CapturedImage, region: Region) -> Result<CroppedImage> {
    let (img_width, img_height) = image.dimensions();
    if !region.fits_within(img_width, img_height) {
        return Err(SnipError::OutOfBounds {
            region,
            image_size: (img_width, img_height),
        });
    }

    let cropped = imageops::crop_imm(
        image.as_rgba(),
        region.x,
        region.y,
        region.width,
        region.height,
    )
    .to_image();
    Ok(CroppedImage::from_rgba(cropped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn gradient(w: u32, h: u32) -> CapturedImage {
        CapturedImage::from_rgba(RgbaImage::from_fn(w, h, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
        }))
    }

    #[test]
    fn crop_copies_addressed_pixels() {
        let img = gradient(64, 48);
        let r = Region::new(5, 7, 20, 11);
        let out = crop(&img, r).unwrap();
        assert_eq!((out.width(), out.height()), (20, 11));
        for j in 0..r.height {
            for i in 0..r.width {
                assert_eq!(out.pixel(i, j), img.pixel(r.x + i, r.y + j));
            }
        }
    }

    #[test]
    fn full_image_crop_is_identity() {
        let img = gradient(16, 9);
        let out = crop(&img, Region::new(0, 0, 16, 9)).unwrap();
        assert_eq!(out.as_rgba(), img.as_rgba());
    }

    #[test]
    fn crop_out_of_bounds_fails() {
        let img = gradient(1920, 1080);
        let result = crop(&img, Region::new(1900, 1000, 100, 100));
        assert!(matches!(
            result,
            Err(SnipError::OutOfBounds { image_size: (1920, 1080), .. })
        ));
    }

    #[test]
    fn crop_one_past_edge_fails() {
        let img = gradient(100, 100);
        assert!(crop(&img, Region::new(0, 0, 101, 10)).is_err());
        assert!(crop(&img, Region::new(0, 91, 10, 10)).is_err());
        assert!(crop(&img, Region::new(90, 90, 10, 10)).is_ok());
    }
}
