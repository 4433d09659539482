//! Size-stamped RGBA pixel containers.
//!
//! Both wrappers hold an `image::RgbaImage` (row-major, 4 x u8 per pixel)
//! so the crop and export code never touches a platform bitmap type.

use image::RgbaImage;

use crate::error::{Result, SnipError};

/// Full-display snapshot. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedImage {
    pixels: RgbaImage,
}

impl CapturedImage {
    /// Builds from a raw RGBA buffer; the length must be `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, raw: Vec<u8>) -> Result<Self> {
        let pixels = rgba_from_raw(width, height, raw)?;
        Ok(Self { pixels })
    }

    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// RGBA sample at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Pixels of one committed region, handed to whoever consumes the capture.
#[derive(Debug, Clone, PartialEq)]
pub struct CroppedImage {
    pixels: RgbaImage,
}

impl CroppedImage {
    pub(crate) fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.pixels.into_raw()
    }
}

fn rgba_from_raw(width: u32, height: u32, raw: Vec<u8>) -> Result<RgbaImage> {
    let expected = width as usize * height as usize * 4;
    let got = raw.len();
    RgbaImage::from_raw(width, height, raw).ok_or_else(|| {
        SnipError::CaptureUnavailable(format!(
            "pixel buffer is {} bytes, expected {} for {}x{}",
            got, expected, width, height
        ))
    })
}
