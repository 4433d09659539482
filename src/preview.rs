//! Preview window for a finished capture.

use std::time::Duration;

use image::RgbaImage;
use image::imageops::{self, FilterType};
use minifb::{Key, Window, WindowOptions};

use crate::error::{Result, SnipError};
use crate::raster::CroppedImage;
use crate::selection::pack_frame;

pub const PREVIEW_MAX_WIDTH: u32 = 800;
pub const PREVIEW_MAX_HEIGHT: u32 = 600;

/// Largest size with the same aspect ratio that fits the box. Never upscales.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }
    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );
    let w = ((width as f64 * scale).round() as u32).clamp(1, max_width);
    let h = ((height as f64 * scale).round() as u32).clamp(1, max_height);
    (w, h)
}

/// The image as shown in the preview, scaled down to fit.
pub fn preview_frame(image: &CroppedImage) -> RgbaImage {
    let (w, h) = fit_within(
        image.width(),
        image.height(),
        PREVIEW_MAX_WIDTH,
        PREVIEW_MAX_HEIGHT,
    );
    if (w, h) == (image.width(), image.height()) {
        return image.as_rgba().clone();
    }
    imageops::resize(image.as_rgba(), w, h, FilterType::Triangle)
}

/// Shows the capture until the window is closed or Enter/Escape is pressed.
pub fn show_preview(image: &CroppedImage) -> Result<()> {
    let frame = preview_frame(image);
    let (w, h) = (frame.width() as usize, frame.height() as usize);
    let mut buffer = Vec::new();
    pack_frame(&frame, &mut buffer);

    let mut window = Window::new(
        "Screenshot Preview (Enter to continue)",
        w,
        h,
        WindowOptions::default(),
    )
    .map_err(|e| SnipError::Overlay(e.to_string()))?;
    window.set_target_fps(30);

    while window.is_open() && !window.is_key_down(Key::Enter) && !window.is_key_down(Key::Escape)
    {
        window
            .update_with_buffer(&buffer, w, h)
            .map_err(|e| SnipError::Overlay(e.to_string()))?;
        std::thread::sleep(Duration::from_millis(10));
    }
    Ok(())
}
