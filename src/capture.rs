//! Full-display snapshot source.

use std::time::Instant;

use xcap::Monitor;

use crate::error::{Result, SnipError};
use crate::raster::CapturedImage;

/// Produces one still image of the whole display per call.
///
/// The caller hides its own windows and waits for the window system to
/// settle before calling; the source only reads pixels.
pub trait CaptureSource {
    fn capture_full_display(&mut self) -> Result<CapturedImage>;
}

/// Captures the first monitor reported by the OS through `xcap`.
#[derive(Debug, Default)]
pub struct XcapSource;

impl CaptureSource for XcapSource {
    fn capture_full_display(&mut self) -> Result<CapturedImage> {
        let start = Instant::now();

        let mons = Monitor::all().map_err(|e| SnipError::CaptureUnavailable(e.to_string()))?;
        let mon = mons
            .first()
            .ok_or_else(|| SnipError::CaptureUnavailable("no display found".to_string()))?;
        let img = mon
            .capture_image()
            .map_err(|e| SnipError::CaptureUnavailable(e.to_string()))?;

        // xcap links its own `image` version; go through the raw buffer.
        let (w, h) = (img.width(), img.height());
        let captured = CapturedImage::from_raw(w, h, img.into_raw())?;

        log::info!(
            "Screen captured ({}x{}) in {}ms",
            w,
            h,
            start.elapsed().as_millis()
        );
        Ok(captured)
    }
}
