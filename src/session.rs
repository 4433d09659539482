//! Entry point tying capture, selection and crop together.

use std::time::Instant;

use crate::capture::{CaptureSource, XcapSource};
use crate::config::SnipConfig;
use crate::error::Result;
use crate::raster::CroppedImage;
use crate::selection::{MinifbOverlay, OverlaySurface, run_selection};

/// The application's own window, hidden while the screen is grabbed.
pub trait CallerWindow {
    fn hide(&mut self);
    fn restore(&mut self);
}

/// For callers with nothing on screen (the standalone tool).
#[derive(Debug, Default)]
pub struct NoWindow;

impl CallerWindow for NoWindow {
    fn hide(&mut self) {}
    fn restore(&mut self) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    Captured(CroppedImage),
    Cancelled,
}

/// Everything one capture needs, passed in by the caller.
pub struct CaptureSession<S, O> {
    config: SnipConfig,
    source: S,
    surface: O,
}

impl CaptureSession<XcapSource, MinifbOverlay> {
    /// Real display capture with a full-screen minifb overlay.
    pub fn native(config: SnipConfig) -> Self {
        Self::new(config, XcapSource, MinifbOverlay::new())
    }
}

impl<S: CaptureSource, O: OverlaySurface> CaptureSession<S, O> {
    pub fn new(config: SnipConfig, source: S, surface: O) -> Self {
        Self { config, source, surface }
    }

    pub fn config(&self) -> &SnipConfig {
        &self.config
    }

    pub fn surface(&self) -> &O {
        &self.surface
    }

    /// Hides `caller`, waits for the desktop to redraw, grabs the screen and
    /// lets the user drag out a region. `caller` is restored on every path.
    pub fn begin_interactive_capture(
        &mut self,
        caller: &mut dyn CallerWindow,
    ) -> Result<CaptureOutcome> {
        let start = Instant::now();
        caller.hide();
        std::thread::sleep(self.config.settle_delay());

        let result = self.capture_and_select();
        caller.restore();

        match &result {
            Ok(CaptureOutcome::Captured(img)) => log::info!(
                "Capture session finished with {}x{} in {}ms",
                img.width(),
                img.height(),
                start.elapsed().as_millis()
            ),
            Ok(CaptureOutcome::Cancelled) => log::info!("Capture session cancelled"),
            Err(e) => log::error!("Capture session failed: {}", e),
        }
        result
    }

    fn capture_and_select(&mut self) -> Result<CaptureOutcome> {
        let screenshot = self.source.capture_full_display()?;
        let outcome = match run_selection(&screenshot, &mut self.surface, &self.config)? {
            Some(cropped) => CaptureOutcome::Captured(cropped),
            None => CaptureOutcome::Cancelled,
        };
        Ok(outcome)
    }
}
