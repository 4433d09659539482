//! Interactive screen-region capture.
//!
//! One session grabs the display, shows it in a full-screen overlay, lets
//! the user drag a rectangle and returns the cropped pixels. Saving,
//! clipboard and note attachment happen on the returned [`CroppedImage`].

pub mod capture;
pub mod config;
pub mod crop;
pub mod error;
pub mod export;
pub mod preview;
pub mod raster;
pub mod selection;
pub mod selection_logic;
pub mod session;

pub use capture::{CaptureSource, XcapSource};
pub use config::SnipConfig;
pub use crop::crop;
pub use error::{Result, SnipError};
pub use export::ExportFormat;
pub use raster::{CapturedImage, CroppedImage};
pub use selection::{MinifbOverlay, OverlaySurface, render_spotlight, run_selection};
pub use selection_logic::{Point, Region, RegionSelector, SelectorEvent, SelectorState};
pub use session::{CallerWindow, CaptureOutcome, CaptureSession, NoWindow};
