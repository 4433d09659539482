//! Error kinds surfaced by a capture session.

use std::path::PathBuf;

use crate::selection_logic::Region;

pub type Result<T> = std::result::Result<T, SnipError>;

#[derive(Debug, thiserror::Error)]
pub enum SnipError {
    /// The platform refused or could not provide a display snapshot.
    #[error("Screen capture unavailable: {0}")]
    CaptureUnavailable(String),

    /// A committed region failed the crop check while the overlay was open.
    #[error("Selected region {region} is not inside the {}x{} capture", image_size.0, image_size.1)]
    InvalidRegion {
        region: Region,
        image_size: (u32, u32),
    },

    #[error("Crop rectangle {region} exceeds image bounds ({}x{})", image_size.0, image_size.1)]
    OutOfBounds {
        region: Region,
        image_size: (u32, u32),
    },

    #[error("Image encoding failed: {0}")]
    Encoding(String),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Overlay window error: {0}")]
    Overlay(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SnipError {
    /// Export failures leave the cropped image usable, so the caller may retry.
    pub fn is_retryable_export(&self) -> bool {
        matches!(self, SnipError::Encoding(_) | SnipError::Io { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message_names_region_and_size() {
        let err = SnipError::OutOfBounds {
            region: Region::new(1900, 1000, 100, 100),
            image_size: (1920, 1080),
        };
        assert_eq!(
            err.to_string(),
            "Crop rectangle (1900,1000 100x100) exceeds image bounds (1920x1080)"
        );
    }

    #[test]
    fn only_export_errors_are_retryable() {
        assert!(SnipError::Encoding("bad".into()).is_retryable_export());
        assert!(
            SnipError::Io {
                path: PathBuf::from("/nope/a.png"),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }
            .is_retryable_export()
        );
        assert!(!SnipError::CaptureUnavailable("denied".into()).is_retryable_export());
    }
}
