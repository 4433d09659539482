//! Encoding and saving a cropped capture.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageOutputFormat};

use crate::error::{Result, SnipError};
use crate::raster::CroppedImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    /// Picks the encoder from the file extension; anything unknown is PNG.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("jpg") | Some("jpeg") => ExportFormat::Jpeg,
            _ => ExportFormat::Png,
        }
    }
}

impl CroppedImage {
    /// Encodes into memory without touching the filesystem.
    pub fn encode(&self, format: ExportFormat, jpeg_quality: u8) -> Result<Vec<u8>> {
        let mut bytes: Vec<u8> = Vec::new();
        let mut cursor = Cursor::new(&mut bytes);
        let encoded = match format {
            ExportFormat::Png => DynamicImage::ImageRgba8(self.as_rgba().clone())
                .write_to(&mut cursor, ImageOutputFormat::Png),
            // JPEG has no alpha channel.
            ExportFormat::Jpeg => {
                let rgb = DynamicImage::ImageRgba8(self.as_rgba().clone()).to_rgb8();
                DynamicImage::ImageRgb8(rgb)
                    .write_to(&mut cursor, ImageOutputFormat::Jpeg(jpeg_quality))
            }
        };
        encoded.map_err(|e| SnipError::Encoding(e.to_string()))?;
        Ok(bytes)
    }

    /// PNG bytes for attaching the capture to a note.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        self.encode(ExportFormat::Png, 100)
    }

    /// Writes the image to `path`, format chosen by extension.
    ///
    /// Encoding finishes before the file is created, so an encoder failure
    /// leaves nothing on disk.
    pub fn save(&self, path: &Path, jpeg_quality: u8) -> Result<ExportFormat> {
        let format = ExportFormat::from_path(path);
        let bytes = self.encode(format, jpeg_quality)?;
        std::fs::write(path, &bytes).map_err(|source| SnipError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!(
            "Saved {}x{} {:?} to {} ({} bytes)",
            self.width(),
            self.height(),
            format,
            path.display(),
            bytes.len()
        );
        Ok(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn sample() -> CroppedImage {
        CroppedImage::from_rgba(RgbaImage::from_fn(30, 20, |x, y| {
            Rgba([x as u8 * 8, y as u8 * 12, 90, 255])
        }))
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("a.png")), ExportFormat::Png);
        assert_eq!(ExportFormat::from_path(Path::new("a.JPG")), ExportFormat::Jpeg);
        assert_eq!(ExportFormat::from_path(Path::new("a.jpeg")), ExportFormat::Jpeg);
        assert_eq!(ExportFormat::from_path(Path::new("a.bmp")), ExportFormat::Png);
        assert_eq!(ExportFormat::from_path(Path::new("screenshot")), ExportFormat::Png);
    }

    #[test]
    fn png_bytes_have_magic() {
        let bytes = sample().to_png_bytes().unwrap();
        assert_eq!(&bytes[..4], &[0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn save_png_reloads_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        let img = sample();
        assert_eq!(img.save(&path, 90).unwrap(), ExportFormat::Png);

        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(&back, img.as_rgba());
    }

    #[test]
    fn save_jpeg_writes_jfif() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.jpeg");
        assert_eq!(sample().save(&path, 80).unwrap(), ExportFormat::Jpeg);

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let back = image::open(&path).unwrap();
        assert_eq!((back.width(), back.height()), (30, 20));
    }

    #[test]
    fn missing_directory_is_io_error_and_image_stays_usable() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("no-such-dir").join("shot.png");
        let img = sample();

        let err = img.save(&bad, 90).unwrap_err();
        assert!(matches!(err, SnipError::Io { .. }));
        assert!(err.is_retryable_export());

        let good = dir.path().join("shot.png");
        assert!(img.save(&good, 90).is_ok());
    }
}
