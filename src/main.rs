#![windows_subsystem = "windows"]

use anyhow::Result;
use arboard::{Clipboard, ImageData};
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use snapnote::{CaptureOutcome, CaptureSession, CroppedImage, NoWindow, SnipConfig, SnipError};

// Clipboard helpers
fn copy_image_to_clipboard(image: &CroppedImage) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    let image_data = ImageData {
        width: image.width() as usize,
        height: image.height() as usize,
        bytes: image.as_rgba().as_raw().into(),
    };
    clipboard.set_image(image_data)?;
    Ok(())
}

fn show_error(message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title("Error")
        .set_description(message)
        .show();
}

fn show_info(message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title("Information")
        .set_description(message)
        .show();
}

enum Next {
    NewScreenshot,
    Close,
}

/// Save / new screenshot / close, repeated until the user leaves.
fn preview_and_save(image: &CroppedImage, config: &SnipConfig) -> Next {
    if let Err(e) = snapnote::preview::show_preview(image) {
        log::warn!("Preview window failed: {}", e);
    }
    loop {
        let choice = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title("Screenshot Preview")
            .set_description(&format!(
                "Captured {}x{} (copied to clipboard).\n\nYes: save to file\nNo: new screenshot\nCancel: close",
                image.width(),
                image.height()
            ))
            .set_buttons(MessageButtons::YesNoCancel)
            .show();

        match choice {
            MessageDialogResult::Yes => {
                let Some(path) = rfd::FileDialog::new()
                    .set_title("Save Screenshot")
                    .add_filter("PNG", &["png"])
                    .add_filter("JPEG", &["jpg", "jpeg"])
                    .add_filter("All files", &["*"])
                    .set_file_name(&config.default_file_name)
                    .save_file()
                else {
                    continue;
                };
                match image.save(&path, config.jpeg_quality) {
                    Ok(_) => show_info(&format!("Image saved successfully to: {}", path.display())),
                    Err(e) if e.is_retryable_export() => {
                        show_error(&format!("Error saving image: {}", e))
                    }
                    Err(e) => {
                        show_error(&format!("Error saving image: {}", e));
                        return Next::Close;
                    }
                }
            }
            MessageDialogResult::No => return Next::NewScreenshot,
            _ => return Next::Close,
        }
    }
}

fn load_config() -> SnipConfig {
    match SnipConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{}; using default settings", e);
            SnipConfig::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let mut session = CaptureSession::native(load_config());

    loop {
        match session.begin_interactive_capture(&mut NoWindow) {
            Ok(CaptureOutcome::Captured(image)) => {
                if let Err(e) = copy_image_to_clipboard(&image) {
                    log::warn!("Clipboard copy failed: {}", e);
                }
                match preview_and_save(&image, session.config()) {
                    Next::NewScreenshot => continue,
                    Next::Close => return Ok(()),
                }
            }
            Ok(CaptureOutcome::Cancelled) => return Ok(()),
            Err(e @ SnipError::CaptureUnavailable(_)) => {
                show_error(&format!("Error capturing screen: {}", e));
                return Err(e.into());
            }
            Err(e) => {
                show_error(&format!("Error capturing area: {}", e));
                return Err(e.into());
            }
        }
    }
}
