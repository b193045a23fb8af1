//! Export of the committed image: PNG bytes, clipboard and file download
//!
//! Failures never touch the editor; they are reported through a [`Notifier`].

use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbaImage;

use crate::history::write_png;

pub const COPY_SUCCESS: &str = "Copied to clipboard!";
pub const COPY_FAILURE: &str = "Failed to copy. Try downloading instead.";
pub const DOWNLOAD_SUCCESS: &str = "Downloaded!";
pub const DOWNLOAD_FAILURE: &str = "Failed to save image.";

/// User-visible outcome of an export
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Failure(String),
}

impl Notification {
    pub fn message(&self) -> &str {
        match self {
            Notification::Success(message) | Notification::Failure(message) => message,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Notification::Failure(_))
    }
}

/// Shows export results to the user
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Notifier that writes results to the log
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification {
            Notification::Success(message) => log::info!("{}", message),
            Notification::Failure(message) => log::error!("{}", message),
        }
    }
}

impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Destination for clipboard copies, receives encoded PNG data
pub trait ClipboardSink {
    fn write_png(&mut self, png: &[u8]) -> anyhow::Result<()>;
}

/// Encode the image as PNG in memory
pub fn encode_png(image: &RgbaImage) -> anyhow::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_png(&mut buffer, image).context("encoding PNG")?;
    Ok(buffer)
}

/// Write the image as a PNG file
pub fn save_png(image: &RgbaImage, path: &Path) -> anyhow::Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_png(&mut file, image).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// File name used for downloads, `screenshot-<unix millis>.png`
pub fn download_name() -> String {
    format!("screenshot-{}.png", chrono::Utc::now().timestamp_millis())
}

/// Copy the image to the clipboard, notifying success or failure
pub fn copy_to_clipboard(
    image: &RgbaImage,
    sink: &mut dyn ClipboardSink,
    notifier: &mut dyn Notifier,
) -> bool {
    let result = encode_png(image).and_then(|png| sink.write_png(&png));
    match result {
        Ok(()) => {
            notifier.notify(Notification::Success(COPY_SUCCESS.to_string()));
            true
        }
        Err(err) => {
            log::error!("Clipboard copy failed: {:?}", err);
            notifier.notify(Notification::Failure(COPY_FAILURE.to_string()));
            false
        }
    }
}

/// Save the image into `dir` under a fresh download name
///
/// Returns the written path, or `None` after notifying the failure.
pub fn download(image: &RgbaImage, dir: &Path, notifier: &mut dyn Notifier) -> Option<PathBuf> {
    match download_inner(image, dir) {
        Ok(path) => {
            log::info!("Saved image to {}", path.display());
            notifier.notify(Notification::Success(DOWNLOAD_SUCCESS.to_string()));
            Some(path)
        }
        Err(err) => {
            log::error!("Download failed: {:?}", err);
            notifier.notify(Notification::Failure(DOWNLOAD_FAILURE.to_string()));
            None
        }
    }
}

fn download_inner(image: &RgbaImage, dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    // Write to a temporary file, then rename into place
    let mut file = tempfile::Builder::new()
        .prefix("screenshot-")
        .suffix(".png")
        .tempfile_in(dir)
        .context("creating temporary file")?;
    write_png(&mut file, image).context("writing PNG")?;

    let path = dir.join(download_name());
    file.persist(&path)
        .with_context(|| format!("renaming to {}", path.display()))?;
    Ok(path)
}
