//! Decoding of incoming images into straight-alpha RGBA

use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

/// Decode an encoded image (PNG, JPEG, ...) held in memory
pub fn decode_bytes(bytes: &[u8]) -> anyhow::Result<RgbaImage> {
    let rgba = image::load_from_memory(bytes)
        .context("decoding image data")?
        .into_rgba8();
    log::debug!(
        "Image decoded: {}x{} pixels from {} bytes",
        rgba.width(),
        rgba.height(),
        bytes.len()
    );
    Ok(rgba)
}

/// Read and decode an image file
pub fn load_path(path: &Path) -> anyhow::Result<RgbaImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading image {}", path.display()))?;
    decode_bytes(&bytes).with_context(|| format!("loading image {}", path.display()))
}
