use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::DentmapResult;

/// Decode encoded image bytes and convert to straight RGBA8.
///
/// Sources without an alpha channel come back fully opaque.
pub fn decode_rgba(bytes: &[u8]) -> DentmapResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Read and decode an image file into straight RGBA8.
pub fn load_rgba(path: &Path) -> DentmapResult<RgbaImage> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read image bytes from '{}'", path.display()))?;
    let img = decode_rgba(&bytes)
        .map_err(|e| anyhow::anyhow!("decode '{}': {e}", path.display()))?;
    Ok(img)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
