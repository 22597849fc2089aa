use image::RgbaImage;

use crate::{
    assets::color::Palette, foundation::core::Rgb8, render::composite::over,
    report::condition::Severity,
};

/// Opacity of the severity tint, out of 255 (about 30%).
pub const OVERLAY_ALPHA: u8 = 76;

/// Solid `color` layer shaped like `part`: each pixel's alpha is the part's alpha scaled by
/// [`OVERLAY_ALPHA`] / 255 (integer division).
pub fn overlay_layer(part: &RgbaImage, color: Rgb8) -> RgbaImage {
    RgbaImage::from_fn(part.width(), part.height(), |x, y| {
        let a = u16::from(part.get_pixel(x, y).0[3]) * u16::from(OVERLAY_ALPHA) / 255;
        image::Rgba(color.with_alpha(a as u8))
    })
}

/// Tint `part` with the palette color for `severity`.
///
/// Pure function of its inputs. Transparent pixels stay unchanged; a part without meaningful
/// transparency is tinted uniformly.
pub fn render_overlay(part: &RgbaImage, severity: Severity, palette: &Palette) -> RgbaImage {
    let layer = overlay_layer(part, palette.color_for(severity));
    let mut out = part.clone();
    for (d, s) in out.pixels_mut().zip(layer.pixels()) {
        d.0 = over(d.0, s.0);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
