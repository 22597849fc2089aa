use image::RgbaImage;

/// Straight (non-premultiplied) RGBA8 pixel.
pub type StraightRgba8 = [u8; 4];

/// Source-over of two straight-alpha pixels.
///
/// Transparent `src` leaves `dst` untouched and opaque `src` replaces it.
pub fn over(dst: StraightRgba8, src: StraightRgba8) -> StraightRgba8 {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    // Both weights are scaled by 255 * 255.
    let dst_w = u32::from(dst[3]) * (255 - sa);
    let src_w = sa * 255;
    let out_a = src_w + dst_w;

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = u32::from(src[i]) * src_w + u32::from(dst[i]) * dst_w;
        out[i] = ((c + out_a / 2) / out_a) as u8;
    }
    out[3] = ((out_a + 127) / 255) as u8;
    out
}

/// Blend `src` into `dst` with coverage `mask`, channel by channel (alpha included).
pub fn masked_blend(dst: StraightRgba8, src: StraightRgba8, mask: u8) -> StraightRgba8 {
    match mask {
        0 => dst,
        255 => src,
        m => {
            let m = u16::from(m);
            let inv = 255 - m;
            let mut out = [0u8; 4];
            for i in 0..4 {
                out[i] = add_sat_u8(
                    mul_div255(u16::from(src[i]), m),
                    mul_div255(u16::from(dst[i]), inv),
                );
            }
            out
        }
    }
}

/// Paste `layer` onto `canvas` with top-left corners aligned, using the layer's own alpha as
/// the paste mask. Pixels of `layer` outside the canvas are clipped.
pub fn paste_with_alpha_mask(canvas: &mut RgbaImage, layer: &RgbaImage) {
    let w = canvas.width().min(layer.width());
    let h = canvas.height().min(layer.height());
    for y in 0..h {
        for x in 0..w {
            let src = layer.get_pixel(x, y).0;
            if src[3] == 0 {
                continue;
            }
            let dst = canvas.get_pixel_mut(x, y);
            dst.0 = masked_blend(dst.0, src, src[3]);
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
