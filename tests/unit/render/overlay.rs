use super::*;

fn part_fixture() -> RgbaImage {
    let mut img = RgbaImage::new(3, 1);
    img.put_pixel(0, 0, image::Rgba([255, 255, 255, 255]));
    img.put_pixel(1, 0, image::Rgba([40, 80, 120, 128]));
    img.put_pixel(2, 0, image::Rgba([7, 7, 7, 0]));
    img
}

#[test]
fn layer_alpha_is_scaled_part_alpha() {
    let layer = overlay_layer(&part_fixture(), Rgb8::new(255, 0, 0));
    assert_eq!(layer.get_pixel(0, 0).0, [255, 0, 0, 76]);
    // 128 * 76 / 255 = 38
    assert_eq!(layer.get_pixel(1, 0).0, [255, 0, 0, 38]);
    assert_eq!(layer.get_pixel(2, 0).0[3], 0);
}

#[test]
fn opaque_pixels_are_tinted_and_transparent_ones_untouched() {
    let out = render_overlay(&part_fixture(), Severity::MajorDamage, &Palette::default());
    assert_eq!(out.dimensions(), (3, 1));
    assert_eq!(out.get_pixel(0, 0).0, [255, 179, 179, 255]);
    assert_eq!(out.get_pixel(2, 0).0, [7, 7, 7, 0]);
}

#[test]
fn render_is_deterministic_for_every_code() {
    let part = part_fixture();
    let palette = Palette::default();
    for code in 0..=3 {
        let a = render_overlay(&part, Severity::from_code(code), &palette);
        let b = render_overlay(&part, Severity::from_code(code), &palette);
        assert_eq!(a.as_raw(), b.as_raw());
    }
}

#[test]
fn unknown_code_renders_with_fallback_color() {
    let part = part_fixture();
    let palette = Palette::default();
    let unknown = render_overlay(&part, Severity::from_code(42), &palette);
    let not_visible = render_overlay(&part, Severity::NotVisible, &palette);
    assert_eq!(unknown.as_raw(), not_visible.as_raw());
}

#[test]
fn fully_opaque_part_is_tinted_uniformly() {
    let part = RgbaImage::from_pixel(4, 4, image::Rgba([200, 200, 200, 255]));
    let out = render_overlay(&part, Severity::Ok, &Palette::default());
    let first = out.get_pixel(0, 0).0;
    assert_ne!(first, [200, 200, 200, 255]);
    assert!(out.pixels().all(|p| p.0 == first));
}
