use std::io::Cursor;

use super::*;
use crate::catalog::model::SideSpec;

const PART_PX: [u8; 4] = [200, 200, 200, 255];

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "dentmap_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_png(path: &Path, img: &RgbaImage) {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, &buf).unwrap();
}

fn catalog(front_parts: &[&str], numbers: Option<&str>) -> PartCatalog {
    let sides = Side::ALL
        .iter()
        .map(|side| SideSpec {
            side: *side,
            image: format!("car_{side}.png"),
            numbers: if *side == Side::Front {
                numbers.map(str::to_string)
            } else {
                None
            },
            parts: if *side == Side::Front {
                front_parts.iter().map(|p| p.to_string()).collect()
            } else {
                vec![]
            },
        })
        .collect();
    PartCatalog::new(sides).unwrap()
}

/// 4x4 white base for every side and a `hood` silhouette covering the left column.
fn fixture(name: &str) -> PathBuf {
    let root = temp_dir(name);
    std::fs::create_dir_all(&root).unwrap();
    let base = RgbaImage::from_pixel(4, 4, image::Rgba([255, 255, 255, 255]));
    for side in Side::ALL {
        write_png(&root.join(format!("car_{side}.png")), &base);
    }
    let mut hood = RgbaImage::new(4, 4);
    for y in 0..4 {
        hood.put_pixel(0, y, image::Rgba(PART_PX));
    }
    write_png(&root.join("hood.png"), &hood);
    root
}

#[test]
fn painted_and_skipped_parts_are_logged_in_order() {
    let root = fixture("compositor_outcomes");
    std::fs::write(root.join("grill.png"), b"garbage").unwrap();

    let comp = SideCompositor::new(
        catalog(&["hood", "grill", "roof", "left_mirror"], None),
        Palette::default(),
        &root,
    );
    let report: ConditionReport = [("hood", 3), ("grill", 2), ("left_mirror", 1)]
        .into_iter()
        .collect();

    let out = comp.composite(Side::Front, &report).unwrap();
    let names: Vec<_> = out.parts.iter().map(|p| p.part.as_str()).collect();
    assert_eq!(names, ["hood", "grill", "roof", "left_mirror"]);

    assert_eq!(
        out.parts[0].status,
        PartStatus::Painted {
            severity: Severity::MajorDamage
        }
    );
    assert!(matches!(
        out.parts[1].status,
        PartStatus::Skipped(SkipReason::Decode { .. })
    ));
    assert_eq!(
        out.parts[2].status,
        PartStatus::Skipped(SkipReason::MissingAsset {
            path: root.join("roof.png")
        })
    );
    assert!(matches!(
        out.parts[3].status,
        PartStatus::Skipped(SkipReason::MissingAsset { .. })
    ));
    assert_eq!(out.painted().count(), 1);
    assert_eq!(out.skipped().count(), 3);
    assert_eq!(out.numbering, NumberingStatus::NotDeclared);

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn unreported_part_is_skipped_unless_a_default_is_configured() {
    let root = fixture("compositor_unreported");
    let report = ConditionReport::default();

    let comp = SideCompositor::new(catalog(&["hood"], None), Palette::default(), &root);
    let out = comp.composite(Side::Front, &report).unwrap();
    assert_eq!(
        out.parts[0].status,
        PartStatus::Skipped(SkipReason::NotReported)
    );
    assert_eq!(out.image.get_pixel(0, 0).0, [255, 255, 255, 255]);

    let comp = comp.with_unreported_severity(Some(Severity::NotVisible));
    let out = comp.composite(Side::Front, &report).unwrap();
    assert_eq!(
        out.parts[0].status,
        PartStatus::Painted {
            severity: Severity::NotVisible
        }
    );
    assert_ne!(out.image.get_pixel(0, 0).0, [255, 255, 255, 255]);

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn missing_numbering_overlay_is_not_fatal() {
    let root = fixture("compositor_numbers");
    let comp = SideCompositor::new(
        catalog(&["hood"], Some("car_front_numbers.png")),
        Palette::default(),
        &root,
    );
    let out = comp
        .composite(Side::Front, &ConditionReport::default())
        .unwrap();
    assert!(matches!(
        out.numbering,
        NumberingStatus::Skipped(SkipReason::MissingAsset { .. })
    ));

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn unknown_side_and_missing_base_are_fatal() {
    let root = fixture("compositor_fatal");
    let comp = SideCompositor::new(catalog(&["hood"], None), Palette::default(), &root);

    let err = comp
        .composite_named("roof", &ConditionReport::default())
        .unwrap_err();
    assert!(matches!(err, DentmapError::UnknownSide(_)));

    std::fs::remove_file(root.join("car_back.png")).unwrap();
    let err = comp
        .composite(Side::Back, &ConditionReport::default())
        .unwrap_err();
    assert!(matches!(err, DentmapError::Asset(_)));
    assert!(err.to_string().contains("side 'back'"));

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn skip_reasons_serialize_with_tags() {
    let outcome = PartOutcome {
        part: "roof".to_string(),
        status: PartStatus::Skipped(SkipReason::NotReported),
    };
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["part"], "roof");
    assert_eq!(json["status"]["status"], "skipped");
    assert_eq!(json["status"]["reason"], "not_reported");

    let painted = serde_json::to_value(PartStatus::Painted {
        severity: Severity::MinorDamage,
    })
    .unwrap();
    assert_eq!(painted["status"], "painted");
    assert_eq!(painted["severity"], 2);
}
