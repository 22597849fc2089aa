use super::*;

#[test]
fn side_parse_accepts_canonical_names() {
    for side in Side::ALL {
        assert_eq!(Side::parse(side.as_str()).unwrap(), side);
    }
    assert_eq!(" Front ".parse::<Side>().unwrap(), Side::Front);
}

#[test]
fn side_parse_rejects_unknown_names() {
    let err = Side::parse("roof").unwrap_err();
    assert!(matches!(err, DentmapError::UnknownSide(ref s) if s == "roof"));
}

#[test]
fn side_output_names_follow_storage_scheme() {
    assert_eq!(Side::Left.output_file_name(), "colored_car_left.png");
    assert_eq!(
        Side::Back.storage_key("r42").unwrap(),
        "r42/colored_car_back.png"
    );
}

#[test]
fn report_ids_must_be_a_single_segment() {
    for id in ["r42", "2024-05-01_abc", "report.v2"] {
        assert!(validate_report_id(id).is_ok(), "{id}");
    }
    for id in ["", "  ", "../escape", "..", ".", "a/b", "a\\b", "/tmp/out", "x..y"] {
        let err = validate_report_id(id).unwrap_err();
        assert!(matches!(err, DentmapError::Validation(_)), "{id}");
    }
    assert!(Side::Front.storage_key("../r1").is_err());
}

#[test]
fn side_serde_is_lowercase() {
    let json = serde_json::to_string(&Side::Right).unwrap();
    assert_eq!(json, "\"right\"");
    let side: Side = serde_json::from_str("\"back\"").unwrap();
    assert_eq!(side, Side::Back);
}
