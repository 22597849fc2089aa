use super::*;

#[test]
fn severity_codes_round_trip_and_tolerate_unknowns() {
    for code in 0..=3 {
        assert_eq!(Severity::from_code(code).code(), code);
    }
    assert_eq!(Severity::from_code(9), Severity::Unrecognized(9));
    assert_eq!(Severity::from_code(9).status_text(), "Unknown");
    assert_eq!(Severity::MajorDamage.status_text(), "Major damage");
}

#[test]
fn report_parses_json_object_with_out_of_range_codes() {
    let report =
        ConditionReport::from_reader(r#"{"hood": 3, "windshield": 1, "roof": 12}"#.as_bytes())
            .unwrap();
    assert_eq!(report.len(), 3);
    assert_eq!(report.get("hood"), Some(Severity::MajorDamage));
    assert_eq!(report.get("roof"), Some(Severity::Unrecognized(12)));
    assert_eq!(report.get("trunk_tgate"), None);
}

#[test]
fn report_rejects_non_integer_codes() {
    let err = ConditionReport::from_reader(r#"{"hood": "bad"}"#.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("serialization error"));
}

#[test]
fn by_side_groups_parts_and_keeps_unmatched() {
    let catalog = PartCatalog::builtin();
    let report: ConditionReport = [("hood", 3), ("rear_bumper", 2), ("spoiler", 1)]
        .into_iter()
        .collect();

    let grouped = report.by_side(&catalog);
    assert_eq!(grouped.sides.len(), 4);
    assert_eq!(
        grouped.sides[&Side::Front].get("hood"),
        Some(&Severity::MajorDamage)
    );
    assert_eq!(
        grouped.sides[&Side::Back].get("rear_bumper"),
        Some(&Severity::MinorDamage)
    );
    assert!(grouped.sides[&Side::Left].is_empty());
    assert_eq!(grouped.unmatched.get("spoiler"), Some(&Severity::Ok));
}

#[test]
fn report_serializes_codes_as_integers() {
    let report: ConditionReport = [("hood", 2)].into_iter().collect();
    assert_eq!(serde_json::to_string(&report).unwrap(), r#"{"hood":2}"#);
}
