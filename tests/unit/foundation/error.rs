use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DentmapError::unknown_side("top")
            .to_string()
            .contains("unknown side: top")
    );
    assert!(
        DentmapError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(DentmapError::asset("x").to_string().contains("asset error:"));
    assert!(
        DentmapError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DentmapError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
