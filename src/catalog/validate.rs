use std::collections::BTreeSet;

use crate::{
    catalog::model::PartCatalog,
    foundation::core::Side,
    foundation::error::{DentmapError, DentmapResult},
};

pub(crate) fn validate_catalog(catalog: &PartCatalog) -> DentmapResult<()> {
    let mut seen_sides = BTreeSet::new();
    for spec in catalog.sides() {
        if !seen_sides.insert(spec.side) {
            return Err(DentmapError::validation(format!(
                "side '{}' is declared more than once",
                spec.side
            )));
        }

        validate_rel_source(&spec.image, &format!("{}.image", spec.side))?;
        if let Some(numbers) = &spec.numbers {
            validate_rel_source(numbers, &format!("{}.numbers", spec.side))?;
        }

        let mut seen_parts = BTreeSet::new();
        for part in &spec.parts {
            validate_part_name(part, spec.side)?;
            if !seen_parts.insert(part.as_str()) {
                return Err(DentmapError::validation(format!(
                    "part '{part}' is listed twice on side '{}'",
                    spec.side
                )));
            }
        }
    }

    for side in Side::ALL {
        if !seen_sides.contains(&side) {
            return Err(DentmapError::validation(format!(
                "catalog does not declare side '{side}'"
            )));
        }
    }
    Ok(())
}

// Part names double as file stems, so they must stay plain identifiers.
fn validate_part_name(part: &str, side: Side) -> DentmapResult<()> {
    if part.is_empty() {
        return Err(DentmapError::validation(format!(
            "side '{side}' lists an empty part name"
        )));
    }
    if !part
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(DentmapError::validation(format!(
            "part name '{part}' on side '{side}' must contain only ASCII letters, digits and '_'"
        )));
    }
    Ok(())
}

fn validate_rel_source(source: &str, field: &str) -> DentmapResult<()> {
    if source.trim().is_empty() {
        return Err(DentmapError::validation(format!(
            "{field} must be non-empty"
        )));
    }
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(DentmapError::validation(format!(
            "{field} must be a relative path"
        )));
    }
    if s.split('/').any(|part| part == "..") {
        return Err(DentmapError::validation(format!(
            "{field} must not contain '..'"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/validate.rs"]
mod tests;
