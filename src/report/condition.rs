use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::Path,
};

use crate::{
    catalog::model::PartCatalog,
    foundation::core::Side,
    foundation::error::{DentmapError, DentmapResult},
};

/// Damage severity reported for one part.
///
/// Codes outside `0..=3` are kept as [`Severity::Unrecognized`] instead of being rejected; they
/// render with the palette fallback color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Code 0: the part is not visible in the photographs.
    NotVisible,
    /// Code 1: the part looks fine.
    Ok,
    /// Code 2: minor damage.
    MinorDamage,
    /// Code 3: major damage.
    MajorDamage,
    /// Any other code.
    Unrecognized(i64),
}

impl Severity {
    /// Map a raw integer code to a severity.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Severity::NotVisible,
            1 => Severity::Ok,
            2 => Severity::MinorDamage,
            3 => Severity::MajorDamage,
            other => Severity::Unrecognized(other),
        }
    }

    /// Raw integer code.
    pub fn code(self) -> i64 {
        match self {
            Severity::NotVisible => 0,
            Severity::Ok => 1,
            Severity::MinorDamage => 2,
            Severity::MajorDamage => 3,
            Severity::Unrecognized(code) => code,
        }
    }

    /// Human-readable status used in report summaries.
    pub fn status_text(self) -> &'static str {
        match self {
            Severity::NotVisible => "Not visible",
            Severity::Ok => "Seems OK",
            Severity::MinorDamage => "Minor damage",
            Severity::MajorDamage => "Major damage",
            Severity::Unrecognized(_) => "Unknown",
        }
    }
}

impl From<i64> for Severity {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

impl serde::Serialize for Severity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> serde::Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        i64::deserialize(deserializer).map(Severity::from_code)
    }
}

/// Severity per part name, as produced by the image-analysis step.
///
/// May mention parts no side declares and may omit declared parts.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ConditionReport {
    conditions: BTreeMap<String, Severity>,
}

/// A [`ConditionReport`] split by the side each part belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ReportBySide {
    /// Entries grouped per side; every side is present, possibly empty.
    pub sides: BTreeMap<Side, BTreeMap<String, Severity>>,
    /// Entries whose part no side declares.
    pub unmatched: BTreeMap<String, Severity>,
}

impl ConditionReport {
    /// Parse a report from a JSON object reader (`{"hood": 3, ...}`).
    pub fn from_reader<R: std::io::Read>(r: R) -> DentmapResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| DentmapError::serde(format!("parse condition report JSON: {e}")))
    }

    /// Parse a report from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> DentmapResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            DentmapError::validation(format!("open condition report '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Severity reported for `part`, if any.
    pub fn get(&self, part: &str) -> Option<Severity> {
        self.conditions.get(part).copied()
    }

    /// Iterate entries in part-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Severity)> {
        self.conditions.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Whether the report has no entries.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Group entries by side.
    ///
    /// A part listed on several sides goes to the first one in [`Side::ALL`] order.
    pub fn by_side(&self, catalog: &PartCatalog) -> ReportBySide {
        let mut out = ReportBySide {
            sides: Side::ALL.iter().map(|s| (*s, BTreeMap::new())).collect(),
            unmatched: BTreeMap::new(),
        };

        for (part, severity) in &self.conditions {
            let owner = Side::ALL.into_iter().find(|side| {
                catalog
                    .side_spec(*side)
                    .is_ok_and(|spec| spec.contains_part(part))
            });
            match owner {
                Some(side) => {
                    out.sides
                        .entry(side)
                        .or_default()
                        .insert(part.clone(), *severity);
                }
                None => {
                    out.unmatched.insert(part.clone(), *severity);
                }
            }
        }
        out
    }
}

impl FromIterator<(String, Severity)> for ConditionReport {
    fn from_iter<T: IntoIterator<Item = (String, Severity)>>(iter: T) -> Self {
        Self {
            conditions: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, i64)> for ConditionReport {
    fn from_iter<T: IntoIterator<Item = (&'a str, i64)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_string(), Severity::from_code(v)))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/report/condition.rs"]
mod tests;
