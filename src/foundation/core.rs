use std::{fmt, str::FromStr};

use crate::foundation::error::{DentmapError, DentmapResult};

/// One of the four canonical viewpoints of the vehicle diagram.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Front view.
    Front,
    /// Rear view.
    Back,
    /// Driver-side view.
    Left,
    /// Passenger-side view.
    Right,
}

impl Side {
    /// All sides in catalog order.
    pub const ALL: [Side; 4] = [Side::Front, Side::Back, Side::Left, Side::Right];

    /// Lowercase identifier (`front`, `back`, `left`, `right`).
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Front => "front",
            Side::Back => "back",
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// Parse a side identifier; anything else is [`DentmapError::UnknownSide`].
    pub fn parse(s: &str) -> DentmapResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Ok(Side::Front),
            "back" => Ok(Side::Back),
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            _ => Err(DentmapError::unknown_side(s)),
        }
    }

    /// File name of the finished diagram for this side, e.g. `colored_car_front.png`.
    pub fn output_file_name(self) -> String {
        format!("colored_car_{}.png", self.as_str())
    }

    /// Object-store key of the finished diagram: `{report_id}/colored_car_{side}.png`.
    ///
    /// Fails when `report_id` is not a single plain path segment (see [`validate_report_id`]).
    pub fn storage_key(self, report_id: &str) -> DentmapResult<String> {
        validate_report_id(report_id)?;
        Ok(format!("{report_id}/{}", self.output_file_name()))
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = DentmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Check that a report identifier is one plain path segment.
///
/// The id names both an output directory and a storage key prefix, so it must not be empty,
/// absolute, contain `/` or `\`, or be `.` or contain `..`.
pub fn validate_report_id(report_id: &str) -> DentmapResult<()> {
    if report_id.trim().is_empty() {
        return Err(DentmapError::validation("report id must be non-empty"));
    }
    if report_id.contains(['/', '\\']) || std::path::Path::new(report_id).is_absolute() {
        return Err(DentmapError::validation(format!(
            "report id '{report_id}' must not contain path separators"
        )));
    }
    if report_id == "." || report_id.contains("..") {
        return Err(DentmapError::validation(format!(
            "report id '{report_id}' must not contain '..'"
        )));
    }
    Ok(())
}

/// Straight (non-premultiplied) RGB8 display color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Build a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Straight RGBA8 pixel with the given alpha.
    pub fn with_alpha(self, a: u8) -> [u8; 4] {
        [self.r, self.g, self.b, a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
