use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{
    foundation::core::Rgb8,
    foundation::error::{DentmapError, DentmapResult},
    report::condition::Severity,
};

/// Gray, the display color for "not visible" and for codes the palette does not map.
pub const DEFAULT_FALLBACK: Rgb8 = Rgb8::new(128, 128, 128);

/// Immutable mapping from severity code to display color.
///
/// The mapping is total: codes without an entry resolve to [`Palette::fallback`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: BTreeMap<i64, Rgb8>,
    fallback: Rgb8,
}

impl Default for Palette {
    fn default() -> Self {
        let colors = BTreeMap::from([
            (Severity::NotVisible.code(), DEFAULT_FALLBACK),
            (Severity::Ok.code(), Rgb8::new(0, 128, 0)),
            (Severity::MinorDamage.code(), Rgb8::new(255, 255, 0)),
            (Severity::MajorDamage.code(), Rgb8::new(255, 0, 0)),
        ]);
        Self {
            colors,
            fallback: DEFAULT_FALLBACK,
        }
    }
}

impl Palette {
    /// Build a palette from explicit entries and a fallback color.
    pub fn new(colors: BTreeMap<i64, Rgb8>, fallback: Rgb8) -> Self {
        Self { colors, fallback }
    }

    /// Display color for `severity`, or the fallback when the code is unmapped.
    pub fn color_for(&self, severity: Severity) -> Rgb8 {
        self.colors
            .get(&severity.code())
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Color used for unmapped codes.
    pub fn fallback(&self) -> Rgb8 {
        self.fallback
    }
}

impl<'de> Deserialize<'de> for Palette {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Repr {
            #[serde(default)]
            colors: Option<BTreeMap<i64, ColorDef>>,
            #[serde(default)]
            fallback: Option<ColorDef>,
        }

        let repr = Repr::deserialize(deserializer)?;
        let mut out = Palette::default();
        if let Some(colors) = repr.colors {
            out.colors = colors.into_iter().map(|(k, v)| (k, v.0)).collect();
        }
        if let Some(fallback) = repr.fallback {
            out.fallback = fallback.0;
        }
        Ok(out)
    }
}

/// Color as written in config files: a name, `#rrggbb`, or `[r, g, b]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ColorDef(pub(crate) Rgb8);

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => parse_color(&s)
                .map(ColorDef)
                .map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(ColorDef(Rgb8::new(*r, *g, *b))),
                _ => Err(serde::de::Error::custom(
                    "rgb array must have len 3 ([r,g,b])",
                )),
            },
        }
    }
}

/// Parse a color name (`gray`, `grey`, `red`, ...) or a `#rrggbb` hex string.
pub fn parse_color(s: &str) -> DentmapResult<Rgb8> {
    let s = s.trim();
    if s.starts_with('#') {
        return parse_hex(s);
    }
    named_color(&s.to_ascii_lowercase())
        .ok_or_else(|| DentmapError::validation(format!("unknown color name \"{s}\"")))
}

fn parse_hex(s: &str) -> DentmapResult<Rgb8> {
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> DentmapResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| DentmapError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    match s.len() {
        6 if s.is_ascii() => Ok(Rgb8::new(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        3 if s.is_ascii() => {
            // #rgb shorthand
            let expand = |i: usize| hex_byte(&s[i..i + 1].repeat(2));
            Ok(Rgb8::new(expand(0)?, expand(1)?, expand(2)?))
        }
        _ => Err(DentmapError::validation(
            "hex color must be #RRGGBB or #RGB (case-insensitive)",
        )),
    }
}

fn named_color(name: &str) -> Option<Rgb8> {
    let rgb = match name {
        "black" => Rgb8::new(0, 0, 0),
        "white" => Rgb8::new(255, 255, 255),
        "gray" | "grey" => DEFAULT_FALLBACK,
        "darkgray" | "darkgrey" => Rgb8::new(169, 169, 169),
        "lightgray" | "lightgrey" => Rgb8::new(211, 211, 211),
        "silver" => Rgb8::new(192, 192, 192),
        "red" => Rgb8::new(255, 0, 0),
        "darkred" => Rgb8::new(139, 0, 0),
        "green" => Rgb8::new(0, 128, 0),
        "darkgreen" => Rgb8::new(0, 100, 0),
        "lime" => Rgb8::new(0, 255, 0),
        "blue" => Rgb8::new(0, 0, 255),
        "navy" => Rgb8::new(0, 0, 128),
        "yellow" => Rgb8::new(255, 255, 0),
        "gold" => Rgb8::new(255, 215, 0),
        "orange" => Rgb8::new(255, 165, 0),
        "darkorange" => Rgb8::new(255, 140, 0),
        "purple" => Rgb8::new(128, 0, 128),
        _ => return None,
    };
    Some(rgb)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
