use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::{
    catalog::validate::validate_catalog,
    foundation::core::Side,
    foundation::error::{DentmapError, DentmapResult},
};

/// Extension of part silhouette assets; a part `hood` lives at `<assets_root>/hood.png`.
pub const PART_IMAGE_EXT: &str = "png";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// Diagram layout of one side of the vehicle.
pub struct SideSpec {
    /// Which side this spec describes.
    pub side: Side,
    /// Base diagram image, relative to the assets root.
    pub image: String,
    /// Optional printed part-number overlay, relative to the assets root.
    #[serde(default)]
    pub numbers: Option<String>,
    /// Part names in paste order; later parts cover earlier ones.
    pub parts: Vec<String>,
}

impl SideSpec {
    /// Whether `part` is declared on this side.
    pub fn contains_part(&self, part: &str) -> bool {
        self.parts.iter().any(|p| p == part)
    }

    /// Resolve every declared part to its asset path under `assets_root`, in paste order.
    pub fn part_specs(&self, assets_root: &Path) -> Vec<PartSpec> {
        self.parts
            .iter()
            .map(|name| PartSpec {
                name: name.clone(),
                image_path: part_asset_path(assets_root, name),
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A paintable part and the silhouette image that represents it.
pub struct PartSpec {
    /// Part identifier, unique within its side.
    pub name: String,
    /// Transparent-background silhouette image.
    pub image_path: PathBuf,
}

/// Asset path of a part silhouette by naming convention.
pub fn part_asset_path(assets_root: &Path, part: &str) -> PathBuf {
    assets_root.join(format!("{part}.{PART_IMAGE_EXT}"))
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// An asset file referenced by the catalog that does not exist on disk.
pub struct MissingAsset {
    /// Side that references the asset.
    pub side: Side,
    /// Expected location.
    pub path: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// Immutable table of side layouts.
///
/// A catalog is authored data. It is validated once with [`PartCatalog::validate`] when loaded,
/// and only read afterwards.
pub struct PartCatalog {
    sides: Vec<SideSpec>,
}

impl PartCatalog {
    /// Build and validate a catalog from side specs.
    pub fn new(sides: Vec<SideSpec>) -> DentmapResult<Self> {
        let out = Self { sides };
        out.validate()?;
        Ok(out)
    }

    /// The stock sedan diagram set.
    pub fn builtin() -> Self {
        fn side(side: Side, parts: &[&str]) -> SideSpec {
            SideSpec {
                side,
                image: format!("car_{side}.png"),
                numbers: Some(format!("car_{side}_numbers.png")),
                parts: parts.iter().map(|p| p.to_string()).collect(),
            }
        }

        Self {
            sides: vec![
                side(
                    Side::Front,
                    &[
                        "roof",
                        "windshield",
                        "hood",
                        "grill",
                        "front_bumper",
                        "right_mirror",
                        "left_mirror",
                        "front_right_light",
                        "front_left_light",
                    ],
                ),
                side(
                    Side::Back,
                    &[
                        "rear_window",
                        "trunk_tgate",
                        "trunk_cargo_area",
                        "rear_bumper",
                        "right_tail_light",
                        "left_tail_light",
                    ],
                ),
                side(
                    Side::Left,
                    &[
                        "left_rear_quarter",
                        "left_rear_door",
                        "left_front_door",
                        "left_fender",
                        "left_front_tire",
                        "left_rear_tire",
                    ],
                ),
                side(
                    Side::Right,
                    &[
                        "right_rear_quarter",
                        "right_rear_door",
                        "right_front_door",
                        "right_fender",
                        "right_front_tire",
                        "right_rear_tire",
                    ],
                ),
            ],
        }
    }

    /// Parse and validate a catalog from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> DentmapResult<Self> {
        let out: Self = serde_json::from_reader(r)
            .map_err(|e| DentmapError::serde(format!("parse catalog JSON: {e}")))?;
        out.validate()?;
        Ok(out)
    }

    /// Parse and validate a catalog from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> DentmapResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            DentmapError::validation(format!("open catalog JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check the catalog's structural invariants.
    pub fn validate(&self) -> DentmapResult<()> {
        validate_catalog(self)
    }

    /// Layout of `side`; [`DentmapError::UnknownSide`] if the catalog does not declare it.
    pub fn side_spec(&self, side: Side) -> DentmapResult<&SideSpec> {
        self.sides
            .iter()
            .find(|s| s.side == side)
            .ok_or_else(|| DentmapError::unknown_side(side.as_str()))
    }

    /// Layout of the side named `side_id`.
    pub fn side_spec_named(&self, side_id: &str) -> DentmapResult<&SideSpec> {
        self.side_spec(Side::parse(side_id)?)
    }

    /// All declared sides, in declaration order.
    pub fn sides(&self) -> &[SideSpec] {
        &self.sides
    }

    /// Every referenced asset file that is absent under `assets_root`.
    pub fn missing_assets(&self, assets_root: &Path) -> Vec<MissingAsset> {
        let mut out = Vec::new();
        for spec in &self.sides {
            let fixed = std::iter::once(assets_root.join(&spec.image))
                .chain(spec.numbers.iter().map(|n| assets_root.join(n)));
            let parts = spec
                .part_specs(assets_root)
                .into_iter()
                .map(|p| p.image_path);
            for path in fixed.chain(parts) {
                if !path.is_file() {
                    out.push(MissingAsset {
                        side: spec.side,
                        path,
                    });
                }
            }
        }
        out
    }
}

impl Default for PartCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/model.rs"]
mod tests;
