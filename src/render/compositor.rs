use std::path::{Path, PathBuf};

use image::RgbaImage;
use rayon::prelude::*;

use crate::{
    assets::color::Palette,
    assets::decode::load_rgba,
    catalog::model::{PartCatalog, PartSpec},
    foundation::core::Side,
    foundation::error::{DentmapError, DentmapResult},
    render::composite::paste_with_alpha_mask,
    render::config::RenderConfig,
    render::overlay::render_overlay,
    report::condition::{ConditionReport, Severity},
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
/// Why a part was left unpainted.
pub enum SkipReason {
    /// The report has no entry for the part and no default severity is configured.
    NotReported,
    /// The silhouette file does not exist.
    MissingAsset {
        /// Expected location of the silhouette.
        path: PathBuf,
    },
    /// The silhouette exists but could not be read or decoded.
    Decode {
        /// Underlying error message.
        message: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
/// Result of processing one part.
pub enum PartStatus {
    /// The part was tinted and pasted onto the canvas.
    Painted {
        /// Severity the tint encodes.
        severity: Severity,
    },
    /// The part was left unpainted.
    Skipped(SkipReason),
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// One entry of a side's outcome log.
pub struct PartOutcome {
    /// Part name.
    pub part: String,
    /// What happened to it.
    pub status: PartStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
/// What happened to a side's numbering overlay.
pub enum NumberingStatus {
    /// The catalog declares no numbering overlay for the side.
    NotDeclared,
    /// The overlay was pasted on top of all parts.
    Applied,
    /// The overlay was declared but could not be applied.
    Skipped(SkipReason),
}

#[derive(Clone, Debug)]
/// A finished side diagram plus its outcome log.
pub struct SideRender {
    /// Side that was rendered.
    pub side: Side,
    /// Finished canvas, same size as the side's base diagram.
    pub image: RgbaImage,
    /// Per-part outcomes, in paste order.
    pub parts: Vec<PartOutcome>,
    /// Numbering overlay outcome.
    pub numbering: NumberingStatus,
}

impl SideRender {
    /// Outcomes of parts that were painted.
    pub fn painted(&self) -> impl Iterator<Item = &PartOutcome> {
        self.parts
            .iter()
            .filter(|p| matches!(p.status, PartStatus::Painted { .. }))
    }

    /// Outcomes of parts that were skipped.
    pub fn skipped(&self) -> impl Iterator<Item = &PartOutcome> {
        self.parts
            .iter()
            .filter(|p| matches!(p.status, PartStatus::Skipped(_)))
    }
}

#[derive(Clone, Debug)]
/// Paints condition reports onto side diagrams.
///
/// Holds only immutable data, so one compositor can serve concurrent renders; each call gets
/// its own canvas.
pub struct SideCompositor {
    catalog: PartCatalog,
    palette: Palette,
    assets_root: PathBuf,
    unreported_severity: Option<Severity>,
}

impl SideCompositor {
    /// Build a compositor over a validated catalog.
    pub fn new(catalog: PartCatalog, palette: Palette, assets_root: impl Into<PathBuf>) -> Self {
        Self {
            catalog,
            palette,
            assets_root: assets_root.into(),
            unreported_severity: None,
        }
    }

    /// Build a compositor from config, loading and validating the catalog.
    pub fn from_config(cfg: &RenderConfig) -> DentmapResult<Self> {
        cfg.validate()?;
        let catalog = cfg.load_catalog()?;
        Ok(Self::new(catalog, cfg.palette.clone(), cfg.assets_root.clone())
            .with_unreported_severity(cfg.unreported_severity))
    }

    /// Paint parts missing from the report with `severity` instead of skipping them.
    pub fn with_unreported_severity(mut self, severity: Option<Severity>) -> Self {
        self.unreported_severity = severity;
        self
    }

    /// Catalog in use.
    pub fn catalog(&self) -> &PartCatalog {
        &self.catalog
    }

    /// Directory assets are resolved against.
    pub fn assets_root(&self) -> &Path {
        &self.assets_root
    }

    /// Render the side named `side_id`.
    pub fn composite_named(
        &self,
        side_id: &str,
        report: &ConditionReport,
    ) -> DentmapResult<SideRender> {
        self.composite(Side::parse(side_id)?, report)
    }

    /// Render one side.
    ///
    /// Fails only when the side is unknown to the catalog or its base diagram cannot be
    /// loaded. Every per-part problem is logged and recorded in [`SideRender::parts`].
    #[tracing::instrument(skip(self, report))]
    pub fn composite(&self, side: Side, report: &ConditionReport) -> DentmapResult<SideRender> {
        let spec = self.catalog.side_spec(side)?;

        let base_path = self.assets_root.join(&spec.image);
        let mut canvas = load_rgba(&base_path).map_err(|e| {
            DentmapError::asset(format!(
                "load base diagram for side '{side}' from '{}': {e:#}",
                base_path.display()
            ))
        })?;

        let mut parts = Vec::with_capacity(spec.parts.len());
        for part in spec.part_specs(&self.assets_root) {
            let status = match self.paint_part(&mut canvas, &part, report) {
                Ok(severity) => {
                    tracing::debug!(part = %part.name, code = severity.code(), "painted part");
                    PartStatus::Painted { severity }
                }
                Err(reason) => {
                    log_skip(&part.name, &reason);
                    PartStatus::Skipped(reason)
                }
            };
            parts.push(PartOutcome {
                part: part.name,
                status,
            });
        }

        let numbering = match &spec.numbers {
            None => NumberingStatus::NotDeclared,
            Some(rel) => {
                let path = self.assets_root.join(rel);
                match load_layer(&path) {
                    Ok(layer) => {
                        paste_with_alpha_mask(&mut canvas, &layer);
                        NumberingStatus::Applied
                    }
                    Err(reason) => {
                        log_skip("numbering overlay", &reason);
                        NumberingStatus::Skipped(reason)
                    }
                }
            }
        };

        let out = SideRender {
            side,
            image: canvas,
            parts,
            numbering,
        };
        tracing::info!(
            painted = out.painted().count(),
            skipped = out.skipped().count(),
            "side composited"
        );
        Ok(out)
    }

    /// Render `sides` in parallel, preserving their order in the result.
    pub fn composite_sides(
        &self,
        sides: &[Side],
        report: &ConditionReport,
    ) -> DentmapResult<Vec<SideRender>> {
        sides
            .par_iter()
            .map(|side| self.composite(*side, report))
            .collect()
    }

    /// Render all four sides in parallel.
    pub fn composite_all(&self, report: &ConditionReport) -> DentmapResult<Vec<SideRender>> {
        self.composite_sides(&Side::ALL, report)
    }

    fn paint_part(
        &self,
        canvas: &mut RgbaImage,
        part: &PartSpec,
        report: &ConditionReport,
    ) -> Result<Severity, SkipReason> {
        if !part.image_path.is_file() {
            return Err(SkipReason::MissingAsset {
                path: part.image_path.clone(),
            });
        }
        let severity = report
            .get(&part.name)
            .or(self.unreported_severity)
            .ok_or(SkipReason::NotReported)?;

        let layer = load_layer(&part.image_path)?;
        let tinted = render_overlay(&layer, severity, &self.palette);
        paste_with_alpha_mask(canvas, &tinted);
        Ok(severity)
    }
}

fn load_layer(path: &Path) -> Result<RgbaImage, SkipReason> {
    if !path.is_file() {
        return Err(SkipReason::MissingAsset {
            path: path.to_path_buf(),
        });
    }
    load_rgba(path).map_err(|e| SkipReason::Decode {
        message: format!("{e:#}"),
    })
}

fn log_skip(what: &str, reason: &SkipReason) {
    match reason {
        SkipReason::NotReported => {
            tracing::debug!(part = %what, "part not in condition report; skipping");
        }
        SkipReason::MissingAsset { path } => {
            tracing::warn!(part = %what, path = %path.display(), "asset not found; skipping");
        }
        SkipReason::Decode { message } => {
            tracing::warn!(part = %what, error = %message, "failed to load asset; skipping");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
