use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::{
    assets::color::Palette,
    catalog::model::PartCatalog,
    foundation::error::{DentmapError, DentmapResult},
    report::condition::Severity,
};

/// Assets root used when neither the config nor the command line names one.
pub const DEFAULT_ASSETS_ROOT: &str = "images/car_parts";

fn default_assets_root() -> PathBuf {
    PathBuf::from(DEFAULT_ASSETS_ROOT)
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// Render settings, usually read from a JSON file.
///
/// Every field has a default, so `{}` is a complete config.
pub struct RenderConfig {
    /// Directory holding the base diagrams, numbering overlays and part silhouettes.
    #[serde(default = "default_assets_root")]
    pub assets_root: PathBuf,
    /// JSON catalog to use instead of the built-in one.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Severity color mapping.
    #[serde(default)]
    pub palette: Palette,
    /// Severity painted for catalog parts the report does not mention. `None` leaves them
    /// unpainted.
    #[serde(default)]
    pub unreported_severity: Option<Severity>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            assets_root: default_assets_root(),
            catalog: None,
            palette: Palette::default(),
            unreported_severity: None,
        }
    }
}

impl RenderConfig {
    /// Parse a config from a JSON reader. Relative paths are kept as written.
    pub fn from_reader<R: std::io::Read>(r: R) -> DentmapResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| DentmapError::serde(format!("parse render config JSON: {e}")))
    }

    /// Parse a config file; relative `assets_root` and `catalog` paths resolve against the
    /// file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> DentmapResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            DentmapError::validation(format!("open render config '{}': {e}", path.display()))
        })?;
        let mut cfg = Self::from_reader(BufReader::new(f))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        if cfg.assets_root.is_relative() {
            cfg.assets_root = base.join(&cfg.assets_root);
        }
        if let Some(catalog) = cfg.catalog.as_mut()
            && catalog.is_relative()
        {
            *catalog = base.join(&*catalog);
        }
        Ok(cfg)
    }

    /// Startup check: the assets root is set and the catalog loads and validates.
    ///
    /// Run once before the first render; [`crate::SideCompositor::from_config`] and
    /// `dentmap check` both call it.
    pub fn validate(&self) -> DentmapResult<()> {
        self.load_catalog().map(drop)
    }

    /// Load the configured catalog (or the built-in one) and validate it.
    pub fn load_catalog(&self) -> DentmapResult<PartCatalog> {
        if self.assets_root.as_os_str().is_empty() {
            return Err(DentmapError::validation("assets_root must not be empty"));
        }
        match &self.catalog {
            Some(path) => PartCatalog::from_path(path),
            None => {
                let catalog = PartCatalog::builtin();
                catalog.validate()?;
                Ok(catalog)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/config.rs"]
mod tests;
