//! dentmap paints per-part damage severities onto schematic car diagrams.
//!
//! A condition report (part name -> severity code, usually produced by an image-analysis model)
//! is turned into four finished side diagrams: front, back, left and right.
//!
//! # Pipeline overview
//!
//! 1. **Catalog**: [`PartCatalog`] says, per [`Side`], which base diagram to load, which
//!    numbering overlay goes on top, and which parts to paint in which order.
//! 2. **Overlay**: [`render_overlay`] tints one part silhouette with its [`Palette`] color at
//!    about 30% opacity.
//! 3. **Composite**: [`SideCompositor`] pastes every tinted part onto the side's base diagram
//!    and returns a [`SideRender`] with the finished image and a per-part outcome log.
//!
//! Missing or broken part assets never fail a render; they are logged and recorded as
//! [`SkipReason`]s. Only an unknown side or an unreadable base diagram is an error.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod catalog;
mod foundation;
mod render;
mod report;

pub use assets::color::{DEFAULT_FALLBACK, Palette, parse_color};
pub use assets::decode::{decode_rgba, load_rgba};
pub use catalog::model::{
    MissingAsset, PART_IMAGE_EXT, PartCatalog, PartSpec, SideSpec, part_asset_path,
};
pub use foundation::core::{Rgb8, Side, validate_report_id};
pub use foundation::error::{DentmapError, DentmapResult};
pub use render::composite::{StraightRgba8, masked_blend, over, paste_with_alpha_mask};
pub use render::compositor::{
    NumberingStatus, PartOutcome, PartStatus, SideCompositor, SideRender, SkipReason,
};
pub use render::config::{DEFAULT_ASSETS_ROOT, RenderConfig};
pub use render::overlay::{OVERLAY_ALPHA, overlay_layer, render_overlay};
pub use report::condition::{ConditionReport, ReportBySide, Severity};
