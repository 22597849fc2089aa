/// Convenience result type used across dentmap.
pub type DentmapResult<T> = Result<T, DentmapError>;

/// Top-level error taxonomy used by dentmap APIs.
///
/// Only [`DentmapError::UnknownSide`] and base diagram failures escape the side compositor.
/// Per-part problems are recorded as [`crate::SkipReason`] values instead.
#[derive(thiserror::Error, Debug)]
pub enum DentmapError {
    /// A side identifier outside `front`/`back`/`left`/`right`, or one the catalog does not declare.
    #[error("unknown side: {0}")]
    UnknownSide(String),

    /// Invalid catalog, palette or config data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An image asset that is required for a render could not be read or decoded.
    ///
    /// The side compositor raises this only for a base diagram it cannot load. That is the one
    /// fatal render error besides [`DentmapError::UnknownSide`]; part silhouettes and numbering
    /// overlays that fail are skipped instead.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DentmapError {
    /// Build a [`DentmapError::UnknownSide`] value.
    pub fn unknown_side(side: impl Into<String>) -> Self {
        Self::UnknownSide(side.into())
    }

    /// Build a [`DentmapError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DentmapError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`DentmapError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
