pub(crate) mod composite;
pub(crate) mod compositor;
pub(crate) mod config;
pub(crate) mod overlay;
