pub(crate) mod model;
mod validate;
