pub(crate) mod condition;
