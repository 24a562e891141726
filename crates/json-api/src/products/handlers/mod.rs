//! Product Handlers

pub(crate) mod click;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod images;
pub(crate) mod index;
pub(crate) mod mine;
pub(crate) mod save;
pub(crate) mod update;
