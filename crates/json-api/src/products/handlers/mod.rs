//! Product Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod get_by_name;
pub(crate) mod index;
pub(crate) mod price;
pub(crate) mod update;
