//! Product catalog domain, persistence and inventory integration.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod ids;
pub mod inventory;

#[cfg(test)]
mod test;
