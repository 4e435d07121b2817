//! Products

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod views;

pub use errors::*;
pub use repository::*;
pub use service::*;
