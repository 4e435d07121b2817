//! Caller credentials

mod credential;

pub use credential::*;
