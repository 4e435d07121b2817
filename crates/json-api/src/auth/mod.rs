//! Caller credentials

pub(crate) mod middleware;
