//! Timers

pub(crate) mod errors;
pub(crate) mod handlers;
pub(crate) mod models;
pub(crate) mod requests;
pub(crate) mod responses;

pub(crate) use handlers::*;
