//! Timers
//!
//! Merchant-managed countdown timers, their derived status and the public
//! widget view.

pub mod data;
pub mod display;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod stats;
pub mod status;
pub mod validation;
pub mod widget;

pub use errors::TimersServiceError;
pub use service::*;
