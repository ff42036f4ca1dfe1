//! Timer Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod stats;
pub(crate) mod toggle;
pub(crate) mod update;
