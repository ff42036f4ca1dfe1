//! Shared application domain and persistence modules.

pub mod context;
pub mod database;
pub mod domain;
pub mod sessions;

#[cfg(test)]
mod test;

mod uuids;
