//! Data models: receipt structures, configuration, expense records.

pub mod config;
pub mod expense;
pub mod receipt;
