//! CLI command implementations.

pub mod exe;
pub mod save;
