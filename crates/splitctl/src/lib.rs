//! splitctl library - exposes commands for integration tests

pub mod cli;
pub mod commands;
pub mod errors;
pub mod input;
pub mod output;

/// Version embedded at build time
pub const VERSION: &str = env!("SPLIT_VERSION");
