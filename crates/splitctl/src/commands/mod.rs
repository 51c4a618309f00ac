//! Command modules for splitctl
//!
//! Each command writes its result to the given output and returns the
//! process exit code. Diagnostics go to stderr.

pub mod quick_split;
pub mod scan;
pub mod summary;
