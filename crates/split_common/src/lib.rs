//! Split Common - bill model and splitting logic shared by splitd and splitctl.
//!
//! Pure core: `normalizer` turns extracted receipt lines into atomic items,
//! `split` computes per-person shares with proportional tip, `bill` holds the
//! editable state. `extraction` is the only module doing I/O.

pub mod bill;
pub mod config;
pub mod error;
pub mod extraction;
pub mod money;
pub mod normalizer;
pub mod split;
pub mod types;

pub use bill::{Bill, BillAction, DEFAULT_TIP_PERCENTAGE};
pub use config::SplitConfig;
pub use error::{BillError, ConfigError, ExtractionError};
pub use normalizer::{normalize, normalize_value, RawExtractedLine};
pub use split::calculate;
pub use types::*;

/// Crate version, shared by both binaries
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
