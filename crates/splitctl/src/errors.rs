//! Exit status for splitctl
//!
//! Codes follow sysexits(3) where one fits.

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors (bad bill document, rejected edit)
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when the receipt could not be turned into items
pub const EXIT_EXTRACTION_FAILED: i32 = 65;

/// Exit code when the image file cannot be read
pub const EXIT_UNREADABLE_IMAGE: i32 = 66;

/// Exit code when no extraction API key is configured
pub const EXIT_NOT_CONFIGURED: i32 = 78;
