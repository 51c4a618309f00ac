//! Error types for the bill splitter.
//!
//! Malformed receipt lines are not errors: the normalizer drops them.
//! The split calculator is total and has no error type.

use thiserror::Error;

use crate::types::{ItemId, ParticipantId};

/// Receipt extraction errors. Every variant is surfaced to the user as one
/// message and no items are committed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExtractionError {
    #[error("Receipt extraction is disabled or has no API key")]
    Disabled,

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Extraction service returned HTTP {0}")]
    Status(u16),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Unexpected response from extraction service: {0}")]
    InvalidResponse(String),

    #[error("Extracted text is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Extracted JSON is not an array")]
    NotAnArray,

    #[error("Invalid receipt image: {0}")]
    InvalidImage(String),
}

impl ExtractionError {
    /// Single user-facing message for any failure
    pub fn user_message(&self) -> &'static str {
        match self {
            ExtractionError::Disabled => "Receipt scanning is not available. Enter the items manually.",
            ExtractionError::InvalidImage(_) => "The selected file is not a readable image.",
            _ => "Could not read the receipt data from the AI response. Try again or enter the items manually.",
        }
    }

    /// True for failures of the call itself (network, status, body)
    pub fn is_transport(&self) -> bool {
        !matches!(
            self,
            ExtractionError::Disabled | ExtractionError::InvalidImage(_)
        )
    }
}

/// Rejected bill edits
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BillError {
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),

    #[error("Unknown participant: {0}")]
    UnknownParticipant(ParticipantId),

    #[error("Item {0} appears more than once")]
    DuplicateItem(ItemId),

    #[error("Participant {0} appears more than once")]
    DuplicateParticipant(ParticipantId),

    #[error("Participant name cannot be empty")]
    EmptyName,

    #[error("Add participants before splitting the bill")]
    NoParticipants,

    #[error("Price must be a non-negative number, got {0}")]
    InvalidPrice(f64),

    #[error("Tip percentage must be a non-negative number, got {0}")]
    InvalidTip(f64),

    #[error("Action not available while {0}")]
    WrongStage(&'static str),
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
