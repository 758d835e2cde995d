//! Error types for extraction and validation.
//!
//! Two severities exist: a [`ValidationError`] covers one event field and
//! is recoverable by skipping that event, while an [`ExtractError`] is
//! fatal for the file it occurred in (the batch continues either way).

use thiserror::Error;

/// Longest raw value echoed back in a validation message. Operators use
/// the echoed value to find the offending row in a 1000+ event export, so
/// it must be present but bounded.
pub const MAX_DISPLAY_VALUE: usize = 50;

/// A single event field failed a domain constraint.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{event_kind}.{field}: {message} (got: {value})")]
pub struct ValidationError {
    /// Name of the event kind being built, e.g. "Kick".
    pub event_kind: &'static str,
    /// Field that failed, e.g. "x_start".
    pub field: &'static str,
    /// Constraint description, e.g. "must be between -10 and 150".
    pub message: String,
    /// Offending raw value, truncated for display.
    pub value: String,
}

impl ValidationError {
    pub fn new(
        event_kind: &'static str,
        field: &'static str,
        message: impl Into<String>,
        value: &str,
    ) -> Self {
        Self {
            event_kind,
            field,
            message: message.into(),
            value: truncate_value(value),
        }
    }
}

fn truncate_value(value: &str) -> String {
    if value.chars().count() > MAX_DISPLAY_VALUE {
        let head: String = value.chars().take(MAX_DISPLAY_VALUE - 3).collect();
        format!("{}...", head)
    } else {
        value.to_string()
    }
}

/// Fatal per-file extraction failures.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Fewer than two distinct team names were found in the restart
    /// labels. Extraction cannot proceed without both sides.
    #[error("team resolution failed: {0}")]
    Resolution(String),

    /// The export document is not well-formed.
    #[error("malformed match export: {0}")]
    Parse(#[from] serde_json::Error),

    /// The export could not be read from disk.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
