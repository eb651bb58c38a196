//! Error types for sheetdate.

use sheetdate_sheet::SheetError;
use thiserror::Error;

/// Result type for sheetdate operations.
pub type DateResult<T> = Result<T, DateError>;

/// Errors that can occur while detecting and normalizing a sheet.
///
/// Cells that match no date pattern are not errors; they are kept verbatim.
#[derive(Debug, Error)]
pub enum DateError {
    /// No sheet whose name matches case-insensitively.
    #[error("Sheet named \"{name}\" not found (available: {})", .available.join(", "))]
    SheetNotFound { name: String, available: Vec<String> },

    /// No row contains a header cell with the keyword.
    #[error("No header row containing \"{keyword}\" in sheet \"{sheet}\"")]
    HeaderNotFound { sheet: String, keyword: String },

    /// A user supplied date pattern could not be compiled.
    #[error("Invalid date pattern \"{template}\": {message}")]
    InvalidPattern { template: String, message: String },

    /// The output format is not a valid strftime string.
    #[error("Invalid output format: {0}")]
    InvalidOutputFormat(String),

    /// Configuration value could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the sheet layer.
    #[error(transparent)]
    Sheet(#[from] SheetError),
}

impl DateError {
    /// Create an invalid pattern error.
    pub fn invalid_pattern(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Whether this error is one of the detection failures that stop the
    /// pipeline before any table is produced.
    #[must_use]
    pub fn is_detection_failure(&self) -> bool {
        matches!(self, Self::SheetNotFound { .. } | Self::HeaderNotFound { .. })
    }
}
