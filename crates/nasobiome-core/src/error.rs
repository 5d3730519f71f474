//! Centralized error types for NasoBiome.

use thiserror::Error;

/// Main error type for NasoBiome operations.
#[derive(Error, Debug)]
pub enum BiomeError {
    #[error("Sheet read error: {0}")]
    SheetRead(String),

    #[error("Malformed sheet record: {0}")]
    MalformedRecord(String),
}

/// Result type for NasoBiome operations.
pub type BiomeResult<T> = Result<T, BiomeError>;

impl BiomeError {
    /// Create a sheet-read error.
    pub fn sheet_read(msg: impl Into<String>) -> Self {
        Self::SheetRead(msg.into())
    }

    /// Create a malformed-record error.
    pub fn malformed_record(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }
}
