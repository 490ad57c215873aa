//! Placefind Core - Shared building blocks
//!
//! This crate provides the pieces every Placefind component needs: the place
//! result model, user-facing notices, configuration loading, tracing setup
//! with a daily error log, and spreadsheet export.

pub mod config;
pub mod export;
pub mod notice;
pub mod place;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::PlacefindConfig;
pub use export::{ExportError, SpreadsheetSink, XlsxSink, export_results};
pub use notice::Notice;
pub use place::SearchResult;

/// Top-level errors that can bubble up to the binary.
///
/// Both variants are startup failures; once running, problems are reported
/// to the user as notices instead.
#[derive(Debug, thiserror::Error)]
pub enum PlacefindError {
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("Logging setup error: {reason}")]
    Logging { reason: String },
}

impl PlacefindError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            PlacefindError::Configuration { reason } => {
                format!("설정 오류: {reason}")
            }
            PlacefindError::Logging { .. } => "로그 설정 중 오류가 발생했습니다.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlacefindError>;
