//! Spreadsheet export of cached search results.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::notice::Notice;
use crate::place::SearchResult;

/// Header row, in column order: name, postal code, lot address, road address.
pub const EXPORT_HEADER: [&str; 4] = ["이름", "우편번호", "지번주소", "도로명주소"];

/// Errors that occur while writing an export file.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet error: {reason}")]
    Spreadsheet { reason: String },
}

impl From<XlsxError> for ExportError {
    fn from(error: XlsxError) -> Self {
        match error {
            XlsxError::IoError(e) => ExportError::Io(e),
            other => ExportError::Spreadsheet {
                reason: other.to_string(),
            },
        }
    }
}

/// Destination for a table of string cells.
pub trait SpreadsheetSink: Send + Sync {
    /// Writes a header row followed by data rows, replacing previous output.
    ///
    /// # Errors
    ///
    /// - `ExportError::Io` - The destination could not be written
    /// - `ExportError::Spreadsheet` - The table could not be encoded
    fn write_table(&self, header: &[&str], rows: &[[&str; 4]]) -> Result<(), ExportError>;

    /// Location reported back to the user after a successful write.
    fn location(&self) -> PathBuf;
}

/// Writes a single-sheet `.xlsx` workbook to a fixed path.
#[derive(Debug, Clone)]
pub struct XlsxSink {
    path: PathBuf,
    sheet_name: String,
}

impl XlsxSink {
    /// Creates a sink writing to `path`, overwriting it on every export.
    pub fn new(path: impl Into<PathBuf>, sheet_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sheet_name: sheet_name.into(),
        }
    }

    /// Output file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SpreadsheetSink for XlsxSink {
    fn write_table(&self, header: &[&str], rows: &[[&str; 4]]) -> Result<(), ExportError> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        for (col, title) in header.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &bold)?;
        }

        for (index, row) in rows.iter().enumerate() {
            let row_num = index as u32 + 1;
            for (col, cell) in row.iter().enumerate() {
                worksheet.write_string(row_num, col as u16, *cell)?;
            }
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        workbook.save(&self.path)?;
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}

/// Exports cached results and reports the outcome as a notice.
///
/// Empty input is a no-op. Write failures are logged and reported; they
/// never abort the caller.
pub fn export_results(sink: &dyn SpreadsheetSink, results: &[SearchResult]) -> Notice {
    if results.is_empty() {
        return Notice::NoDataToSave;
    }

    let rows: Vec<[&str; 4]> = results.iter().map(SearchResult::to_row).collect();

    match sink.write_table(&EXPORT_HEADER, &rows) {
        Ok(()) => {
            let path = sink.location();
            tracing::info!("Exported {} rows to {}", rows.len(), path.display());
            Notice::Saved { path }
        }
        Err(e) => {
            tracing::error!(error = %e, path = %sink.location().display(), "Failed to export results");
            Notice::SaveFailed {
                reason: e.to_string(),
            }
        }
    }
}
