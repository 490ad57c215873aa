//! Data types for place search functionality.

use placefind_core::{Notice, SearchResult};

/// One page of results as returned by the search service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    /// Enriched results in service order
    pub rows: Vec<SearchResult>,
    /// Total number of matches reported by the service
    pub total_count: u32,
    /// Whether the service has no further pages
    pub is_end: bool,
}

/// What the presentation layer renders after a page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayBatch {
    /// Page fetched from the search service just now.
    Fetched {
        /// 1-based page number
        page: u32,
        /// Rows of this page
        rows: Vec<SearchResult>,
        /// Total number of matches reported by the service
        total_count: u32,
        /// Whether this was the last page
        is_end: bool,
    },
    /// Page replayed from the session cache.
    Cached {
        /// 1-based page number
        page: u32,
        /// Rows of this page
        rows: Vec<SearchResult>,
    },
    /// Message shown instead of rows.
    Notice(Notice),
}

impl DisplayBatch {
    /// Rows carried by the batch, empty for notices.
    pub fn rows(&self) -> &[SearchResult] {
        match self {
            DisplayBatch::Fetched { rows, .. } | DisplayBatch::Cached { rows, .. } => rows,
            DisplayBatch::Notice(_) => &[],
        }
    }

    /// Page number carried by the batch, `None` for notices.
    pub fn page(&self) -> Option<u32> {
        match self {
            DisplayBatch::Fetched { page, .. } | DisplayBatch::Cached { page, .. } => Some(*page),
            DisplayBatch::Notice(_) => None,
        }
    }

    /// Notice carried by the batch, if any.
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            DisplayBatch::Notice(notice) => Some(notice),
            _ => None,
        }
    }
}

impl std::fmt::Display for DisplayBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayBatch::Fetched {
                page,
                rows,
                total_count,
                is_end,
            } => {
                writeln!(f, "page: {page}")?;
                writeln!(f, "total_count: {total_count}")?;
                writeln!(f, "is_end: {is_end}")?;
                for row in rows {
                    writeln!(f, "{row}\n")?;
                }
                Ok(())
            }
            DisplayBatch::Cached { page, rows } => {
                writeln!(f, "page: {page}")?;
                for row in rows {
                    writeln!(f, "{row}\n")?;
                }
                Ok(())
            }
            DisplayBatch::Notice(notice) => writeln!(f, "{notice}"),
        }
    }
}
