//! Error types for place search and postal code lookup.

use thiserror::Error;

/// Errors that can occur while fetching a page of search results.
#[derive(Debug, Error)]
pub enum PlaceSearchError {
    /// Network communication error occurred during search.
    #[error("Network error: {reason}")]
    NetworkError {
        /// The reason for the network error
        reason: String,
    },

    /// Search service answered with a non-success status.
    #[error("Search failed for query '{query}': {reason}")]
    SearchFailed {
        /// The search query that failed
        query: String,
        /// The reason for the failure
        reason: String,
    },

    /// Failed to parse the search response.
    #[error("Parse error: {reason}")]
    ParseError {
        /// The reason for the parse error
        reason: String,
    },

    /// The search session task is no longer running.
    #[error("Search session closed")]
    SessionClosed,
}

/// Errors that can occur while resolving a postal code.
///
/// These never leave the enricher: a failed lookup degrades to an empty code.
#[derive(Debug, Error)]
pub enum PostalLookupError {
    /// Network communication error occurred during lookup.
    #[error("Network error: {reason}")]
    NetworkError {
        /// The reason for the network error
        reason: String,
    },

    /// Failed to parse the XML response.
    #[error("Parse error: {reason}")]
    ParseError {
        /// The reason for the parse error
        reason: String,
    },

    /// The response contained no `zipNo` element.
    #[error("No zipNo element in response")]
    ZipCodeMissing,
}
