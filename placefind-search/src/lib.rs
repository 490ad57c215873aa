//! Placefind Search - Keyword place search with postal code enrichment

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Queries the Kakao Local keyword search one page at a time, resolves a
//! postal code for every place through the ePost address API, and caches the
//! accumulated pages so previously visited pages are replayed without
//! touching the network.

pub mod context;
pub mod enrichment;
pub mod errors;
pub mod pagination;
pub mod providers;
pub mod session;
pub mod types;

// Re-export main types
pub use context::ServiceContext;
pub use enrichment::{EpostLookup, PostalCodeLookup};
pub use errors::{PlaceSearchError, PostalLookupError};
pub use pagination::{PAGE_SIZE, PaginationCache, SearchSession};
pub use placefind_core::{Notice, SearchResult};
pub use providers::{KakaoProvider, PlaceSearchProvider};
pub use session::{SearchSessionHandle, spawn_search_session};
pub use types::{DisplayBatch, SearchPage};
