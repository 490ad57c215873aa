//! Provider implementations for keyword place search.

use async_trait::async_trait;

use crate::errors::PlaceSearchError;
use crate::types::SearchPage;

pub mod kakao;
#[cfg(test)]
pub mod mock;

pub use kakao::KakaoProvider;
#[cfg(test)]
pub use mock::MockProvider;

/// Trait for keyword place search providers.
///
/// Implementations fetch a single page and return it fully enriched, or fail
/// without returning any rows.
#[async_trait]
pub trait PlaceSearchProvider: Send + Sync + std::fmt::Debug {
    /// Fetches one 1-based page of results for `keyword`.
    ///
    /// # Errors
    /// - `PlaceSearchError::NetworkError` - Network connectivity issues
    /// - `PlaceSearchError::SearchFailed` - Service rejected the request
    /// - `PlaceSearchError::ParseError` - Response could not be understood
    async fn fetch_page(&self, keyword: &str, page: u32) -> Result<SearchPage, PlaceSearchError>;
}

#[async_trait]
impl<T: PlaceSearchProvider + ?Sized> PlaceSearchProvider for std::sync::Arc<T> {
    async fn fetch_page(&self, keyword: &str, page: u32) -> Result<SearchPage, PlaceSearchError> {
        (**self).fetch_page(keyword, page).await
    }
}
