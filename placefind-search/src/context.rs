//! Process-wide service context.
//!
//! Built once at startup. Holds the configuration and the HTTP client shared
//! by the search provider and the postal code lookup.

use placefind_core::{PlacefindConfig, XlsxSink};

use crate::enrichment::EpostLookup;
use crate::errors::PlaceSearchError;
use crate::pagination::PaginationCache;
use crate::providers::KakaoProvider;
use crate::session::{SearchSessionHandle, spawn_search_session};

/// Configuration plus shared HTTP client.
#[derive(Debug, Clone)]
pub struct ServiceContext {
    config: PlacefindConfig,
    client: reqwest::Client,
}

impl ServiceContext {
    /// Builds the shared HTTP client from the network configuration.
    ///
    /// # Errors
    /// - `PlaceSearchError::NetworkError` - The HTTP client could not be built
    pub fn new(config: PlacefindConfig) -> Result<Self, PlaceSearchError> {
        let client = reqwest::Client::builder()
            .timeout(config.network.request_timeout)
            .user_agent(config.network.user_agent)
            .build()
            .map_err(|e| PlaceSearchError::NetworkError {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { config, client })
    }

    /// Configuration the context was built from.
    pub fn config(&self) -> &PlacefindConfig {
        &self.config
    }

    /// ePost lookup using the configured URL.
    pub fn postal_lookup(&self) -> EpostLookup {
        EpostLookup::new(
            self.client.clone(),
            self.config.credentials.postal_lookup_url.clone(),
        )
    }

    /// Kakao provider enriching results through the ePost lookup.
    pub fn search_provider(&self) -> KakaoProvider {
        KakaoProvider::new(
            self.client.clone(),
            self.config.network.search_endpoint.clone(),
            self.config.credentials.search_api_key.clone(),
            Box::new(self.postal_lookup()),
        )
    }

    /// Spreadsheet sink writing to the configured export path.
    pub fn export_sink(&self) -> XlsxSink {
        XlsxSink::new(
            self.config.export.output_path.clone(),
            self.config.export.sheet_name,
        )
    }

    /// Empty pagination cache backed by the production provider.
    pub fn pagination_cache(&self) -> PaginationCache {
        PaginationCache::new(Box::new(self.search_provider()))
    }

    /// Spawns the session actor wired to the production provider and sink.
    pub fn spawn_session(&self) -> SearchSessionHandle {
        spawn_search_session(self.pagination_cache(), Box::new(self.export_sink()))
    }
}
