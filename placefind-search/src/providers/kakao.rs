//! Kakao Local keyword search provider.

use async_trait::async_trait;
use placefind_core::SearchResult;
use serde::Deserialize;

use super::PlaceSearchProvider;
use crate::enrichment::PostalCodeLookup;
use crate::errors::PlaceSearchError;
use crate::types::SearchPage;

/// Kakao keyword search provider.
///
/// Every document of a page is enriched with its postal code before the page
/// is returned. Lookups run one after another so rows keep the order the
/// service returned them in.
#[derive(Debug)]
pub struct KakaoProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    postal_lookup: Box<dyn PostalCodeLookup>,
}

/// Response from the keyword search endpoint.
#[derive(Debug, Deserialize)]
struct KakaoResponse {
    meta: KakaoMeta,
    documents: Vec<KakaoDocument>,
}

/// Page metadata. Values arrive either as JSON scalars or as strings.
#[derive(Debug, Deserialize)]
struct KakaoMeta {
    is_end: FlexibleBool,
    total_count: FlexibleCount,
}

/// Single place document.
#[derive(Debug, Deserialize)]
struct KakaoDocument {
    place_name: String,
    address_name: String,
    road_address_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FlexibleBool {
    Bool(bool),
    Text(String),
}

impl FlexibleBool {
    fn value(&self) -> Result<bool, PlaceSearchError> {
        match self {
            FlexibleBool::Bool(value) => Ok(*value),
            FlexibleBool::Text(text) => match text.trim() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(PlaceSearchError::ParseError {
                    reason: format!("meta.is_end is not a boolean: {other:?}"),
                }),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FlexibleCount {
    Number(u32),
    Text(String),
}

impl FlexibleCount {
    fn value(&self) -> Result<u32, PlaceSearchError> {
        match self {
            FlexibleCount::Number(value) => Ok(*value),
            FlexibleCount::Text(text) => {
                text.trim()
                    .parse()
                    .map_err(|e| PlaceSearchError::ParseError {
                        reason: format!("meta.total_count is not a count: {text:?} ({e})"),
                    })
            }
        }
    }
}

impl KakaoProvider {
    /// Creates a provider for the given endpoint and REST API key.
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        postal_lookup: Box<dyn PostalCodeLookup>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            postal_lookup,
        }
    }

    /// Decodes a response body into metadata and raw documents.
    fn parse_response(body: &str) -> Result<(bool, u32, Vec<KakaoDocument>), PlaceSearchError> {
        let response: KakaoResponse =
            serde_json::from_str(body).map_err(|e| PlaceSearchError::ParseError {
                reason: format!("Kakao JSON parsing failed: {e}"),
            })?;

        Ok((
            response.meta.is_end.value()?,
            response.meta.total_count.value()?,
            response.documents,
        ))
    }

    async fn enrich(&self, documents: Vec<KakaoDocument>) -> Vec<SearchResult> {
        let mut rows = Vec::with_capacity(documents.len());

        for document in documents {
            let address =
                SearchResult::lookup_address(&document.address_name, &document.road_address_name);
            let postal_code = self.postal_lookup.lookup_postal_code(address).await;

            rows.push(SearchResult {
                name: document.place_name,
                postal_code,
                lot_address: document.address_name,
                road_address: document.road_address_name,
            });
        }

        rows
    }

    async fn fetch_body(&self, keyword: &str, page: u32) -> Result<String, PlaceSearchError> {
        let url = format!(
            "{}?query={}&page={}",
            self.endpoint,
            urlencoding::encode(keyword),
            page
        );

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, format!("KakaoAK {}", self.api_key))
            .send()
            .await
            .map_err(|e| PlaceSearchError::NetworkError {
                reason: format!("Kakao request failed: {e}"),
            })?;

        if !response.status().is_success() {
            return Err(PlaceSearchError::SearchFailed {
                query: keyword.to_string(),
                reason: format!("Kakao HTTP {}", response.status()),
            });
        }

        response
            .text()
            .await
            .map_err(|e| PlaceSearchError::NetworkError {
                reason: format!("Kakao body read failed: {e}"),
            })
    }
}

#[async_trait]
impl PlaceSearchProvider for KakaoProvider {
    async fn fetch_page(&self, keyword: &str, page: u32) -> Result<SearchPage, PlaceSearchError> {
        let result = self
            .fetch_body(keyword, page)
            .await
            .and_then(|body| Self::parse_response(&body));

        let (is_end, total_count, documents) = match result {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!(keyword, page, error = %e, "Kakao keyword search failed");
                return Err(e);
            }
        };

        tracing::debug!(
            "Kakao page {} for '{}': {} documents, total_count={}, is_end={}",
            page,
            keyword,
            documents.len(),
            total_count,
            is_end
        );

        Ok(SearchPage {
            rows: self.enrich(documents).await,
            total_count,
            is_end,
        })
    }
}
