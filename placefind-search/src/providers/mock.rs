//! Mock provider implementation for testing.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use placefind_core::SearchResult;

use super::PlaceSearchProvider;
use crate::errors::PlaceSearchError;
use crate::pagination::PAGE_SIZE;
use crate::types::SearchPage;

/// Mock provider serving a fixed number of synthetic results per keyword.
///
/// Records every request so tests can assert whether the network would have
/// been touched.
#[derive(Debug)]
pub struct MockProvider {
    total_results: u32,
    failures_remaining: AtomicU32,
    requests: Mutex<Vec<(String, u32)>>,
}

impl MockProvider {
    /// Creates a provider reporting `total_results` matches for any keyword.
    pub fn new(total_results: u32) -> Self {
        Self {
            total_results,
            failures_remaining: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Makes the next `count` requests fail with a network error.
    pub fn fail_next(&self, count: u32) {
        self.failures_remaining.store(count, Ordering::SeqCst);
    }

    /// Requests received so far as `(keyword, page)` pairs.
    pub fn requests(&self) -> Vec<(String, u32)> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests().len()
    }

    /// The row the provider returns at a 0-based overall position.
    pub fn expected_row(keyword: &str, index: u32) -> SearchResult {
        SearchResult::new(
            format!("{keyword} {}", index + 1),
            format!("{:05}", 10_000 + index),
            format!("지번 {}", index + 1),
            if index % 3 == 2 {
                String::new()
            } else {
                format!("도로명 {}", index + 1)
            },
        )
    }
}

#[async_trait]
impl PlaceSearchProvider for MockProvider {
    async fn fetch_page(&self, keyword: &str, page: u32) -> Result<SearchPage, PlaceSearchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((keyword.to_string(), page));
        }

        let failing = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(PlaceSearchError::NetworkError {
                reason: "mock network failure".to_string(),
            });
        }

        let page_size = PAGE_SIZE as u32;
        let start = page.saturating_sub(1) * page_size;
        let end = (start + page_size).min(self.total_results);

        Ok(SearchPage {
            rows: (start..end)
                .map(|index| Self::expected_row(keyword, index))
                .collect(),
            total_count: self.total_results,
            is_end: end >= self.total_results,
        })
    }
}
