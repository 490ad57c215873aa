//! Page cache for keyword searches.
//!
//! A session accumulates every page fetched for the committed keyword.
//! Pages already fetched are replayed from memory; only the page right after
//! the last fetched one goes to the network.

use placefind_core::{Notice, SearchResult};

use crate::providers::PlaceSearchProvider;
use crate::types::{DisplayBatch, SearchPage};

/// Rows per page served by the search service.
pub const PAGE_SIZE: usize = 15;

/// Accumulated state of one keyword's search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSession {
    keyword: String,
    current_page: u32,
    max_page_fetched: u32,
    is_end: bool,
    results: Vec<SearchResult>,
    /// Start index into `results` of every fetched page, in page order.
    page_offsets: Vec<usize>,
}

impl SearchSession {
    /// Committed keyword; empty when no search is active.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Whether a keyword has been committed.
    pub fn is_active(&self) -> bool {
        !self.keyword.is_empty()
    }

    /// Last page shown, 0 before the first fetch.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Highest page fetched and cached.
    pub fn max_page_fetched(&self) -> u32 {
        self.max_page_fetched
    }

    /// Whether the service reported that no further pages exist.
    pub fn is_end(&self) -> bool {
        self.is_end
    }

    /// Every cached row in arrival order.
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Cached rows of a 1-based page.
    ///
    /// Bounds are clamped, so a short page (or a page outside the cache)
    /// yields fewer rows instead of reading past the end.
    pub fn page_rows(&self, page: u32) -> &[SearchResult] {
        if page == 0 || page > self.max_page_fetched {
            return &[];
        }

        let index = (page - 1) as usize;
        let len = self.results.len();
        let start = self.page_offsets.get(index).copied().unwrap_or(len).min(len);
        let end = self
            .page_offsets
            .get(index + 1)
            .copied()
            .unwrap_or(len)
            .clamp(start, len);

        &self.results[start..end]
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Appends a freshly fetched page.
    ///
    /// Only the page following `max_page_fetched` extends the cache; a page
    /// that is already cached just moves the cursor.
    fn record_page(&mut self, keyword: &str, page: u32, fetched: &SearchPage) {
        if page == self.max_page_fetched + 1 {
            self.page_offsets.push(self.results.len());
            self.results.extend(fetched.rows.iter().cloned());
            self.max_page_fetched = page;
        }

        self.keyword = keyword.to_string();
        self.is_end = self.is_end || fetched.is_end;
        self.current_page = page;
    }
}

/// Decides for every page request whether to replay the cache, fetch from
/// the provider, or answer with a notice.
#[derive(Debug)]
pub struct PaginationCache {
    provider: Box<dyn PlaceSearchProvider>,
    session: SearchSession,
}

impl PaginationCache {
    /// Creates a cache with an empty session.
    pub fn new(provider: Box<dyn PlaceSearchProvider>) -> Self {
        Self {
            provider,
            session: SearchSession::default(),
        }
    }

    /// Current session state.
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Every cached row in arrival order.
    pub fn results(&self) -> &[SearchResult] {
        self.session.results()
    }

    /// Serves `target_page` for the keyword currently typed by the user.
    ///
    /// A keyword different from the committed one discards the session and
    /// restarts at page 1. Failed fetches leave the session untouched and are
    /// reported as `Notice::SearchFailed`.
    pub async fn request_page(&mut self, input_keyword: &str, target_page: u32) -> DisplayBatch {
        let input_keyword = input_keyword.trim();

        if target_page == 0 {
            return DisplayBatch::Notice(Notice::FirstPage);
        }

        let mut target_page = target_page;
        if input_keyword != self.session.keyword {
            if self.session.is_active() {
                tracing::debug!(
                    "Keyword changed from '{}' to '{}', clearing {} cached rows",
                    self.session.keyword,
                    input_keyword,
                    self.session.results.len()
                );
            }
            self.session.reset();
            target_page = 1;
        }

        if self.session.is_end && target_page > self.session.max_page_fetched {
            return DisplayBatch::Notice(Notice::LastPage);
        }

        if target_page <= self.session.max_page_fetched {
            self.session.current_page = target_page;
            return DisplayBatch::Cached {
                page: target_page,
                rows: self.session.page_rows(target_page).to_vec(),
            };
        }

        if input_keyword.is_empty() {
            return DisplayBatch::Notice(Notice::EmptyKeyword);
        }

        // Pages are cached contiguously, so never skip ahead of the cache.
        let target_page = target_page.min(self.session.max_page_fetched + 1);

        match self.provider.fetch_page(input_keyword, target_page).await {
            Ok(fetched) => {
                self.session
                    .record_page(input_keyword, target_page, &fetched);
                tracing::info!(
                    "Fetched page {} for '{}' ({} rows, {} cached)",
                    target_page,
                    input_keyword,
                    fetched.rows.len(),
                    self.session.results.len()
                );
                DisplayBatch::Fetched {
                    page: target_page,
                    rows: fetched.rows,
                    total_count: fetched.total_count,
                    is_end: fetched.is_end,
                }
            }
            Err(e) => {
                tracing::debug!("Page {} for '{}' not cached: {}", target_page, input_keyword, e);
                DisplayBatch::Notice(Notice::SearchFailed {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Serves the page after the current one.
    pub async fn next_page(&mut self, input_keyword: &str) -> DisplayBatch {
        let target = self.session.current_page + 1;
        self.request_page(input_keyword, target).await
    }

    /// Serves the page before the current one.
    pub async fn previous_page(&mut self, input_keyword: &str) -> DisplayBatch {
        let target = self.session.current_page.saturating_sub(1);
        self.request_page(input_keyword, target).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;

    use super::*;
    use crate::providers::MockProvider;

    fn cache_with(total_results: u32) -> (PaginationCache, Arc<MockProvider>) {
        let provider = Arc::new(MockProvider::new(total_results));
        let cache = PaginationCache::new(Box::new(Arc::clone(&provider)));
        (cache, provider)
    }

    #[tokio::test]
    async fn test_first_page_fetches_from_network() {
        let (mut cache, provider) = cache_with(45);

        let batch = cache.request_page("coffee", 1).await;

        match batch {
            DisplayBatch::Fetched {
                page,
                rows,
                total_count,
                is_end,
            } => {
                assert_eq!(page, 1);
                assert_eq!(rows.len(), PAGE_SIZE);
                assert_eq!(total_count, 45);
                assert!(!is_end);
            }
            other => panic!("expected fetched batch, got {other:?}"),
        }
        assert_eq!(provider.requests(), vec![("coffee".to_string(), 1)]);

        let session = cache.session();
        assert_eq!(session.keyword(), "coffee");
        assert_eq!(session.max_page_fetched(), 1);
        assert_eq!(session.current_page(), 1);
        assert!(!session.is_end());
    }

    #[tokio::test]
    async fn test_cached_page_is_replayed_without_network() {
        let (mut cache, provider) = cache_with(45);
        let first = cache.request_page("coffee", 1).await;

        let again = cache.request_page("coffee", 1).await;

        assert_eq!(provider.request_count(), 1);
        assert_eq!(
            again,
            DisplayBatch::Cached {
                page: 1,
                rows: first.rows().to_vec()
            }
        );
    }

    #[tokio::test]
    async fn test_backward_and_forward_navigation_uses_cache() {
        let (mut cache, provider) = cache_with(45);
        cache.next_page("coffee").await;
        cache.next_page("coffee").await;
        assert_eq!(provider.request_count(), 2);

        let back = cache.previous_page("coffee").await;
        assert!(matches!(back, DisplayBatch::Cached { page: 1, .. }));
        assert_eq!(cache.session().current_page(), 1);

        let forward = cache.next_page("coffee").await;
        assert!(matches!(forward, DisplayBatch::Cached { page: 2, .. }));
        assert_eq!(forward.rows(), cache.session().page_rows(2));
        assert_eq!(provider.request_count(), 2);
    }

    #[tokio::test]
    async fn test_new_keyword_resets_session() {
        let (mut cache, provider) = cache_with(45);
        cache.request_page("coffee", 1).await;
        cache.request_page("coffee", 2).await;

        let batch = cache.request_page("tea", 3).await;

        assert!(matches!(batch, DisplayBatch::Fetched { page: 1, .. }));
        assert_eq!(batch.rows()[0], MockProvider::expected_row("tea", 0));
        assert_eq!(provider.requests().last(), Some(&("tea".to_string(), 1)));

        let session = cache.session();
        assert_eq!(session.keyword(), "tea");
        assert_eq!(session.max_page_fetched(), 1);
        assert_eq!(session.results().len(), PAGE_SIZE);
        assert!(!session.is_end());
    }

    #[tokio::test]
    async fn test_page_zero_is_first_page_notice() {
        let (mut cache, provider) = cache_with(45);
        cache.request_page("coffee", 1).await;
        let before = cache.session().clone();

        assert_eq!(
            cache.request_page("coffee", 0).await,
            DisplayBatch::Notice(Notice::FirstPage)
        );
        assert_eq!(
            cache.request_page("something else", 0).await,
            DisplayBatch::Notice(Notice::FirstPage)
        );
        assert_eq!(cache.previous_page("coffee").await.notice(), Some(&Notice::FirstPage));

        assert_eq!(cache.session(), &before);
        assert_eq!(provider.request_count(), 1);
    }

    #[tokio::test]
    async fn test_last_page_is_sticky() {
        let (mut cache, provider) = cache_with(20);
        cache.request_page("coffee", 1).await;
        let last = cache.request_page("coffee", 2).await;
        assert!(matches!(last, DisplayBatch::Fetched { is_end: true, .. }));
        assert_eq!(last.rows().len(), 5);

        assert_eq!(
            cache.next_page("coffee").await,
            DisplayBatch::Notice(Notice::LastPage)
        );
        assert_eq!(
            cache.request_page("coffee", 7).await,
            DisplayBatch::Notice(Notice::LastPage)
        );
        assert_eq!(provider.request_count(), 2);
        assert_eq!(cache.session().current_page(), 2);
    }

    #[tokio::test]
    async fn test_short_last_page_is_sliced_exactly() {
        let (mut cache, _provider) = cache_with(20);
        cache.request_page("coffee", 1).await;
        cache.request_page("coffee", 2).await;

        let replay = cache.request_page("coffee", 2).await;

        assert_eq!(replay.rows().len(), 5);
        assert_eq!(replay.rows(), &cache.results()[15..20]);
    }

    #[tokio::test]
    async fn test_empty_keyword_notice() {
        let (mut cache, provider) = cache_with(45);

        assert_eq!(
            cache.request_page("   ", 1).await,
            DisplayBatch::Notice(Notice::EmptyKeyword)
        );
        assert_eq!(provider.request_count(), 0);
        assert_eq!(cache.session(), &SearchSession::default());
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_state_unchanged() {
        let (mut cache, provider) = cache_with(45);
        cache.request_page("coffee", 1).await;
        let before = cache.session().clone();

        provider.fail_next(1);
        let batch = cache.next_page("coffee").await;

        assert!(matches!(
            batch,
            DisplayBatch::Notice(Notice::SearchFailed { .. })
        ));
        assert_eq!(cache.session(), &before);

        // The same page can be retried afterwards.
        let retry = cache.next_page("coffee").await;
        assert!(matches!(retry, DisplayBatch::Fetched { page: 2, .. }));
    }

    #[tokio::test]
    async fn test_failed_fetch_for_new_keyword_does_not_commit_it() {
        let (mut cache, provider) = cache_with(45);
        cache.request_page("coffee", 1).await;

        provider.fail_next(1);
        cache.request_page("tea", 1).await;

        assert!(!cache.session().is_active());
        assert!(cache.results().is_empty());
    }

    #[tokio::test]
    async fn test_skipping_ahead_fetches_next_uncached_page() {
        let (mut cache, provider) = cache_with(100);
        cache.request_page("coffee", 1).await;

        let batch = cache.request_page("coffee", 4).await;

        assert_eq!(batch.page(), Some(2));
        assert_eq!(provider.requests().last(), Some(&("coffee".to_string(), 2)));
    }

    #[tokio::test]
    async fn test_keyword_is_trimmed() {
        let (mut cache, provider) = cache_with(45);
        cache.request_page("  coffee ", 1).await;

        cache.request_page("coffee", 1).await;

        assert_eq!(provider.request_count(), 1);
        assert_eq!(cache.session().keyword(), "coffee");
    }

    fn session_with_pages(page_sizes: &[usize]) -> SearchSession {
        let mut session = SearchSession::default();
        let mut index = 0u32;
        for (i, size) in page_sizes.iter().enumerate() {
            let rows = (0..*size)
                .map(|_| {
                    index += 1;
                    MockProvider::expected_row("k", index)
                })
                .collect();
            let page = SearchPage {
                rows,
                total_count: 0,
                is_end: i + 1 == page_sizes.len(),
            };
            session.record_page("k", i as u32 + 1, &page);
        }
        session
    }

    proptest! {
        #[test]
        fn prop_cached_slice_matches_page_arithmetic(full_pages in 0usize..6, last in 0usize..=PAGE_SIZE) {
            let mut sizes = vec![PAGE_SIZE; full_pages];
            sizes.push(last);
            let session = session_with_pages(&sizes);

            for page in 1..=session.max_page_fetched() {
                let start = (page as usize - 1) * PAGE_SIZE;
                let end = (page as usize * PAGE_SIZE).min(session.results().len());
                prop_assert_eq!(session.page_rows(page), &session.results()[start..end]);
            }
            prop_assert!(session.page_rows(session.max_page_fetched() + 1).is_empty());
        }

        #[test]
        fn prop_uneven_pages_never_overlap(sizes in proptest::collection::vec(0usize..=PAGE_SIZE, 1..8)) {
            let session = session_with_pages(&sizes);

            let replayed: Vec<SearchResult> = (1..=session.max_page_fetched())
                .flat_map(|page| session.page_rows(page).to_vec())
                .collect();
            prop_assert_eq!(replayed.as_slice(), session.results());
        }
    }
}
