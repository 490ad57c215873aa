//! Actor implementation for the search session.

use placefind_core::{SpreadsheetSink, export_results};
use tokio::sync::mpsc;

use super::commands::SearchSessionCommand;
use super::handle::SearchSessionHandle;
use crate::pagination::PaginationCache;

/// Spawns the search session actor and returns its handle.
///
/// The actor owns the pagination cache and the export sink and processes
/// commands strictly one at a time.
pub fn spawn_search_session(
    cache: PaginationCache,
    sink: Box<dyn SpreadsheetSink>,
) -> SearchSessionHandle {
    let (sender, receiver) = mpsc::channel(32);

    tokio::spawn(async move {
        run_actor_loop(cache, sink, receiver).await;
    });

    SearchSessionHandle::new(sender)
}

async fn run_actor_loop(
    mut cache: PaginationCache,
    sink: Box<dyn SpreadsheetSink>,
    mut receiver: mpsc::Receiver<SearchSessionCommand>,
) {
    tracing::debug!("Search session actor started");

    while let Some(command) = receiver.recv().await {
        if !handle_command(&mut cache, sink.as_ref(), command).await {
            break;
        }
    }

    tracing::debug!("Search session actor stopped");
}

/// Handles a single command.
/// Returns true to continue processing, false to shutdown.
async fn handle_command(
    cache: &mut PaginationCache,
    sink: &dyn SpreadsheetSink,
    command: SearchSessionCommand,
) -> bool {
    match command {
        SearchSessionCommand::RequestPage {
            keyword,
            page,
            responder,
        } => {
            let batch = cache.request_page(&keyword, page).await;
            let _ = responder.send(batch);
        }

        SearchSessionCommand::NextPage { keyword, responder } => {
            let batch = cache.next_page(&keyword).await;
            let _ = responder.send(batch);
        }

        SearchSessionCommand::PreviousPage { keyword, responder } => {
            let batch = cache.previous_page(&keyword).await;
            let _ = responder.send(batch);
        }

        SearchSessionCommand::Export { responder } => {
            let notice = export_results(sink, cache.results());
            let _ = responder.send(notice);
        }

        SearchSessionCommand::Snapshot { responder } => {
            let _ = responder.send(cache.session().clone());
        }

        SearchSessionCommand::Shutdown { responder } => {
            tracing::debug!("Search session actor shutting down");
            let _ = responder.send(());
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use placefind_core::{Notice, XlsxSink};

    use super::*;
    use crate::errors::PlaceSearchError;
    use crate::providers::MockProvider;
    use crate::types::DisplayBatch;

    fn spawn_with(total_results: u32, export_path: &std::path::Path) -> (SearchSessionHandle, Arc<MockProvider>) {
        let provider = Arc::new(MockProvider::new(total_results));
        let cache = PaginationCache::new(Box::new(Arc::clone(&provider)));
        let handle = spawn_search_session(cache, Box::new(XlsxSink::new(export_path, "검색결과")));
        (handle, provider)
    }

    #[tokio::test]
    async fn test_actor_navigation_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let (handle, provider) = spawn_with(45, &dir.path().join("out.xlsx"));

        let first = handle.request_page("coffee", 1).await.unwrap();
        let second = handle.next_page("coffee").await.unwrap();
        let back = handle.previous_page("coffee").await.unwrap();

        assert!(matches!(first, DisplayBatch::Fetched { page: 1, .. }));
        assert!(matches!(second, DisplayBatch::Fetched { page: 2, .. }));
        assert_eq!(
            back,
            DisplayBatch::Cached {
                page: 1,
                rows: first.rows().to_vec()
            }
        );
        assert_eq!(provider.request_count(), 2);

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.current_page(), 1);
        assert_eq!(snapshot.max_page_fetched(), 2);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_actor_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let (handle, _provider) = spawn_with(3, &path);

        assert_eq!(handle.export().await.unwrap(), Notice::NoDataToSave);
        assert!(!path.exists());

        handle.request_page("coffee", 1).await.unwrap();
        assert_eq!(
            handle.export().await.unwrap(),
            Notice::Saved { path: path.clone() }
        );
        assert!(path.exists());

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_requests_are_serialized() {
        let dir = tempfile::tempdir().unwrap();
        let (handle, provider) = spawn_with(100, &dir.path().join("out.xlsx"));

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let handle = handle.clone();
                tokio::spawn(async move { handle.next_page("coffee").await.unwrap() })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        // Each request advanced the cursor exactly once, one after another.
        let pages: Vec<u32> = provider.requests().iter().map(|(_, page)| *page).collect();
        assert_eq!(pages, vec![1, 2, 3, 4]);
        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.results().len(), 60);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_handle_after_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let (handle, _provider) = spawn_with(15, &dir.path().join("out.xlsx"));

        handle.shutdown().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        let result = handle.request_page("coffee", 1).await;
        assert!(matches!(result, Err(PlaceSearchError::SessionClosed)));
        assert!(matches!(
            handle.export().await,
            Err(PlaceSearchError::SessionClosed)
        ));
    }
}
