//! End-to-end search, paging and export through the session handle.

use placefind_core::PlacefindConfig;
use placefind_search::{DisplayBatch, Notice, PAGE_SIZE, ServiceContext};

use super::stub_servers::{StubServer, StubState};

fn context_for(server: &StubServer, export_dir: &std::path::Path) -> ServiceContext {
    let mut config = PlacefindConfig::for_testing(&server.search_endpoint(), &server.postal_url());
    config.export.output_path = export_dir.join("검색결과.xlsx");
    ServiceContext::new(config).unwrap()
}

#[tokio::test]
async fn test_paging_hits_network_once_per_page() {
    let server = StubServer::start(StubState::with_total(40)).await;
    let dir = tempfile::tempdir().unwrap();
    let session = context_for(&server, dir.path()).spawn_session();

    let first = session.request_page("coffee", 1).await.unwrap();
    let second = session.next_page("coffee").await.unwrap();
    let back = session.previous_page("coffee").await.unwrap();
    let forward = session.next_page("coffee").await.unwrap();

    assert!(matches!(first, DisplayBatch::Fetched { page: 1, .. }));
    assert!(matches!(second, DisplayBatch::Fetched { page: 2, .. }));
    assert_eq!(back.rows(), first.rows());
    assert_eq!(forward.rows(), second.rows());
    assert_eq!(
        server.state.search_requests(),
        vec![("coffee".to_string(), 1), ("coffee".to_string(), 2)]
    );
    assert_eq!(server.state.postal_requests().len(), 2 * PAGE_SIZE);

    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_last_page_then_keyword_change() {
    let server = StubServer::start(StubState::with_total(18)).await;
    let dir = tempfile::tempdir().unwrap();
    let session = context_for(&server, dir.path()).spawn_session();

    session.request_page("coffee", 1).await.unwrap();
    let last = session.next_page("coffee").await.unwrap();
    assert!(matches!(last, DisplayBatch::Fetched { is_end: true, .. }));
    assert_eq!(last.rows().len(), 3);

    assert_eq!(
        session.next_page("coffee").await.unwrap(),
        DisplayBatch::Notice(Notice::LastPage)
    );
    assert_eq!(server.state.search_requests().len(), 2);

    let tea = session.next_page("tea").await.unwrap();
    assert!(matches!(tea, DisplayBatch::Fetched { page: 1, .. }));
    let snapshot = session.snapshot().await.unwrap();
    assert_eq!(snapshot.keyword(), "tea");
    assert_eq!(snapshot.results().len(), PAGE_SIZE);
    assert!(!snapshot.is_end());

    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_outage_keeps_cached_pages() {
    let server = StubServer::start(StubState::with_total(40)).await;
    let dir = tempfile::tempdir().unwrap();
    let session = context_for(&server, dir.path()).spawn_session();

    session.request_page("coffee", 1).await.unwrap();
    let before = session.snapshot().await.unwrap();

    server.state.set_search_down(true);
    let failed = session.next_page("coffee").await.unwrap();
    assert!(matches!(
        failed,
        DisplayBatch::Notice(Notice::SearchFailed { .. })
    ));
    assert_eq!(session.snapshot().await.unwrap(), before);

    // Cached page still replays during the outage.
    let replay = session.request_page("coffee", 1).await.unwrap();
    assert!(matches!(replay, DisplayBatch::Cached { page: 1, .. }));

    server.state.set_search_down(false);
    let recovered = session.next_page("coffee").await.unwrap();
    assert!(matches!(recovered, DisplayBatch::Fetched { page: 2, .. }));

    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_export_workflow() {
    let server = StubServer::start(StubState::with_total(3)).await;
    let dir = tempfile::tempdir().unwrap();
    let context = context_for(&server, dir.path());
    let export_path = context.config().export.output_path.clone();
    let session = context.spawn_session();

    assert_eq!(session.export().await.unwrap(), Notice::NoDataToSave);
    assert!(!export_path.exists());

    let page = session.request_page("coffee", 1).await.unwrap();
    assert_eq!(page.rows().len(), 3);

    assert_eq!(
        session.export().await.unwrap(),
        Notice::Saved {
            path: export_path.clone()
        }
    );
    let bytes = std::fs::read(&export_path).unwrap();
    assert_eq!(&bytes[..2], b"PK");

    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_keyword_never_reaches_network() {
    let server = StubServer::start(StubState::with_total(3)).await;
    let dir = tempfile::tempdir().unwrap();
    let session = context_for(&server, dir.path()).spawn_session();

    assert_eq!(
        session.request_page("  ", 1).await.unwrap(),
        DisplayBatch::Notice(Notice::EmptyKeyword)
    );
    assert!(server.state.search_requests().is_empty());

    session.shutdown().await.unwrap();
}
