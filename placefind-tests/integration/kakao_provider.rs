//! Kakao provider against the stand-in search service.

use placefind_search::{EpostLookup, KakaoProvider, PlaceSearchError, PlaceSearchProvider};

use super::stub_servers::{
    API_KEY, StubServer, StubState, lot_address, postal_code_for, road_address,
};

fn provider_for(server: &StubServer, api_key: &str) -> KakaoProvider {
    let client = reqwest::Client::new();
    KakaoProvider::new(
        client.clone(),
        server.search_endpoint(),
        api_key,
        Box::new(EpostLookup::new(client, server.postal_url())),
    )
}

#[tokio::test]
async fn test_fetch_page_enriches_every_document() {
    let server = StubServer::start(StubState::with_total(20)).await;
    let provider = provider_for(&server, API_KEY);

    let page = provider.fetch_page("강남 카페", 1).await.unwrap();

    assert_eq!(page.total_count, 20);
    assert!(!page.is_end);
    assert_eq!(page.rows.len(), 15);
    assert_eq!(page.rows[0].name, "강남 카페 1");
    assert_eq!(page.rows[0].road_address, road_address(0));
    assert_eq!(page.rows[0].postal_code, postal_code_for(&road_address(0)));

    // Fifth document has no road address; the lot address is looked up instead.
    assert_eq!(page.rows[4].road_address, "");
    assert_eq!(page.rows[4].postal_code, postal_code_for(&lot_address(4)));

    assert_eq!(
        server.state.search_requests(),
        vec![("강남 카페".to_string(), 1)]
    );
    let postal_requests = server.state.postal_requests();
    assert_eq!(postal_requests.len(), 15);
    assert_eq!(postal_requests[4], lot_address(4));
}

#[tokio::test]
async fn test_last_page_and_string_meta() {
    let state = StubState {
        string_meta: true,
        ..StubState::with_total(20)
    };
    let server = StubServer::start(state).await;
    let provider = provider_for(&server, API_KEY);

    let page = provider.fetch_page("coffee", 2).await.unwrap();

    assert!(page.is_end);
    assert_eq!(page.total_count, 20);
    assert_eq!(page.rows.len(), 5);
    assert_eq!(page.rows[0].name, "coffee 16");
}

#[tokio::test]
async fn test_authorization_header() {
    let server = StubServer::start(StubState::with_total(3)).await;

    let rejected = provider_for(&server, "wrong-key").fetch_page("coffee", 1).await;

    assert!(matches!(
        rejected,
        Err(PlaceSearchError::SearchFailed { ref query, .. }) if query == "coffee"
    ));
    assert_eq!(
        server.state.authorization_headers.lock().unwrap().as_slice(),
        ["KakaoAK wrong-key".to_string()]
    );
}

#[tokio::test]
async fn test_server_error_returns_no_rows() {
    let server = StubServer::start(StubState::with_total(30)).await;
    server.state.set_search_down(true);
    let provider = provider_for(&server, API_KEY);

    let result = provider.fetch_page("coffee", 1).await;

    assert!(matches!(result, Err(PlaceSearchError::SearchFailed { .. })));
    assert!(server.state.postal_requests().is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = StubServer::start(StubState::with_total(30)).await;
    server.state.set_search_garbled(true);
    let provider = provider_for(&server, API_KEY);

    let result = provider.fetch_page("coffee", 1).await;

    assert!(matches!(result, Err(PlaceSearchError::ParseError { .. })));
}
