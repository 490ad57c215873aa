//! ePost lookup against the stand-in postal service.

use placefind_search::{EpostLookup, PostalCodeLookup};

use super::stub_servers::{StubServer, StubState, postal_code_for};

fn lookup_for(server: &StubServer) -> EpostLookup {
    EpostLookup::new(reqwest::Client::new(), server.postal_url())
}

#[tokio::test]
async fn test_resolves_first_zip_code() {
    let server = StubServer::start(StubState::default()).await;
    let lookup = lookup_for(&server);

    let code = lookup.lookup_postal_code("세종대로 110").await;

    assert_eq!(code, postal_code_for("세종대로 110"));
    // The address arrives decoded, space included.
    assert_eq!(server.state.postal_requests(), vec!["세종대로 110".to_string()]);
}

#[tokio::test]
async fn test_failures_degrade_to_empty_code() {
    let server = StubServer::start(StubState::default()).await;
    let lookup = lookup_for(&server);

    assert_eq!(lookup.lookup_postal_code("장애 주소").await, "");
    assert_eq!(lookup.lookup_postal_code("깨짐 주소").await, "");
    assert_eq!(lookup.lookup_postal_code("없음 주소").await, "");

    // A healthy address right after still resolves.
    assert_eq!(
        lookup.lookup_postal_code("정상로 1").await,
        postal_code_for("정상로 1")
    );
}

#[tokio::test]
async fn test_missing_service_key_is_rejected_quietly() {
    let server = StubServer::start(StubState::default()).await;
    let lookup = EpostLookup::new(
        reqwest::Client::new(),
        format!("http://{}/postal/getNewAddressListAreaCd", server.addr),
    );

    assert_eq!(lookup.lookup_postal_code("세종대로 110").await, "");
    assert!(server.state.postal_requests().is_empty());
}

#[tokio::test]
async fn test_blank_address_never_reaches_service() {
    let server = StubServer::start(StubState::default()).await;
    let lookup = lookup_for(&server);

    assert_eq!(lookup.lookup_postal_code("   ").await, "");
    assert_eq!(lookup.lookup_postal_code("세종대로 110").await, postal_code_for("세종대로 110"));

    // Only the real address was sent
    assert_eq!(server.state.postal_requests(), vec!["세종대로 110".to_string()]);
}
