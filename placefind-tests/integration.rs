//! Integration tests for Placefind
//!
//! These tests run the real HTTP clients against local stand-in servers for
//! the Kakao keyword search and ePost address APIs, and drive complete
//! search, paging and export workflows through the session handle.

#[path = "integration/stub_servers.rs"]
mod stub_servers;

#[path = "integration/epost_lookup.rs"]
mod epost_lookup;
#[path = "integration/kakao_provider.rs"]
mod kakao_provider;
#[path = "integration/search_workflow.rs"]
mod search_workflow;
