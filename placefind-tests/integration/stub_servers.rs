//! Local stand-ins for the remote search and postal code services.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::json;

pub const API_KEY: &str = "test-key";
pub const SEARCH_PATH: &str = "/v2/local/search/keyword.json";
pub const POSTAL_PATH: &str = "/postal/getNewAddressListAreaCd";
const PAGE_SIZE: u32 = 15;

/// Behaviour and request log shared with the running stub server.
#[derive(Clone, Default)]
pub struct StubState {
    /// Matches reported per keyword
    pub total_results: Arc<Mutex<u32>>,
    /// Send meta values as strings instead of JSON scalars
    pub string_meta: bool,
    /// Answer search requests with a 500 while set
    pub search_down: Arc<Mutex<bool>>,
    /// Answer search requests with a truncated JSON body while set
    pub search_garbled: Arc<Mutex<bool>>,
    /// Keyword/page pairs received by the search endpoint
    pub search_requests: Arc<Mutex<Vec<(String, u32)>>>,
    /// Authorization headers received by the search endpoint
    pub authorization_headers: Arc<Mutex<Vec<String>>>,
    /// Addresses received by the postal endpoint
    pub postal_requests: Arc<Mutex<Vec<String>>>,
}

impl StubState {
    pub fn with_total(total_results: u32) -> Self {
        let state = Self::default();
        *state.total_results.lock().unwrap() = total_results;
        state
    }

    pub fn search_requests(&self) -> Vec<(String, u32)> {
        self.search_requests.lock().unwrap().clone()
    }

    pub fn postal_requests(&self) -> Vec<String> {
        self.postal_requests.lock().unwrap().clone()
    }

    pub fn set_search_down(&self, down: bool) {
        *self.search_down.lock().unwrap() = down;
    }

    pub fn set_search_garbled(&self, garbled: bool) {
        *self.search_garbled.lock().unwrap() = garbled;
    }
}

/// Running stub server.
pub struct StubServer {
    pub addr: SocketAddr,
    pub state: StubState,
}

impl StubServer {
    pub async fn start(state: StubState) -> Self {
        let app = Router::new()
            .route(SEARCH_PATH, get(search_handler))
            .route(POSTAL_PATH, get(postal_handler))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn search_endpoint(&self) -> String {
        format!("http://{}{}", self.addr, SEARCH_PATH)
    }

    /// Postal URL with an embedded key, as stored in the configuration.
    pub fn postal_url(&self) -> String {
        format!(
            "http://{}{}?ServiceKey=stub-key&searchSe=road",
            self.addr, POSTAL_PATH
        )
    }
}

/// Address the stub resolves for the document at `index` (0-based overall).
pub fn road_address(index: u32) -> String {
    format!("테스트로 {}", index + 1)
}

pub fn lot_address(index: u32) -> String {
    format!("테스트동 {}-1", index + 1)
}

/// Postal code the stub returns for a known address.
pub fn postal_code_for(address: &str) -> String {
    let digits: String = address.chars().filter(|c| c.is_ascii_digit()).collect();
    let number: u32 = digits.parse().unwrap_or(0);
    format!("{:05}", 30_000 + number)
}

async fn search_handler(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state
        .authorization_headers
        .lock()
        .unwrap()
        .push(authorization.clone());

    if authorization != format!("KakaoAK {API_KEY}") {
        return (StatusCode::UNAUTHORIZED, "bad key").into_response();
    }

    let query = params.get("query").cloned().unwrap_or_default();
    let page: u32 = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);
    state
        .search_requests
        .lock()
        .unwrap()
        .push((query.clone(), page));

    if *state.search_down.lock().unwrap() {
        return (StatusCode::INTERNAL_SERVER_ERROR, "down").into_response();
    }
    if *state.search_garbled.lock().unwrap() {
        return (
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"meta": {"is_end": "#,
        )
            .into_response();
    }

    let total = *state.total_results.lock().unwrap();
    let start = (page - 1) * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(total);
    let documents: Vec<_> = (start..end)
        .map(|index| {
            // Every fifth place has no road address and falls back to the lot address.
            let road = if index % 5 == 4 {
                String::new()
            } else {
                road_address(index)
            };
            json!({
                "place_name": format!("{query} {}", index + 1),
                "address_name": lot_address(index),
                "road_address_name": road,
                "phone": "02-000-0000",
            })
        })
        .collect();
    let is_end = end >= total;

    let meta = if state.string_meta {
        json!({"is_end": is_end.to_string(), "total_count": total.to_string()})
    } else {
        json!({"is_end": is_end, "total_count": total, "pageable_count": total})
    };

    axum::Json(json!({"meta": meta, "documents": documents})).into_response()
}

async fn postal_handler(
    State(state): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if params.get("ServiceKey").map(String::as_str) != Some("stub-key") {
        return (StatusCode::FORBIDDEN, "missing key").into_response();
    }

    let address = params.get("srchwrd").cloned().unwrap_or_default();
    state.postal_requests.lock().unwrap().push(address.clone());

    let body = if address.contains("장애") {
        return (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response();
    } else if address.contains("깨짐") {
        "<NewAddressListResponse><zipNo>123".to_string()
    } else if address.contains("없음") {
        "<NewAddressListResponse><cmmMsgHeader><totalCount>0</totalCount></cmmMsgHeader></NewAddressListResponse>"
            .to_string()
    } else {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <NewAddressListResponse>\
             <cmmMsgHeader><successYN>Y</successYN></cmmMsgHeader>\
             <newAddressListAreaCd><zipNo>{}</zipNo><rnAdres>{}</rnAdres></newAddressListAreaCd>\
             <newAddressListAreaCd><zipNo>99999</zipNo></newAddressListAreaCd>\
             </NewAddressListResponse>",
            postal_code_for(&address),
            address
        )
    };

    ([(header::CONTENT_TYPE, "application/xml;charset=UTF-8")], body).into_response()
}
