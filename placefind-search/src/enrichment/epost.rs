//! ePost road-name address API client.

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;

use super::PostalCodeLookup;
use crate::errors::PostalLookupError;

/// Postal code lookup backed by the ePost address search API.
///
/// The configured URL already carries the service key and fixed query
/// parameters; the address is appended as `srchwrd`.
#[derive(Debug, Clone)]
pub struct EpostLookup {
    client: reqwest::Client,
    url_with_key: String,
}

impl EpostLookup {
    /// Creates a lookup sharing the given HTTP client.
    pub fn new(client: reqwest::Client, url_with_key: impl Into<String>) -> Self {
        Self {
            client,
            url_with_key: url_with_key.into(),
        }
    }

    /// Full request URL for an address.
    fn request_url(&self, address: &str) -> String {
        let separator = if self.url_with_key.contains('?') {
            '&'
        } else {
            '?'
        };
        format!(
            "{}{}srchwrd={}",
            self.url_with_key,
            separator,
            urlencoding::encode(address)
        )
    }

    async fn try_lookup(&self, address: &str) -> Result<String, PostalLookupError> {
        let response = self
            .client
            .get(self.request_url(address))
            .send()
            .await
            .map_err(|e| PostalLookupError::NetworkError {
                reason: format!("ePost request failed: {e}"),
            })?;

        if !response.status().is_success() {
            return Err(PostalLookupError::NetworkError {
                reason: format!("ePost HTTP {}", response.status()),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| PostalLookupError::NetworkError {
                reason: format!("ePost body read failed: {e}"),
            })?;

        first_zip_code(&body)
    }
}

#[async_trait]
impl PostalCodeLookup for EpostLookup {
    async fn lookup_postal_code(&self, address: &str) -> String {
        if address.trim().is_empty() {
            return String::new();
        }

        match self.try_lookup(address).await {
            Ok(code) => code,
            Err(e) => {
                tracing::error!(address, error = %e, "Postal code lookup failed");
                String::new()
            }
        }
    }
}

/// Extracts the text of the first `zipNo` element.
fn first_zip_code(xml: &str) -> Result<String, PostalLookupError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut inside_zip = false;
    let mut zip = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) if element.local_name().as_ref() == b"zipNo" => {
                inside_zip = true;
            }
            Ok(Event::Empty(element)) if element.local_name().as_ref() == b"zipNo" => {
                return Ok(String::new());
            }
            Ok(Event::Text(text)) if inside_zip => {
                let unescaped = text.unescape().map_err(|e| PostalLookupError::ParseError {
                    reason: e.to_string(),
                })?;
                zip.push_str(&unescaped);
            }
            Ok(Event::CData(data)) if inside_zip => {
                zip.push_str(&String::from_utf8_lossy(&data));
            }
            Ok(Event::End(element)) if inside_zip && element.local_name().as_ref() == b"zipNo" => {
                return Ok(zip.trim().to_string());
            }
            Ok(Event::Eof) => {
                return Err(if inside_zip {
                    PostalLookupError::ParseError {
                        reason: "unexpected end of document inside zipNo".to_string(),
                    }
                } else {
                    PostalLookupError::ZipCodeMissing
                });
            }
            Ok(_) => {}
            Err(e) => {
                return Err(PostalLookupError::ParseError {
                    reason: format!("at byte {}: {e}", reader.error_position()),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<NewAddressListResponse>
  <cmmMsgHeader>
    <requestMsgId/>
    <successYN>Y</successYN>
    <totalCount>2</totalCount>
  </cmmMsgHeader>
  <newAddressListAreaCd>
    <zipNo>04536</zipNo>
    <lnmAdres>서울특별시 중구 명동길 14 (명동2가)</lnmAdres>
  </newAddressListAreaCd>
  <newAddressListAreaCd>
    <zipNo>04537</zipNo>
  </newAddressListAreaCd>
</NewAddressListResponse>"#;

    #[test]
    fn test_first_zip_code_is_used() {
        assert_eq!(first_zip_code(SAMPLE_RESPONSE).unwrap(), "04536");
    }

    #[test]
    fn test_missing_zip_code() {
        let xml = "<NewAddressListResponse><cmmMsgHeader><successYN>N</successYN>\
                   </cmmMsgHeader></NewAddressListResponse>";

        assert!(matches!(
            first_zip_code(xml),
            Err(PostalLookupError::ZipCodeMissing)
        ));
    }

    #[test]
    fn test_malformed_xml() {
        let xml = "<NewAddressListResponse><zipNo>04536</wrong></NewAddressListResponse>";

        assert!(matches!(
            first_zip_code(xml),
            Err(PostalLookupError::ParseError { .. })
        ));
    }

    #[test]
    fn test_request_url_encodes_address() {
        let lookup = EpostLookup::new(
            reqwest::Client::new(),
            "http://openapi.epost.go.kr/postal/retrieveNewAdressAreaCdService/retrieveNewAdressAreaCdService/getNewAddressListAreaCd?ServiceKey=abc&searchSe=road",
        );

        let url = lookup.request_url("명동길 14");

        assert!(url.ends_with("&srchwrd=%EB%AA%85%EB%8F%99%EA%B8%B8%2014"));
        assert!(url.contains("ServiceKey=abc"));
    }

    #[test]
    fn test_request_url_without_query() {
        let lookup = EpostLookup::new(reqwest::Client::new(), "http://127.0.0.1:1/zip");

        assert_eq!(lookup.request_url("a b"), "http://127.0.0.1:1/zip?srchwrd=a%20b");
    }

    #[tokio::test]
    async fn test_unreachable_service_yields_empty_code() {
        // Port 1 on loopback refuses connections.
        let lookup = EpostLookup::new(reqwest::Client::new(), "http://127.0.0.1:1/zip?k=v");

        assert_eq!(lookup.lookup_postal_code("명동길 14").await, "");
    }

    #[tokio::test]
    async fn test_empty_address_skips_request() {
        // Nothing accepts on this listener, so any request would show up as a
        // queued connection.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/zip?k=v", listener.local_addr().unwrap());
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(200))
            .build()
            .unwrap();
        let lookup = EpostLookup::new(client, url);

        assert_eq!(lookup.lookup_postal_code("  ").await, "");
        assert_eq!(lookup.lookup_postal_code("").await, "");

        let connection =
            tokio::time::timeout(std::time::Duration::from_millis(50), listener.accept()).await;
        assert!(connection.is_err(), "blank address must not reach the service");
    }
}
