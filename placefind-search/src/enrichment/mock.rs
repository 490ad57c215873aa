//! In-memory postal code lookup for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::PostalCodeLookup;

/// Lookup answering from a fixed address table.
///
/// Unknown addresses resolve to an empty code, the same outcome as a failed
/// remote lookup. Every requested address is recorded in call order.
#[derive(Debug, Default)]
pub struct MockPostalLookup {
    codes: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MockPostalLookup {
    /// Creates a lookup that knows no addresses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the postal code for an address.
    pub fn with_code(mut self, address: impl Into<String>, code: impl Into<String>) -> Self {
        self.codes.insert(address.into(), code.into());
        self
    }

    /// Addresses looked up so far, in call order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PostalCodeLookup for MockPostalLookup {
    async fn lookup_postal_code(&self, address: &str) -> String {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(address.to_string());
        }
        self.codes.get(address).cloned().unwrap_or_default()
    }
}
