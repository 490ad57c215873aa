//! Postal code enrichment for search results.

use async_trait::async_trait;

pub mod epost;
#[cfg(test)]
pub mod mock;

pub use epost::EpostLookup;
#[cfg(test)]
pub use mock::MockPostalLookup;

/// Resolves the postal code of an address.
///
/// Lookups are infallible from the caller's point of view: any failure is
/// logged by the implementation and reported as an empty code, so one bad
/// address never aborts the page it belongs to.
#[async_trait]
pub trait PostalCodeLookup: Send + Sync + std::fmt::Debug {
    /// Returns the postal code for `address`, or an empty string.
    async fn lookup_postal_code(&self, address: &str) -> String;
}

#[async_trait]
impl<T: PostalCodeLookup + ?Sized> PostalCodeLookup for std::sync::Arc<T> {
    async fn lookup_postal_code(&self, address: &str) -> String {
        (**self).lookup_postal_code(address).await
    }
}
