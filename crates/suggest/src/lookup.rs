//! Address-lookup collaborator contract.
//!
//! The fetcher only needs "query in, ordered suggestions out". Transport,
//! endpoint, credentials and request logging belong to the implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Body of a suggestion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressQuery {
    pub query: String,
    /// Maximum number of candidates to return.
    pub count: u32,
}

/// One candidate returned by the lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSuggestion {
    /// Short display form, e.g. `г Москва, ул Ленина, д 1`.
    pub value: String,
    /// Full form including postal code and region.
    pub unrestricted_value: String,
}

/// Errors from an address-lookup implementation.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-2xx status code.
    #[error("Suggestion API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The lookup could not be performed for another reason.
    #[error("Address lookup unavailable: {0}")]
    Unavailable(String),
}

/// Remote address-lookup service.
///
/// Implementations must be cheap to call concurrently; the fetcher shares
/// one instance behind an `Arc` across its spawned tasks.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// Return up to `query.count` suggestions in server order.
    async fn suggest(&self, query: &AddressQuery) -> Result<Vec<AddressSuggestion>, LookupError>;
}
