//! HTTP client for a DaData-compatible address suggestion endpoint.
//!
//! Wraps `POST /suggestions/api/4_1/rs/suggest/address` using [`reqwest`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::lookup::{AddressLookup, AddressQuery, AddressSuggestion, LookupError};

/// Public DaData suggestion host.
pub const DEFAULT_BASE_URL: &str = "https://suggestions.dadata.ru";

/// Path of the address suggestion endpoint, relative to the base URL.
pub const ADDRESS_SUGGEST_PATH: &str = "suggestions/api/4_1/rs/suggest/address";

/// HTTP client for one suggestion service.
#[derive(Debug, Clone)]
pub struct DadataApi {
    client: reqwest::Client,
    base_url: String,
}

/// Response envelope of the suggestion endpoint.
///
/// The service sends extra per-suggestion data (`data`, with FIAS codes and
/// coordinates); only the display strings are kept.
#[derive(Debug, Deserialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<AddressSuggestion>,
}

impl DadataApi {
    /// Create a client with its own connection pool and the given request
    /// timeout.
    ///
    /// * `base_url` - Service root, e.g. `https://suggestions.dadata.ru`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    ///
    /// Anything transport-specific (default headers, proxies, TLS roots)
    /// is configured on `client` by the caller.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Service root this client talks to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the address suggestion endpoint.
    pub fn suggest_url(&self) -> String {
        format!("{}/{}", self.base_url, ADDRESS_SUGGEST_PATH)
    }

    /// Request address suggestions.
    pub async fn suggest_address(
        &self,
        query: &AddressQuery,
    ) -> Result<SuggestResponse, LookupError> {
        tracing::debug!(query = %query.query, count = query.count, "Requesting address suggestions");

        let response = self
            .client
            .post(self.suggest_url())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(query)
            .send()
            .await?;

        let parsed: SuggestResponse = Self::parse_response(response).await?;
        tracing::debug!(
            query = %query.query,
            returned = parsed.suggestions.len(),
            "Address suggestions received",
        );
        Ok(parsed)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`LookupError::Api`] containing
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, LookupError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(LookupError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, LookupError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl AddressLookup for DadataApi {
    async fn suggest(&self, query: &AddressQuery) -> Result<Vec<AddressSuggestion>, LookupError> {
        match self.suggest_address(query).await {
            Ok(response) => Ok(response.suggestions),
            Err(e) => {
                tracing::warn!(query = %query.query, error = %e, "Address suggestion request failed");
                Err(e)
            }
        }
    }
}
