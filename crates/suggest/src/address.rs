//! Address step: country, city, and a free-text address with suggestions.

use std::sync::Arc;

use signup_core::error::CoreError;
use signup_core::session::SessionRecord;
use tokio::sync::watch;

use crate::fetcher::{FetchPhase, FetcherConfig, SuggestionFetcher};
use crate::lookup::AddressLookup;

/// Controller for the address step.
///
/// Owns the step's inputs and its [`SuggestionFetcher`]. Address edits are
/// forwarded to the fetcher; the inputs reach the session record only on
/// [`save_and_proceed`](Self::save_and_proceed). Dropping the step cancels
/// any pending lookup.
pub struct AddressStep {
    country: String,
    city: String,
    address: String,
    fetcher: SuggestionFetcher,
}

impl AddressStep {
    pub fn new(lookup: Arc<dyn AddressLookup>, config: FetcherConfig) -> Self {
        Self {
            country: String::new(),
            city: String::new(),
            address: String::new(),
            fetcher: SuggestionFetcher::new(lookup, config),
        }
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn on_country_change(&mut self, value: impl Into<String>) {
        self.country = value.into();
    }

    pub fn on_city_change(&mut self, value: impl Into<String>) {
        self.city = value.into();
    }

    /// Record the address text and ask for matching suggestions.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn on_address_change(&mut self, value: impl Into<String>) {
        self.address = value.into();
        self.fetcher.query(&self.address);
    }

    /// Subscribe to published suggestion lists.
    pub fn subscribe(&self) -> watch::Receiver<Vec<String>> {
        self.fetcher.subscribe()
    }

    /// The most recently published suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        self.fetcher.suggestions()
    }

    pub fn phase(&self) -> FetchPhase {
        self.fetcher.phase()
    }

    /// Replace the address text with the suggestion at `index`.
    ///
    /// Picking a suggestion does not trigger another lookup.
    pub fn select_suggestion(&mut self, index: usize) -> Result<&str, CoreError> {
        let suggestions = self.fetcher.suggestions();
        let picked = suggestions.into_iter().nth(index).ok_or_else(|| {
            CoreError::Validation(format!(
                "No suggestion at position {}",
                index.saturating_add(1)
            ))
        })?;
        self.address = picked;
        Ok(&self.address)
    }

    /// Take `value` as the address text without another lookup.
    ///
    /// For callers that pick from a copy of the list they displayed, which
    /// a later publication may already have replaced.
    pub fn accept_suggestion(&mut self, value: impl Into<String>) {
        self.address = value.into();
    }

    /// Write country, city and address into the session.
    pub fn save_and_proceed(&self, session: &mut SessionRecord) {
        session.country = self.country.trim().to_string();
        session.city = self.city.trim().to_string();
        session.address = self.address.trim().to_string();
    }

    /// Cancel any pending lookup and wait for it to stop.
    pub async fn shutdown(&mut self) {
        self.fetcher.shutdown().await;
    }
}
