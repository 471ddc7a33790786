//! Address suggestions for the registration wizard.
//!
//! Provides the address-lookup collaborator contract, a DaData-compatible
//! HTTP implementation built on [`reqwest`], the debounced and cancellable
//! [`SuggestionFetcher`](fetcher::SuggestionFetcher), and the address step
//! controller that drives it.

pub mod address;
pub mod api;
pub mod config;
pub mod fetcher;
pub mod lookup;
