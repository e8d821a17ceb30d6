//! Deals API access.

/// HTTP client for the deals and title-search endpoints.
pub mod client;
/// Error type for failed fetches.
pub mod error;
/// Raw payload shapes returned by the API.
pub mod types;

pub use client::{decode_response, DealsClient, FetchRequest};
pub use error::FetchError;
pub use types::{DealRecord, SearchRecord};
