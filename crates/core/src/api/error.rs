/// Errors that can occur while fetching deals.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport failure reported by the HTTP client.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status code.
    #[error("HTTP error! status: {status}")]
    Status {
        /// Numeric status returned by the server.
        status: u16,
    },

    /// Body was not the expected JSON shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL cannot form a request URL.
    #[error("invalid request URL {0}")]
    InvalidUrl(String),

    /// The deals feed answered with no records at all.
    #[error("no data received from the deals API")]
    EmptyFeed,
}
