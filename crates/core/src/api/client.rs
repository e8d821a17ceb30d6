use reqwest::Url;
use tracing::{debug, info};

use crate::{
    config::AppConfig,
    models::GameRecord,
    normalize::{self, SearchPricePolicy},
};

use super::{
    error::FetchError,
    types::{DealRecord, SearchRecord},
};

/// One of the two read-only queries the catalog issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// Storewide current deals.
    Deals {
        /// Store to list deals for.
        store_id: String,
        /// Number of deals requested.
        page_size: u32,
    },
    /// Lookup by title.
    Search {
        /// Trimmed, non-empty query.
        title: String,
        /// Maximum number of results.
        limit: u32,
    },
}

impl FetchRequest {
    /// Endpoint path relative to the API base.
    pub fn path(&self) -> &'static str {
        match self {
            FetchRequest::Deals { .. } => "deals",
            FetchRequest::Search { .. } => "games",
        }
    }

    /// Query string pairs for the request.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            FetchRequest::Deals {
                store_id,
                page_size,
            } => vec![("storeID", store_id.clone()), ("pageSize", page_size.to_string())],
            FetchRequest::Search { title, limit } => {
                vec![("title", title.clone()), ("limit", limit.to_string())]
            }
        }
    }

    /// Full request URL under `base_url`, with the query encoded.
    pub fn url(&self, base_url: &str) -> Result<Url, FetchError> {
        let endpoint = format!("{}/{}", base_url.trim_end_matches('/'), self.path());
        Url::parse_with_params(&endpoint, self.query())
            .map_err(|err| FetchError::InvalidUrl(format!("{endpoint}: {err}")))
    }
}

/// HTTP client for the deals API.
#[derive(Debug, Clone)]
pub struct DealsClient {
    http: reqwest::Client,
    base_url: String,
    policy: SearchPricePolicy,
}

impl DealsClient {
    /// Build a client for the API configured in `config`.
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("dealshelf/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            policy: SearchPricePolicy::default(),
        })
    }

    /// Replace the pricing policy applied to search results.
    pub fn with_policy(mut self, policy: SearchPricePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Perform `request` and normalize the payload.
    pub async fn fetch(&self, request: &FetchRequest) -> Result<Vec<GameRecord>, FetchError> {
        let url = request.url(&self.base_url)?;
        debug!(%url, "Fetching");

        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let text = resp.text().await?;
        let records = decode_response(request, &text, &self.policy)?;
        info!(endpoint = request.path(), count = records.len(), "Fetch complete");
        Ok(records)
    }
}

/// Decode and normalize a response body for `request`.
///
/// An empty deals feed is an error; an empty search is a valid result.
pub fn decode_response(
    request: &FetchRequest,
    body: &str,
    policy: &SearchPricePolicy,
) -> Result<Vec<GameRecord>, FetchError> {
    match request {
        FetchRequest::Deals { .. } => {
            let raw: Vec<DealRecord> = serde_json::from_str(body)?;
            if raw.is_empty() {
                return Err(FetchError::EmptyFeed);
            }
            Ok(raw.into_iter().map(normalize::from_deal).collect())
        }
        FetchRequest::Search { .. } => {
            let raw: Option<Vec<SearchRecord>> = serde_json::from_str(body)?;
            Ok(raw
                .unwrap_or_default()
                .into_iter()
                .map(|record| normalize::from_search(record, policy))
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn deals() -> FetchRequest {
        AppConfig::default().deals_request()
    }

    fn search() -> FetchRequest {
        AppConfig::default().search_request("batman")
    }

    #[test]
    fn builds_encoded_urls() -> anyhow::Result<()> {
        let url = deals().url("https://www.cheapshark.com/api/1.0/")?;
        assert_eq!(
            url.as_str(),
            "https://www.cheapshark.com/api/1.0/deals?storeID=1&pageSize=60"
        );
        let url = AppConfig::default()
            .search_request("half life & co")
            .url("https://www.cheapshark.com/api/1.0")?;
        assert_eq!(
            url.as_str(),
            "https://www.cheapshark.com/api/1.0/games?title=half+life+%26+co&limit=60"
        );
        Ok(())
    }

    #[test]
    fn decodes_deals_feed() -> anyhow::Result<()> {
        let body = json!([
            {"gameID": "A", "title": "Alpha", "salePrice": "10", "normalPrice": "20", "savings": "50", "storeID": "1", "dealID": "dA"},
            {"gameID": "B", "title": "Beta", "salePrice": "5", "normalPrice": "5", "savings": "0", "storeID": "2", "dealID": "dB"}
        ])
        .to_string();
        let records = decode_response(&deals(), &body, &SearchPricePolicy::default())?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "A");
        assert_eq!(records[0].savings_percent, 50.0);
        assert_eq!(records[1].store_id, "2");
        Ok(())
    }

    #[test]
    fn empty_deals_feed_is_an_error() {
        let result = decode_response(&deals(), "[]", &SearchPricePolicy::default());
        assert!(matches!(result, Err(FetchError::EmptyFeed)));
    }

    #[test]
    fn empty_search_is_not_an_error() -> anyhow::Result<()> {
        let policy = SearchPricePolicy::default();
        assert!(decode_response(&search(), "[]", &policy)?.is_empty());
        assert!(decode_response(&search(), "null", &policy)?.is_empty());
        Ok(())
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let result = decode_response(&deals(), "<html>oops</html>", &SearchPricePolicy::default());
        assert!(matches!(result, Err(FetchError::Decode(_))));
        let result = decode_response(&search(), "{\"error\": 1}", &SearchPricePolicy::default());
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[test]
    fn decodes_search_results_with_policy() -> anyhow::Result<()> {
        let body = json!([
            {"gameID": "612", "external": "LEGO Batman", "cheapest": "10.00", "cheapestDealID": "x", "thumb": "https://img/612.jpg"}
        ])
        .to_string();
        let records = decode_response(&search(), &body, &SearchPricePolicy::default())?;
        assert_eq!(records[0].title, "LEGO Batman");
        assert_eq!(records[0].normal_price, 15.0);
        assert_eq!(records[0].savings_percent, 33.0);
        assert_eq!(records[0].store_id, "1");
        Ok(())
    }

    #[tokio::test]
    async fn invalid_base_url_fails_before_sending() -> anyhow::Result<()> {
        let config = AppConfig {
            api_base_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        let client = DealsClient::new(&config)?;
        let result = client.fetch(&deals()).await;
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
        Ok(())
    }

    // Serves one canned HTTP response on a loopback port.
    fn serve_once(response: &'static str) -> std::io::Result<String> {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let base_url = format!("http://{}", listener.local_addr()?);
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0_u8; 4096];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        Ok(base_url)
    }

    #[tokio::test]
    async fn non_success_status_maps_to_status_error() -> anyhow::Result<()> {
        let base_url = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )?;
        let config = AppConfig {
            api_base_url: base_url,
            ..AppConfig::default()
        };
        let client = DealsClient::new(&config)?;
        let result = client.fetch(&deals()).await;
        assert!(matches!(result, Err(FetchError::Status { status: 500 })));
        Ok(())
    }

    #[tokio::test]
    async fn successful_response_is_decoded() -> anyhow::Result<()> {
        let base_url = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 2\r\nconnection: close\r\n\r\n[]",
        )?;
        let config = AppConfig {
            api_base_url: base_url,
            ..AppConfig::default()
        };
        let client = DealsClient::new(&config)?;
        assert!(client.fetch(&search()).await?.is_empty());
        Ok(())
    }

    #[test]
    fn status_error_message_carries_code() {
        let err = FetchError::Status { status: 500 };
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }
}
