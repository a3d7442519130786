//! Search backend client
//!
//! One GET per search. The request URL is fully built by the query builder;
//! this client only performs the call and checks the response contract.

use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use crate::models::SearchResponse;

const USER_AGENT: &str = concat!("quarry/", env!("CARGO_PKG_VERSION"));

/// Backend client errors
#[derive(Debug, Error)]
pub enum BackendError {
    /// Backend could not be reached or the transfer failed
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a status other than 200
    #[error("Backend returned status {0}")]
    Status(u16),

    /// Backend body is not a valid search response
    #[error("Malformed backend response: {0}")]
    Parse(String),
}

/// HTTP client for the search backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    http_client: reqwest::Client,
}

impl BackendClient {
    /// Create new backend client
    pub fn new() -> Result<Self, BackendError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(Self { http_client })
    }

    /// Run a search against a fully substituted backend URL
    pub async fn search(&self, url: &str) -> Result<SearchResponse, BackendError> {
        debug!(url = %url, "Querying search backend");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BackendError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let parsed =
            SearchResponse::from_json(&body).map_err(|e| BackendError::Parse(e.to_string()))?;

        debug!(
            num_found = parsed.response.num_found,
            start = parsed.response.start,
            docs = parsed.response.docs.len(),
            "Search backend responded"
        );

        Ok(parsed)
    }
}
