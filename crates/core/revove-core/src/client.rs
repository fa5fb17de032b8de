//! HTTP client for the places REST API
//!
//! Endpoints (relative to the configured base URL):
//! - `GET /places/` list, optionally `?page=N` or `?search=term`
//! - `GET /places/{id}/` detail with recommendations
//! - `GET /search/reviews/?q=..&place=..&place_name=..` review keyword search
//!
//! List endpoints may answer with a bare array or a paginated envelope; both
//! are accepted.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::review_search::ReviewQuery;
use crate::suggest::PlaceSearch;
use crate::types::{ListBody, Page, Place, PlaceDetail, PlaceId, Review};
use crate::{Result, RevoveError};

/// Client for the places API, bound to one base URL for its whole life
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client from a validated config
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout.min(std::time::Duration::from_secs(10)))
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every place, unwrapped from whatever list shape the API returns
    pub async fn fetch_places(&self) -> Result<Vec<Place>> {
        self.get_list("/places/", &[]).await
    }

    /// One page of places with pagination metadata
    pub async fn fetch_places_page(&self, page: u32) -> Result<Page<Place>> {
        self.get_json("/places/", &[("page", page.max(1).to_string())])
            .await
    }

    /// Place detail; recommendations come back ordered by rank
    pub async fn fetch_place(&self, id: PlaceId) -> Result<PlaceDetail> {
        let mut detail: PlaceDetail = self.get_json(&format!("/places/{}/", id), &[]).await?;
        detail.sort_recommendations();
        Ok(detail)
    }

    /// Server-side substring search over place names and addresses
    pub async fn search_places_by_name(&self, query: &str) -> Result<Vec<Place>> {
        self.get_list("/places/", &[("search", query.to_string())])
            .await
    }

    /// Reviews mentioning a keyword, optionally scoped to places
    pub async fn search_reviews(&self, query: &ReviewQuery) -> Result<Vec<Review>> {
        if query.q.trim().is_empty() {
            return Err(RevoveError::validation("Review search keyword cannot be empty"));
        }
        self.get_list("/search/reviews/", &query.to_query_pairs())
            .await
    }

    async fn get_value(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, ?query, "GET");

        let resp = self.http.get(&url).query(query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {}", e));
            warn!(%url, %status, "API request failed");
            return Err(RevoveError::api(status.to_string(), body));
        }

        Ok(resp.json::<Value>().await?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let value = self.get_value(path, query).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let value = self.get_value(path, query).await?;
        let is_list = match &value {
            Value::Array(_) => true,
            Value::Object(map) => matches!(map.get("results"), Some(Value::Array(_))),
            _ => false,
        };
        if !is_list {
            return Err(RevoveError::UnexpectedResponse(path.to_string()));
        }
        let body: ListBody<T> = serde_json::from_value(value)?;
        Ok(body.into_items())
    }
}

#[async_trait]
impl PlaceSearch for ApiClient {
    async fn search_places_by_name(&self, term: &str) -> Result<Vec<Place>> {
        ApiClient::search_places_by_name(self, term).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_base_url() {
        let err = ApiClient::new(ClientConfig::new("localhost:8000")).unwrap_err();
        assert!(matches!(err, RevoveError::Config(_)));
    }

    #[test]
    fn test_new_keeps_base_url() {
        let client = ApiClient::new(ClientConfig::new("http://127.0.0.1:8000/api/")).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000/api");
    }

    #[tokio::test]
    async fn test_blank_review_keyword_rejected() {
        let client = ApiClient::new(ClientConfig::default()).unwrap();
        let err = client
            .search_reviews(&ReviewQuery::new("  "))
            .await
            .unwrap_err();
        assert!(matches!(err, RevoveError::Validation(_)));
    }

    #[test]
    fn test_transport_error_classified() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        // port 9 (discard) on loopback is closed in test environments
        let client = ApiClient::new(
            ClientConfig::new("http://127.0.0.1:9")
                .with_timeout(std::time::Duration::from_secs(2)),
        )
        .unwrap();
        let err = rt.block_on(client.fetch_places()).unwrap_err();
        assert!(matches!(err, RevoveError::Network(_)));
    }
}
