// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the CatalogIQ products API.

use std::time::Duration;

use catsync_core::record::{SourcePage, SourceRecord};
use catsync_core::{CatsyncError, FetchError, SyncCursor};
use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

/// Records requested per page. Each sync step handles exactly one page.
pub const PAGE_SIZE: u32 = 1;

/// Header carrying the CatalogIQ API key (`Catalogiq-Api-Key` on the wire).
pub const API_KEY_HEADER: &str = "catalogiq-api-key";

/// Authenticated client for `GET <endpoint>?limit=&offset=`.
#[derive(Debug, Clone)]
pub struct CatalogIqClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl CatalogIqClient {
    /// Creates a client for the products `endpoint`.
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self, CatsyncError> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            CatsyncError::Config(format!("invalid source endpoint `{endpoint}`: {e}"))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(api_key).map_err(|e| {
                CatsyncError::Config(format!("invalid source API key header value: {e}"))
            })?,
        );
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| CatsyncError::Client {
                message: format!("failed to build CatalogIQ HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client, endpoint })
    }

    /// URL of the page starting at `cursor`.
    pub fn page_url(&self, cursor: SyncCursor) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("limit", &PAGE_SIZE.to_string())
            .append_pair("offset", &cursor.to_string());
        url
    }

    /// Fetches the page starting at `cursor`. An empty page ends the catalog.
    pub async fn fetch_page(&self, cursor: SyncCursor) -> Result<Vec<SourceRecord>, FetchError> {
        let response = self
            .client
            .get(self.page_url(cursor))
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(offset = cursor.offset(), status = %status, "source page response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Transport {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        let page: SourcePage =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(page.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> CatalogIqClient {
        CatalogIqClient::new(
            &format!("{}/api/v1/products", server.uri()),
            "ciq-test-key",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn product(name: &str) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "model": "LC-01",
            "vendor_id": "118",
            "attributes": [{"name": "Weight", "value": "3kg"}],
            "variants": [],
            "images": []
        })
    }

    #[test]
    fn page_url_carries_limit_and_offset() {
        let client = CatalogIqClient::new(
            "https://catalogiq.app/api/v1/products",
            "k",
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            client.page_url(SyncCursor::new(41)).as_str(),
            "https://catalogiq.app/api/v1/products?limit=1&offset=41"
        );
    }

    #[test]
    fn invalid_endpoint_is_a_config_error() {
        let err = CatalogIqClient::new("not a url", "k", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, CatsyncError::Config(_)));
    }

    #[tokio::test]
    async fn fetch_page_sends_key_and_pagination() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/products"))
            .and(query_param("limit", "1"))
            .and(query_param("offset", "7"))
            .and(header(API_KEY_HEADER, "ciq-test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"results": [product("Chair")]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let records = test_client(&server)
            .fetch_page(SyncCursor::new(7))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Chair");
        assert_eq!(records[0].vendor_id, "118");
    }

    #[tokio::test]
    async fn empty_results_mean_exhaustion() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": []})))
            .mount(&server)
            .await;

        let records = test_client(&server)
            .fetch_page(SyncCursor::new(41))
            .await
            .unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_carries_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .fetch_page(SyncCursor::START)
            .await
            .unwrap_err();
        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unauthorized_is_a_fetch_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .fetch_page(SyncCursor::START)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"results": [{"name": "no model"}]})),
            )
            .mount(&server)
            .await;

        let err = test_client(&server)
            .fetch_page(SyncCursor::START)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)), "got: {err:?}");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let client = CatalogIqClient::new(
            "http://127.0.0.1:1/api/v1/products",
            "k",
            Duration::from_secs(2),
        )
        .unwrap();
        let err = client.fetch_page(SyncCursor::START).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }), "got: {err:?}");
    }
}
