use crate::domain::model::{Envelope, QueryDescriptor};
use crate::domain::ports::PageSource;
use crate::utils::error::{Result, RseError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const API_KEY_HEADER: &str = "X-API-Key";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// HTTP page source for the RSECloud API.
#[derive(Debug, Clone)]
pub struct RseClient {
    client: Client,
}

impl RseClient {
    pub fn new(timeout: Duration, connect_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| RseError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for RseClient {
    async fn fetch_page<T>(&self, query: &QueryDescriptor, page: u32) -> Result<Envelope<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let endpoint = query.endpoint();
        tracing::debug!(
            "📡 POST {} page={} ({})",
            endpoint,
            page,
            query.query_type()
        );

        let response = self
            .client
            .post(&endpoint)
            .query(&[("page", page)])
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, query.api_key())
            .json(&query.payload())
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("📡 API response status: {}", status);
        if !status.is_success() {
            return Err(RseError::HttpStatusError {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| RseError::DecodeError { page, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CertificateRecord, QueryType};
    use httpmock::prelude::*;
    use serde_json::json;

    fn client() -> RseClient {
        RseClient::new(
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        )
        .unwrap()
    }

    fn descriptor(server: &MockServer, query_type: QueryType, query: &str) -> QueryDescriptor {
        QueryDescriptor::new(query_type, query, server.base_url(), "test-key")
    }

    #[tokio::test]
    async fn test_fetch_page_sends_headers_payload_and_page() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/subdomains")
                .query_param("page", "2")
                .header("content-type", "application/json")
                .header("x-api-key", "test-key")
                .json_body(json!({"domain": "example.com"}));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "count": 3, "data": ["c.example.com"], "page": 2, "pagesize": 2, "total_pages": 2
                }));
        });

        let query = descriptor(&server, QueryType::Subdomain, "example.com");
        let envelope: Envelope<String> = client().fetch_page(&query, 2).await.unwrap();

        api_mock.assert();
        assert_eq!(envelope.data, vec!["c.example.com"]);
        assert_eq!(envelope.page, 2);
        assert_eq!(envelope.total_pages, 2);
    }

    #[tokio::test]
    async fn test_fetch_page_org_payload() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/searchCertificatesByOrgName")
                .query_param("page", "1")
                .json_body(json!({"org_name": "Example Inc"}));
            then.status(200).json_body(json!({
                "data": [{"ip": "1.2.3.4", "port": 443, "subject_cn": "example.com",
                          "subject_org": "Example Inc", "timestamp": "2024-01-01"}],
                "total_pages": 1
            }));
        });

        let query = descriptor(&server, QueryType::CertificateByOrg, "Example Inc");
        let envelope: Envelope<CertificateRecord> = client().fetch_page(&query, 1).await.unwrap();

        api_mock.assert();
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].subject_org, "Example Inc");
    }

    #[tokio::test]
    async fn test_non_success_status_is_network_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/subdomains");
            then.status(401)
                .json_body(json!({"data": [], "total_pages": 1}));
        });

        let query = descriptor(&server, QueryType::Subdomain, "example.com");
        let err = client().fetch_page::<String>(&query, 1).await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, RseError::HttpStatusError { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/subdomains");
            then.status(200).body("<html>maintenance</html>");
        });

        let query = descriptor(&server, QueryType::Subdomain, "example.com");
        let err = client().fetch_page::<String>(&query, 1).await.unwrap_err();

        assert!(matches!(err, RseError::DecodeError { page: 1, .. }));
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        // Nothing listens on the discard port.
        let query = QueryDescriptor::new(
            QueryType::Subdomain,
            "example.com",
            "http://127.0.0.1:9",
            "test-key",
        );
        let client = RseClient::new(Duration::from_secs(2), Duration::from_secs(1)).unwrap();
        let err = client.fetch_page::<String>(&query, 1).await.unwrap_err();

        assert!(matches!(err, RseError::NetworkError(_)));
    }

    #[tokio::test]
    async fn test_slow_api_hits_request_timeout() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/subdomains");
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(json!({"data": [], "total_pages": 1}));
        });

        let client = RseClient::new(Duration::from_secs(1), Duration::from_secs(1)).unwrap();
        let query = descriptor(&server, QueryType::Subdomain, "example.com");
        let err = client.fetch_page::<String>(&query, 1).await.unwrap_err();

        assert!(matches!(err, RseError::NetworkError(ref e) if e.is_timeout()));
    }
}
