//! HTTP transport abstraction
//!
//! The client builds a complete [`reqwest::Request`] (URL, query, headers,
//! body) and hands it to a [`HttpTransport`]. Production code uses
//! [`ReqwestTransport`]; tests swap in a recording transport so the exact
//! outgoing request can be inspected without touching the network.

use async_trait::async_trait;
use reqwest::{Client, Request, StatusCode};
use tracing::{debug, instrument};

/// Raw response handed back by a transport
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Response body as text
    pub body: String,
}

impl TransportResponse {
    /// Create a response
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Executes one HTTP request
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send the request and read the whole response body
    async fn execute(&self, request: Request) -> Result<TransportResponse, reqwest::Error>;
}

/// Transport backed by a `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Wrap an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method(), url = %request.url()))]
    async fn execute(&self, request: Request) -> Result<TransportResponse, reqwest::Error> {
        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(status = status.as_u16(), len = body.len(), "Received response");
        Ok(TransportResponse { status, body })
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockTransport;
    use super::*;
    use reqwest::Method;

    #[tokio::test]
    async fn test_mock_transport_records_and_replies() {
        let transport = MockTransport::new();
        transport.push_response(StatusCode::CREATED, r#"{"ok":true}"#);

        let request = Client::new()
            .request(Method::POST, "https://api.coinbase.com/x?a=1")
            .body(r#"{"b":2}"#)
            .build()
            .unwrap();

        let response = transport.execute(request).await.unwrap();
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body, r#"{"ok":true}"#);

        let captured = transport.last_request();
        assert_eq!(captured.method, Method::POST);
        assert_eq!(captured.query(), Some("a=1"));
        assert_eq!(captured.json()["b"], 2);
    }

    #[tokio::test]
    async fn test_mock_transport_default_response() {
        let transport = MockTransport::new();
        let request = Client::new()
            .get("https://api.coinbase.com/x")
            .build()
            .unwrap();

        let response = transport.execute(request).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, "{}");
        assert_eq!(transport.requests().len(), 1);
    }
}
