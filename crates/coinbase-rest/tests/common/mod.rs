//! Common test utilities for integration tests
//!
//! A recording transport and canned responses shaped like live Advanced
//! Trade API answers.

#![allow(dead_code)]

use async_trait::async_trait;
use coinbase_rest::{
    ClientConfig, Credentials, HttpTransport, RestClient, TransportResponse,
};
use parking_lot::Mutex;
use reqwest::{Request, StatusCode};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

/// Key name stored in the fixture key file
pub const KEY_NAME: &str = "organizations/test-org/apiKeys/test-key";

/// Sample list accounts response
pub const ACCOUNTS_RESPONSE: &str = r#"{
    "accounts": [
        {
            "uuid": "8bfc20d7-f7c6-4422-bf07-8243ca4169fe",
            "name": "BTC Wallet",
            "currency": "BTC",
            "available_balance": {"value": "1.5", "currency": "BTC"},
            "default": false,
            "active": true,
            "type": "ACCOUNT_TYPE_CRYPTO",
            "ready": true,
            "hold": {"value": "0.1", "currency": "BTC"}
        },
        {
            "uuid": "1d2c3b4a-0000-4422-bf07-8243ca4169fe",
            "name": "Cash (USD)",
            "currency": "USD",
            "available_balance": {"value": "250.00", "currency": "USD"},
            "default": true,
            "active": true,
            "type": "ACCOUNT_TYPE_FIAT",
            "ready": true,
            "hold": {"value": "0", "currency": "USD"}
        }
    ],
    "has_next": false,
    "cursor": "",
    "size": 2
}"#;

/// Sample error body for a rejected request
pub const INVALID_ARGUMENT_RESPONSE: &str = r#"{
    "error": "INVALID_ARGUMENT",
    "message": "limit must be between 1 and 250",
    "error_details": "",
    "preview_failure_reason": "UNKNOWN_PREVIEW_FAILURE_REASON"
}"#;

/// A request as seen on the wire
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub user_agent: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// Transport that records requests and replays queued responses
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<Recorded>>,
    responses: Mutex<VecDeque<TransportResponse>>,
}

impl RecordingTransport {
    pub fn reply(&self, status: StatusCode, body: &str) {
        self.responses
            .lock()
            .push_back(TransportResponse::new(status, body));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests.lock().last().cloned().expect("no request recorded")
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn execute(&self, request: Request) -> Result<TransportResponse, reqwest::Error> {
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        let recorded = Recorded {
            method: request.method().to_string(),
            path: request.url().path().to_string(),
            query: request.url().query().map(str::to_string),
            user_agent: header("user-agent"),
            authorization: header("authorization"),
            body: request
                .body()
                .and_then(|b| b.as_bytes())
                .map(|bytes| serde_json::from_slice(bytes).expect("body is JSON")),
        };
        self.requests.lock().push(recorded);

        Ok(self
            .responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| TransportResponse::new(StatusCode::OK, "{}")))
    }
}

/// Path of the fixture key file
pub fn key_file_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/test_api_key.json")
}

/// Client using the fixture key and a recording transport
pub fn recording_client() -> (RestClient, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::default());
    let credentials = Credentials::from_key_file(key_file_path()).expect("fixture key file");
    let client = RestClient::with_transport(credentials, ClientConfig::default(), transport.clone())
        .expect("client");
    (client, transport)
}
