//! Main REST client implementation

use crate::endpoints::{
    AccountEndpoints, ConvertEndpoints, DataEndpoints, FeeEndpoints, FuturesEndpoints,
    OrderEndpoints, PaymentEndpoints, PerpetualsEndpoints, PortfolioEndpoints, ProductEndpoints,
    PublicEndpoints,
};
use crate::error::{RestError, RestResult};
use crate::params::Params;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{ListAccountsResponse, TransactionSummary};
use coinbase_auth::{CredentialSource, Credentials, KeyFile, RequestSigner, API_HOST};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT as USER_AGENT_HEADER};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Client identifier sent with every request
pub const USER_AGENT: &str = concat!("coinbase-advanced-rs/", env!("CARGO_PKG_VERSION"));

/// Path prefix of the brokerage API
pub const API_PREFIX: &str = "/api/v3/brokerage";

/// One outgoing call: method, path and parameters
///
/// For GET and DELETE the parameters travel in the query string, for POST
/// and PUT in the JSON body.
#[derive(Debug, Clone)]
pub struct RestRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute path, e.g. `/api/v3/brokerage/accounts`
    pub path: String,
    /// Query parameters
    pub query: Params,
    /// JSON body
    pub body: Option<Params>,
}

impl RestRequest {
    /// Create a request without parameters
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Params::new(),
            body: None,
        }
    }

    /// GET with query parameters
    pub fn get(path: impl Into<String>, query: Params) -> Self {
        Self::new(Method::GET, path).with_query(query)
    }

    /// POST with a JSON body
    pub fn post(path: impl Into<String>, body: Params) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    /// PUT with a JSON body
    pub fn put(path: impl Into<String>, body: Params) -> Self {
        Self::new(Method::PUT, path).with_body(body)
    }

    /// DELETE with query parameters
    pub fn delete(path: impl Into<String>, query: Params) -> Self {
        Self::new(Method::DELETE, path).with_query(query)
    }

    /// Replace the query parameters
    pub fn with_query(mut self, query: Params) -> Self {
        self.query = query;
        self
    }

    /// Replace the JSON body
    pub fn with_body(mut self, body: Params) -> Self {
        self.body = Some(body);
        self
    }

    /// Merge caller-supplied options into the query or body
    pub fn with_extra(mut self, extra: Option<Params>) -> Self {
        if extra.is_none() {
            return self;
        }
        if self.carries_body() {
            self.body = Some(self.body.take().unwrap_or_default().merge(extra));
        } else {
            self.query = std::mem::take(&mut self.query).merge(extra);
        }
        self
    }

    fn carries_body(&self) -> bool {
        self.method == Method::POST || self.method == Method::PUT
    }
}

/// Coinbase Advanced Trade REST API client
///
/// Holds the resolved credentials and signs every request with a fresh
/// JWT. Cloning is cheap and clones share the same connection pool.
///
/// # Example
///
/// ```no_run
/// use coinbase_rest::RestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = RestClient::from_key_file("cdp_api_key.json")?;
///
///     let accounts = client.get_accounts().await?;
///     for account in accounts.accounts {
///         println!("{}: {}", account.currency, account.available_balance.value);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RestClient {
    http_client: Client,
    transport: Arc<dyn HttpTransport>,
    credentials: Arc<Credentials>,
    config: ClientConfig,
}

impl RestClient {
    /// Create a client from an API key name and PEM private key
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> RestResult<Self> {
        Self::with_config(
            Credentials::new(api_key, api_secret),
            ClientConfig::default(),
        )
    }

    /// Create a client from a JSON key file
    pub fn from_key_file(path: impl AsRef<Path>) -> RestResult<Self> {
        Self::with_config(
            KeyFile::from(path.as_ref()),
            ClientConfig::default(),
        )
    }

    /// Create a client from `COINBASE_API_KEY` / `COINBASE_API_SECRET`
    pub fn from_env() -> RestResult<Self> {
        Self::with_config(Credentials::from_env()?, ClientConfig::default())
    }

    /// Create a client from optional inputs, requiring exactly one source
    ///
    /// Mirrors a constructor taking `api_key`, `api_secret` and `key_file`
    /// as optional arguments.
    pub fn from_parts(
        api_key: Option<String>,
        api_secret: Option<String>,
        key_file: Option<KeyFile>,
    ) -> RestResult<Self> {
        let source = CredentialSource::resolve(api_key, api_secret, key_file)?;
        Self::with_config(source, ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(
        source: impl Into<CredentialSource>,
        config: ClientConfig,
    ) -> RestResult<Self> {
        let http_client = Client::builder().build()?;
        let transport = Arc::new(ReqwestTransport::new(http_client.clone()));
        Self::build(source.into(), config, http_client, transport)
    }

    /// Create a client that sends requests through a custom transport
    pub fn with_transport(
        source: impl Into<CredentialSource>,
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> RestResult<Self> {
        Self::build(source.into(), config, Client::builder().build()?, transport)
    }

    fn build(
        source: CredentialSource,
        config: ClientConfig,
        http_client: Client,
        transport: Arc<dyn HttpTransport>,
    ) -> RestResult<Self> {
        let credentials = source.load()?;

        info!(key_id = %credentials.key_id(), host = %config.host, "Created Coinbase REST client");

        Ok(Self {
            http_client,
            transport,
            credentials: Arc::new(credentials),
            config,
        })
    }

    /// Credentials used to sign requests
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ========================================================================
    // Dispatcher
    // ========================================================================

    /// Authenticated GET; `extra` is appended to the query string
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Params,
        extra: Option<Params>,
    ) -> RestResult<T> {
        self.send(RestRequest::get(path, params).with_extra(extra))
            .await
    }

    /// Authenticated POST; `extra` is appended to the JSON body
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        data: Params,
        extra: Option<Params>,
    ) -> RestResult<T> {
        self.send(RestRequest::post(path, data).with_extra(extra))
            .await
    }

    /// Authenticated PUT; `extra` is appended to the JSON body
    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        data: Params,
        extra: Option<Params>,
    ) -> RestResult<T> {
        self.send(RestRequest::put(path, data).with_extra(extra))
            .await
    }

    /// Authenticated DELETE; `extra` is appended to the query string
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Params,
        extra: Option<Params>,
    ) -> RestResult<T> {
        self.send(RestRequest::delete(path, params).with_extra(extra))
            .await
    }

    /// Sign and send a request, decoding the JSON response
    ///
    /// Exactly one HTTP call is made. Status codes 400-599 become
    /// [`RestError::Api`]; nothing is retried.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send<T: DeserializeOwned>(&self, request: RestRequest) -> RestResult<T> {
        let RestRequest {
            method,
            path,
            query,
            body,
        } = request;

        let token = RequestSigner::new(&self.credentials).sign_request(
            method.as_str(),
            &self.config.host,
            &path,
        )?;
        let url = format!("https://{}{}", self.config.host, path);

        let mut builder = self
            .http_client
            .request(method, &url)
            .header(USER_AGENT_HEADER, USER_AGENT)
            .header(AUTHORIZATION, token.bearer())
            .header(CONTENT_TYPE, "application/json");

        let query = query.without_nulls();
        if !query.is_empty() {
            builder = builder.query(&query.to_query_pairs());
        }
        if let Some(body) = body.map(Params::without_nulls).filter(|b| !b.is_empty()) {
            builder = builder.json(&body);
        }
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }

        let request = builder.build()?;
        debug!(url = %request.url(), "Making authenticated request");

        let response = self.transport.execute(request).await?;

        if response.status.is_client_error() || response.status.is_server_error() {
            warn!(status = response.status.as_u16(), "Request failed");
            return Err(RestError::api(response.status, response.body));
        }

        decode(&response.body)
    }

    // ========================================================================
    // Endpoint groups
    // ========================================================================

    /// Account endpoints
    pub fn accounts(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(self)
    }

    /// Product and market data endpoints
    pub fn products(&self) -> ProductEndpoints<'_> {
        ProductEndpoints::new(self)
    }

    /// Order endpoints
    pub fn orders(&self) -> OrderEndpoints<'_> {
        OrderEndpoints::new(self)
    }

    /// Portfolio endpoints
    pub fn portfolios(&self) -> PortfolioEndpoints<'_> {
        PortfolioEndpoints::new(self)
    }

    /// Currency conversion endpoints
    pub fn convert(&self) -> ConvertEndpoints<'_> {
        ConvertEndpoints::new(self)
    }

    /// Fee endpoints
    pub fn fees(&self) -> FeeEndpoints<'_> {
        FeeEndpoints::new(self)
    }

    /// US derivatives (CFM) endpoints
    pub fn futures(&self) -> FuturesEndpoints<'_> {
        FuturesEndpoints::new(self)
    }

    /// International perpetuals (INTX) endpoints
    pub fn perpetuals(&self) -> PerpetualsEndpoints<'_> {
        PerpetualsEndpoints::new(self)
    }

    /// Payment method endpoints
    pub fn payments(&self) -> PaymentEndpoints<'_> {
        PaymentEndpoints::new(self)
    }

    /// API key information endpoints
    pub fn data(&self) -> DataEndpoints<'_> {
        DataEndpoints::new(self)
    }

    /// Public market data endpoints
    pub fn public(&self) -> PublicEndpoints<'_> {
        PublicEndpoints::new(self)
    }

    // ========================================================================
    // Shortcuts
    // ========================================================================

    /// List the first page of accounts
    pub async fn get_accounts(&self) -> RestResult<ListAccountsResponse> {
        self.accounts().get_accounts(None, None, None, None).await
    }

    /// Get the fee tier and 30-day volume
    pub async fn get_transaction_summary(&self) -> RestResult<TransactionSummary> {
        self.fees()
            .get_transaction_summary(None, None, None, None)
            .await
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("key_id", &self.credentials.key_id())
            .field("config", &self.config)
            .finish()
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> RestResult<T> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(body).map_err(|source| RestError::Decode {
        source,
        body: body.to_string(),
    })
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API host, also used in the signed `uri` claim
    pub host: String,
    /// Per-request timeout; `None` leaves the transport default
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: API_HOST.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set a per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
