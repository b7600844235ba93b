//! REST API client for the Coinbase Advanced Trade API
//!
//! This crate wraps the `/api/v3/brokerage` REST surface: accounts, products
//! and market data, orders, portfolios, conversions, fees, futures,
//! perpetuals, payment methods and key permissions.
//!
//! # Features
//!
//! - **Accounts**: List and look up brokerage accounts
//! - **Market Data**: Products, order books, candles, recent trades
//! - **Trading**: Place, preview, edit and cancel orders
//! - **Derivatives**: US futures (CFM) and international perpetuals (INTX)
//!
//! # Authentication
//!
//! Every request carries a fresh ES256 JWT in the `Authorization` header,
//! signed with a CDP API key (see [`coinbase_auth`]). Credentials come from
//! an explicit key name and PEM key, a JSON key file, or the environment.
//!
//! # Example
//!
//! ```no_run
//! use coinbase_rest::{Params, RestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RestClient::from_key_file("cdp_api_key.json")?;
//!
//!     let accounts = client
//!         .accounts()
//!         .get_accounts(Some(10), None, None, None)
//!         .await?;
//!     println!("{} accounts", accounts.accounts.len());
//!
//!     // Options without a named argument go through `extra`
//!     let book = client
//!         .products()
//!         .get_product_book("BTC-USD", Some(5), None, Some(Params::new().with("foo", "bar")))
//!         .await?;
//!     println!("{}", book);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! A 4xx or 5xx answer becomes [`RestError::Api`] carrying the status and
//! raw body. Requests are never retried.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod params;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, RestClient, RestRequest, API_PREFIX, USER_AGENT};
pub use error::{RestError, RestResult};
pub use params::Params;
pub use transport::{HttpTransport, ReqwestTransport, TransportResponse};

// Re-export credential types so callers need only this crate
pub use coinbase_auth::{AuthError, CredentialSource, Credentials, KeyFile};

// Re-export endpoint-specific types
pub use types::{
    // Accounts
    Account, Amount, GetAccountResponse, ListAccountsResponse,
    // Products
    BestBidAskResponse, PriceBook, PriceLevel, ProductsQuery,
    // Orders
    CancelOrderResult, CancelOrdersResponse, CreateOrderResponse, FillsQuery, ListOrdersQuery,
    OrderConfiguration, OrderFailure, OrderRequest, OrderSide, OrderSuccess, StopDirection,
    // Portfolios
    ListPortfoliosResponse, Portfolio, PortfolioResponse,
    // Fees
    FeeTier, TransactionSummary,
    // Payments
    GetPaymentMethodResponse, ListPaymentMethodsResponse, PaymentMethod,
    // Key info
    KeyPermissions, ServerTime,
};
