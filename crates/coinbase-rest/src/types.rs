//! Types for Coinbase Advanced Trade REST requests and responses
//!
//! Only the commonly used responses are typed. Fields the exchange may omit
//! fall back to their defaults so that new or missing fields never break
//! decoding. Endpoints without a type here return `serde_json::Value`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Shared
// ============================================================================

/// An amount in a given currency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Amount {
    /// Decimal amount
    pub value: Decimal,
    /// Currency code
    pub currency: String,
}

// ============================================================================
// Accounts
// ============================================================================

/// A brokerage account (one per currency and portfolio)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Account {
    /// Account UUID
    pub uuid: String,
    /// Display name
    pub name: String,
    /// Currency code
    pub currency: String,
    /// Balance available to trade
    pub available_balance: Amount,
    /// Whether this is the primary account for its currency
    pub default: bool,
    /// Whether the account is active
    pub active: bool,
    /// Creation time (RFC 3339)
    pub created_at: Option<String>,
    /// Last update time (RFC 3339)
    pub updated_at: Option<String>,
    /// Deletion time (RFC 3339)
    pub deleted_at: Option<String>,
    /// Account type (e.g. `ACCOUNT_TYPE_CRYPTO`)
    #[serde(rename = "type")]
    pub account_type: String,
    /// Whether the account is ready to trade
    pub ready: bool,
    /// Funds on hold
    pub hold: Amount,
    /// Owning portfolio
    pub retail_portfolio_id: Option<String>,
}

/// Page of accounts
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListAccountsResponse {
    /// Accounts on this page
    pub accounts: Vec<Account>,
    /// Whether more pages exist
    pub has_next: bool,
    /// Cursor for the next page
    pub cursor: String,
    /// Number of accounts on this page
    pub size: u32,
}

/// Single account lookup
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GetAccountResponse {
    /// The account
    pub account: Account,
}

// ============================================================================
// Products
// ============================================================================

/// A price level in an order book
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PriceLevel {
    /// Price
    pub price: Decimal,
    /// Size at this price
    pub size: Decimal,
}

/// Top of book for one product
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PriceBook {
    /// Product ID (e.g. "BTC-USD")
    pub product_id: String,
    /// Bid levels, best first
    pub bids: Vec<PriceLevel>,
    /// Ask levels, best first
    pub asks: Vec<PriceLevel>,
    /// Snapshot time
    pub time: Option<String>,
}

impl PriceBook {
    /// Best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|l| l.price)
    }

    /// Best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|l| l.price)
    }

    /// Bid/ask spread
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

/// Best bid/ask for a set of products
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BestBidAskResponse {
    /// One book per product
    pub pricebooks: Vec<PriceBook>,
}

/// Query for product listings
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductsQuery {
    /// Page size
    pub limit: Option<u32>,
    /// Offset into the product list
    pub offset: Option<u32>,
    /// `SPOT` or `FUTURE`
    pub product_type: Option<String>,
    /// Restrict to these products
    pub product_ids: Option<Vec<String>>,
    /// `EXPIRING` or `PERPETUAL` (futures only)
    pub contract_expiry_type: Option<String>,
    /// `STATUS_ALL`, `STATUS_EXPIRED`, `STATUS_UNEXPIRED`
    pub expiring_contract_status: Option<String>,
    /// Include products that are not tradable
    pub get_all_products: Option<bool>,
}

// ============================================================================
// Orders
// ============================================================================

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    /// Buy the base currency
    Buy,
    /// Sell the base currency
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Direction that triggers a stop order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopDirection {
    /// Trigger when the price rises to the stop price
    #[serde(rename = "STOP_DIRECTION_STOP_UP")]
    StopUp,
    /// Trigger when the price falls to the stop price
    #[serde(rename = "STOP_DIRECTION_STOP_DOWN")]
    StopDown,
}

/// Order type and its parameters
///
/// Serializes to the nested object the API expects, e.g.
/// `{"limit_limit_gtc": {"base_size": "0.01", "limit_price": "50000", "post_only": false}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderConfiguration {
    /// Market order, immediate or cancel
    MarketMarketIoc {
        /// Amount of quote currency to spend (buys)
        #[serde(skip_serializing_if = "Option::is_none")]
        quote_size: Option<Decimal>,
        /// Amount of base currency to trade
        #[serde(skip_serializing_if = "Option::is_none")]
        base_size: Option<Decimal>,
    },
    /// Limit order routed by the smart order router, immediate or cancel
    SorLimitIoc {
        /// Amount of base currency
        base_size: Decimal,
        /// Worst acceptable price
        limit_price: Decimal,
    },
    /// Limit order, good till cancelled
    LimitLimitGtc {
        /// Amount of base currency
        base_size: Decimal,
        /// Limit price
        limit_price: Decimal,
        /// Reject if the order would take liquidity
        post_only: bool,
    },
    /// Limit order, good till date
    LimitLimitGtd {
        /// Amount of base currency
        base_size: Decimal,
        /// Limit price
        limit_price: Decimal,
        /// Expiry time (RFC 3339)
        end_time: String,
        /// Reject if the order would take liquidity
        post_only: bool,
    },
    /// Stop limit order, good till cancelled
    StopLimitStopLimitGtc {
        /// Amount of base currency
        base_size: Decimal,
        /// Limit price once triggered
        limit_price: Decimal,
        /// Trigger price
        stop_price: Decimal,
        /// Trigger direction
        stop_direction: StopDirection,
    },
    /// Stop limit order, good till date
    StopLimitStopLimitGtd {
        /// Amount of base currency
        base_size: Decimal,
        /// Limit price once triggered
        limit_price: Decimal,
        /// Trigger price
        stop_price: Decimal,
        /// Expiry time (RFC 3339)
        end_time: String,
        /// Trigger direction
        stop_direction: StopDirection,
    },
}

impl OrderConfiguration {
    /// Market order sized in quote currency
    pub fn market_quote(quote_size: Decimal) -> Self {
        Self::MarketMarketIoc {
            quote_size: Some(quote_size),
            base_size: None,
        }
    }

    /// Market order sized in base currency
    pub fn market_base(base_size: Decimal) -> Self {
        Self::MarketMarketIoc {
            quote_size: None,
            base_size: Some(base_size),
        }
    }

    /// Immediate-or-cancel limit order
    pub fn limit_ioc(base_size: Decimal, limit_price: Decimal) -> Self {
        Self::SorLimitIoc {
            base_size,
            limit_price,
        }
    }

    /// Good-till-cancelled limit order
    pub fn limit_gtc(base_size: Decimal, limit_price: Decimal, post_only: bool) -> Self {
        Self::LimitLimitGtc {
            base_size,
            limit_price,
            post_only,
        }
    }

    /// Good-till-date limit order
    pub fn limit_gtd(
        base_size: Decimal,
        limit_price: Decimal,
        end_time: impl Into<String>,
        post_only: bool,
    ) -> Self {
        Self::LimitLimitGtd {
            base_size,
            limit_price,
            end_time: end_time.into(),
            post_only,
        }
    }

    /// Good-till-cancelled stop limit order
    pub fn stop_limit_gtc(
        base_size: Decimal,
        limit_price: Decimal,
        stop_price: Decimal,
        stop_direction: StopDirection,
    ) -> Self {
        Self::StopLimitStopLimitGtc {
            base_size,
            limit_price,
            stop_price,
            stop_direction,
        }
    }

    /// Good-till-date stop limit order
    pub fn stop_limit_gtd(
        base_size: Decimal,
        limit_price: Decimal,
        stop_price: Decimal,
        end_time: impl Into<String>,
        stop_direction: StopDirection,
    ) -> Self {
        Self::StopLimitStopLimitGtd {
            base_size,
            limit_price,
            stop_price,
            end_time: end_time.into(),
            stop_direction,
        }
    }
}

/// Order placement request
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    /// Caller-chosen unique ID; the API deduplicates on it
    pub client_order_id: String,
    /// Product to trade (e.g. "BTC-USD")
    pub product_id: String,
    /// Buy or sell
    pub side: OrderSide,
    /// Order type and parameters
    pub order_configuration: OrderConfiguration,
    /// Self-trade prevention group
    pub self_trade_prevention_id: Option<String>,
    /// Leverage (futures and perpetuals)
    pub leverage: Option<String>,
    /// `CROSS` or `ISOLATED`
    pub margin_type: Option<String>,
    /// Portfolio to trade from
    pub retail_portfolio_id: Option<String>,
    /// ID returned by a previous preview
    pub preview_id: Option<String>,
}

impl OrderRequest {
    /// Create an order request with the required fields
    pub fn new(
        client_order_id: impl Into<String>,
        product_id: impl Into<String>,
        side: OrderSide,
        order_configuration: OrderConfiguration,
    ) -> Self {
        Self {
            client_order_id: client_order_id.into(),
            product_id: product_id.into(),
            side,
            order_configuration,
            self_trade_prevention_id: None,
            leverage: None,
            margin_type: None,
            retail_portfolio_id: None,
            preview_id: None,
        }
    }

    /// Trade from a specific portfolio
    pub fn with_portfolio(mut self, retail_portfolio_id: impl Into<String>) -> Self {
        self.retail_portfolio_id = Some(retail_portfolio_id.into());
        self
    }

    /// Set leverage and margin type
    pub fn with_leverage(mut self, leverage: impl Into<String>, margin_type: impl Into<String>) -> Self {
        self.leverage = Some(leverage.into());
        self.margin_type = Some(margin_type.into());
        self
    }

    /// Set the self-trade prevention group
    pub fn with_self_trade_prevention_id(mut self, id: impl Into<String>) -> Self {
        self.self_trade_prevention_id = Some(id.into());
        self
    }

    /// Place the order that a preview returned
    pub fn with_preview_id(mut self, preview_id: impl Into<String>) -> Self {
        self.preview_id = Some(preview_id.into());
        self
    }
}

/// Success details of a placed order
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderSuccess {
    /// Exchange order ID
    pub order_id: String,
    /// Product ID
    pub product_id: String,
    /// Side
    pub side: String,
    /// Echoed client order ID
    pub client_order_id: String,
}

/// Failure details of a rejected order
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderFailure {
    /// Error code
    pub error: Option<String>,
    /// Human readable message
    pub message: Option<String>,
    /// Additional detail
    pub error_details: Option<String>,
    /// Reason a preview failed
    pub preview_failure_reason: Option<String>,
    /// Reason order placement failed
    pub new_order_failure_reason: Option<String>,
}

/// Result of placing an order
///
/// A rejected order still comes back with HTTP 200; check `success`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateOrderResponse {
    /// Whether the order was accepted
    pub success: bool,
    /// Present when accepted
    pub success_response: Option<OrderSuccess>,
    /// Present when rejected
    pub error_response: Option<OrderFailure>,
    /// Echoed order configuration
    pub order_configuration: Option<serde_json::Value>,
}

impl CreateOrderResponse {
    /// Exchange order ID if the order was accepted
    pub fn order_id(&self) -> Option<&str> {
        self.success_response.as_ref().map(|s| s.order_id.as_str())
    }
}

/// Outcome for one order in a batch cancel
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CancelOrderResult {
    /// Whether the cancel was accepted
    pub success: bool,
    /// Reason for failure
    pub failure_reason: Option<String>,
    /// Order ID
    pub order_id: String,
}

/// Batch cancel response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CancelOrdersResponse {
    /// One result per requested order
    pub results: Vec<CancelOrderResult>,
}

/// Query for historical orders
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListOrdersQuery {
    /// Restrict to these order IDs
    pub order_ids: Option<Vec<String>>,
    /// Restrict to one product
    pub product_id: Option<String>,
    /// e.g. `OPEN`, `FILLED`, `CANCELLED`
    pub order_status: Option<Vec<String>>,
    /// Page size
    pub limit: Option<u32>,
    /// Lower bound on creation time (RFC 3339)
    pub start_date: Option<String>,
    /// Upper bound on creation time (RFC 3339)
    pub end_date: Option<String>,
    /// e.g. `MARKET`, `LIMIT`
    pub order_types: Option<Vec<String>>,
    /// `BUY` or `SELL`
    pub order_side: Option<OrderSide>,
    /// Pagination cursor
    pub cursor: Option<String>,
    /// `SPOT` or `FUTURE`
    pub product_type: Option<String>,
    /// e.g. `RETAIL_ADVANCED`
    pub order_placement_source: Option<String>,
    /// `EXPIRING` or `PERPETUAL`
    pub contract_expiry_type: Option<String>,
    /// Restrict to these assets
    pub asset_filters: Option<Vec<String>>,
    /// Portfolio to list from
    pub retail_portfolio_id: Option<String>,
}

/// Query for fills
#[derive(Debug, Clone, Default, Serialize)]
pub struct FillsQuery {
    /// Restrict to these order IDs
    pub order_ids: Option<Vec<String>>,
    /// Restrict to these trade IDs
    pub trade_ids: Option<Vec<String>>,
    /// Restrict to these products
    pub product_ids: Option<Vec<String>>,
    /// Lower bound on fill time (RFC 3339)
    pub start_sequence_timestamp: Option<String>,
    /// Upper bound on fill time (RFC 3339)
    pub end_sequence_timestamp: Option<String>,
    /// Portfolio to list from
    pub retail_portfolio_id: Option<String>,
    /// Page size
    pub limit: Option<u32>,
    /// Pagination cursor
    pub cursor: Option<String>,
}

// ============================================================================
// Portfolios
// ============================================================================

/// A portfolio
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Portfolio {
    /// Display name
    pub name: String,
    /// Portfolio UUID
    pub uuid: String,
    /// `DEFAULT`, `CONSUMER` or `INTX`
    #[serde(rename = "type")]
    pub portfolio_type: String,
    /// Whether the portfolio was deleted
    pub deleted: bool,
}

/// Portfolio listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListPortfoliosResponse {
    /// Portfolios
    pub portfolios: Vec<Portfolio>,
}

/// Single portfolio (create and edit)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PortfolioResponse {
    /// The portfolio
    pub portfolio: Portfolio,
}

// ============================================================================
// Fees
// ============================================================================

/// Fee tier of the account
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeeTier {
    /// Tier name
    pub pricing_tier: String,
    /// Lower bound of 30-day volume
    pub usd_from: Option<String>,
    /// Upper bound of 30-day volume
    pub usd_to: Option<String>,
    /// Taker fee rate
    pub taker_fee_rate: Option<Decimal>,
    /// Maker fee rate
    pub maker_fee_rate: Option<Decimal>,
}

/// Volume and fee summary
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransactionSummary {
    /// 30-day volume
    pub total_volume: f64,
    /// 30-day fees paid
    pub total_fees: f64,
    /// Current fee tier
    pub fee_tier: FeeTier,
    /// Advanced Trade only volume
    pub advanced_trade_only_volume: Option<f64>,
    /// Advanced Trade only fees
    pub advanced_trade_only_fees: Option<f64>,
    /// Total balance across portfolios
    pub total_balance: Option<String>,
    /// Whether a promotional fee applies
    pub has_promo_fee: Option<bool>,
}

// ============================================================================
// Payment Methods
// ============================================================================

/// A linked payment method
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PaymentMethod {
    /// Payment method ID
    pub id: String,
    /// Type (e.g. `ACH`)
    #[serde(rename = "type")]
    pub method_type: String,
    /// Display name
    pub name: String,
    /// Currency
    pub currency: String,
    /// Whether the method is verified
    pub verified: bool,
    /// Can be used to buy
    pub allow_buy: bool,
    /// Can be used to sell
    pub allow_sell: bool,
    /// Can be used to deposit
    pub allow_deposit: bool,
    /// Can be used to withdraw
    pub allow_withdraw: bool,
    /// Creation time
    pub created_at: Option<String>,
    /// Last update time
    pub updated_at: Option<String>,
}

/// Payment method listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListPaymentMethodsResponse {
    /// Payment methods
    pub payment_methods: Vec<PaymentMethod>,
}

/// Single payment method
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GetPaymentMethodResponse {
    /// The payment method
    pub payment_method: PaymentMethod,
}

// ============================================================================
// Key permissions & server time
// ============================================================================

/// Permissions of the API key in use
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KeyPermissions {
    /// Read access
    pub can_view: bool,
    /// Trading access
    pub can_trade: bool,
    /// Transfer access
    pub can_transfer: bool,
    /// Portfolio the key is scoped to
    pub portfolio_uuid: String,
    /// Type of that portfolio
    pub portfolio_type: String,
}

/// Server clock
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerTime {
    /// ISO 8601 time
    pub iso: String,
    /// Unix seconds, as text
    pub epoch_seconds: String,
    /// Unix milliseconds, as text
    pub epoch_millis: String,
}

impl ServerTime {
    /// Unix seconds
    pub fn unix_seconds(&self) -> Option<i64> {
        self.epoch_seconds.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_order_configuration_shape() {
        let config = OrderConfiguration::limit_gtc(dec!(0.01), dec!(50000), false);
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({"limit_limit_gtc": {"base_size": "0.01", "limit_price": "50000", "post_only": false}})
        );

        let config = OrderConfiguration::market_quote(dec!(10));
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({"market_market_ioc": {"quote_size": "10"}})
        );
    }

    #[test]
    fn test_stop_limit_shape() {
        let config = OrderConfiguration::stop_limit_gtc(
            dec!(1),
            dec!(2900),
            dec!(3000),
            StopDirection::StopDown,
        );
        assert_eq!(
            serde_json::to_value(&config).unwrap()["stop_limit_stop_limit_gtc"]["stop_direction"],
            "STOP_DIRECTION_STOP_DOWN"
        );
    }

    #[test]
    fn test_parse_accounts() {
        let json = r#"{
            "accounts": [{
                "uuid": "8bfc20d7-f7c6-4422-bf07-8243ca4169fe",
                "name": "BTC Wallet",
                "currency": "BTC",
                "available_balance": {"value": "1.25", "currency": "BTC"},
                "default": false,
                "active": true,
                "created_at": "2021-05-31T09:59:59Z",
                "updated_at": "2021-05-31T09:59:59Z",
                "deleted_at": null,
                "type": "ACCOUNT_TYPE_CRYPTO",
                "ready": true,
                "hold": {"value": "0", "currency": "BTC"},
                "retail_portfolio_id": "b87a2d3f-8a1e-49b3-a4ea-402d8c389aca"
            }],
            "has_next": true,
            "cursor": "789100",
            "size": 1
        }"#;

        let response: ListAccountsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.size, 1);
        assert!(response.has_next);

        let account = &response.accounts[0];
        assert_eq!(account.currency, "BTC");
        assert_eq!(account.available_balance.value, dec!(1.25));
        assert_eq!(account.account_type, "ACCOUNT_TYPE_CRYPTO");
        assert!(account.deleted_at.is_none());
    }

    #[test]
    fn test_parse_best_bid_ask() {
        let json = r#"{"pricebooks": [{
            "product_id": "BTC-USD",
            "bids": [{"price": "64000.10", "size": "0.5"}],
            "asks": [{"price": "64000.60", "size": "0.2"}],
            "time": "2024-05-01T00:00:00Z"
        }]}"#;

        let response: BestBidAskResponse = serde_json::from_str(json).unwrap();
        let book = &response.pricebooks[0];
        assert_eq!(book.best_bid(), Some(dec!(64000.10)));
        assert_eq!(book.spread(), Some(dec!(0.50)));
    }

    #[test]
    fn test_parse_create_order_failure() {
        let json = r#"{
            "success": false,
            "error_response": {
                "error": "INSUFFICIENT_FUND",
                "message": "Insufficient balance in source account",
                "preview_failure_reason": "PREVIEW_INSUFFICIENT_FUND"
            }
        }"#;

        let response: CreateOrderResponse = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert!(response.order_id().is_none());
        assert_eq!(
            response.error_response.unwrap().error.as_deref(),
            Some("INSUFFICIENT_FUND")
        );
    }

    #[test]
    fn test_parse_server_time() {
        let json = r#"{"iso":"2023-05-10T19:31:13.543Z","epochSeconds":"1683747073","epochMillis":"1683747073543"}"#;
        let time: ServerTime = serde_json::from_str(json).unwrap();
        assert_eq!(time.unix_seconds(), Some(1_683_747_073));
    }

    #[test]
    fn test_parse_transaction_summary() {
        let json = r#"{
            "total_volume": 1000.5,
            "total_fees": 25,
            "fee_tier": {
                "pricing_tier": "Advanced 1",
                "usd_from": "0",
                "usd_to": "10000",
                "taker_fee_rate": "0.006",
                "maker_fee_rate": "0.004"
            },
            "has_promo_fee": false
        }"#;

        let summary: TransactionSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.fee_tier.taker_fee_rate, Some(dec!(0.006)));
        assert_eq!(summary.total_fees, 25.0);
    }
}
