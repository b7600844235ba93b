//! Public market data endpoints
//!
//! Same data as the product endpoints under `/market`, served with relaxed
//! rate limits. Requests still go through the signing dispatcher.

use super::brokerage_path;
use super::products::{candle_params, market_trade_params};
use crate::client::RestClient;
use crate::error::RestResult;
use crate::params::Params;
use crate::types::{ProductsQuery, ServerTime};
use serde_json::Value;
use tracing::instrument;

/// Public market data endpoints
pub struct PublicEndpoints<'a> {
    client: &'a RestClient,
}

impl<'a> PublicEndpoints<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    /// Get the server time
    #[instrument(skip(self, extra))]
    pub async fn get_unix_time(&self, extra: Option<Params>) -> RestResult<ServerTime> {
        self.client
            .get(&brokerage_path("/time"), Params::new(), extra)
            .await
    }

    /// Get the order book for a product
    #[instrument(skip(self, extra))]
    pub async fn get_public_product_book(
        &self,
        product_id: &str,
        limit: Option<u32>,
        aggregation_price_increment: Option<&str>,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let params = Params::new()
            .with("product_id", product_id)
            .with_opt("limit", limit)
            .with_opt("aggregation_price_increment", aggregation_price_increment);

        self.client
            .get(&brokerage_path("/market/product_book"), params, extra)
            .await
    }

    /// List products
    #[instrument(skip(self, query, extra))]
    pub async fn get_public_products(
        &self,
        query: &ProductsQuery,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let params = Params::from_serialize(query)?;
        self.client
            .get(&brokerage_path("/market/products"), params, extra)
            .await
    }

    /// Get one product
    #[instrument(skip(self, extra))]
    pub async fn get_public_product(
        &self,
        product_id: &str,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let path = brokerage_path(&format!("/market/products/{}", product_id));
        self.client.get(&path, Params::new(), extra).await
    }

    /// Get OHLCV candles
    #[instrument(skip(self, extra))]
    pub async fn get_public_candles(
        &self,
        product_id: &str,
        start: &str,
        end: &str,
        granularity: &str,
        limit: Option<u32>,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let path = brokerage_path(&format!("/market/products/{}/candles", product_id));
        let params = candle_params(start, end, granularity, limit);
        self.client.get(&path, params, extra).await
    }

    /// Get recent trades and the current best bid/ask
    #[instrument(skip(self, extra))]
    pub async fn get_public_market_trades(
        &self,
        product_id: &str,
        limit: u32,
        start: Option<&str>,
        end: Option<&str>,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let path = brokerage_path(&format!("/market/products/{}/ticker", product_id));
        let params = market_trade_params(limit, start, end);
        self.client.get(&path, params, extra).await
    }
}
