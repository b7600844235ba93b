//! Product and market data endpoints

use super::brokerage_path;
use crate::client::RestClient;
use crate::error::RestResult;
use crate::params::Params;
use crate::types::{BestBidAskResponse, ProductsQuery};
use serde_json::Value;
use tracing::instrument;

/// Product and market data endpoints (authenticated)
pub struct ProductEndpoints<'a> {
    client: &'a RestClient,
}

impl<'a> ProductEndpoints<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    /// List tradable products
    #[instrument(skip(self, query, extra))]
    pub async fn get_products(
        &self,
        query: &ProductsQuery,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let params = Params::from_serialize(query)?;
        self.client
            .get(&brokerage_path("/products"), params, extra)
            .await
    }

    /// Get one product
    ///
    /// # Arguments
    /// * `product_id` - Trading pair (e.g. "BTC-USD")
    /// * `get_tradability_status` - Include whether the product is tradable
    #[instrument(skip(self, extra))]
    pub async fn get_product(
        &self,
        product_id: &str,
        get_tradability_status: Option<bool>,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let path = brokerage_path(&format!("/products/{}", product_id));
        let params = Params::new().with_opt("get_tradability_status", get_tradability_status);
        self.client.get(&path, params, extra).await
    }

    /// Get the order book for a product
    ///
    /// # Arguments
    /// * `product_id` - Trading pair
    /// * `limit` - Number of levels per side
    /// * `aggregation_price_increment` - Price bucket size
    #[instrument(skip(self, extra))]
    pub async fn get_product_book(
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
            .get(&brokerage_path("/product_book"), params, extra)
            .await
    }

    /// Get the best bid and ask for several products
    ///
    /// With no `product_ids` the API returns every product.
    #[instrument(skip(self, extra))]
    pub async fn get_best_bid_ask(
        &self,
        product_ids: Option<&[&str]>,
        extra: Option<Params>,
    ) -> RestResult<BestBidAskResponse> {
        let params = Params::new().with_opt("product_ids", product_ids);
        self.client
            .get(&brokerage_path("/best_bid_ask"), params, extra)
            .await
    }

    /// Get OHLCV candles
    ///
    /// # Arguments
    /// * `start` / `end` - UNIX timestamps in seconds, as text
    /// * `granularity` - e.g. `ONE_MINUTE`, `ONE_HOUR`, `ONE_DAY`
    /// * `limit` - Number of candles (max 350)
    #[instrument(skip(self, extra))]
    pub async fn get_candles(
        &self,
        product_id: &str,
        start: &str,
        end: &str,
        granularity: &str,
        limit: Option<u32>,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let path = brokerage_path(&format!("/products/{}/candles", product_id));
        let params = candle_params(start, end, granularity, limit);
        self.client.get(&path, params, extra).await
    }

    /// Get recent trades and the current best bid/ask
    #[instrument(skip(self, extra))]
    pub async fn get_market_trades(
        &self,
        product_id: &str,
        limit: u32,
        start: Option<&str>,
        end: Option<&str>,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let path = brokerage_path(&format!("/products/{}/ticker", product_id));
        let params = market_trade_params(limit, start, end);
        self.client.get(&path, params, extra).await
    }
}

pub(crate) fn candle_params(start: &str, end: &str, granularity: &str, limit: Option<u32>) -> Params {
    Params::new()
        .with("start", start)
        .with("end", end)
        .with("granularity", granularity)
        .with_opt("limit", limit)
}

pub(crate) fn market_trade_params(limit: u32, start: Option<&str>, end: Option<&str>) -> Params {
    Params::new()
        .with("limit", limit)
        .with_opt("start", start)
        .with_opt("end", end)
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::mock_client;
    use crate::types::ProductsQuery;
    use reqwest::StatusCode;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_get_products_query() {
        let (client, transport) = mock_client();
        let query = ProductsQuery {
            limit: Some(5),
            product_type: Some("SPOT".into()),
            product_ids: Some(vec!["BTC-USD".into(), "ETH-USD".into()]),
            ..Default::default()
        };

        client.products().get_products(&query, None).await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.url.path(), "/api/v3/brokerage/products");
        assert_eq!(
            request.query(),
            Some("limit=5&product_type=SPOT&product_ids=BTC-USD&product_ids=ETH-USD")
        );
    }

    #[tokio::test]
    async fn test_get_product_book() {
        let (client, transport) = mock_client();
        client
            .products()
            .get_product_book("BTC-USD", Some(10), None, None)
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.url.path(), "/api/v3/brokerage/product_book");
        assert_eq!(request.query(), Some("product_id=BTC-USD&limit=10"));
    }

    #[tokio::test]
    async fn test_get_best_bid_ask() {
        let (client, transport) = mock_client();
        transport.push_response(
            StatusCode::OK,
            r#"{"pricebooks":[{"product_id":"BTC-USD","bids":[{"price":"100","size":"1"}],"asks":[{"price":"101","size":"2"}]}]}"#,
        );

        let response = client
            .products()
            .get_best_bid_ask(Some(&["BTC-USD"]), None)
            .await
            .unwrap();

        assert_eq!(transport.last_request().query(), Some("product_ids=BTC-USD"));
        assert_eq!(response.pricebooks[0].spread(), Some(dec!(1)));
    }

    #[tokio::test]
    async fn test_get_candles() {
        let (client, transport) = mock_client();
        client
            .products()
            .get_candles("BTC-USD", "1700000000", "1700003600", "ONE_MINUTE", None, None)
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.url.path(), "/api/v3/brokerage/products/BTC-USD/candles");
        assert_eq!(
            request.query(),
            Some("start=1700000000&end=1700003600&granularity=ONE_MINUTE")
        );
    }

    #[tokio::test]
    async fn test_get_market_trades() {
        let (client, transport) = mock_client();
        client
            .products()
            .get_market_trades("ETH-USD", 10, None, None, None)
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.url.path(), "/api/v3/brokerage/products/ETH-USD/ticker");
        assert_eq!(request.query(), Some("limit=10"));
    }
}
