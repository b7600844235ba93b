//! Order endpoints
//!
//! Placement, preview, editing and cancellation, plus order and fill
//! history. Amounts are sent as decimal strings.

use super::brokerage_path;
use crate::client::RestClient;
use crate::error::{RestError, RestResult};
use crate::params::Params;
use crate::types::{
    CancelOrdersResponse, CreateOrderResponse, FillsQuery, ListOrdersQuery, OrderConfiguration,
    OrderRequest, OrderSide, StopDirection,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, instrument};

/// Order endpoints
pub struct OrderEndpoints<'a> {
    client: &'a RestClient,
}

impl<'a> OrderEndpoints<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    /// Place an order
    ///
    /// A rejected order is still a successful call; inspect
    /// [`CreateOrderResponse::success`].
    #[instrument(skip(self, order, extra), fields(client_order_id = %order.client_order_id, product_id = %order.product_id))]
    pub async fn create_order(
        &self,
        order: &OrderRequest,
        extra: Option<Params>,
    ) -> RestResult<CreateOrderResponse> {
        let body = Params::from_serialize(order)?;
        let response: CreateOrderResponse = self
            .client
            .post(&brokerage_path("/orders"), body, extra)
            .await?;

        debug!(success = response.success, order_id = ?response.order_id(), "Order submitted");
        Ok(response)
    }

    async fn place(
        &self,
        client_order_id: &str,
        product_id: &str,
        side: OrderSide,
        order_configuration: OrderConfiguration,
        extra: Option<Params>,
    ) -> RestResult<CreateOrderResponse> {
        let order = OrderRequest::new(client_order_id, product_id, side, order_configuration);
        self.create_order(&order, extra).await
    }

    // ========================================================================
    // Market orders
    // ========================================================================

    /// Market buy spending `quote_size` of the quote currency
    pub async fn market_order_buy(
        &self,
        client_order_id: &str,
        product_id: &str,
        quote_size: Decimal,
        extra: Option<Params>,
    ) -> RestResult<CreateOrderResponse> {
        let config = OrderConfiguration::market_quote(quote_size);
        self.place(client_order_id, product_id, OrderSide::Buy, config, extra)
            .await
    }

    /// Market sell of `base_size` of the base currency
    pub async fn market_order_sell(
        &self,
        client_order_id: &str,
        product_id: &str,
        base_size: Decimal,
        extra: Option<Params>,
    ) -> RestResult<CreateOrderResponse> {
        let config = OrderConfiguration::market_base(base_size);
        self.place(client_order_id, product_id, OrderSide::Sell, config, extra)
            .await
    }

    // ========================================================================
    // Limit orders
    // ========================================================================

    /// Immediate-or-cancel limit buy
    pub async fn limit_order_ioc_buy(
        &self,
        client_order_id: &str,
        product_id: &str,
        base_size: Decimal,
        limit_price: Decimal,
        extra: Option<Params>,
    ) -> RestResult<CreateOrderResponse> {
        let config = OrderConfiguration::limit_ioc(base_size, limit_price);
        self.place(client_order_id, product_id, OrderSide::Buy, config, extra)
            .await
    }

    /// Immediate-or-cancel limit sell
    pub async fn limit_order_ioc_sell(
        &self,
        client_order_id: &str,
        product_id: &str,
        base_size: Decimal,
        limit_price: Decimal,
        extra: Option<Params>,
    ) -> RestResult<CreateOrderResponse> {
        let config = OrderConfiguration::limit_ioc(base_size, limit_price);
        self.place(client_order_id, product_id, OrderSide::Sell, config, extra)
            .await
    }

    /// Good-till-cancelled limit buy
    pub async fn limit_order_gtc_buy(
        &self,
        client_order_id: &str,
        product_id: &str,
        base_size: Decimal,
        limit_price: Decimal,
        post_only: bool,
        extra: Option<Params>,
    ) -> RestResult<CreateOrderResponse> {
        let config = OrderConfiguration::limit_gtc(base_size, limit_price, post_only);
        self.place(client_order_id, product_id, OrderSide::Buy, config, extra)
            .await
    }

    /// Good-till-cancelled limit sell
    pub async fn limit_order_gtc_sell(
        &self,
        client_order_id: &str,
        product_id: &str,
        base_size: Decimal,
        limit_price: Decimal,
        post_only: bool,
        extra: Option<Params>,
    ) -> RestResult<CreateOrderResponse> {
        let config = OrderConfiguration::limit_gtc(base_size, limit_price, post_only);
        self.place(client_order_id, product_id, OrderSide::Sell, config, extra)
            .await
    }

    /// Good-till-date limit buy; `end_time` is RFC 3339
    #[allow(clippy::too_many_arguments)]
    pub async fn limit_order_gtd_buy(
        &self,
        client_order_id: &str,
        product_id: &str,
        base_size: Decimal,
        limit_price: Decimal,
        end_time: &str,
        post_only: bool,
        extra: Option<Params>,
    ) -> RestResult<CreateOrderResponse> {
        let config = OrderConfiguration::limit_gtd(base_size, limit_price, end_time, post_only);
        self.place(client_order_id, product_id, OrderSide::Buy, config, extra)
            .await
    }

    /// Good-till-date limit sell; `end_time` is RFC 3339
    #[allow(clippy::too_many_arguments)]
    pub async fn limit_order_gtd_sell(
        &self,
        client_order_id: &str,
        product_id: &str,
        base_size: Decimal,
        limit_price: Decimal,
        end_time: &str,
        post_only: bool,
        extra: Option<Params>,
    ) -> RestResult<CreateOrderResponse> {
        let config = OrderConfiguration::limit_gtd(base_size, limit_price, end_time, post_only);
        self.place(client_order_id, product_id, OrderSide::Sell, config, extra)
            .await
    }

    // ========================================================================
    // Stop limit orders
    // ========================================================================

    /// Good-till-cancelled stop limit buy
    #[allow(clippy::too_many_arguments)]
    pub async fn stop_limit_order_gtc_buy(
        &self,
        client_order_id: &str,
        product_id: &str,
        base_size: Decimal,
        limit_price: Decimal,
        stop_price: Decimal,
        stop_direction: StopDirection,
        extra: Option<Params>,
    ) -> RestResult<CreateOrderResponse> {
        let config =
            OrderConfiguration::stop_limit_gtc(base_size, limit_price, stop_price, stop_direction);
        self.place(client_order_id, product_id, OrderSide::Buy, config, extra)
            .await
    }

    /// Good-till-cancelled stop limit sell
    #[allow(clippy::too_many_arguments)]
    pub async fn stop_limit_order_gtc_sell(
        &self,
        client_order_id: &str,
        product_id: &str,
        base_size: Decimal,
        limit_price: Decimal,
        stop_price: Decimal,
        stop_direction: StopDirection,
        extra: Option<Params>,
    ) -> RestResult<CreateOrderResponse> {
        let config =
            OrderConfiguration::stop_limit_gtc(base_size, limit_price, stop_price, stop_direction);
        self.place(client_order_id, product_id, OrderSide::Sell, config, extra)
            .await
    }

    /// Good-till-date stop limit buy
    #[allow(clippy::too_many_arguments)]
    pub async fn stop_limit_order_gtd_buy(
        &self,
        client_order_id: &str,
        product_id: &str,
        base_size: Decimal,
        limit_price: Decimal,
        stop_price: Decimal,
        end_time: &str,
        stop_direction: StopDirection,
        extra: Option<Params>,
    ) -> RestResult<CreateOrderResponse> {
        let config = OrderConfiguration::stop_limit_gtd(
            base_size,
            limit_price,
            stop_price,
            end_time,
            stop_direction,
        );
        self.place(client_order_id, product_id, OrderSide::Buy, config, extra)
            .await
    }

    /// Good-till-date stop limit sell
    #[allow(clippy::too_many_arguments)]
    pub async fn stop_limit_order_gtd_sell(
        &self,
        client_order_id: &str,
        product_id: &str,
        base_size: Decimal,
        limit_price: Decimal,
        stop_price: Decimal,
        end_time: &str,
        stop_direction: StopDirection,
        extra: Option<Params>,
    ) -> RestResult<CreateOrderResponse> {
        let config = OrderConfiguration::stop_limit_gtd(
            base_size,
            limit_price,
            stop_price,
            end_time,
            stop_direction,
        );
        self.place(client_order_id, product_id, OrderSide::Sell, config, extra)
            .await
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Get a single order
    #[instrument(skip(self, extra))]
    pub async fn get_order(&self, order_id: &str, extra: Option<Params>) -> RestResult<Value> {
        let path = brokerage_path(&format!("/orders/historical/{}", order_id));
        self.client.get(&path, Params::new(), extra).await
    }

    /// List historical orders
    #[instrument(skip(self, query, extra))]
    pub async fn list_orders(
        &self,
        query: &ListOrdersQuery,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let params = Params::from_serialize(query)?;
        self.client
            .get(&brokerage_path("/orders/historical/batch"), params, extra)
            .await
    }

    /// List fills
    #[instrument(skip(self, query, extra))]
    pub async fn get_fills(&self, query: &FillsQuery, extra: Option<Params>) -> RestResult<Value> {
        let params = Params::from_serialize(query)?;
        self.client
            .get(&brokerage_path("/orders/historical/fills"), params, extra)
            .await
    }

    // ========================================================================
    // Edit / cancel
    // ========================================================================

    /// Change the size or price of an open GTC order
    #[instrument(skip(self, extra))]
    pub async fn edit_order(
        &self,
        order_id: &str,
        size: Option<Decimal>,
        price: Option<Decimal>,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        self.client
            .post(&brokerage_path("/orders/edit"), edit_params(order_id, size, price), extra)
            .await
    }

    /// Simulate an order edit
    #[instrument(skip(self, extra))]
    pub async fn preview_edit_order(
        &self,
        order_id: &str,
        size: Option<Decimal>,
        price: Option<Decimal>,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        self.client
            .post(
                &brokerage_path("/orders/edit_preview"),
                edit_params(order_id, size, price),
                extra,
            )
            .await
    }

    /// Cancel several orders
    #[instrument(skip(self, extra))]
    pub async fn cancel_orders(
        &self,
        order_ids: &[&str],
        extra: Option<Params>,
    ) -> RestResult<CancelOrdersResponse> {
        let body = Params::new().with("order_ids", order_ids);
        self.client
            .post(&brokerage_path("/orders/batch_cancel"), body, extra)
            .await
    }

    /// Simulate an order without placing it
    #[allow(clippy::too_many_arguments)]
    #[instrument(skip(self, order_configuration, extra))]
    pub async fn preview_order(
        &self,
        product_id: &str,
        side: OrderSide,
        order_configuration: &OrderConfiguration,
        leverage: Option<&str>,
        margin_type: Option<&str>,
        retail_portfolio_id: Option<&str>,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let configuration = serde_json::to_value(order_configuration)
            .map_err(|e| RestError::InvalidParameter(e.to_string()))?;

        let body = Params::new()
            .with("product_id", product_id)
            .with("side", side.to_string())
            .with("order_configuration", configuration)
            .with_opt("leverage", leverage)
            .with_opt("margin_type", margin_type)
            .with_opt("retail_portfolio_id", retail_portfolio_id);

        self.client
            .post(&brokerage_path("/orders/preview"), body, extra)
            .await
    }

    /// Close an open futures position with a market order
    #[instrument(skip(self, extra))]
    pub async fn close_position(
        &self,
        client_order_id: &str,
        product_id: &str,
        size: Option<Decimal>,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let body = Params::new()
            .with("client_order_id", client_order_id)
            .with("product_id", product_id)
            .with_opt("size", size.map(|s| s.to_string()));

        self.client
            .post(&brokerage_path("/orders/close_position"), body, extra)
            .await
    }
}

fn edit_params(order_id: &str, size: Option<Decimal>, price: Option<Decimal>) -> Params {
    Params::new()
        .with("order_id", order_id)
        .with_opt("size", size.map(|s| s.to_string()))
        .with_opt("price", price.map(|p| p.to_string()))
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::mock_client;
    use crate::params::Params;
    use crate::types::{ListOrdersQuery, OrderConfiguration, OrderRequest, OrderSide, StopDirection};
    use reqwest::{Method, StatusCode};
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_order_body() {
        let (client, transport) = mock_client();
        transport.push_response(
            StatusCode::OK,
            r#"{"success":true,"success_response":{"order_id":"o-1","product_id":"BTC-USD","side":"BUY","client_order_id":"c-1"}}"#,
        );

        let order = OrderRequest::new(
            "c-1",
            "BTC-USD",
            OrderSide::Buy,
            OrderConfiguration::limit_gtc(dec!(0.01), dec!(50000), true),
        )
        .with_portfolio("p-1");

        let response = client.orders().create_order(&order, None).await.unwrap();
        assert_eq!(response.order_id(), Some("o-1"));

        let request = transport.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url.path(), "/api/v3/brokerage/orders");
        assert_eq!(
            request.json(),
            json!({
                "client_order_id": "c-1",
                "product_id": "BTC-USD",
                "side": "BUY",
                "order_configuration": {
                    "limit_limit_gtc": {"base_size": "0.01", "limit_price": "50000", "post_only": true}
                },
                "retail_portfolio_id": "p-1"
            })
        );
    }

    #[tokio::test]
    async fn test_market_order_buy() {
        let (client, transport) = mock_client();
        client
            .orders()
            .market_order_buy("c-2", "ETH-USD", dec!(25), None)
            .await
            .unwrap();

        let body = transport.last_request().json();
        assert_eq!(body["side"], "BUY");
        assert_eq!(body["order_configuration"], json!({"market_market_ioc": {"quote_size": "25"}}));
    }

    #[tokio::test]
    async fn test_stop_limit_sell_with_extra() {
        let (client, transport) = mock_client();
        client
            .orders()
            .stop_limit_order_gtc_sell(
                "c-3",
                "BTC-USD",
                dec!(1),
                dec!(29000),
                dec!(30000),
                StopDirection::StopDown,
                Some(Params::new().with("self_trade_prevention_id", "stp")),
            )
            .await
            .unwrap();

        let body = transport.last_request().json();
        assert_eq!(body["side"], "SELL");
        assert_eq!(body["self_trade_prevention_id"], "stp");
        assert_eq!(
            body["order_configuration"]["stop_limit_stop_limit_gtc"]["stop_price"],
            "30000"
        );
    }

    #[tokio::test]
    async fn test_list_orders_query() {
        let (client, transport) = mock_client();
        let query = ListOrdersQuery {
            product_id: Some("BTC-USD".into()),
            order_status: Some(vec!["OPEN".into(), "FILLED".into()]),
            order_side: Some(OrderSide::Sell),
            limit: Some(10),
            ..Default::default()
        };

        client.orders().list_orders(&query, None).await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.url.path(), "/api/v3/brokerage/orders/historical/batch");
        assert_eq!(
            request.query(),
            Some("product_id=BTC-USD&order_status=OPEN&order_status=FILLED&limit=10&order_side=SELL")
        );
    }

    #[tokio::test]
    async fn test_edit_order() {
        let (client, transport) = mock_client();
        client
            .orders()
            .edit_order("o-1", None, Some(dec!(51000)), None)
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.url.path(), "/api/v3/brokerage/orders/edit");
        assert_eq!(request.json(), json!({"order_id": "o-1", "price": "51000"}));
    }

    #[tokio::test]
    async fn test_cancel_orders() {
        let (client, transport) = mock_client();
        transport.push_response(
            StatusCode::OK,
            r#"{"results":[{"success":true,"order_id":"o-1"},{"success":false,"failure_reason":"UNKNOWN_CANCEL_ORDER","order_id":"o-2"}]}"#,
        );

        let response = client
            .orders()
            .cancel_orders(&["o-1", "o-2"], None)
            .await
            .unwrap();

        assert_eq!(
            transport.last_request().json(),
            json!({"order_ids": ["o-1", "o-2"]})
        );
        assert!(response.results[0].success);
        assert_eq!(
            response.results[1].failure_reason.as_deref(),
            Some("UNKNOWN_CANCEL_ORDER")
        );
    }

    #[tokio::test]
    async fn test_preview_order_has_no_client_order_id() {
        let (client, transport) = mock_client();
        client
            .orders()
            .preview_order(
                "BTC-USD",
                OrderSide::Buy,
                &OrderConfiguration::market_quote(dec!(10)),
                None,
                None,
                None,
                None,
            )
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.url.path(), "/api/v3/brokerage/orders/preview");
        assert_eq!(
            request.json(),
            json!({
                "product_id": "BTC-USD",
                "side": "BUY",
                "order_configuration": {"market_market_ioc": {"quote_size": "10"}}
            })
        );
    }

    #[tokio::test]
    async fn test_close_position() {
        let (client, transport) = mock_client();
        client
            .orders()
            .close_position("c-4", "BIT-28JUL23-CDE", Some(dec!(2)), None)
            .await
            .unwrap();

        assert_eq!(
            transport.last_request().json(),
            json!({"client_order_id": "c-4", "product_id": "BIT-28JUL23-CDE", "size": "2"})
        );
    }
}
