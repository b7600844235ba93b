//! US derivatives (CFM) endpoints
//!
//! Futures balances, positions, USD sweeps and intraday margin settings.

use super::brokerage_path;
use crate::client::RestClient;
use crate::error::RestResult;
use crate::params::Params;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::instrument;

/// Futures endpoints
pub struct FuturesEndpoints<'a> {
    client: &'a RestClient,
}

impl<'a> FuturesEndpoints<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    /// Get the futures balance summary
    #[instrument(skip(self, extra))]
    pub async fn get_futures_balance_summary(&self, extra: Option<Params>) -> RestResult<Value> {
        self.client
            .get(&brokerage_path("/cfm/balance_summary"), Params::new(), extra)
            .await
    }

    /// List open futures positions
    #[instrument(skip(self, extra))]
    pub async fn list_futures_positions(&self, extra: Option<Params>) -> RestResult<Value> {
        self.client
            .get(&brokerage_path("/cfm/positions"), Params::new(), extra)
            .await
    }

    /// Get the position for one futures product
    #[instrument(skip(self, extra))]
    pub async fn get_futures_position(
        &self,
        product_id: &str,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let path = brokerage_path(&format!("/cfm/positions/{}", product_id));
        self.client.get(&path, Params::new(), extra).await
    }

    /// Schedule a sweep of USD from the futures account to spot
    #[instrument(skip(self, extra))]
    pub async fn schedule_futures_sweep(
        &self,
        usd_amount: Decimal,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let body = Params::new().with("usd_amount", usd_amount.to_string());
        self.client
            .post(&brokerage_path("/cfm/sweeps/schedule"), body, extra)
            .await
    }

    /// List pending and processing sweeps
    #[instrument(skip(self, extra))]
    pub async fn list_futures_sweeps(&self, extra: Option<Params>) -> RestResult<Value> {
        self.client
            .get(&brokerage_path("/cfm/sweeps"), Params::new(), extra)
            .await
    }

    /// Cancel the pending sweep
    #[instrument(skip(self, extra))]
    pub async fn cancel_pending_futures_sweep(&self, extra: Option<Params>) -> RestResult<Value> {
        self.client
            .delete(&brokerage_path("/cfm/sweeps"), Params::new(), extra)
            .await
    }

    /// Get the intraday margin setting
    #[instrument(skip(self, extra))]
    pub async fn get_intraday_margin_setting(&self, extra: Option<Params>) -> RestResult<Value> {
        self.client
            .get(
                &brokerage_path("/cfm/intraday/margin_setting"),
                Params::new(),
                extra,
            )
            .await
    }

    /// Set the intraday margin setting
    ///
    /// `setting` is `INTRADAY_MARGIN_SETTING_STANDARD` or
    /// `INTRADAY_MARGIN_SETTING_INTRADAY`.
    #[instrument(skip(self, extra))]
    pub async fn set_intraday_margin_setting(
        &self,
        setting: &str,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let body = Params::new().with("setting", setting);
        self.client
            .post(&brokerage_path("/cfm/intraday/margin_setting"), body, extra)
            .await
    }

    /// Get the current margin window
    #[instrument(skip(self, extra))]
    pub async fn get_current_margin_window(
        &self,
        margin_profile_type: &str,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let params = Params::new().with("margin_profile_type", margin_profile_type);
        self.client
            .get(
                &brokerage_path("/cfm/intraday/current_margin_window"),
                params,
                extra,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::mock_client;
    use reqwest::Method;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[tokio::test]
    async fn test_schedule_sweep() {
        let (client, transport) = mock_client();
        client
            .futures()
            .schedule_futures_sweep(dec!(5), None)
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.url.path(), "/api/v3/brokerage/cfm/sweeps/schedule");
        assert_eq!(request.json(), json!({"usd_amount": "5"}));
    }

    #[tokio::test]
    async fn test_cancel_sweep_uses_delete() {
        let (client, transport) = mock_client();
        client
            .futures()
            .cancel_pending_futures_sweep(None)
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.url.path(), "/api/v3/brokerage/cfm/sweeps");
    }

    #[tokio::test]
    async fn test_position_and_margin_window() {
        let (client, transport) = mock_client();

        client
            .futures()
            .get_futures_position("BIT-28JUL23-CDE", None)
            .await
            .unwrap();
        assert_eq!(
            transport.last_request().url.path(),
            "/api/v3/brokerage/cfm/positions/BIT-28JUL23-CDE"
        );

        client
            .futures()
            .get_current_margin_window("MARGIN_PROFILE_TYPE_RETAIL_REGULAR", None)
            .await
            .unwrap();
        assert_eq!(
            transport.last_request().query(),
            Some("margin_profile_type=MARGIN_PROFILE_TYPE_RETAIL_REGULAR")
        );
    }
}
