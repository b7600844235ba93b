//! International perpetuals (INTX) endpoints

use super::brokerage_path;
use crate::client::RestClient;
use crate::error::RestResult;
use crate::params::Params;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::instrument;

/// Perpetual futures portfolio endpoints
pub struct PerpetualsEndpoints<'a> {
    client: &'a RestClient,
}

impl<'a> PerpetualsEndpoints<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    /// Allocate funds to an isolated position
    #[instrument(skip(self, extra))]
    pub async fn allocate_portfolio(
        &self,
        portfolio_uuid: &str,
        symbol: &str,
        amount: Decimal,
        currency: &str,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let body = Params::new()
            .with("portfolio_uuid", portfolio_uuid)
            .with("symbol", symbol)
            .with("amount", amount.to_string())
            .with("currency", currency);

        self.client
            .post(&brokerage_path("/intx/allocate"), body, extra)
            .await
    }

    /// Get the portfolio summary
    #[instrument(skip(self, extra))]
    pub async fn get_perps_portfolio_summary(
        &self,
        portfolio_uuid: &str,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let path = brokerage_path(&format!("/intx/portfolio/{}", portfolio_uuid));
        self.client.get(&path, Params::new(), extra).await
    }

    /// List open positions
    #[instrument(skip(self, extra))]
    pub async fn list_perps_positions(
        &self,
        portfolio_uuid: &str,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let path = brokerage_path(&format!("/intx/positions/{}", portfolio_uuid));
        self.client.get(&path, Params::new(), extra).await
    }

    /// Get the position in one symbol
    #[instrument(skip(self, extra))]
    pub async fn get_perps_position(
        &self,
        portfolio_uuid: &str,
        symbol: &str,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let path = brokerage_path(&format!("/intx/positions/{}/{}", portfolio_uuid, symbol));
        self.client.get(&path, Params::new(), extra).await
    }

    /// Get asset balances of the portfolio
    #[instrument(skip(self, extra))]
    pub async fn get_perps_portfolio_balances(
        &self,
        portfolio_uuid: &str,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let path = brokerage_path(&format!("/intx/balances/{}", portfolio_uuid));
        self.client.get(&path, Params::new(), extra).await
    }

    /// Enable or disable multi-asset collateral
    #[instrument(skip(self, extra))]
    pub async fn opt_in_or_out_multi_asset_collateral(
        &self,
        portfolio_uuid: &str,
        multi_asset_collateral_enabled: bool,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let body = Params::new()
            .with("portfolio_uuid", portfolio_uuid)
            .with("multi_asset_collateral_enabled", multi_asset_collateral_enabled);

        self.client
            .post(&brokerage_path("/intx/multi_asset_collateral"), body, extra)
            .await
    }
}
