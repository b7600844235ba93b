//! Portfolio endpoints

use super::brokerage_path;
use crate::client::RestClient;
use crate::error::RestResult;
use crate::params::Params;
use crate::types::{ListPortfoliosResponse, PortfolioResponse};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing::instrument;

/// Portfolio endpoints
pub struct PortfolioEndpoints<'a> {
    client: &'a RestClient,
}

impl<'a> PortfolioEndpoints<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    /// List portfolios, optionally of one type (`DEFAULT`, `CONSUMER`, `INTX`)
    #[instrument(skip(self, extra))]
    pub async fn get_portfolios(
        &self,
        portfolio_type: Option<&str>,
        extra: Option<Params>,
    ) -> RestResult<ListPortfoliosResponse> {
        let params = Params::new().with_opt("portfolio_type", portfolio_type);
        self.client
            .get(&brokerage_path("/portfolios"), params, extra)
            .await
    }

    /// Create a portfolio
    #[instrument(skip(self, extra))]
    pub async fn create_portfolio(
        &self,
        name: &str,
        extra: Option<Params>,
    ) -> RestResult<PortfolioResponse> {
        let body = Params::new().with("name", name);
        self.client
            .post(&brokerage_path("/portfolios"), body, extra)
            .await
    }

    /// Get balances and positions of a portfolio
    #[instrument(skip(self, extra))]
    pub async fn get_portfolio_breakdown(
        &self,
        portfolio_uuid: &str,
        currency: Option<&str>,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let path = brokerage_path(&format!("/portfolios/{}", portfolio_uuid));
        let params = Params::new().with_opt("currency", currency);
        self.client.get(&path, params, extra).await
    }

    /// Move funds between two portfolios
    #[instrument(skip(self, extra))]
    pub async fn move_portfolio_funds(
        &self,
        value: Decimal,
        currency: &str,
        source_portfolio_uuid: &str,
        target_portfolio_uuid: &str,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let body = Params::new()
            .with(
                "funds",
                json!({"value": value.to_string(), "currency": currency}),
            )
            .with("source_portfolio_uuid", source_portfolio_uuid)
            .with("target_portfolio_uuid", target_portfolio_uuid);

        self.client
            .post(&brokerage_path("/portfolios/move_funds"), body, extra)
            .await
    }

    /// Rename a portfolio
    #[instrument(skip(self, extra))]
    pub async fn edit_portfolio(
        &self,
        portfolio_uuid: &str,
        name: &str,
        extra: Option<Params>,
    ) -> RestResult<PortfolioResponse> {
        let path = brokerage_path(&format!("/portfolios/{}", portfolio_uuid));
        let body = Params::new().with("name", name);
        self.client.put(&path, body, extra).await
    }

    /// Delete a portfolio
    #[instrument(skip(self, extra))]
    pub async fn delete_portfolio(
        &self,
        portfolio_uuid: &str,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let path = brokerage_path(&format!("/portfolios/{}", portfolio_uuid));
        self.client.delete(&path, Params::new(), extra).await
    }
}
