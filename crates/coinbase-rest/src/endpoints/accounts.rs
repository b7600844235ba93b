//! Account endpoints

use super::brokerage_path;
use crate::client::RestClient;
use crate::error::RestResult;
use crate::params::Params;
use crate::types::{GetAccountResponse, ListAccountsResponse};
use tracing::instrument;

/// Brokerage account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a RestClient,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    /// List accounts
    ///
    /// # Arguments
    /// * `limit` - Page size (default 49, max 250)
    /// * `cursor` - Cursor from a previous page
    /// * `retail_portfolio_id` - Only accounts in this portfolio
    #[instrument(skip(self, extra))]
    pub async fn get_accounts(
        &self,
        limit: Option<u32>,
        cursor: Option<&str>,
        retail_portfolio_id: Option<&str>,
        extra: Option<Params>,
    ) -> RestResult<ListAccountsResponse> {
        let params = Params::new()
            .with_opt("limit", limit)
            .with_opt("cursor", cursor)
            .with_opt("retail_portfolio_id", retail_portfolio_id);

        self.client
            .get(&brokerage_path("/accounts"), params, extra)
            .await
    }

    /// Get a single account by UUID
    #[instrument(skip(self, extra))]
    pub async fn get_account(
        &self,
        account_uuid: &str,
        extra: Option<Params>,
    ) -> RestResult<GetAccountResponse> {
        let path = brokerage_path(&format!("/accounts/{}", account_uuid));
        self.client.get(&path, Params::new(), extra).await
    }
}
