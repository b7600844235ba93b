//! Currency conversion endpoints

use super::brokerage_path;
use crate::client::RestClient;
use crate::error::RestResult;
use crate::params::Params;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::instrument;

/// Conversion endpoints (e.g. USD to USDC)
pub struct ConvertEndpoints<'a> {
    client: &'a RestClient,
}

impl<'a> ConvertEndpoints<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    /// Request a conversion quote between two accounts
    ///
    /// `trade_incentive_metadata` is only sent when an incentive ID or code
    /// is given.
    #[instrument(skip(self, extra))]
    pub async fn create_convert_quote(
        &self,
        from_account: &str,
        to_account: &str,
        amount: Decimal,
        user_incentive_id: Option<&str>,
        code_val: Option<&str>,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let mut body = Params::new()
            .with("from_account", from_account)
            .with("to_account", to_account)
            .with("amount", amount.to_string());

        let mut incentive = Map::new();
        if let Some(id) = user_incentive_id {
            incentive.insert("user_incentive_id".into(), id.into());
        }
        if let Some(code) = code_val {
            incentive.insert("code_val".into(), code.into());
        }
        if !incentive.is_empty() {
            body.insert("trade_incentive_metadata", incentive);
        }

        self.client
            .post(&brokerage_path("/convert/quote"), body, extra)
            .await
    }

    /// Get a conversion trade
    #[instrument(skip(self, extra))]
    pub async fn get_convert_trade(
        &self,
        trade_id: &str,
        from_account: &str,
        to_account: &str,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let path = brokerage_path(&format!("/convert/trade/{}", trade_id));
        self.client
            .get(&path, account_pair(from_account, to_account), extra)
            .await
    }

    /// Commit a quoted conversion
    #[instrument(skip(self, extra))]
    pub async fn commit_convert_trade(
        &self,
        trade_id: &str,
        from_account: &str,
        to_account: &str,
        extra: Option<Params>,
    ) -> RestResult<Value> {
        let path = brokerage_path(&format!("/convert/trade/{}", trade_id));
        self.client
            .post(&path, account_pair(from_account, to_account), extra)
            .await
    }
}

fn account_pair(from_account: &str, to_account: &str) -> Params {
    Params::new()
        .with("from_account", from_account)
        .with("to_account", to_account)
}
