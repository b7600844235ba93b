//! Fee endpoints

use super::brokerage_path;
use crate::client::RestClient;
use crate::error::RestResult;
use crate::params::Params;
use crate::types::TransactionSummary;
use tracing::instrument;

/// Fee endpoints
pub struct FeeEndpoints<'a> {
    client: &'a RestClient,
}

impl<'a> FeeEndpoints<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    /// Get the fee tier, 30-day volume and fees paid
    ///
    /// # Arguments
    /// * `product_type` - `SPOT` or `FUTURE`
    /// * `contract_expiry_type` - `EXPIRING` or `PERPETUAL`
    /// * `product_venue` - `CBE`, `FCM` or `INTX`
    #[instrument(skip(self, extra))]
    pub async fn get_transaction_summary(
        &self,
        product_type: Option<&str>,
        contract_expiry_type: Option<&str>,
        product_venue: Option<&str>,
        extra: Option<Params>,
    ) -> RestResult<TransactionSummary> {
        let params = Params::new()
            .with_opt("product_type", product_type)
            .with_opt("contract_expiry_type", contract_expiry_type)
            .with_opt("product_venue", product_venue);

        self.client
            .get(&brokerage_path("/transaction_summary"), params, extra)
            .await
    }
}
