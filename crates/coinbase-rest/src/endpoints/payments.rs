//! Payment method endpoints

use super::brokerage_path;
use crate::client::RestClient;
use crate::error::RestResult;
use crate::params::Params;
use crate::types::{GetPaymentMethodResponse, ListPaymentMethodsResponse};
use tracing::instrument;

/// Linked payment method endpoints
pub struct PaymentEndpoints<'a> {
    client: &'a RestClient,
}

impl<'a> PaymentEndpoints<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    /// List payment methods
    #[instrument(skip(self, extra))]
    pub async fn list_payment_methods(
        &self,
        extra: Option<Params>,
    ) -> RestResult<ListPaymentMethodsResponse> {
        self.client
            .get(&brokerage_path("/payment_methods"), Params::new(), extra)
            .await
    }

    /// Get one payment method
    #[instrument(skip(self, extra))]
    pub async fn get_payment_method(
        &self,
        payment_method_id: &str,
        extra: Option<Params>,
    ) -> RestResult<GetPaymentMethodResponse> {
        let path = brokerage_path(&format!("/payment_methods/{}", payment_method_id));
        self.client.get(&path, Params::new(), extra).await
    }
}
