//! API key information

use super::brokerage_path;
use crate::client::RestClient;
use crate::error::RestResult;
use crate::params::Params;
use crate::types::KeyPermissions;
use tracing::instrument;

/// Endpoints describing the API key itself
pub struct DataEndpoints<'a> {
    client: &'a RestClient,
}

impl<'a> DataEndpoints<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    /// Get the permissions granted to the signing key
    #[instrument(skip(self, extra))]
    pub async fn get_api_key_permissions(
        &self,
        extra: Option<Params>,
    ) -> RestResult<KeyPermissions> {
        self.client
            .get(&brokerage_path("/key_permissions"), Params::new(), extra)
            .await
    }
}
