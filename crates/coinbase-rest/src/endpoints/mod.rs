//! API endpoint implementations
//!
//! Each group borrows the [`RestClient`](crate::RestClient) and maps named
//! arguments onto a fixed path. Every operation also takes an optional
//! [`Params`](crate::Params) of extra options which is appended to the query
//! string (GET, DELETE) or the JSON body (POST, PUT) unchanged.

pub mod accounts;
pub mod convert;
pub mod data;
pub mod fees;
pub mod futures;
pub mod orders;
pub mod payments;
pub mod perpetuals;
pub mod portfolios;
pub mod products;
pub mod public;

pub use accounts::AccountEndpoints;
pub use convert::ConvertEndpoints;
pub use data::DataEndpoints;
pub use fees::FeeEndpoints;
pub use futures::FuturesEndpoints;
pub use orders::OrderEndpoints;
pub use payments::PaymentEndpoints;
pub use perpetuals::PerpetualsEndpoints;
pub use portfolios::PortfolioEndpoints;
pub use products::ProductEndpoints;
pub use public::PublicEndpoints;

use crate::client::API_PREFIX;

/// Full path of a brokerage resource
pub(crate) fn brokerage_path(resource: &str) -> String {
    format!("{}{}", API_PREFIX, resource)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brokerage_path() {
        assert_eq!(brokerage_path("/accounts"), "/api/v3/brokerage/accounts");
        assert_eq!(
            brokerage_path("/orders/historical/batch"),
            "/api/v3/brokerage/orders/historical/batch"
        );
    }
}
