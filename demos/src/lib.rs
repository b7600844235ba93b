//! Shared setup for the demo binaries

use coinbase_rest::{RestClient, RestResult};
use tracing_subscriber::EnvFilter;

/// Environment variable naming a CDP key file
pub const KEY_FILE_ENV: &str = "COINBASE_KEY_FILE";

/// Install a log subscriber controlled by `RUST_LOG` (default `info`)
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Build a client from `COINBASE_KEY_FILE`, falling back to
/// `COINBASE_API_KEY` / `COINBASE_API_SECRET`
pub fn client_from_env() -> RestResult<RestClient> {
    match std::env::var(KEY_FILE_ENV) {
        Ok(path) => RestClient::from_key_file(path),
        Err(_) => RestClient::from_env(),
    }
}
