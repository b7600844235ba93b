//! Credentials and request signing for the Coinbase Advanced Trade API
//!
//! This crate resolves API credentials (explicit key pair or JSON key file)
//! and signs the short-lived ES256 JWTs the exchange expects as bearer tokens.
//!
//! # Example
//!
//! ```no_run
//! use coinbase_auth::{Credentials, RequestSigner, API_HOST};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load the key file downloaded from the developer portal
//!     let creds = Credentials::from_key_file("cdp_api_key.json")?;
//!
//!     // Sign a token for a single request
//!     let token = RequestSigner::new(&creds)
//!         .sign_request("GET", API_HOST, "/api/v3/brokerage/accounts")?;
//!     println!("Authorization: {}", token.bearer());
//!
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;
mod token;

pub use credentials::{CredentialSource, Credentials, KeyFile, API_KEY_ENV, API_SECRET_ENV};
pub use error::{AuthError, AuthResult};
pub use token::{
    format_uri, generate_nonce, RequestSigner, SignedToken, TokenClaims, API_HOST, TOKEN_ISSUER,
    TOKEN_TTL_SECS,
};
