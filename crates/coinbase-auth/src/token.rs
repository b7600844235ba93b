//! Per-request JWT signing
//!
//! Every REST call is authenticated with a fresh ES256 JWT sent as a bearer
//! token. The token binds the request method, host and path through the
//! `uri` claim and is only valid for two minutes:
//!
//! ```text
//! header  {"alg":"ES256","typ":"JWT","kid":<key name>,"nonce":<random hex>}
//! claims  {"sub":<key name>,"iss":"cdp","nbf":<now>,"exp":<now + 120>,
//!          "uri":"GET api.coinbase.com/api/v3/brokerage/accounts"}
//! ```

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use p256::ecdsa::{signature::Signer, Signature, SigningKey};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::credentials::Credentials;
use crate::error::{AuthError, AuthResult};

/// Host every REST request is signed for
pub const API_HOST: &str = "api.coinbase.com";

/// Issuer claim expected by the exchange
pub const TOKEN_ISSUER: &str = "cdp";

/// Token lifetime in seconds
pub const TOKEN_TTL_SECS: i64 = 120;

#[derive(Debug, Serialize)]
struct TokenHeader<'a> {
    alg: &'static str,
    typ: &'static str,
    kid: &'a str,
    nonce: &'a str,
}

/// Claims carried by a request token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenClaims {
    /// API key name
    pub sub: String,
    /// Always [`TOKEN_ISSUER`]
    pub iss: String,
    /// Not valid before (unix seconds)
    pub nbf: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
    /// `"<METHOD> <host><path>"`, absent for WebSocket tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// A signed JWT ready to be sent
#[derive(Debug, Clone)]
pub struct SignedToken {
    token: String,
    expires_at: i64,
}

impl SignedToken {
    /// The compact JWT
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Expiry as unix seconds
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Format the `uri` claim for a request
pub fn format_uri(method: &str, host: &str, path: &str) -> String {
    format!("{} {}{}", method.to_ascii_uppercase(), host, path)
}

/// Builds request tokens from a set of credentials
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer
    pub fn new(credentials: &'a Credentials) -> Self {
        Self { credentials }
    }

    /// Get the API key name
    pub fn key_id(&self) -> &str {
        self.credentials.key_id()
    }

    /// Sign a REST request issued now
    #[instrument(skip(self), fields(key_id = %self.key_id()))]
    pub fn sign_request(&self, method: &str, host: &str, path: &str) -> AuthResult<SignedToken> {
        let uri = format_uri(method, host, path);
        self.sign_at(Some(&uri), chrono::Utc::now().timestamp(), &generate_nonce())
    }

    /// Sign a token for the WebSocket feed, which carries no `uri` claim
    pub fn sign_websocket(&self) -> AuthResult<SignedToken> {
        self.sign_at(None, chrono::Utc::now().timestamp(), &generate_nonce())
    }

    /// Sign with an explicit issue time and nonce
    ///
    /// Identical inputs produce identical tokens: ECDSA signatures use
    /// RFC 6979 deterministic nonces.
    pub fn sign_at(&self, uri: Option<&str>, issued_at: i64, nonce: &str) -> AuthResult<SignedToken> {
        let signing_key = self.credentials.signing_key()?;

        let header = TokenHeader {
            alg: "ES256",
            typ: "JWT",
            kid: self.key_id(),
            nonce,
        };
        let claims = TokenClaims {
            sub: self.key_id().to_string(),
            iss: TOKEN_ISSUER.to_string(),
            nbf: issued_at,
            exp: issued_at + TOKEN_TTL_SECS,
            uri: uri.map(str::to_string),
        };

        let token = encode_jwt(&signing_key, &header, &claims)?;
        debug!(uri = ?claims.uri, exp = claims.exp, "Signed request token");

        Ok(SignedToken {
            token,
            expires_at: claims.exp,
        })
    }
}

/// Random 32-byte nonce, hex encoded
pub fn generate_nonce() -> String {
    hex::encode(rand::random::<[u8; 32]>())
}

fn encode_jwt(
    signing_key: &SigningKey,
    header: &TokenHeader<'_>,
    claims: &TokenClaims,
) -> AuthResult<String> {
    let header = serde_json::to_vec(header)
        .map_err(|e| AuthError::InvalidCredentials(format!("unencodable token header: {}", e)))?;
    let claims = serde_json::to_vec(claims)
        .map_err(|e| AuthError::InvalidCredentials(format!("unencodable token claims: {}", e)))?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header),
        URL_SAFE_NO_PAD.encode(claims)
    );
    let signature: Signature = signing_key.sign(signing_input.as_bytes());

    Ok(format!(
        "{}.{}",
        signing_input,
        URL_SAFE_NO_PAD.encode(signature.to_bytes())
    ))
}
