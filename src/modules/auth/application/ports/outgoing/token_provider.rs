use serde::{Deserialize, Serialize};

use crate::auth::application::domain::Role;

pub const ACCESS_TOKEN: &str = "access";
pub const VERIFICATION_TOKEN: &str = "verification";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("Token is not yet valid")]
    TokenNotYetValid,

    #[error("Invalid token type, expected: {0}")]
    InvalidTokenType(String),

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token encoding error: {0}")]
    EncodingError(String),
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: i64,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub token_type: String, // "access" or "verification"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

pub trait TokenProvider: Send + Sync {
    fn generate_access_token(&self, user_id: i64, role: Role) -> Result<String, TokenError>;
    fn generate_verification_token(&self, user_id: i64) -> Result<String, TokenError>;
    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError>;
    fn verify_verification_token(&self, token: &str) -> Result<i64, TokenError>;
    /// Lifetime of access tokens in seconds.
    fn access_token_ttl(&self) -> i64;
}
