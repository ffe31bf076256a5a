use crate::shared::config::{parsed_or, required, ConfigError};

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub access_token_expiry: i64,       // Expiration in seconds
    pub verification_token_expiry: i64, // Expiration in seconds
}

impl JwtConfig {
    /// Load JWT configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret_key = required("JWT_SECRET")?;

        // HS256 needs at least 32 bytes of key material
        if secret_key.len() < 32 {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                value: "<shorter than 32 characters>".to_string(),
            });
        }

        let access_token_expiry = parsed_or::<i64>("JWT_ACCESS_EXPIRY", 1800)?;
        let verification_token_expiry = parsed_or::<i64>("JWT_VERIFICATION_EXPIRY", 86400)?;

        if access_token_expiry <= 0 || access_token_expiry > 86400 {
            return Err(ConfigError::Invalid {
                key: "JWT_ACCESS_EXPIRY",
                value: access_token_expiry.to_string(),
            });
        }

        if verification_token_expiry <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_VERIFICATION_EXPIRY",
                value: verification_token_expiry.to_string(),
            });
        }

        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| "users_api".to_string());

        Ok(Self {
            secret_key,
            issuer,
            access_token_expiry,
            verification_token_expiry,
        })
    }
}
