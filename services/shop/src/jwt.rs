//! JWT service for token issuance and verification
//!
//! Tokens are HS256 JWTs signed with a process-wide shared secret. They carry
//! the account id and expire exactly one hour after issuance. There is no
//! revocation list, refresh or rotation: a token is valid until it expires.

use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::error::ApiError;

/// Lifetime of an issued token in seconds
pub const TOKEN_TTL_SECS: u64 = 3600;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Shared secret used to sign and verify tokens
    pub secret: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Shared signing secret (required, must not be empty)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        if secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        Ok(JwtConfig { secret })
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account ID
    pub sub: i64,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: &JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issue a token for an account, valid for [`TOKEN_TTL_SECS`]
    pub fn issue(&self, user_id: i64) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(user_id, unix_now())
    }

    pub(crate) fn issue_at(
        &self,
        user_id: i64,
        issued_at: u64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: user_id,
            iat: issued_at,
            exp: issued_at + TOKEN_TTL_SECS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    /// Verify a token and return its claims
    ///
    /// Malformed, tampered, foreign and expired tokens are all reported as
    /// [`ApiError::InvalidToken`]; the cause only reaches the debug log.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Rejected token: {}", e);
                ApiError::InvalidToken
            })
    }
}

fn unix_now() -> u64 {
    // A clock before the epoch yields tokens that are already expired.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn service(secret: &str) -> JwtService {
        JwtService::new(&JwtConfig {
            secret: secret.to_string(),
        })
    }

    #[test]
    fn test_issued_token_verifies_to_same_account() {
        let jwt = service("test-secret");
        let token = jwt.issue(42).unwrap();

        let claims = jwt.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let jwt = service("test-secret");
        let token = format!("{}_wrong", jwt.issue(7).unwrap());

        assert!(matches!(jwt.verify(&token), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let token = service("other-secret").issue(7).unwrap();

        let result = service("test-secret").verify(&token);
        assert!(matches!(result, Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let jwt = service("test-secret");
        let issued_at = unix_now() - TOKEN_TTL_SECS - 1;
        let token = jwt.issue_at(7, issued_at).unwrap();

        assert!(matches!(jwt.verify(&token), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_empty_and_garbage_tokens_are_rejected() {
        let jwt = service("test-secret");

        assert!(matches!(jwt.verify(""), Err(ApiError::InvalidToken)));
        assert!(matches!(jwt.verify("fakeToken"), Err(ApiError::InvalidToken)));
    }

    #[test]
    #[serial]
    fn test_jwt_config_requires_secret() {
        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
        assert!(JwtConfig::from_env().is_err());

        unsafe {
            std::env::set_var("JWT_SECRET", "   ");
        }
        assert!(JwtConfig::from_env().is_err());

        unsafe {
            std::env::set_var("JWT_SECRET", "fake-store-key");
        }
        let config = JwtConfig::from_env().unwrap();
        assert_eq!(config.secret, "fake-store-key");

        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
    }
}
